//! CLI 명령 → 편집 이벤트 변환.

use anyhow::{anyhow, bail, Result};
use homelink_core::consent::ConsentChoice;
use homelink_core::models::preference::PreferenceKey;
use homelink_core::models::settings::IconType;
use homelink_settings::{FlagField, SettingsEvent, TextField};

/// `set <key> <value>` 명령을 이벤트 목록으로 변환
///
/// 크래시 리포트는 현재 값과 다를 때만 스위치를 탭하며,
/// 켜는 경우 `accept_consent`가 있어야 동의로 응답한다.
pub fn events_for_set(
    key_name: &str,
    value: &str,
    crash_reports_enabled: bool,
    accept_consent: bool,
) -> Result<Vec<SettingsEvent>> {
    let key = PreferenceKey::from_name(key_name).ok_or_else(|| {
        let known: Vec<&str> = PreferenceKey::ALL.iter().map(|k| k.as_str()).collect();
        anyhow!("알 수 없는 설정 키: {key_name} (사용 가능: {})", known.join(", "))
    })?;

    let events = match key {
        PreferenceKey::LocalUrl => vec![text(TextField::LocalUrl, value)],
        PreferenceKey::RemoteUrl => vec![text(TextField::RemoteUrl, value)],
        PreferenceKey::Username => vec![text(TextField::Username, value)],
        PreferenceKey::Password => vec![text(TextField::Password, value)],
        PreferenceKey::AlwaysSendCredentials => {
            vec![flag(FlagField::AlwaysSendCredentials, value)?]
        }
        PreferenceKey::IgnoreTlsValidation => vec![flag(FlagField::IgnoreTlsValidation, value)?],
        PreferenceKey::IdleScreenOff => vec![flag(FlagField::IdleScreenOff, value)?],
        PreferenceKey::RealTimeSliders => vec![flag(FlagField::RealTimeSliders, value)?],
        PreferenceKey::DemoMode => vec![SettingsEvent::ToggleDemoMode(parse_bool(value)?)],
        PreferenceKey::IconType => vec![SettingsEvent::SelectIconSegment(parse_icon(value)?)],
        PreferenceKey::SendCrashReports => {
            let wanted = parse_bool(value)?;
            if wanted == crash_reports_enabled {
                Vec::new()
            } else if !wanted {
                vec![SettingsEvent::CrashReportingTapped]
            } else {
                let choice = if accept_consent {
                    ConsentChoice::Activate
                } else {
                    ConsentChoice::Cancel
                };
                vec![
                    SettingsEvent::CrashReportingTapped,
                    SettingsEvent::ConsentChosen(choice),
                ]
            }
        }
    };

    Ok(events)
}

fn text(field: TextField, value: &str) -> SettingsEvent {
    SettingsEvent::EditText {
        field,
        value: value.to_string(),
    }
}

fn flag(field: FlagField, value: &str) -> Result<SettingsEvent> {
    Ok(SettingsEvent::SetFlag {
        field,
        enabled: parse_bool(value)?,
    })
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => bail!("불리언 값이 아님: {other}"),
    }
}

/// 아이콘 포맷 이름 또는 세그먼트 인덱스
///
/// 범위를 벗어난 정수는 그대로 넘겨 저장 시 기본 포맷이 되게 한다.
fn parse_icon(value: &str) -> Result<i64> {
    if let Some(icon) = IconType::ALL
        .iter()
        .find(|icon| icon.to_string().eq_ignore_ascii_case(value))
    {
        return Ok(icon.raw_value());
    }
    value
        .parse::<i64>()
        .map_err(|_| anyhow!("아이콘 포맷이 아님: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_keys_become_edits() {
        let events = events_for_set("localUrl", "http://a", false, false).unwrap();
        assert_eq!(
            events,
            vec![SettingsEvent::EditText {
                field: TextField::LocalUrl,
                value: "http://a".to_string()
            }]
        );
    }

    #[test]
    fn demo_mode_uses_toggle_event() {
        let events = events_for_set("demomode", "on", false, false).unwrap();
        assert_eq!(events, vec![SettingsEvent::ToggleDemoMode(true)]);
    }

    #[test]
    fn icon_names_and_indices() {
        assert_eq!(
            events_for_set("iconType", "SVG", false, false).unwrap(),
            vec![SettingsEvent::SelectIconSegment(1)]
        );
        assert_eq!(
            events_for_set("iconType", "7", false, false).unwrap(),
            vec![SettingsEvent::SelectIconSegment(7)]
        );
        assert!(events_for_set("iconType", "gif", false, false).is_err());
    }

    #[test]
    fn crash_reporting_requires_consent_to_enable() {
        assert_eq!(
            events_for_set("sendCrashReports", "true", false, false).unwrap(),
            vec![
                SettingsEvent::CrashReportingTapped,
                SettingsEvent::ConsentChosen(ConsentChoice::Cancel)
            ]
        );
        assert_eq!(
            events_for_set("sendCrashReports", "true", false, true).unwrap(),
            vec![
                SettingsEvent::CrashReportingTapped,
                SettingsEvent::ConsentChosen(ConsentChoice::Activate)
            ]
        );
    }

    #[test]
    fn crash_reporting_disable_and_noop() {
        assert_eq!(
            events_for_set("sendCrashReports", "false", true, false).unwrap(),
            vec![SettingsEvent::CrashReportingTapped]
        );
        assert!(events_for_set("sendCrashReports", "true", true, false)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_key_and_bad_bool() {
        assert!(events_for_set("theme", "dark", false, false).is_err());
        assert!(events_for_set("ignoreSSL", "maybe", false, false).is_err());
    }
}
