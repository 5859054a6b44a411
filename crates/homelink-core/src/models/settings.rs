//! 설정 레코드 모델.
//!
//! 설정 화면이 관리하는 단일 엔티티. 화면이 열릴 때 저장소에서 로드되고,
//! 명시적 저장 시에만 다시 기록된다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::preference::{PreferenceKey, PreferenceValue};

/// 아이콘 포맷 (원시값 = 세그먼트 인덱스)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    #[default]
    Png,
    Svg,
    Iconify,
}

impl IconType {
    /// 선언된 전체 변형
    pub const ALL: [IconType; 3] = [IconType::Png, IconType::Svg, IconType::Iconify];

    /// 저장소 원시값
    pub fn raw_value(&self) -> i64 {
        match self {
            IconType::Png => 0,
            IconType::Svg => 1,
            IconType::Iconify => 2,
        }
    }

    /// 원시값을 해석하고, 알 수 없는 값이면 기본 변형으로 대체
    pub fn from_raw_or_default(raw: i64) -> Self {
        Self::try_from(raw).unwrap_or_default()
    }
}

impl TryFrom<i64> for IconType {
    type Error = CoreError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(IconType::Png),
            1 => Ok(IconType::Svg),
            2 => Ok(IconType::Iconify),
            _ => Err(CoreError::DecodeDefault {
                key: PreferenceKey::IconType.as_str().to_string(),
                raw,
            }),
        }
    }
}

impl std::fmt::Display for IconType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconType::Png => write!(f, "png"),
            IconType::Svg => write!(f, "svg"),
            IconType::Iconify => write!(f, "iconify"),
        }
    }
}

/// 설정 레코드 — 모든 필드의 기본값은 타입 기본값(빈 문자열, false, Png)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// 로컬 서버 URL
    #[serde(default)]
    pub local_url: String,
    /// 원격 서버 URL
    #[serde(default)]
    pub remote_url: String,
    /// 사용자 이름
    #[serde(default)]
    pub username: String,
    /// 비밀번호
    #[serde(default)]
    pub password: String,
    /// 자격증명 항상 전송
    #[serde(default)]
    pub always_send_credentials: bool,
    /// TLS 인증서 검증 무시
    #[serde(default)]
    pub ignore_tls_validation: bool,
    /// 데모 모드 (시뮬레이션 데이터 사용)
    #[serde(default)]
    pub demo_mode: bool,
    /// 유휴 시 화면 꺼짐 방지
    #[serde(default)]
    pub idle_screen_off: bool,
    /// 아이콘 포맷
    #[serde(default)]
    pub icon_type: IconType,
    /// 슬라이더 실시간 전송
    #[serde(default)]
    pub real_time_sliders: bool,
    /// 크래시 리포트 전송
    #[serde(default)]
    pub send_crash_reports: bool,
}

impl SettingsRecord {
    /// 저장소에 기록할 (키, 값) 목록. 순서는 [`PreferenceKey::ALL`]과 같다.
    pub fn entries(&self) -> Vec<(PreferenceKey, PreferenceValue)> {
        PreferenceKey::ALL
            .iter()
            .map(|key| (*key, self.value_for(*key)))
            .collect()
    }

    /// 특정 키의 저장소 값
    pub fn value_for(&self, key: PreferenceKey) -> PreferenceValue {
        match key {
            PreferenceKey::LocalUrl => self.local_url.clone().into(),
            PreferenceKey::RemoteUrl => self.remote_url.clone().into(),
            PreferenceKey::Username => self.username.clone().into(),
            PreferenceKey::Password => self.password.clone().into(),
            PreferenceKey::AlwaysSendCredentials => self.always_send_credentials.into(),
            PreferenceKey::IgnoreTlsValidation => self.ignore_tls_validation.into(),
            PreferenceKey::DemoMode => self.demo_mode.into(),
            PreferenceKey::IdleScreenOff => self.idle_screen_off.into(),
            PreferenceKey::IconType => self.icon_type.raw_value().into(),
            PreferenceKey::RealTimeSliders => self.real_time_sliders.into(),
            PreferenceKey::SendCrashReports => self.send_crash_reports.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_type_raw_values() {
        for icon in IconType::ALL {
            assert_eq!(IconType::try_from(icon.raw_value()).unwrap(), icon);
        }
    }

    #[test]
    fn unknown_icon_raw_value_falls_back_to_png() {
        for raw in [-1, 3, 7, i64::MAX, i64::MIN] {
            assert_eq!(IconType::from_raw_or_default(raw), IconType::Png);
        }
        let err = IconType::try_from(9).unwrap_err();
        assert!(matches!(err, CoreError::DecodeDefault { raw: 9, .. }));
    }

    #[test]
    fn default_record_uses_type_defaults() {
        let record = SettingsRecord::default();
        assert!(record.local_url.is_empty());
        assert!(record.password.is_empty());
        assert!(!record.demo_mode);
        assert!(!record.send_crash_reports);
        assert_eq!(record.icon_type, IconType::Png);
    }

    #[test]
    fn entries_cover_every_key() {
        let record = SettingsRecord {
            remote_url: "https://home.example.org".to_string(),
            icon_type: IconType::Iconify,
            ignore_tls_validation: true,
            ..Default::default()
        };
        let entries = record.entries();

        assert_eq!(entries.len(), PreferenceKey::ALL.len());
        assert!(entries.contains(&(
            PreferenceKey::RemoteUrl,
            PreferenceValue::Text("https://home.example.org".to_string())
        )));
        assert!(entries.contains(&(PreferenceKey::IconType, PreferenceValue::Integer(2))));
        assert!(entries.contains(&(PreferenceKey::IgnoreTlsValidation, PreferenceValue::Flag(true))));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let json = r#"{"local_url": "http://a", "demo_mode": true}"#;
        let record: SettingsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.local_url, "http://a");
        assert!(record.demo_mode);
        assert_eq!(record.icon_type, IconType::Png);
    }
}
