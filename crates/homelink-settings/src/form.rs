//! 편집 폼 — 화면 컨트롤 값의 미러.
//!
//! 화면이 열릴 때 설정 레코드로 채워지고, 사용자 입력으로 바뀐다.
//! 저장 시 [`SettingsForm::to_record`]가 필드별 명시적 기본값을 적용해
//! 레코드로 되돌린다.

use homelink_core::models::settings::{IconType, SettingsRecord};
use serde::Serialize;

/// 아이콘 세그먼트가 선택되지 않은 상태
pub const NO_SEGMENT: i64 = -1;

/// 문자열 입력 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextField {
    LocalUrl,
    RemoteUrl,
    Username,
    Password,
}

/// 일반 스위치 (데모 모드/크래시 리포트는 별도 이벤트)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlagField {
    AlwaysSendCredentials,
    IgnoreTlsValidation,
    IdleScreenOff,
    RealTimeSliders,
}

/// 화면 컨트롤 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsForm {
    pub local_url: String,
    pub remote_url: String,
    pub username: String,
    pub password: String,
    pub always_send_credentials: bool,
    pub ignore_tls_validation: bool,
    pub demo_mode: bool,
    pub idle_screen_off: bool,
    /// 선택된 세그먼트 인덱스 (선택 없음 = -1)
    pub icon_segment: i64,
    pub real_time_sliders: bool,
    pub send_crash_reports: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_record(&SettingsRecord::default())
    }
}

impl SettingsForm {
    /// 레코드를 화면에 반영
    pub fn from_record(record: &SettingsRecord) -> Self {
        Self {
            local_url: record.local_url.clone(),
            remote_url: record.remote_url.clone(),
            username: record.username.clone(),
            password: record.password.clone(),
            always_send_credentials: record.always_send_credentials,
            ignore_tls_validation: record.ignore_tls_validation,
            demo_mode: record.demo_mode,
            idle_screen_off: record.idle_screen_off,
            icon_segment: record.icon_type.raw_value(),
            real_time_sliders: record.real_time_sliders,
            send_crash_reports: record.send_crash_reports,
        }
    }

    /// 화면 값을 레코드로 수집
    ///
    /// 선택되지 않았거나 범위를 벗어난 아이콘 세그먼트는 기본 포맷이 된다.
    pub fn to_record(&self) -> SettingsRecord {
        SettingsRecord {
            local_url: self.local_url.clone(),
            remote_url: self.remote_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            always_send_credentials: self.always_send_credentials,
            ignore_tls_validation: self.ignore_tls_validation,
            demo_mode: self.demo_mode,
            idle_screen_off: self.idle_screen_off,
            icon_type: IconType::from_raw_or_default(self.icon_segment),
            real_time_sliders: self.real_time_sliders,
            send_crash_reports: self.send_crash_reports,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        match field {
            TextField::LocalUrl => self.local_url = value,
            TextField::RemoteUrl => self.remote_url = value,
            TextField::Username => self.username = value,
            TextField::Password => self.password = value,
        }
    }

    pub fn set_flag(&mut self, field: FlagField, enabled: bool) {
        match field {
            FlagField::AlwaysSendCredentials => self.always_send_credentials = enabled,
            FlagField::IgnoreTlsValidation => self.ignore_tls_validation = enabled,
            FlagField::IdleScreenOff => self.idle_screen_off = enabled,
            FlagField::RealTimeSliders => self.real_time_sliders = enabled,
        }
    }
}
