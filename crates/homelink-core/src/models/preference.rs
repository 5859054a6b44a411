//! 환경설정 키-값 모델.
//!
//! 저장소에는 고정된 키 이름으로 불투명한 값이 기록된다. 스키마 버전은 없다.

use serde::{Deserialize, Serialize};

/// 설정 필드별 고정 환경설정 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreferenceKey {
    #[serde(rename = "localUrl")]
    LocalUrl,
    #[serde(rename = "remoteUrl")]
    RemoteUrl,
    #[serde(rename = "username")]
    Username,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "alwaysSendCreds")]
    AlwaysSendCredentials,
    #[serde(rename = "ignoreSSL")]
    IgnoreTlsValidation,
    #[serde(rename = "demomode")]
    DemoMode,
    #[serde(rename = "idleOff")]
    IdleScreenOff,
    #[serde(rename = "iconType")]
    IconType,
    #[serde(rename = "realTimeSliders")]
    RealTimeSliders,
    #[serde(rename = "sendCrashReports")]
    SendCrashReports,
}

impl PreferenceKey {
    /// 전체 키 목록 (저장 순서)
    pub const ALL: [PreferenceKey; 11] = [
        PreferenceKey::LocalUrl,
        PreferenceKey::RemoteUrl,
        PreferenceKey::Username,
        PreferenceKey::Password,
        PreferenceKey::AlwaysSendCredentials,
        PreferenceKey::IgnoreTlsValidation,
        PreferenceKey::DemoMode,
        PreferenceKey::IdleScreenOff,
        PreferenceKey::RealTimeSliders,
        PreferenceKey::IconType,
        PreferenceKey::SendCrashReports,
    ];

    /// 저장소에 기록되는 키 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::LocalUrl => "localUrl",
            PreferenceKey::RemoteUrl => "remoteUrl",
            PreferenceKey::Username => "username",
            PreferenceKey::Password => "password",
            PreferenceKey::AlwaysSendCredentials => "alwaysSendCreds",
            PreferenceKey::IgnoreTlsValidation => "ignoreSSL",
            PreferenceKey::DemoMode => "demomode",
            PreferenceKey::IdleScreenOff => "idleOff",
            PreferenceKey::IconType => "iconType",
            PreferenceKey::RealTimeSliders => "realTimeSliders",
            PreferenceKey::SendCrashReports => "sendCrashReports",
        }
    }

    /// 키 이름으로 조회
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// 민감 정보 여부 (로그 출력 시 마스킹)
    pub fn is_secret(&self) -> bool {
        matches!(self, PreferenceKey::Password)
    }
}

impl std::fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 저장소 값
///
/// JSON 파일에는 태그 없이 원시 값(문자열/불리언/정수)으로 기록된다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// 불리언 플래그
    Flag(bool),
    /// 정수 (열거형 원시값)
    Integer(i64),
    /// 문자열
    Text(String),
}

impl PreferenceValue {
    /// 문자열 값 (종류가 다르면 None)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PreferenceValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 불리언 값 (종류가 다르면 None)
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            PreferenceValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// 정수 값 (종류가 다르면 None)
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PreferenceValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        PreferenceValue::Text(value.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        PreferenceValue::Text(value)
    }
}

impl From<bool> for PreferenceValue {
    fn from(value: bool) -> Self {
        PreferenceValue::Flag(value)
    }
}

impl From<i64> for PreferenceValue {
    fn from(value: i64) -> Self {
        PreferenceValue::Integer(value)
    }
}
