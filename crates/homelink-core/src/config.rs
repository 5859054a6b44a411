//! 애플리케이션 설정 구조체.
//!
//! 환경설정 파일 위치, 서버 버전, 개인정보 처리방침 URL,
//! 컴패니언 동기화, 로그 레벨 등 런타임 설정을 정의한다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 개인정보 처리방침 기본 URL
pub const DEFAULT_PRIVACY_POLICY_URL: &str = "https://www.openhab.org/privacy.html";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 환경설정 저장소 설정
    #[serde(default)]
    pub preferences: PreferencesConfig,
    /// 서버 정보
    #[serde(default)]
    pub server: ServerConfig,
    /// 개인정보 설정
    #[serde(default)]
    pub privacy: PrivacyConfig,
    /// 컴패니언 기기 동기화 설정
    #[serde(default)]
    pub companion: CompanionConfig,
    /// 로그 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 환경설정 파일 경로 (디렉토리 미지정 시 `base_dir` 기준)
    pub fn preferences_path(&self, base_dir: &std::path::Path) -> PathBuf {
        self.preferences
            .directory
            .clone()
            .unwrap_or_else(|| base_dir.to_path_buf())
            .join(&self.preferences.file_name)
    }
}

// ============================================================
// 환경설정 저장소
// ============================================================

/// 환경설정 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// 파일 이름
    #[serde(default = "default_preferences_file")]
    pub file_name: String,
    /// 저장 디렉토리 (None이면 플랫폼 기본 데이터 디렉토리)
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_preferences_file() -> String {
    "preferences.json".to_string()
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            file_name: default_preferences_file(),
            directory: None,
        }
    }
}

// ============================================================
// 서버
// ============================================================

/// 서버 정보 — 주 버전이 없으면 버전 2로 간주
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 서버 주 버전
    #[serde(default)]
    pub major_version: Option<u32>,
}

// ============================================================
// 개인정보
// ============================================================

/// 개인정보 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacyConfig {
    /// 개인정보 처리방침 URL
    #[serde(default = "default_policy_url")]
    pub policy_url: String,
}

fn default_policy_url() -> String {
    DEFAULT_PRIVACY_POLICY_URL.to_string()
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            policy_url: default_policy_url(),
        }
    }
}

// ============================================================
// 컴패니언
// ============================================================

/// 컴패니언 기기 동기화 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionConfig {
    /// 저장 후 동기화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ============================================================
// 로그
// ============================================================

/// 로그 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
