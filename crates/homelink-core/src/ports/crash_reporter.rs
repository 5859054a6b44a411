//! 크래시 리포트 수집 포트.
//!
//! 구현: 호스트 앱의 크래시 리포트 SDK 래퍼

use crate::error::CoreError;

/// 크래시 리포트 수집 제어
pub trait CrashReporter: Send + Sync {
    /// 수집 활성화/비활성화 (동의 확정 시 동기 호출)
    fn set_collection_enabled(&self, enabled: bool) -> Result<(), CoreError>;
}
