//! 네트워크 인증서 신뢰 관리 포트.
//!
//! 구현: 호스트 앱의 서버 인증서 관리자

use crate::error::CoreError;

/// 활성 네트워크 연결의 TLS 신뢰 정책
pub trait TrustManager: Send + Sync {
    /// TLS 인증서 검증 무시 여부 설정 (저장 전에 호출됨)
    fn set_ignore_tls_validation(&self, ignore: bool) -> Result<(), CoreError>;
}
