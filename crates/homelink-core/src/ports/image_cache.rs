//! 이미지 캐시 포트.

use crate::error::CoreError;

/// 아이콘/이미지 캐시
pub trait ImageCache: Send + Sync {
    /// 메모리 캐시, 디스크 캐시, 만료 항목을 모두 비운다
    fn clear(&self) -> Result<(), CoreError>;
}
