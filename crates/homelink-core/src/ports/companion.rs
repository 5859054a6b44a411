//! 컴패니언 기기(웨어러블) 동기화 포트.
//!
//! 저장이 끝난 설정을 페어링된 기기로 전파한다. 호출자는 결과를 기다리지 않는다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::settings::SettingsRecord;

/// 컴패니언 기기 동기화 채널
#[async_trait]
pub trait CompanionSync: Send + Sync {
    /// 확정된 설정 레코드를 컴패니언 기기로 전송
    async fn sync_preferences(&self, record: &SettingsRecord) -> Result<(), CoreError>;
}
