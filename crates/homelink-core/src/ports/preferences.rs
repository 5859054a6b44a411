//! 환경설정 저장소 포트.
//!
//! 구현: `homelink-storage` crate (JSON 파일, 인메모리)

use tracing::warn;

use crate::error::CoreError;
use crate::models::preference::{PreferenceKey, PreferenceValue};

/// 영속 키-값 환경설정 저장소
///
/// 프로세스 전역 상태이며 앱 재시작 후에도 유지된다.
pub trait PreferencesStore: Send + Sync {
    /// 값 조회 (없으면 None)
    fn get(&self, key: PreferenceKey) -> Result<Option<PreferenceValue>, CoreError>;

    /// 단일 값 기록
    fn set(&self, key: PreferenceKey, value: PreferenceValue) -> Result<(), CoreError>;

    /// 값 삭제
    fn remove(&self, key: PreferenceKey) -> Result<(), CoreError>;

    /// 여러 값을 전부 기록하거나 전부 기록하지 않는다.
    ///
    /// 기본 구현은 기존 값을 스냅샷한 뒤 하나씩 기록하고,
    /// 중간에 실패하면 이미 기록한 항목을 스냅샷 값으로 되돌린다.
    /// 트랜잭션을 지원하는 저장소는 이 메서드를 재정의한다.
    fn set_many(&self, entries: &[(PreferenceKey, PreferenceValue)]) -> Result<(), CoreError> {
        let mut snapshot = Vec::with_capacity(entries.len());
        for (key, _) in entries {
            let previous = self
                .get(*key)
                .map_err(|e| CoreError::Persistence(format!("{key} 스냅샷 실패: {e}")))?;
            snapshot.push((*key, previous));
        }

        for (idx, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.set(*key, value.clone()) {
                for (written, previous) in snapshot[..idx].iter().rev() {
                    let restored = match previous {
                        Some(old) => self.set(*written, old.clone()),
                        None => self.remove(*written),
                    };
                    if let Err(restore_err) = restored {
                        warn!("환경설정 롤백 실패: {written}: {restore_err}");
                    }
                }
                return Err(CoreError::Persistence(format!("{key} 기록 실패: {e}")));
            }
        }

        Ok(())
    }
}
