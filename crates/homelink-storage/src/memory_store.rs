//! 인메모리 환경설정 저장소.
//!
//! 테스트와 데모 모드 실행에 사용한다. 특정 키의 쓰기 실패를 주입할 수 있다.

use homelink_core::error::CoreError;
use homelink_core::models::preference::{PreferenceKey, PreferenceValue};
use homelink_core::ports::preferences::PreferencesStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 인메모리 저장소 — `PreferencesStore` 포트 구현
///
/// `set_many`는 포트의 기본 구현(스냅샷 후 롤백)을 그대로 사용한다.
#[derive(Default)]
pub struct MemoryPreferencesStore {
    values: RwLock<HashMap<PreferenceKey, PreferenceValue>>,
    fail_on: RwLock<Option<PreferenceKey>>,
    writes: AtomicUsize,
}

impl MemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 값으로 생성
    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (PreferenceKey, PreferenceValue)>,
    {
        Self {
            values: RwLock::new(values.into_iter().collect()),
            ..Self::default()
        }
    }

    /// 지정한 키의 쓰기가 실패하도록 설정 (None이면 해제)
    pub fn fail_writes_on(&self, key: Option<PreferenceKey>) {
        *self.fail_on.write() = key;
    }

    /// 성공한 쓰기 횟수 (set + remove)
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// 현재 값 전체 복제본
    pub fn snapshot(&self) -> HashMap<PreferenceKey, PreferenceValue> {
        self.values.read().clone()
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn get(&self, key: PreferenceKey) -> Result<Option<PreferenceValue>, CoreError> {
        Ok(self.values.read().get(&key).cloned())
    }

    fn set(&self, key: PreferenceKey, value: PreferenceValue) -> Result<(), CoreError> {
        if *self.fail_on.read() == Some(key) {
            return Err(CoreError::Persistence(format!("{key} 쓰기 실패 (주입됨)")));
        }
        self.values.write().insert(key, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: PreferenceKey) -> Result<(), CoreError> {
        self.values.write().remove(&key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
