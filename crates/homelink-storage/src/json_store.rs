//! JSON 파일 환경설정 저장소.
//!
//! 키 이름 → 원시 값의 JSON 객체 하나를 파일로 유지한다.
//! 쓰기는 임시 파일에 기록한 뒤 rename으로 교체하므로,
//! 중간에 실패해도 기존 파일은 손상되지 않는다.

use homelink_core::error::CoreError;
use homelink_core::models::preference::{PreferenceKey, PreferenceValue};
use homelink_core::ports::preferences::PreferencesStore;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON 파일 저장소 — `PreferencesStore` 포트 구현
///
/// 알 수 없는 키도 그대로 보존하여 다시 기록한다.
#[derive(Debug)]
pub struct JsonPreferencesStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl JsonPreferencesStore {
    /// 파일 기반 저장소 열기 (파일이 없으면 빈 저장소)
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    CoreError::Persistence(format!(
                        "환경설정 파일 파싱 실패: {}: {e}",
                        path.display()
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        info!(
            "환경설정 저장소 열기: {} ({}개 항목)",
            path.display(),
            entries.len()
        );

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// 저장소 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일에서 다시 읽기
    pub fn reload(&self) -> Result<(), CoreError> {
        let fresh = Self::open(self.path.clone())?;
        *self.entries.write() = fresh.entries.into_inner();
        Ok(())
    }

    /// 맵을 파일에 기록 (호출자는 캐시 쓰기 잠금을 잡고 있어야 한다)
    fn write_file(&self, next: &BTreeMap<String, Value>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(next)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!("환경설정 파일 기록 완료: {}", self.path.display());
        Ok(())
    }

    /// 쓰기 잠금 안에서 읽기-수정-기록을 수행한다
    ///
    /// `modify`가 false를 반환하면 기록하지 않는다.
    fn update<F>(&self, modify: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut BTreeMap<String, Value>) -> Result<bool, CoreError>,
    {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        if !modify(&mut next)? {
            return Ok(());
        }
        self.write_file(&next)?;
        *entries = next;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn to_json(value: PreferenceValue) -> Result<Value, CoreError> {
        Ok(serde_json::to_value(value)?)
    }
}

impl PreferencesStore for JsonPreferencesStore {
    fn get(&self, key: PreferenceKey) -> Result<Option<PreferenceValue>, CoreError> {
        let entries = self.entries.read();
        let Some(raw) = entries.get(key.as_str()) else {
            return Ok(None);
        };

        match serde_json::from_value::<PreferenceValue>(raw.clone()) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                debug!("해석할 수 없는 환경설정 값 무시: {key}");
                Ok(None)
            }
        }
    }

    fn set(&self, key: PreferenceKey, value: PreferenceValue) -> Result<(), CoreError> {
        let value = Self::to_json(value)?;
        self.update(|next| {
            next.insert(key.as_str().to_string(), value);
            Ok(true)
        })
    }

    fn remove(&self, key: PreferenceKey) -> Result<(), CoreError> {
        self.update(|next| Ok(next.remove(key.as_str()).is_some()))
    }

    /// 모든 항목을 한 번의 파일 교체로 기록한다.
    fn set_many(&self, entries: &[(PreferenceKey, PreferenceValue)]) -> Result<(), CoreError> {
        self.update(|next| {
            for (key, value) in entries {
                next.insert(key.as_str().to_string(), Self::to_json(value.clone())?);
            }
            Ok(true)
        })
        .map_err(|e| CoreError::Persistence(format!("{}: {e}", self.path.display())))
    }
}
