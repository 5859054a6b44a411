//! CLI 호스트용 포트 어댑터.
//!
//! 실제 네트워크 스택/크래시 SDK/내비게이션 대신 상태를 보관하고 로그를 남긴다.
//! 이미지 캐시와 컴패니언 동기화는 파일시스템을 사용한다.

use async_trait::async_trait;
use homelink_core::error::CoreError;
use homelink_core::models::settings::SettingsRecord;
use homelink_core::ports::companion::CompanionSync;
use homelink_core::ports::crash_reporter::CrashReporter;
use homelink_core::ports::image_cache::ImageCache;
use homelink_core::ports::navigator::Navigator;
use homelink_core::ports::trust::TrustManager;
use parking_lot::Mutex;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// 프로세스 단위 인증서 신뢰 정책
#[derive(Debug, Default)]
pub struct ProcessTrustManager {
    ignore_tls: AtomicBool,
}

impl ProcessTrustManager {
    pub fn ignores_tls_validation(&self) -> bool {
        self.ignore_tls.load(Ordering::SeqCst)
    }
}

impl TrustManager for ProcessTrustManager {
    fn set_ignore_tls_validation(&self, ignore: bool) -> Result<(), CoreError> {
        self.ignore_tls.store(ignore, Ordering::SeqCst);
        if ignore {
            warn!("TLS 인증서 검증 비활성화");
        } else {
            debug!("TLS 인증서 검증 활성화");
        }
        Ok(())
    }
}

/// 크래시 리포트 수집 스위치
#[derive(Debug, Default)]
pub struct CrashCollection {
    enabled: AtomicBool,
}

impl CrashCollection {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl CrashReporter for CrashCollection {
    fn set_collection_enabled(&self, enabled: bool) -> Result<(), CoreError> {
        self.enabled.store(enabled, Ordering::SeqCst);
        info!("크래시 리포트 수집: {}", if enabled { "켜짐" } else { "꺼짐" });
        Ok(())
    }
}

/// 내비게이션 요청을 기록하는 콘솔 호스트
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    history: Mutex<Vec<String>>,
}

impl ConsoleNavigator {
    /// 지금까지 받은 내비게이션 요청
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    fn record(&self, entry: String) {
        info!("내비게이션: {entry}");
        self.history.lock().push(entry);
    }
}

impl Navigator for ConsoleNavigator {
    fn pop_to_previous(&self) {
        self.record("이전 화면".to_string());
    }

    fn pop_to_root(&self) {
        self.record("루트 화면".to_string());
    }

    fn reset_page_url(&self) {
        self.record("페이지 URL 초기화".to_string());
    }

    fn present_privacy_policy(&self, url: &str) {
        self.record(format!("개인정보 처리방침: {url}"));
    }

    fn show_sitemap_picker(&self) {
        self.record("사이트맵 선택".to_string());
    }
}

/// 디렉토리 기반 이미지 캐시
pub struct DirectoryImageCache {
    dir: PathBuf,
}

impl DirectoryImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageCache for DirectoryImageCache {
    fn clear(&self) -> Result<(), CoreError> {
        if !self.dir.exists() {
            debug!("이미지 캐시 디렉토리 없음: {}", self.dir.display());
            return Ok(());
        }

        let mut removed = 0usize;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
            removed += 1;
        }
        info!("이미지 캐시 삭제: {removed}개 항목");
        Ok(())
    }
}

/// 컴패니언 기기에 보내는 스냅샷을 파일로 남기는 동기화 어댑터
///
/// 비밀 값은 스냅샷에 포함하지 않는다.
pub struct SnapshotCompanion {
    path: PathBuf,
    synced: Notify,
}

impl SnapshotCompanion {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            synced: Notify::new(),
        }
    }

    /// 다음 동기화 완료(성공/실패)까지 대기
    pub async fn wait_synced(&self) {
        self.synced.notified().await;
    }

    fn snapshot(record: &SettingsRecord) -> serde_json::Value {
        let map = record
            .entries()
            .into_iter()
            .filter(|(key, _)| !key.is_secret())
            .map(|(key, value)| {
                let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (key.as_str().to_string(), json)
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    async fn write(&self, record: &SettingsRecord) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(&Self::snapshot(record))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::SyncPropagation(e.to_string()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| CoreError::SyncPropagation(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CompanionSync for SnapshotCompanion {
    async fn sync_preferences(&self, record: &SettingsRecord) -> Result<(), CoreError> {
        let result = self.write(record).await;
        if result.is_ok() {
            debug!("컴패니언 스냅샷 기록: {}", self.path.display());
        }
        self.synced.notify_one();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::TempDir;

    #[test]
    fn trust_manager_tracks_policy() {
        let trust = ProcessTrustManager::default();
        assert!(!trust.ignores_tls_validation());
        trust.set_ignore_tls_validation(true).unwrap();
        assert!(trust.ignores_tls_validation());
    }

    #[test]
    fn crash_collection_switch() {
        let crash = CrashCollection::new(true);
        crash.set_collection_enabled(false).unwrap();
        assert!(!crash.is_enabled());
    }

    #[test]
    fn navigator_keeps_history() {
        let nav = ConsoleNavigator::default();
        nav.reset_page_url();
        nav.pop_to_root();
        assert_eq!(nav.history(), vec!["페이지 URL 초기화", "루트 화면"]);
    }

    #[test]
    fn image_cache_clear_empties_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("icon.png"), b"png").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("a.svg"), b"svg").unwrap();

        DirectoryImageCache::new(dir.path()).clear().unwrap();

        assert!(dir.path().exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn image_cache_missing_directory_is_ok() {
        let dir = TempDir::new().unwrap();
        let cache = DirectoryImageCache::new(dir.path().join("missing"));
        assert!(cache.clear().is_ok());
    }

    #[tokio::test]
    async fn companion_snapshot_omits_password() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("companion").join("snapshot.json");
        let companion = SnapshotCompanion::new(&path);
        let record = SettingsRecord {
            remote_url: "https://remote".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        };

        companion.sync_preferences(&record).await.unwrap();
        // 완료 신호가 남아 있어야 함
        companion.wait_synced().await;

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["remoteUrl"], "https://remote");
        assert!(json.get("password").is_none());
        assert_eq!(json["iconType"], 0);
    }

    #[tokio::test]
    async fn companion_write_failure_is_sync_error() {
        let dir = TempDir::new().unwrap();
        // 디렉토리 경로에 파일을 쓰려 하면 실패
        let companion = SnapshotCompanion::new(dir.path());
        let result = companion
            .sync_preferences(&SettingsRecord::default())
            .await;
        assert_matches!(result, Err(CoreError::SyncPropagation(_)));
    }
}
