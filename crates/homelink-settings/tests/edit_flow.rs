//! 편집 세션 통합 테스트.
//!
//! 실제 JSON 파일 저장소와 목 협력자로 로드 → 편집 → 저장 흐름을 검증한다.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use homelink_core::error::CoreError;
use homelink_core::models::preference::{PreferenceKey, PreferenceValue};
use homelink_core::models::settings::{IconType, SettingsRecord};
use homelink_core::ports::companion::CompanionSync;
use homelink_core::ports::crash_reporter::CrashReporter;
use homelink_core::ports::image_cache::ImageCache;
use homelink_core::ports::navigator::Navigator;
use homelink_core::ports::preferences::PreferencesStore;
use homelink_core::ports::trust::TrustManager;
use homelink_settings::{
    ControllerOptions, ControllerState, FlagField, Reaction, Section, SettingsController,
    SettingsEvent, SettingsRow, SettingsServices, TextField,
};
use homelink_storage::{JsonPreferencesStore, MemoryPreferencesStore};
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// 공유 호출 로그
type CallLog = Arc<Mutex<Vec<String>>>;

/// 쓰기를 로그에 남기는 저장소 래퍼
struct LoggingStore {
    inner: MemoryPreferencesStore,
    log: CallLog,
}

impl PreferencesStore for LoggingStore {
    fn get(&self, key: PreferenceKey) -> Result<Option<PreferenceValue>, CoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: PreferenceKey, value: PreferenceValue) -> Result<(), CoreError> {
        self.log.lock().push(format!("store:{key}"));
        self.inner.set(key, value)
    }

    fn remove(&self, key: PreferenceKey) -> Result<(), CoreError> {
        self.inner.remove(key)
    }
}

struct MockHost {
    log: CallLog,
}

impl TrustManager for MockHost {
    fn set_ignore_tls_validation(&self, ignore: bool) -> Result<(), CoreError> {
        self.log.lock().push(format!("trust:{ignore}"));
        Ok(())
    }
}

impl CrashReporter for MockHost {
    fn set_collection_enabled(&self, enabled: bool) -> Result<(), CoreError> {
        self.log.lock().push(format!("crash:{enabled}"));
        Ok(())
    }
}

impl ImageCache for MockHost {
    fn clear(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

impl Navigator for MockHost {
    fn pop_to_previous(&self) {
        self.log.lock().push("nav:previous".to_string());
    }

    fn pop_to_root(&self) {
        self.log.lock().push("nav:root".to_string());
    }

    fn reset_page_url(&self) {
        self.log.lock().push("nav:reset".to_string());
    }

    fn present_privacy_policy(&self, _url: &str) {}

    fn show_sitemap_picker(&self) {}
}

/// 동기화된 레코드를 채널로 보내는 컴패니언
struct ChannelCompanion {
    tx: mpsc::UnboundedSender<SettingsRecord>,
}

#[async_trait]
impl CompanionSync for ChannelCompanion {
    async fn sync_preferences(&self, record: &SettingsRecord) -> Result<(), CoreError> {
        let _ = self.tx.send(record.clone());
        Ok(())
    }
}

/// 항상 실패하는 컴패니언
struct UnreachableCompanion {
    tx: mpsc::UnboundedSender<()>,
}

#[async_trait]
impl CompanionSync for UnreachableCompanion {
    async fn sync_preferences(&self, _record: &SettingsRecord) -> Result<(), CoreError> {
        let _ = self.tx.send(());
        Err(CoreError::SyncPropagation("watch not paired".to_string()))
    }
}

fn services(
    store: Arc<dyn PreferencesStore>,
    log: CallLog,
    companion: Option<Arc<dyn CompanionSync>>,
) -> SettingsServices {
    let host = Arc::new(MockHost { log });
    SettingsServices {
        store,
        trust: host.clone(),
        crash_reporter: host.clone(),
        navigator: host.clone(),
        image_cache: host,
        companion,
    }
}

#[test]
fn demo_mode_store_shows_single_connection_row() {
    let store = Arc::new(MemoryPreferencesStore::with_values([
        (PreferenceKey::LocalUrl, PreferenceValue::from("http://a")),
        (PreferenceKey::DemoMode, PreferenceValue::Flag(true)),
    ]));
    let log = CallLog::default();
    let ctrl = SettingsController::open(services(store, log, None), ControllerOptions::default());

    let layout = ctrl.layout();
    assert_eq!(layout.row_count(Section::Connection), 1);
    assert!(!layout.is_visible(SettingsRow::LocalUrl));
    // 숨겨져도 모델에는 로드됨
    assert_eq!(ctrl.record().local_url, "http://a");
    assert_eq!(ctrl.form().local_url, "http://a");
    assert!(ctrl.record().username.is_empty());
    assert_eq!(ctrl.record().icon_type, IconType::Png);
}

#[test]
fn trust_manager_is_set_before_store_write() {
    let log = CallLog::default();
    let store = Arc::new(LoggingStore {
        inner: MemoryPreferencesStore::new(),
        log: log.clone(),
    });
    let mut ctrl = SettingsController::open(
        services(store, log.clone(), None),
        ControllerOptions::default(),
    );

    ctrl.handle(SettingsEvent::SetFlag {
        field: FlagField::IgnoreTlsValidation,
        enabled: true,
    })
    .unwrap();
    ctrl.handle(SettingsEvent::Save).unwrap();

    let calls = log.lock().clone();
    let trust_at = calls.iter().position(|c| c == "trust:true").unwrap();
    let first_write = calls.iter().position(|c| c.starts_with("store:")).unwrap();
    assert!(trust_at < first_write);
    assert_eq!(calls.last().map(String::as_str), Some("nav:root"));
}

#[test]
fn saved_settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let log = CallLog::default();

    {
        let store = Arc::new(JsonPreferencesStore::open(&path).unwrap());
        let mut ctrl = SettingsController::open(
            services(store, log.clone(), None),
            ControllerOptions::default(),
        );
        ctrl.handle(SettingsEvent::EditText {
            field: TextField::RemoteUrl,
            value: "https://home.example.org".to_string(),
        })
        .unwrap();
        ctrl.handle(SettingsEvent::SelectIconSegment(1)).unwrap();
        ctrl.handle(SettingsEvent::Save).unwrap();
    }

    let store = Arc::new(JsonPreferencesStore::open(&path).unwrap());
    let ctrl = SettingsController::open(services(store, log, None), ControllerOptions::default());
    assert_eq!(ctrl.record().remote_url, "https://home.example.org");
    assert_eq!(ctrl.record().icon_type, IconType::Svg);
    assert_eq!(ctrl.state(), ControllerState::Viewing);
}

#[test]
fn load_then_save_without_edits_keeps_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let seed = JsonPreferencesStore::open(&path).unwrap();
    let record = SettingsRecord {
        local_url: "http://10.0.0.2:8080".to_string(),
        username: "admin".to_string(),
        password: "pw".to_string(),
        real_time_sliders: true,
        icon_type: IconType::Iconify,
        ..Default::default()
    };
    seed.set_many(&record.entries()).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let store = Arc::new(JsonPreferencesStore::open(&path).unwrap());
    let mut ctrl = SettingsController::open(
        services(store, CallLog::default(), None),
        ControllerOptions::default(),
    );
    ctrl.handle(SettingsEvent::Save).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn cancel_never_touches_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let store = Arc::new(JsonPreferencesStore::open(&path).unwrap());
    let log = CallLog::default();
    let mut ctrl = SettingsController::open(
        services(store, log.clone(), None),
        ControllerOptions::default(),
    );

    ctrl.handle(SettingsEvent::ToggleDemoMode(true)).unwrap();
    let reaction = ctrl.handle(SettingsEvent::Cancel).unwrap();

    assert_eq!(reaction, Reaction::Closed(ControllerState::Cancelled));
    assert!(!path.exists());
    assert_eq!(log.lock().clone(), vec!["nav:previous".to_string()]);
}

#[tokio::test]
async fn companion_receives_committed_record() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let store = Arc::new(MemoryPreferencesStore::new());
    let companion: Arc<dyn CompanionSync> = Arc::new(ChannelCompanion { tx });
    let mut ctrl = SettingsController::open(
        services(store, CallLog::default(), Some(companion)),
        ControllerOptions::default(),
    );

    ctrl.handle(SettingsEvent::EditText {
        field: TextField::Username,
        value: "watcher".to_string(),
    })
    .unwrap();
    ctrl.handle(SettingsEvent::Save).unwrap();

    let synced = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(synced.username, "watcher");
    assert_eq!(&synced, ctrl.record());
}

#[tokio::test]
async fn companion_failure_does_not_roll_back_commit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let store = Arc::new(MemoryPreferencesStore::new());
    let companion: Arc<dyn CompanionSync> = Arc::new(UnreachableCompanion { tx });
    let mut ctrl = SettingsController::open(
        services(store.clone(), CallLog::default(), Some(companion)),
        ControllerOptions::default(),
    );

    ctrl.handle(SettingsEvent::ToggleDemoMode(true)).unwrap();
    let reaction = ctrl.handle(SettingsEvent::Save).unwrap();
    assert_matches!(reaction, Reaction::Closed(ControllerState::Saved));

    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        store.get(PreferenceKey::DemoMode).unwrap(),
        Some(PreferenceValue::Flag(true))
    );
    assert_eq!(ctrl.state(), ControllerState::Saved);
}

#[test]
fn save_without_runtime_skips_companion() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let store = Arc::new(MemoryPreferencesStore::new());
    let companion: Arc<dyn CompanionSync> = Arc::new(ChannelCompanion { tx });
    let mut ctrl = SettingsController::open(
        services(store, CallLog::default(), Some(companion)),
        ControllerOptions::default(),
    );

    ctrl.handle(SettingsEvent::Save).unwrap();

    assert_eq!(ctrl.state(), ControllerState::Saved);
    assert!(rx.try_recv().is_err());
}
