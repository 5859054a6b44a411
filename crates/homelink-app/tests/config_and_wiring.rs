//! 설정 및 DI 와이어링 통합 테스트.
//!
//! ConfigManager → JSON 저장소 → 편집 컨트롤러 연결 검증.

use homelink_core::config::{AppConfig, DEFAULT_PRIVACY_POLICY_URL};
use homelink_core::config_manager::ConfigManager;
use homelink_core::error::CoreError;
use homelink_core::ports::crash_reporter::CrashReporter;
use homelink_core::ports::image_cache::ImageCache;
use homelink_core::ports::navigator::Navigator;
use homelink_core::ports::trust::TrustManager;
use homelink_settings::{
    ControllerOptions, ControllerState, Section, SettingsController, SettingsEvent,
    SettingsServices, TextField,
};
use homelink_storage::JsonPreferencesStore;
use std::sync::Arc;
use tempfile::TempDir;

struct Quiet;

impl TrustManager for Quiet {
    fn set_ignore_tls_validation(&self, _ignore: bool) -> Result<(), CoreError> {
        Ok(())
    }
}

impl CrashReporter for Quiet {
    fn set_collection_enabled(&self, _enabled: bool) -> Result<(), CoreError> {
        Ok(())
    }
}

impl ImageCache for Quiet {
    fn clear(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

impl Navigator for Quiet {
    fn pop_to_previous(&self) {}
    fn pop_to_root(&self) {}
    fn reset_page_url(&self) {}
    fn present_privacy_policy(&self, _url: &str) {}
    fn show_sitemap_picker(&self) {}
}

fn controller_from(config: &AppConfig, data_dir: &std::path::Path) -> SettingsController {
    let store = Arc::new(JsonPreferencesStore::open(config.preferences_path(data_dir)).unwrap());
    let quiet = Arc::new(Quiet);
    let services = SettingsServices {
        store,
        trust: quiet.clone(),
        crash_reporter: quiet.clone(),
        navigator: quiet.clone(),
        image_cache: quiet,
        companion: None,
    };
    let options = ControllerOptions {
        server_major_version: config.server.major_version,
        privacy_policy_url: config.privacy.policy_url.clone(),
    };
    SettingsController::open(services, options)
}

#[test]
fn config_defaults_are_valid() {
    let config = AppConfig::default_config();

    assert_eq!(config.preferences.file_name, "preferences.json");
    assert!(config.preferences.directory.is_none());
    assert!(config.server.major_version.is_none());
    assert_eq!(config.privacy.policy_url, DEFAULT_PRIVACY_POLICY_URL);
    assert!(config.companion.enabled);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn config_file_drives_preferences_location() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("config.json")).unwrap();
    let custom = dir.path().join("prefs");
    manager
        .update_with(|c| {
            c.preferences.directory = Some(custom.clone());
            c.server.major_version = Some(3);
        })
        .unwrap();

    let config = manager.get();
    let mut ctrl = controller_from(&config, dir.path());
    ctrl.handle(SettingsEvent::EditText {
        field: TextField::Username,
        value: "admin".to_string(),
    })
    .unwrap();
    ctrl.handle(SettingsEvent::Save).unwrap();

    assert!(custom.join("preferences.json").exists());
    assert!(!dir.path().join("preferences.json").exists());
}

#[test]
fn server_version_from_config_hides_icon_row() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default_config();

    let ctrl = controller_from(&config, dir.path());
    let v2_rows = ctrl.layout().row_count(Section::Application);

    config.server.major_version = Some(3);
    let ctrl = controller_from(&config, dir.path());
    let layout = ctrl.layout();

    // 행 수는 같고 아이콘 행만 높이 0
    assert_eq!(layout.row_count(Section::Application), v2_rows);
    assert_eq!(layout.application.iter().filter(|r| !r.visible).count(), 1);
}

#[test]
fn reload_picks_up_external_edits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let manager = ConfigManager::with_path(path.clone()).unwrap();

    std::fs::write(&path, r#"{"companion": {"enabled": false}}"#).unwrap();
    manager.reload().unwrap();

    assert!(!manager.get().companion.enabled);
    assert_eq!(manager.get().privacy.policy_url, DEFAULT_PRIVACY_POLICY_URL);
}

#[test]
fn cancel_flow_leaves_preferences_absent() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::default_config();
    let mut ctrl = controller_from(&config, dir.path());

    ctrl.handle(SettingsEvent::ToggleDemoMode(true)).unwrap();
    ctrl.handle(SettingsEvent::Cancel).unwrap();

    assert_eq!(ctrl.state(), ControllerState::Cancelled);
    assert!(!config.preferences_path(dir.path()).exists());
}
