//! 설정 모델 — 환경설정 저장소와 설정 레코드 사이의 양방향 동기화.
//!
//! `load`는 절대 실패하지 않는다. 값이 없거나 읽을 수 없거나 종류가 다르면
//! 필드의 타입 기본값을 사용한다. URL/자격증명 형식 검증은 하지 않는다.

use std::sync::Arc;

use homelink_core::error::CoreError;
use homelink_core::models::preference::{PreferenceKey, PreferenceValue};
use homelink_core::models::settings::{IconType, SettingsRecord};
use homelink_core::ports::preferences::PreferencesStore;
use tracing::{debug, info, warn};

/// 설정 모델
pub struct SettingsModel {
    store: Arc<dyn PreferencesStore>,
}

impl SettingsModel {
    pub fn new(store: Arc<dyn PreferencesStore>) -> Self {
        Self { store }
    }

    /// 저장소에서 모든 필드를 읽는다
    pub fn load(&self) -> SettingsRecord {
        let record = SettingsRecord {
            local_url: self.read_text(PreferenceKey::LocalUrl),
            remote_url: self.read_text(PreferenceKey::RemoteUrl),
            username: self.read_text(PreferenceKey::Username),
            password: self.read_text(PreferenceKey::Password),
            always_send_credentials: self.read_flag(PreferenceKey::AlwaysSendCredentials),
            ignore_tls_validation: self.read_flag(PreferenceKey::IgnoreTlsValidation),
            demo_mode: self.read_flag(PreferenceKey::DemoMode),
            idle_screen_off: self.read_flag(PreferenceKey::IdleScreenOff),
            icon_type: self.read_icon_type(),
            real_time_sliders: self.read_flag(PreferenceKey::RealTimeSliders),
            send_crash_reports: self.read_flag(PreferenceKey::SendCrashReports),
        };
        debug!(
            "설정 로드 완료 (demo_mode={}, icon_type={})",
            record.demo_mode, record.icon_type
        );
        record
    }

    /// 모든 필드를 저장소에 기록한다 (전부 또는 전무)
    pub fn commit(&self, record: &SettingsRecord) -> Result<(), CoreError> {
        self.store.set_many(&record.entries()).map_err(|e| match e {
            CoreError::Persistence(_) => e,
            other => CoreError::Persistence(other.to_string()),
        })?;
        info!("설정 저장 완료");
        Ok(())
    }

    fn read(&self, key: PreferenceKey) -> Option<PreferenceValue> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("환경설정 읽기 실패, 기본값 사용: {key}: {e}");
                None
            }
        }
    }

    fn read_text(&self, key: PreferenceKey) -> String {
        self.read(key)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_default()
    }

    fn read_flag(&self, key: PreferenceKey) -> bool {
        self.read(key).and_then(|v| v.as_flag()).unwrap_or_default()
    }

    fn read_icon_type(&self) -> IconType {
        let Some(raw) = self
            .read(PreferenceKey::IconType)
            .and_then(|v| v.as_integer())
        else {
            return IconType::default();
        };

        IconType::try_from(raw).unwrap_or_else(|e| {
            debug!("{e}, 기본 아이콘 포맷 사용");
            IconType::default()
        })
    }
}
