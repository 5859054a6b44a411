//! 설정 편집 컨트롤러.
//!
//! 로드 → 표시 → 편집 → 저장 → 보조 시스템 전파(인증서 신뢰, 컴패니언 동기화,
//! 크래시 리포트 동의)를 조율하는 상태 머신.
//!
//! 상태: `Viewing` → `Editing` → `Saving` → `Saved` | `Cancelled`
//!
//! 모든 전이는 UI 스케줄링 컨텍스트에서 동기적으로 처리된다.
//! 컴패니언 동기화만 tokio 런타임에 넘기고 결과를 기다리지 않는다.

use std::sync::Arc;

use homelink_core::consent::{ConsentChoice, ConsentGate, ConsentResolution, ToggleRequest};
use homelink_core::error::CoreError;
use homelink_core::models::settings::{IconType, SettingsRecord};
use homelink_core::ports::companion::CompanionSync;
use homelink_core::ports::crash_reporter::CrashReporter;
use homelink_core::ports::image_cache::ImageCache;
use homelink_core::ports::navigator::Navigator;
use homelink_core::ports::preferences::PreferencesStore;
use homelink_core::ports::trust::TrustManager;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::event::{Reaction, SettingsEvent};
use crate::form::SettingsForm;
use crate::layout::{ScreenLayout, SettingsRow};
use crate::model::SettingsModel;

/// 편집 세션 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerState {
    /// 로드 직후 (변경 없음)
    Viewing,
    /// 하나 이상의 필드가 변경됨
    Editing,
    /// 저장 진행 중
    Saving,
    /// 저장 완료 (종료)
    Saved,
    /// 취소 (종료)
    Cancelled,
}

impl ControllerState {
    /// 종료 상태인지
    pub fn is_terminal(&self) -> bool {
        matches!(self, ControllerState::Saved | ControllerState::Cancelled)
    }
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerState::Viewing => write!(f, "Viewing"),
            ControllerState::Editing => write!(f, "Editing"),
            ControllerState::Saving => write!(f, "Saving"),
            ControllerState::Saved => write!(f, "Saved"),
            ControllerState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// 컨트롤러가 사용하는 외부 협력자
#[derive(Clone)]
pub struct SettingsServices {
    /// 환경설정 저장소
    pub store: Arc<dyn PreferencesStore>,
    /// 네트워크 인증서 신뢰 관리자
    pub trust: Arc<dyn TrustManager>,
    /// 크래시 리포트 수집기
    pub crash_reporter: Arc<dyn CrashReporter>,
    /// 내비게이션 호스트
    pub navigator: Arc<dyn Navigator>,
    /// 이미지 캐시
    pub image_cache: Arc<dyn ImageCache>,
    /// 컴패니언 기기 동기화 (None이면 비활성)
    pub companion: Option<Arc<dyn CompanionSync>>,
}

/// 화면 컨텍스트
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// 연결된 서버의 주 버전 (모르면 None)
    pub server_major_version: Option<u32>,
    /// 개인정보 처리방침 URL
    pub privacy_policy_url: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            server_major_version: None,
            privacy_policy_url: homelink_core::config::DEFAULT_PRIVACY_POLICY_URL.to_string(),
        }
    }
}

/// 설정 편집 컨트롤러
pub struct SettingsController {
    services: SettingsServices,
    options: ControllerOptions,
    model: SettingsModel,
    /// 마지막으로 로드/저장된 레코드
    record: SettingsRecord,
    /// 화면 컨트롤 미러
    form: SettingsForm,
    consent: ConsentGate,
    state: ControllerState,
}

impl SettingsController {
    /// 화면 열기 — 저장소에서 로드하고 폼을 채운다
    pub fn open(services: SettingsServices, options: ControllerOptions) -> Self {
        info!("설정 화면 열기");
        let model = SettingsModel::new(services.store.clone());
        let record = model.load();
        let form = SettingsForm::from_record(&record);

        Self {
            services,
            options,
            model,
            record,
            form,
            consent: ConsentGate::new(),
            state: ControllerState::Viewing,
        }
    }

    /// 현재 상태
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// 화면 컨트롤 값
    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    /// 설정 모델의 레코드
    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    /// 현재 폼 기준 레이아웃
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.form.demo_mode, self.options.server_major_version)
    }

    /// 저장되지 않은 변경이 있는지
    pub fn has_unsaved_changes(&self) -> bool {
        self.form.to_record() != self.record
    }

    /// 이벤트 처리 (전이 함수)
    pub fn handle(&mut self, event: SettingsEvent) -> Result<Reaction, CoreError> {
        if self.state.is_terminal() {
            warn!(
                "종료된 편집 세션에 이벤트 수신 ({}): {:?}",
                self.state,
                std::mem::discriminant(&event)
            );
            return Err(CoreError::SessionClosed);
        }

        match event {
            SettingsEvent::EditText { field, value } => {
                self.form.set_text(field, value);
                self.touch();
                Ok(Reaction::Nothing)
            }
            SettingsEvent::SetFlag { field, enabled } => {
                self.form.set_flag(field, enabled);
                self.touch();
                Ok(Reaction::Nothing)
            }
            SettingsEvent::SelectIconSegment(segment) => {
                self.form.icon_segment = segment;
                self.touch();
                Ok(Reaction::Nothing)
            }
            SettingsEvent::ToggleDemoMode(enabled) => {
                if enabled {
                    info!("데모 모드 켜짐");
                } else {
                    info!("데모 모드 꺼짐");
                }
                self.form.demo_mode = enabled;
                self.touch();
                Ok(Reaction::RefreshLayout(self.layout()))
            }
            SettingsEvent::CrashReportingTapped => self.crash_reporting_tapped(),
            SettingsEvent::ConsentChosen(choice) => self.consent_chosen(choice),
            SettingsEvent::RowSelected(row) => self.row_selected(row),
            SettingsEvent::Save => self.save(),
            SettingsEvent::Cancel => Ok(self.cancel()),
        }
    }

    fn touch(&mut self) {
        if self.state == ControllerState::Viewing {
            debug!("편집 시작");
            self.state = ControllerState::Editing;
        }
    }

    fn crash_reporting_tapped(&mut self) -> Result<Reaction, CoreError> {
        match self.consent.request_toggle(self.form.send_crash_reports) {
            ToggleRequest::DisableNow => {
                self.form.send_crash_reports = false;
                self.touch();
                if let Err(e) = self.services.crash_reporter.set_collection_enabled(false) {
                    warn!("크래시 리포트 수집 비활성화 실패: {e}");
                }
                info!("크래시 리포트 끔");
                Ok(Reaction::RefreshForm)
            }
            ToggleRequest::Confirm(prompt) => {
                debug!("크래시 리포트 동의 요청");
                Ok(Reaction::PromptCrashConsent(prompt))
            }
        }
    }

    fn consent_chosen(&mut self, choice: ConsentChoice) -> Result<Reaction, CoreError> {
        let Some(resolution) = self.consent.resolve(choice) else {
            warn!("대기 중인 동의 프롬프트 없음: {choice:?}");
            return Ok(Reaction::Nothing);
        };

        match resolution {
            ConsentResolution::Granted => {
                self.services.crash_reporter.set_collection_enabled(true)?;
                self.form.send_crash_reports = true;
                self.touch();
                info!("크래시 리포트 동의됨");
                Ok(Reaction::RefreshForm)
            }
            ConsentResolution::ShowPolicy => {
                self.services
                    .navigator
                    .present_privacy_policy(&self.options.privacy_policy_url);
                Ok(Reaction::Nothing)
            }
            ConsentResolution::Declined => {
                debug!("크래시 리포트 동의 취소");
                Ok(Reaction::Nothing)
            }
        }
    }

    fn row_selected(&mut self, row: SettingsRow) -> Result<Reaction, CoreError> {
        debug!("행 선택: {row:?}");
        match row {
            SettingsRow::PrivacyPolicy => {
                self.services
                    .navigator
                    .present_privacy_policy(&self.options.privacy_policy_url);
                Ok(Reaction::Nothing)
            }
            SettingsRow::ClearImageCache => {
                info!("이미지 캐시 비우기");
                if let Err(e) = self.services.image_cache.clear() {
                    warn!("이미지 캐시 비우기 실패: {e}");
                }
                Ok(Reaction::Nothing)
            }
            SettingsRow::SelectSitemap => {
                self.persist()?;
                self.state = ControllerState::Viewing;
                self.services.navigator.show_sitemap_picker();
                Ok(Reaction::Nothing)
            }
            _ => Ok(Reaction::Nothing),
        }
    }

    fn save(&mut self) -> Result<Reaction, CoreError> {
        info!("저장 요청");
        self.persist()?;
        self.services.navigator.reset_page_url();
        self.state = ControllerState::Saved;
        self.services.navigator.pop_to_root();
        Ok(Reaction::Closed(self.state))
    }

    fn cancel(&mut self) -> Reaction {
        info!("취소 요청");
        self.form = SettingsForm::from_record(&self.record);
        self.state = ControllerState::Cancelled;
        self.services.navigator.pop_to_previous();
        Reaction::Closed(self.state)
    }

    /// 폼 수집 → 신뢰 정책 적용 → 커밋 → 컴패니언 전파
    ///
    /// 실패 시 `Editing` 상태로 돌아가고 에러를 반환한다.
    fn persist(&mut self) -> Result<(), CoreError> {
        self.state = ControllerState::Saving;
        let record = self.update_settings();

        let result = self
            .services
            .trust
            .set_ignore_tls_validation(record.ignore_tls_validation)
            .and_then(|_| self.model.commit(&record));

        if let Err(e) = result {
            if e.is_fatal_to_save() {
                error!("설정 저장 실패: {e}");
            } else {
                warn!("설정 저장 중단: {e}");
            }
            self.state = ControllerState::Editing;
            return Err(e);
        }

        self.record = record.clone();
        self.propagate_to_companion(record);
        Ok(())
    }

    /// 화면 값을 레코드로 수집 (커밋 성공 전까지 `self.record`는 그대로)
    fn update_settings(&mut self) -> SettingsRecord {
        let record = self.form.to_record();
        if record.icon_type == IconType::default()
            && self.form.icon_segment != IconType::default().raw_value()
        {
            debug!(
                "아이콘 세그먼트 {} 해석 불가, 기본값 사용",
                self.form.icon_segment
            );
            self.form.icon_segment = record.icon_type.raw_value();
        }
        record
    }

    fn propagate_to_companion(&self, record: SettingsRecord) {
        let Some(companion) = self.services.companion.clone() else {
            debug!("컴패니언 동기화 비활성");
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    match companion.sync_preferences(&record).await {
                        Ok(()) => debug!("컴패니언 동기화 완료"),
                        Err(e) => warn!("컴패니언 동기화 실패 (무시): {e}"),
                    }
                });
            }
            Err(_) => warn!("tokio 런타임 없음, 컴패니언 동기화 건너뜀"),
        }
    }
}
