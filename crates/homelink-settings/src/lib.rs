//! # homelink-settings
//!
//! 설정 화면 코어.
//! 환경설정 저장소 ↔ 설정 모델 동기화, 모드 플래그에 따른 레이아웃,
//! 편집 세션 상태 머신을 제공한다. 렌더링은 호스트의 몫이다.
//!
//! ## 모듈
//! - `model`: 설정 모델 (load / commit)
//! - `layout`: 레이아웃 정책 (섹션별 행 수와 가시성)
//! - `form`: 화면 컨트롤 미러
//! - `event`: 입력 이벤트와 반응
//! - `controller`: 편집 컨트롤러 (상태 머신)

pub mod controller;
pub mod event;
pub mod form;
pub mod layout;
pub mod model;

pub use controller::{ControllerOptions, ControllerState, SettingsController, SettingsServices};
pub use event::{Reaction, SettingsEvent};
pub use form::{FlagField, SettingsForm, TextField};
pub use layout::{row_count, rows, RowLayout, ScreenLayout, Section, SettingsRow};
pub use model::SettingsModel;
