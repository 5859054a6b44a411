//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 각 어댑터가 이 trait들을 구현하며,
//! `homelink-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 설정 화면의 모든 변경은 UI 스케줄링 컨텍스트에서 동기적으로 일어나므로
//! 대부분의 포트는 동기 trait이다. 컴패니언 동기화만 `async_trait`을 사용한다.

pub mod companion;
pub mod crash_reporter;
pub mod image_cache;
pub mod navigator;
pub mod preferences;
pub mod trust;
