//! # homelink-storage
//!
//! 환경설정 저장소 어댑터.
//! `PreferencesStore` 포트를 구현한다.
//!
//! ## 모듈
//! - `json_store`: JSON 파일 기반 저장소 (원자적 교체 쓰기)
//! - `memory_store`: 인메모리 저장소 (테스트/데모용, 실패 주입 지원)

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonPreferencesStore;
pub use memory_store::MemoryPreferencesStore;
