//! # homelink-core
//!
//! HOMELINK 설정 화면의 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 설정 레코드, 환경설정 키/값 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)
//! - [`consent`] — 크래시 리포트 동의 프롬프트 모델

pub mod config;
pub mod config_manager;
pub mod consent;
pub mod error;
pub mod models;
pub mod ports;
