//! HOMELINK 도메인 모델.
//!
//! 설정 화면이 다루는 고정된 필드 집합과, 저장소에 기록되는
//! 불투명한 키-값 항목을 정의한다.

pub mod preference;
pub mod settings;
