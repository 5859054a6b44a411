//! HOMELINK 핵심 에러 타입.
//!
//! 어댑터 crate는 자체 에러를 `CoreError`로 변환하여 포트 경계를 넘긴다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 환경설정 디코딩, 영속화, 동기화 전파, 설정 파일 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 저장된 열거형 원시값이 알려진 변형과 일치하지 않음 (기본값으로 복구됨)
    #[error("알 수 없는 원시값 — {key}: {raw}")]
    DecodeDefault {
        /// 환경설정 키
        key: String,
        /// 저장되어 있던 원시값
        raw: i64,
    },

    /// 환경설정 저장소 쓰기 실패 (저장 동작 전체 실패)
    #[error("환경설정 저장 실패: {0}")]
    Persistence(String),

    /// 컴패니언 기기 동기화 실패 (무시됨, 재시도 없음)
    #[error("컴패니언 동기화 실패: {0}")]
    SyncPropagation(String),

    /// 이미 종료된 편집 세션에 이벤트 전달
    #[error("편집 세션이 이미 종료됨")]
    SessionClosed,

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 저장 동작을 중단시키는 에러인지 여부
    pub fn is_fatal_to_save(&self) -> bool {
        matches!(
            self,
            CoreError::Persistence(_) | CoreError::Io(_) | CoreError::Serialization(_)
        )
    }
}
