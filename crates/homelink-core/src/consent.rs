//! 크래시 리포트 동의 관리.
//!
//! 옵트인은 명시적 확인이 필요하고, 옵트아웃은 즉시 적용된다.

use serde::{Deserialize, Serialize};

/// 동의 프롬프트 제목 (로컬라이즈 키)
pub const CONSENT_TITLE_KEY: &str = "crash_reporting";

/// 동의 프롬프트 본문 (로컬라이즈 키)
pub const CONSENT_MESSAGE_KEY: &str = "crash_reporting_info";

// ============================================================
// 프롬프트 모델
// ============================================================

/// 동의 프롬프트의 선택지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsentChoice {
    /// 수집 활성화
    Activate,
    /// 개인정보 처리방침 보기
    PrivacyPolicy,
    /// 취소
    Cancel,
}

impl ConsentChoice {
    /// 선택지 레이블 (로컬라이즈 키)
    pub fn label_key(&self) -> &'static str {
        match self {
            ConsentChoice::Activate => "activate",
            ConsentChoice::PrivacyPolicy => "privacy_policy",
            ConsentChoice::Cancel => "cancel",
        }
    }
}

/// 호스트가 표시할 3지선다 동의 프롬프트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPrompt {
    /// 제목 로컬라이즈 키
    pub title_key: String,
    /// 본문 로컬라이즈 키
    pub message_key: String,
    /// 표시 순서대로의 선택지
    pub choices: Vec<ConsentChoice>,
}

impl ConsentPrompt {
    /// 크래시 리포트 옵트인 프롬프트
    pub fn crash_reporting() -> Self {
        Self {
            title_key: CONSENT_TITLE_KEY.to_string(),
            message_key: CONSENT_MESSAGE_KEY.to_string(),
            choices: vec![
                ConsentChoice::Activate,
                ConsentChoice::PrivacyPolicy,
                ConsentChoice::Cancel,
            ],
        }
    }
}

// ============================================================
// 동의 게이트
// ============================================================

/// 토글 요청에 대한 게이트의 판단
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleRequest {
    /// 즉시 비활성화 (확인 없음)
    DisableNow,
    /// 확인 프롬프트 필요 — 토글은 아직 바뀌지 않음
    Confirm(ConsentPrompt),
}

/// 프롬프트 선택 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentResolution {
    /// 동의 — 토글을 켜고 수집 활성화
    Granted,
    /// 개인정보 처리방침 표시 — 토글은 꺼진 상태 유지
    ShowPolicy,
    /// 거절 — 아무것도 바뀌지 않음
    Declined,
}

/// 크래시 리포트 동의 게이트
///
/// 꺼짐→켜짐 요청은 프롬프트를 거쳐야 하고, 켜짐→꺼짐은 즉시 처리된다.
#[derive(Debug, Default)]
pub struct ConsentGate {
    /// 응답 대기 중인 프롬프트 존재 여부
    pending: bool,
}

impl ConsentGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 응답 대기 중인지
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// 토글 요청 처리
    pub fn request_toggle(&mut self, currently_enabled: bool) -> ToggleRequest {
        if currently_enabled {
            self.pending = false;
            ToggleRequest::DisableNow
        } else {
            self.pending = true;
            ToggleRequest::Confirm(ConsentPrompt::crash_reporting())
        }
    }

    /// 프롬프트 응답 처리 (대기 중인 프롬프트가 없으면 None)
    pub fn resolve(&mut self, choice: ConsentChoice) -> Option<ConsentResolution> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        Some(match choice {
            ConsentChoice::Activate => ConsentResolution::Granted,
            ConsentChoice::PrivacyPolicy => ConsentResolution::ShowPolicy,
            ConsentChoice::Cancel => ConsentResolution::Declined,
        })
    }
}

// ============================================================
// 테스트
// ============================================================
