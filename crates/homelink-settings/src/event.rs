//! 편집 컨트롤러 입력 이벤트와 반응.
//!
//! 화면의 각 콜백은 이 이벤트 중 하나를 보내고,
//! 컨트롤러의 전이 함수가 이를 처리한다.

use homelink_core::consent::{ConsentChoice, ConsentPrompt};

use crate::controller::ControllerState;
use crate::form::{FlagField, TextField};
use crate::layout::{ScreenLayout, SettingsRow};

/// 사용자 입력 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// 문자열 필드 편집
    EditText { field: TextField, value: String },
    /// 일반 스위치 변경
    SetFlag { field: FlagField, enabled: bool },
    /// 아이콘 포맷 세그먼트 선택
    SelectIconSegment(i64),
    /// 데모 모드 스위치 변경
    ToggleDemoMode(bool),
    /// 크래시 리포트 스위치 탭
    CrashReportingTapped,
    /// 동의 프롬프트 응답
    ConsentChosen(ConsentChoice),
    /// 행 선택
    RowSelected(SettingsRow),
    /// 저장 버튼
    Save,
    /// 취소 버튼
    Cancel,
}

/// 호스트가 수행해야 할 화면 갱신
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// 갱신 없음
    Nothing,
    /// 컨트롤 값만 갱신
    RefreshForm,
    /// 행 구성 다시 그리기
    RefreshLayout(ScreenLayout),
    /// 동의 프롬프트 표시
    PromptCrashConsent(ConsentPrompt),
    /// 편집 세션 종료
    Closed(ControllerState),
}
