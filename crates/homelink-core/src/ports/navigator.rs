//! 내비게이션 호스트 포트.
//!
//! 화면 전환 자체는 코어 범위 밖이며, 컨트롤러는 신호만 보낸다.

/// 화면 전환 신호 수신자
pub trait Navigator: Send + Sync {
    /// 이전 화면으로 복귀 (취소)
    fn pop_to_previous(&self);

    /// 루트 화면으로 복귀 (저장 완료)
    fn pop_to_root(&self);

    /// 루트 화면에 캐시된 페이지 상태 초기화
    fn reset_page_url(&self);

    /// 개인정보 처리방침 표시
    fn present_privacy_policy(&self, url: &str);

    /// 기본 사이트맵 선택 화면 표시
    fn show_sitemap_picker(&self);
}
