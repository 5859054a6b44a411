//! 설정 화면 레이아웃 정책.
//!
//! (데모 모드, 서버 주 버전) → 섹션별 행 목록과 가시성.
//! 행은 위치 인덱스가 아니라 의미 기반 식별자([`SettingsRow`])로 구분하며,
//! 가시성은 행마다 선언된 조건으로 결정된다.

use serde::Serialize;

/// 서버 버전을 알 수 없을 때 가정하는 주 버전
pub const DEFAULT_SERVER_MAJOR_VERSION: u32 = 2;

/// 이 버전부터 아이콘 포맷 행을 숨긴다
const ICON_TYPE_HIDDEN_SINCE: u32 = 3;

/// 분류되지 않은 섹션의 고정 행 수
const OTHER_SECTION_ROWS: usize = 10;

/// 연결 섹션 행 (표시 순서)
const CONNECTION_ROWS: [SettingsRow; 6] = [
    SettingsRow::DemoMode,
    SettingsRow::LocalUrl,
    SettingsRow::RemoteUrl,
    SettingsRow::Username,
    SettingsRow::Password,
    SettingsRow::AlwaysSendCredentials,
];

/// 애플리케이션 설정 섹션 행 (표시 순서)
const APPLICATION_ROWS: [SettingsRow; 11] = [
    SettingsRow::IgnoreTlsValidation,
    SettingsRow::IdleScreenOff,
    SettingsRow::RealTimeSliders,
    SettingsRow::SelectSitemap,
    SettingsRow::ClearImageCache,
    SettingsRow::IconType,
    SettingsRow::SendCrashReports,
    SettingsRow::PrivacyPolicy,
    SettingsRow::AppVersion,
    SettingsRow::ServerVersion,
    SettingsRow::Legal,
];

/// 설정 화면 섹션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    /// 서버 연결
    Connection,
    /// 애플리케이션 설정
    Application,
    /// 그 외 섹션 (인덱스)
    Other(usize),
}

impl Section {
    /// 테이블 섹션 인덱스로부터 변환
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Section::Connection,
            1 => Section::Application,
            n => Section::Other(n),
        }
    }

    /// 섹션 헤더 (로컬라이즈 키)
    pub fn title_key(&self) -> &'static str {
        match self {
            Section::Connection => "openhab_connection",
            _ => "application_settings",
        }
    }
}

/// 의미 기반 행 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SettingsRow {
    // --- 연결 ---
    DemoMode,
    LocalUrl,
    RemoteUrl,
    Username,
    Password,
    AlwaysSendCredentials,

    // --- 애플리케이션 ---
    IgnoreTlsValidation,
    IdleScreenOff,
    RealTimeSliders,
    SelectSitemap,
    ClearImageCache,
    IconType,
    SendCrashReports,
    PrivacyPolicy,
    AppVersion,
    ServerVersion,
    Legal,

    /// 분류되지 않은 섹션의 정적 행
    Static { section: usize, index: usize },
}

impl SettingsRow {
    /// 행 목록에 포함되는지 (행 수에 영향)
    ///
    /// 데모 모드에서는 데모 토글을 제외한 연결 필드가 목록에서 빠진다.
    pub fn is_listed(&self, demo_mode: bool) -> bool {
        match self {
            SettingsRow::LocalUrl
            | SettingsRow::RemoteUrl
            | SettingsRow::Username
            | SettingsRow::Password
            | SettingsRow::AlwaysSendCredentials => !demo_mode,
            _ => true,
        }
    }

    /// 목록에 포함된 행이 실제로 보이는지 (높이 0 여부)
    pub fn is_visible(&self, server_major_version: u32) -> bool {
        match self {
            SettingsRow::IconType => server_major_version < ICON_TYPE_HIDDEN_SINCE,
            _ => true,
        }
    }
}

/// 행 하나의 배치 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowLayout {
    /// 행 식별자
    pub row: SettingsRow,
    /// 보임 여부 (false면 높이 0으로 렌더링)
    pub visible: bool,
}

/// 서버 주 버전 해석 (없으면 버전 2)
pub fn effective_server_version(server_major_version: Option<u32>) -> u32 {
    server_major_version.unwrap_or(DEFAULT_SERVER_MAJOR_VERSION)
}

/// 섹션의 행 배치
pub fn rows(section: Section, demo_mode: bool, server_major_version: Option<u32>) -> Vec<RowLayout> {
    let version = effective_server_version(server_major_version);
    let layout = |row: &SettingsRow| RowLayout {
        row: *row,
        visible: row.is_visible(version),
    };

    match section {
        Section::Connection => CONNECTION_ROWS
            .iter()
            .filter(|row| row.is_listed(demo_mode))
            .map(layout)
            .collect(),
        Section::Application => APPLICATION_ROWS
            .iter()
            .filter(|row| row.is_listed(demo_mode))
            .map(layout)
            .collect(),
        Section::Other(section) => (0..OTHER_SECTION_ROWS)
            .map(|index| RowLayout {
                row: SettingsRow::Static { section, index },
                visible: true,
            })
            .collect(),
    }
}

/// 섹션의 행 수 (숨겨진 행 포함)
pub fn row_count(section: Section, demo_mode: bool, server_major_version: Option<u32>) -> usize {
    rows(section, demo_mode, server_major_version).len()
}

/// 테이블 위치 → 행 배치
pub fn row_at(
    section: Section,
    index: usize,
    demo_mode: bool,
    server_major_version: Option<u32>,
) -> Option<RowLayout> {
    rows(section, demo_mode, server_major_version)
        .get(index)
        .copied()
}

/// 화면 전체 레이아웃 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenLayout {
    /// 데모 모드
    pub demo_mode: bool,
    /// 적용된 서버 주 버전
    pub server_major_version: u32,
    /// 연결 섹션
    pub connection: Vec<RowLayout>,
    /// 애플리케이션 설정 섹션
    pub application: Vec<RowLayout>,
}

impl ScreenLayout {
    /// 레이아웃 계산
    pub fn compute(demo_mode: bool, server_major_version: Option<u32>) -> Self {
        Self {
            demo_mode,
            server_major_version: effective_server_version(server_major_version),
            connection: rows(Section::Connection, demo_mode, server_major_version),
            application: rows(Section::Application, demo_mode, server_major_version),
        }
    }

    /// 섹션의 행 수
    pub fn row_count(&self, section: Section) -> usize {
        match section {
            Section::Connection => self.connection.len(),
            Section::Application => self.application.len(),
            Section::Other(_) => OTHER_SECTION_ROWS,
        }
    }

    /// 행이 보이는지 (목록에 없으면 false)
    pub fn is_visible(&self, row: SettingsRow) -> bool {
        self.connection
            .iter()
            .chain(self.application.iter())
            .any(|r| r.row == row && r.visible)
    }
}
