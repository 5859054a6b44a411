//! # homelink-app
//!
//! HomeLink 설정 CLI 진입점.
//! 설정 로드, 어댑터 와이어링, 편집 컨트롤러 구동.

mod adapters;
mod commands;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use homelink_core::config::AppConfig;
use homelink_core::config_manager::ConfigManager;
use homelink_core::ports::companion::CompanionSync;
use homelink_settings::{
    ControllerOptions, Reaction, Section, SettingsController, SettingsEvent, SettingsRow,
    SettingsModel, SettingsServices,
};
use homelink_storage::JsonPreferencesStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::{
    ConsoleNavigator, CrashCollection, DirectoryImageCache, ProcessTrustManager,
    SnapshotCompanion,
};

/// 컴패니언 동기화 완료 대기 시간
const COMPANION_WAIT: Duration = Duration::from_secs(3);

/// HomeLink 설정 도구
///
/// 스마트홈 클라이언트의 연결/애플리케이션 설정을 조회하고 변경한다.
#[derive(Parser, Debug)]
#[command(name = "homelink")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 로그 레벨 (trace, debug, info, warn, error). 미지정 시 설정 파일 값
    #[arg(long, short = 'l')]
    log_level: Option<String>,

    /// 데이터 저장 경로 (기본: 플랫폼 데이터 디렉토리)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 서버 주 버전 (설정 파일 값보다 우선)
    #[arg(long)]
    server_version: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 저장된 설정 출력 (비밀번호는 마스킹)
    Show,
    /// 현재 설정 기준 화면 레이아웃 출력
    Layout,
    /// 설정 하나를 변경하고 저장
    Set {
        /// 환경설정 키 (예: localUrl, demomode, iconType)
        key: String,
        /// 새 값
        value: String,
        /// 크래시 리포트 활성화 동의
        #[arg(long)]
        accept_consent: bool,
    },
    /// 이미지 캐시 비우기
    ClearCache,
    /// 편집 없이 화면을 열고 취소
    Reset,
}

/// 데이터 디렉토리 결정 (CLI 인자 또는 플랫폼별 기본 경로)
fn resolve_data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir
        .or_else(|| ConfigManager::data_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// 설정 관리자 생성 — 플랫폼 경로 실패 시 데이터 디렉토리로 대체
fn load_config(args: &Args, data_dir: &Path) -> Result<ConfigManager> {
    if let Some(path) = &args.config {
        return Ok(ConfigManager::with_path(path.clone())?);
    }
    match ConfigManager::new() {
        Ok(manager) => Ok(manager),
        Err(e) => {
            eprintln!("설정 관리자 초기화 실패, 데이터 디렉토리 사용: {e}");
            Ok(ConfigManager::with_path(data_dir.join("config.json"))?)
        }
    }
}

fn init_tracing(level: &str) {
    let log_filter = format!(
        "homelink={level},homelink_app={level},homelink_core={level},homelink_storage={level},homelink_settings={level}"
    );
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();
}

/// 실행 컨텍스트 — 와이어링된 협력자 묶음
struct Wiring {
    services: SettingsServices,
    options: ControllerOptions,
    navigator: Arc<ConsoleNavigator>,
    trust: Arc<ProcessTrustManager>,
    crash_reporter: Arc<CrashCollection>,
    companion: Option<Arc<SnapshotCompanion>>,
}

fn wire(config: &AppConfig, data_dir: &Path, server_version: Option<u32>) -> Result<Wiring> {
    let prefs_path = config.preferences_path(data_dir);
    let store = Arc::new(JsonPreferencesStore::open(&prefs_path)?);
    info!("환경설정 파일: {}", prefs_path.display());

    // 저장된 동의 상태로 수집기 시작
    let persisted = SettingsModel::new(store.clone()).load();
    let crash_reporter = Arc::new(CrashCollection::new(persisted.send_crash_reports));
    let trust = Arc::new(ProcessTrustManager::default());
    let navigator = Arc::new(ConsoleNavigator::default());
    let companion = config
        .companion
        .enabled
        .then(|| Arc::new(SnapshotCompanion::new(data_dir.join("companion.json"))));

    let services = SettingsServices {
        store,
        trust: trust.clone(),
        crash_reporter: crash_reporter.clone(),
        navigator: navigator.clone(),
        image_cache: Arc::new(DirectoryImageCache::new(data_dir.join("image-cache"))),
        companion: companion.clone().map(|c| c as Arc<dyn CompanionSync>),
    };
    let options = ControllerOptions {
        server_major_version: server_version.or(config.server.major_version),
        privacy_policy_url: config.privacy.policy_url.clone(),
    };

    Ok(Wiring {
        services,
        options,
        navigator,
        trust,
        crash_reporter,
        companion,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn show(ctrl: &SettingsController) -> Result<()> {
    let masked = ctrl
        .record()
        .entries()
        .into_iter()
        .map(|(key, value)| -> Result<(String, serde_json::Value)> {
            let json = if key.is_secret() {
                serde_json::Value::String("********".to_string())
            } else {
                serde_json::to_value(value)?
            };
            Ok((key.as_str().to_string(), json))
        })
        .collect::<Result<serde_json::Map<_, _>>>()?;
    print_json(&masked)
}

fn layout(ctrl: &SettingsController) -> Result<()> {
    let layout = ctrl.layout();
    for section in [Section::Connection, Section::Application] {
        println!("[{}] {}행", section.title_key(), layout.row_count(section));
        let rows = match section {
            Section::Connection => &layout.connection,
            _ => &layout.application,
        };
        for row in rows {
            let marker = if row.visible { " " } else { "-" };
            println!("  {marker} {:?}", row.row);
        }
    }
    Ok(())
}

async fn set(
    mut ctrl: SettingsController,
    wiring: &Wiring,
    key: &str,
    value: &str,
    accept_consent: bool,
) -> Result<()> {
    let crash_enabled = ctrl.form().send_crash_reports;
    let events = commands::events_for_set(key, value, crash_enabled, accept_consent)?;

    for event in events {
        match ctrl.handle(event)? {
            Reaction::PromptCrashConsent(prompt) => {
                info!("동의 프롬프트: {} / {}", prompt.title_key, prompt.message_key);
            }
            Reaction::RefreshLayout(layout) => {
                info!(
                    "레이아웃 갱신: 연결 {}행, 애플리케이션 {}행",
                    layout.connection.len(),
                    layout.application.len()
                );
            }
            _ => {}
        }
    }

    if !ctrl.has_unsaved_changes() {
        warn!("변경 사항 없음: {key}");
    }

    ctrl.handle(SettingsEvent::Save)?;
    println!("저장 완료: {key}");

    if let Some(companion) = &wiring.companion {
        if tokio::time::timeout(COMPANION_WAIT, companion.wait_synced())
            .await
            .is_err()
        {
            warn!("컴패니언 동기화 대기 시간 초과");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let data_dir = resolve_data_dir(args.data_dir.clone());
    let config_manager = load_config(&args, &data_dir)?;
    let config = config_manager.get();

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_tracing(&level);
    info!("설정 파일: {}", config_manager.config_path().display());

    let wiring = wire(&config, &data_dir, args.server_version)?;
    let mut ctrl = SettingsController::open(wiring.services.clone(), wiring.options.clone());

    match &args.command {
        Command::Show => show(&ctrl)?,
        Command::Layout => layout(&ctrl)?,
        Command::Set {
            key,
            value,
            accept_consent,
        } => set(ctrl, &wiring, key, value, *accept_consent).await?,
        Command::ClearCache => {
            ctrl.handle(SettingsEvent::RowSelected(SettingsRow::ClearImageCache))?;
            println!("이미지 캐시 비움");
        }
        Command::Reset => {
            let reaction = ctrl.handle(SettingsEvent::Cancel)?;
            let Reaction::Closed(state) = reaction else {
                bail!("예상하지 못한 반응: {reaction:?}");
            };
            println!("편집 세션 종료: {state}");
        }
    }

    for entry in wiring.navigator.history() {
        info!("처리된 내비게이션: {entry}");
    }
    info!(
        "크래시 리포트 수집: {}, TLS 검증 무시: {}",
        wiring.crash_reporter.is_enabled(),
        wiring.trust.ignores_tls_validation()
    );
    Ok(())
}
