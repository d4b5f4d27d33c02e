use std::env;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};
use anyhow::{Result, Context};
use clap::{Arg, ArgMatches, Command};
use tracing::{info, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tokio::signal;

use vibeguard_dashboard::api::{HttpMetricsClient, MetricsSource};
use vibeguard_dashboard::config::Config;
use vibeguard_dashboard::mocks::{get_mock_config, is_mock_mode, MockMetricsSource};
use vibeguard_dashboard::{headless, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let headless_mode = matches.get_flag("headless");

    // .env 로드 (없으면 무시)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // 설정 파일 로드 (없으면 기본값)
    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config/default.toml");
    let config_found = Path::new(config_path).exists();
    let mut config = if config_found {
        Config::load(config_path)
            .await
            .with_context(|| format!("설정 파일 로드 실패: {}", config_path))?
    } else {
        Config::default()
    };

    // 로깅 초기화
    let log_level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("info");
    init_logging(log_filter(log_level), headless_mode, &config.ui.log_file)?;

    if headless_mode {
        print_banner();
    }
    if dotenv_loaded {
        info!("📄 .env 파일 로드됨");
    }
    if config_found {
        info!("📋 설정 파일 로드됨: {}", config_path);
    } else {
        info!("📋 설정 파일 없음 ({}), 기본값 사용", config_path);
    }

    // 환경 변수 및 명령줄 옵션 적용
    load_environment_variables(&mut config);
    apply_cli_overrides(&mut config, &matches);

    // 설정 검증
    if let Err(e) = config.validate() {
        error!("❌ 설정 검증 실패: {}", e);
        std::process::exit(1);
    }
    info!("✅ 설정 로드 완료 (API: {}, {}초 간격)", config.api.base_url, config.polling.interval_secs);

    let source = build_source(&config)?;

    if headless_mode {
        info!("🖥️ 헤드리스 모드로 실행");
        headless::run(&config, source, async {
            if let Err(err) = signal::ctrl_c().await {
                error!("❌ 신호 처리 오류: {}", err);
            }
        })
        .await;
    } else {
        tui::run(&config, source).await.context("대시보드 실행 실패")?;
    }

    info!("✅ VibeGuard 대시보드 종료");
    Ok(())
}

fn build_cli() -> Command {
    Command::new("vibeguard")
        .version("0.1.0")
        .author("VibeGuard Team <team@vibeguard.ai>")
        .about("🛡️ VibeGuard AI 스캠 탐지 대시보드 - opBNB Mainnet")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("설정 파일 경로")
                .default_value("config/default.toml")
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("로그 레벨 (trace, debug, info, warn, error)")
                .default_value("info")
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .help("지표 API 기본 URL")
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("SECS")
                .help("폴링 주기 (초)")
                .value_parser(clap::value_parser!(u64))
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .help("Mock 모드 (원격 API 대신 모의 데이터 사용)")
                .action(clap::ArgAction::SetTrue)
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .help("터미널 UI 없이 로그만 출력")
                .action(clap::ArgAction::SetTrue)
        )
}

fn log_filter(level: &str) -> &'static str {
    match level {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// 헤드리스 모드는 stdout, TUI 모드는 화면이 깨지지 않도록 로그 파일에 기록
fn init_logging(log_filter: &str, headless_mode: bool, log_file: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log_filter.into());

    if headless_mode {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("로그 파일 열기 실패: {}", log_file))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

fn print_banner() {
    println!(r#"
    ╔══════════════════════════════════════════════════════════════╗
    ║                                                              ║
    ║  🛡️ VibeGuard AI 대시보드 v0.1.0                             ║
    ║                                                              ║
    ║  Neural Security Sentinel • opBNB Mainnet                    ║
    ║                                                              ║
    ║  📊 지표:                                                    ║
    ║     • 총 스캔 수 / 보호 중인 지갑                            ║
    ║     • 방지된 손실 (USD) / 활성 보호                          ║
    ║                                                              ║
    ╚══════════════════════════════════════════════════════════════╝
    "#);
}

fn load_environment_variables(config: &mut Config) {
    if let Ok(api_url) = env::var("VIBEGUARD_API_URL") {
        config.api.base_url = api_url;
        info!("🌐 API URL loaded from environment");
    }

    if let Ok(interval) = env::var("VIBEGUARD_POLL_INTERVAL_SECS") {
        match interval.parse::<u64>() {
            Ok(secs) => {
                config.polling.interval_secs = secs;
                info!("⏰ Poll interval loaded from environment: {}s", secs);
            }
            Err(_) => warn!("⚠️ VIBEGUARD_POLL_INTERVAL_SECS 값이 올바르지 않음: {}", interval),
        }
    }

    if is_mock_mode() {
        config.api.mock_mode = true;
        info!("🎭 API_MODE=mock detected");
    }
}

fn apply_cli_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(api_url) = matches.get_one::<String>("api-url") {
        config.api.base_url = api_url.clone();
    }
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.polling.interval_secs = *interval;
    }
    if matches.get_flag("mock") {
        config.api.mock_mode = true;
    }
}

fn build_source(config: &Config) -> Result<Arc<dyn MetricsSource>> {
    if config.api.mock_mode {
        warn!("🧪 Mock 모드 활성화 - 원격 API 대신 모의 데이터를 사용합니다");
        return Ok(Arc::new(MockMetricsSource::new(get_mock_config())));
    }

    let client = HttpMetricsClient::new(&config.api.base_url, config.request_timeout())
        .context("HTTP 클라이언트 초기화 실패")?;
    info!("🔌 지표 API: {}", client.base_url());
    Ok(Arc::new(client))
}
