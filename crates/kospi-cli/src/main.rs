//! KOSPI 대시보드 CLI.
//!
//! 사용 예:
//! ```text
//! kospi top
//! kospi --market KOSDAQ top
//! kospi search 삼성
//! kospi show -n 삼성전자 SK하이닉스 -f 2024-01-01 -t 2024-06-30
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kospi_cli::{apply_market, render_ranking, render_search, render_view, OutputFormat, ShowConfig};
use kospi_core::{init_logging, parse_date, AppConfig, LogConfig, LogFormat};
use kospi_dashboard::DashboardContext;
use kospi_data::{build_listing_source, build_series_source};
use tracing::info;

#[derive(Parser)]
#[command(name = "kospi")]
#[command(about = "KOSPI 주식 차트 대시보드 CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    /// 시장 (KOSPI, KOSDAQ). 지정하지 않으면 설정값
    #[arg(short, long, global = true)]
    market: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 시가총액 상위 종목
    Top,

    /// 종목명 또는 종목코드로 검색
    Search {
        /// 검색어
        query: String,

        /// 최대 결과 수
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// 선택한 종목의 지표와 차트 데이터
    Show {
        /// 종목명 (여러 개 가능, 입력 순서 유지)
        #[arg(short, long, num_args = 1.., required = true)]
        names: Vec<String>,

        /// 시작 날짜 (YYYY-MM-DD, 기본: 설정값)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        to: Option<String>,

        /// 출력 형식 (table, json)
        #[arg(long, default_value = "table")]
        format: String,

        /// 표마다 보여줄 최근 행 수 (0 = 전체)
        #[arg(long, default_value = "20")]
        rows: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("설정 로드 실패: {}", cli.config))?;
    apply_market(&mut config, cli.market.as_deref())?;

    // 표 출력과 섞이지 않도록 로그는 stderr로
    let log_config = LogConfig::from(&config.logging)
        .with_format(LogFormat::Compact)
        .with_stderr(true);
    init_logging(log_config).map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    let listing_source = build_listing_source(&config.data)?;
    let series_source = build_series_source(&config.data)?;
    let dashboard = DashboardContext::load(listing_source.as_ref(), series_source, &config)
        .await
        .context("종목 목록 로드 실패")?;

    match cli.command {
        Commands::Top => {
            print!("{}", render_ranking(&dashboard.ranking()));
        }

        Commands::Search { query, limit } => {
            let entries = dashboard.listing().search(&query, limit);
            print!("{}", render_search(&entries, dashboard.settings()));
        }

        Commands::Show {
            names,
            from,
            to,
            format,
            rows,
        } => {
            let format = OutputFormat::parse(&format)?;
            let start = from.as_deref().map(parse_date).transpose()?;
            let end = to.as_deref().map(parse_date).transpose()?;
            let range = dashboard.date_range(start, end)?;

            info!(
                selected = names.len(),
                start = %range.start,
                end = %range.end,
                source = dashboard.series_source_name(),
                "대시보드 렌더링"
            );

            let view = dashboard.render(&names, range).await?;
            print!("{}", render_view(&view, &ShowConfig { format, rows })?);
        }
    }

    Ok(())
}
