//! KOSPI 대시보드 API 서버 진입점.
//!
//! 시작 시 종목 목록을 한 번 로드한 뒤 요청마다 렌더링 패스를 수행합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use axum::Router;
use kospi_api::{create_api_router, AppState};
use kospi_core::{init_logging, AppConfig, LogConfig};
use kospi_dashboard::DashboardContext;
use kospi_data::{build_listing_source, build_series_source};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// CORS 설정.
///
/// `CORS_ORIGINS` 환경변수(쉼표 구분)가 없으면 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

fn create_router(state: Arc<AppState>, timeout: Duration) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var("KOSPI_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let config = AppConfig::load(&config_path)?;

    init_logging(LogConfig::from(&config.logging))?;
    info!(config = %config_path, "Starting KOSPI dashboard API server...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let listing_source = build_listing_source(&config.data)?;
    let series_source = build_series_source(&config.data)?;

    // 종목 목록은 세션(프로세스) 동안 한 번만 로드
    let dashboard =
        DashboardContext::load(listing_source.as_ref(), series_source, &config).await?;
    let state = Arc::new(AppState::new(dashboard));

    info!(
        version = %state.version,
        market = %state.dashboard.listing().market(),
        entries = state.dashboard.listing().len(),
        series_source = state.dashboard.series_source_name(),
        "Application state initialized"
    );

    // 렌더링 한 번에 종목당 요청 하나씩 순차로 나가므로 여유를 둠
    let request_timeout = Duration::from_secs(config.data.timeout_secs.saturating_mul(
        config.dashboard.max_selections as u64 + 1,
    ));
    let app = create_router(state, request_timeout);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
