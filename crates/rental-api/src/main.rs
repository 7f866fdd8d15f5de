//! 주택 임대 API 서버.
//!
//! 설정을 읽고 데이터베이스에 연결한 뒤 Axum REST API 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use rental_api::auth::{AuthService, PasswordHasher, TokenIssuer};
use rental_api::repository::{run_migrations, PgHouseStore, PgUserStore};
use rental_api::routes::create_api_router;
use rental_api::state::AppState;
use rental_core::{init_logging, AppConfig, ServerConfig};

/// CORS 레이어 생성.
///
/// `server.cors_origins`가 비어 있으면 모든 origin을 허용합니다.
/// 목록이 있으면 해당 origin만 허용하고 자격 증명을 허용합니다.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let restricted = !origins.is_empty();
    let allow_origin = if restricted {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    } else {
        if !config.cors_origins.is_empty() {
            warn!("server.cors_origins contains no valid origins, allowing any");
        }
        AllowOrigin::any()
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        // 와일드카드 origin과 자격 증명은 함께 쓸 수 없음
        .allow_credentials(restricted)
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer(server))
}

/// 설정으로 AppState 구성.
async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(config.database_url()?)
        .await
        .context("데이터베이스 연결 실패")?;
    info!("Connected to PostgreSQL successfully");

    run_migrations(&pool)
        .await
        .context("데이터베이스 마이그레이션 실패")?;

    let tokens = TokenIssuer::new(config.jwt_secret()?, config.jwt.expires_in_minutes);
    let hasher = PasswordHasher::new(&config.password).context("비밀번호 해싱 설정 오류")?;

    let auth = AuthService::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(hasher),
        Arc::new(tokens),
    );
    let houses = Arc::new(PgHouseStore::new(pool));

    Ok(AppState::new(auth, houses))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting House Rent API server...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "소켓 주소 설정이 유효하지 않습니다: {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let state = Arc::new(create_app_state(&config).await?);
    info!(
        version = %state.version,
        token_expiry_minutes = ?config.jwt.expires_in_minutes,
        "Application state initialized"
    );

    let app = create_router(state, &config.server);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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
