use anyhow::{Context, Result};
use axum::Router;
use axum::http::{header, HeaderName, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use wallet_api::routes::create_router;
use wallet_api::routes::openapi::ApiDoc;
use wallet_api::shared::config::AppConfig;
use wallet_api::shared::database::Database;
use wallet_api::shared::logging::{init_logging, LogFormat};
use wallet_api::shared::middleware::ADMIN_KEY_HEADER;
use wallet_api::shared::services::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // 설정 로드 (.env + 환경 변수)
    let config = AppConfig::from_env()?;
    init_logging("info,sqlx=warn", LogFormat::from_str_lossy(&config.log_format));

    // DB 연결 + 마이그레이션
    let db = Database::new(&config.database_url, config.database_max_connections).await?;
    db.initialize().await?;

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(db, &config)?;

    // CORS 설정
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .context("Invalid CORS_ORIGIN")?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(ADMIN_KEY_HEADER),
        ])
        .allow_credentials(true);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "server listening");
    tracing::info!("Swagger UI available at http://{}/api", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
