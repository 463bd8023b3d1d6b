/// Blog Service - Main entry point
use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use blog_service::db::{PgPostStore, PgUserStore};
use blog_service::media::HttpImageHost;
use blog_service::openapi::ApiDoc;
use blog_service::security::password::PasswordPolicy;
use blog_service::{routes, telemetry, AppState, Config};
use token_core::TokenService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("database connection failed: {e}"),
            )
        })?;

    sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("migration failed: {e}"))
    })?;

    tracing::info!("Database connection pool initialized");

    let state = AppState {
        users: Arc::new(PgUserStore::new(pool.clone())),
        posts: Arc::new(PgPostStore::new(pool.clone())),
        images: Arc::new(HttpImageHost::new(
            &config.image_host_url,
            config.image_host_key.clone(),
        )),
        tokens: Arc::new(TokenService::new(&config.jwt_secret, config.token_ttl_secs)),
        policy: PasswordPolicy {
            min_length: config.min_password_len,
        },
    };

    let bind_address = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("HTTP server listening on {}", bind_address);

    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let openapi_doc = ApiDoc::openapi();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api/v1/openapi.json", openapi_doc),
            )
            .configure(routes::configure(state.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
