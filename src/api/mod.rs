use crate::api::handlers::{auth, health, root};
use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, warn, Span};
use ulid::Ulid;
use url::Url;
use utoipa_swagger_ui::SwaggerUi;

pub mod handlers;
mod openapi;

pub use handlers::auth::{
    AuthConfig, AuthError, AuthState, Environment, InsertOutcome, MemoryUserStore, NewUser,
    PgUserStore, StoreError, User, UserStore,
};
pub use openapi::openapi;

/// Start the server
/// # Errors
/// Return error if the database is configured but unreachable, or the listener fails
pub async fn new(port: u16, dsn: Option<String>, auth_config: AuthConfig) -> Result<()> {
    let store: Option<Arc<dyn UserStore>> = match dsn {
        Some(dsn) => {
            let store = PgUserStore::connect(&dsn).await?;
            store
                .ensure_schema()
                .await
                .context("Failed to apply database schema")?;
            let store: Arc<dyn UserStore> = Arc::new(store);
            Some(store)
        }
        None => {
            warn!("No database DSN configured, register and login will fail");
            None
        }
    };

    if auth_config.jwt_secret().is_none() {
        warn!("No JWT secret configured, login will fail");
    }

    let auth_state = Arc::new(AuthState::new(auth_config, store));
    auth_state
        .prepare()
        .await
        .context("Failed to prepare login hash")?;
    let app = router(auth_state)?;

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the application router around `auth_state`.
///
/// # Errors
/// Returns an error if the configured frontend origin is not a valid URL
pub fn router(auth_state: Arc<AuthState>) -> Result<Router> {
    let cors = match auth_state.config().frontend_origin() {
        Some(origin) => CorsLayer::new()
            .allow_headers([CONTENT_TYPE])
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(AllowOrigin::exact(frontend_origin(origin)?))
            .allow_credentials(true),
        None => CorsLayer::new(),
    };

    let app = Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health).options(health::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(auth_state)),
        );

    Ok(app)
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn frontend_origin(frontend_base_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(frontend_base_url)
        .with_context(|| format!("Invalid frontend origin: {frontend_base_url}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("Frontend origin must include a valid host: {frontend_base_url}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build frontend origin header")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Gracefully shutdown");
}
