use std::future::Future;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::Session;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::generate::{EMPTY_PAYLOAD_WARNING, GenerateOutcome, display, on_generate};
use crate::page::{self, Notice, PageContext};
use crate::params::GenerateForm;
use crate::session::{self, SessionState, session_layer};
use crate::theme::resolve_theme;
use crate::DOWNLOAD_FILE_NAME;

const THEME_PARAM: &str = "theme";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let sessions = session_layer(&state.config);
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route(&format!("/{DOWNLOAD_FILE_NAME}"), get(download))
        .route("/health", get(health))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render_page(state: &AppState, current: &SessionState, form: &GenerateForm, notice: Option<Notice>) -> String {
    page::render(&PageContext {
        theme: resolve_theme(current.theme, None),
        form,
        notice,
        download: display(current),
        portfolio_url: state.config.portfolio_url.as_deref(),
    })
}

/// GET /
///
/// Any `theme` query parameter is applied to the session and then dropped
/// from the URL with a redirect, so reloading the page does not apply it
/// again. When the parameter repeats, the last valid value wins.
async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let current = SessionState::load(&session).await?;

    let requested_theme = {
        let mut overrides = query
            .iter()
            .filter(|(key, _)| key == THEME_PARAM)
            .map(|(_, value)| value.as_str())
            .peekable();
        if overrides.peek().is_some() {
            Some(overrides.fold(current.theme, |theme, requested| {
                resolve_theme(theme, Some(requested)).effective
            }))
        } else {
            None
        }
    };
    if let Some(theme) = requested_theme {
        if theme != current.theme {
            session::store_theme(&session, theme).await?;
        }
        tracing::debug!(%theme, "theme override consumed");
        return Ok(Redirect::to("/").into_response());
    }

    let form = GenerateForm::defaults(current.theme);
    Ok(Html(render_page(&state, &current, &form, None)).into_response())
}

/// POST /generate
async fn generate(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GenerateForm>,
) -> Result<Response, AppError> {
    let mut current = SessionState::load(&session).await?;

    let params = match form.collect() {
        Ok(params) => params,
        Err(err) => {
            tracing::warn!("rejected settings: {err}");
            let notice = Notice::error(format!("Invalid settings: {err}"));
            let html = render_page(&state, &current, &form, Some(notice));
            return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
        }
    };

    let outcome = on_generate(&mut current, &params)?;
    session::store_image(&session, current.image.as_ref()).await?;

    let (status, notice) = match outcome {
        GenerateOutcome::Generated => {
            tracing::info!(tier = ?params.tier, module_size = params.module_size, "QR code generated");
            (StatusCode::OK, None)
        }
        GenerateOutcome::EmptyPayload => (StatusCode::OK, Some(Notice::warning(EMPTY_PAYLOAD_WARNING))),
        GenerateOutcome::Rejected(reason) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Some(Notice::error(format!("Could not generate a QR code: {reason}"))),
        ),
    };

    let html = render_page(&state, &current, &form, notice);
    Ok((status, Html(html)).into_response())
}

/// GET /qr_code.png
async fn download(session: Session) -> Result<Response, AppError> {
    let current = SessionState::load(&session).await?;
    let file = display(&current).ok_or(AppError::NoImage)?;

    Ok((
        [
            (header::CONTENT_TYPE, file.mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.image.bytes().to_vec(),
    )
        .into_response())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    tracing::info!("QR code server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(AppState::new(config)))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
