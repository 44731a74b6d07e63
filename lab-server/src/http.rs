use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::get,
    Form, Router,
};
use lab_common::SecurityLevel;
use lab_engine::{
    ContentRoot, DiagnosticService, HelpResolver, Highlighter, PolicyFactory, ProcessRunner,
    PingCommand, SourceResolver, TokioProcessRunner, NOT_FOUND_PLACEHOLDER,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::LabConfig;
use crate::health::{HealthChecker, HealthStatus};
use crate::{pages, ServerError};

/// Placeholder for source requests missing a parameter
pub const SOURCE_NOT_FOUND: &str = "<p>Not found</p>";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    diagnostics: Arc<DiagnosticService>,
    help: Arc<HelpResolver>,
    sources: Arc<SourceResolver>,
    health_checker: Arc<HealthChecker>,
    default_security: SecurityLevel,
}

impl AppState {
    /// State backed by the real ping utility
    pub fn from_config(config: &LabConfig) -> Result<Self, ServerError> {
        let runner = Arc::new(TokioProcessRunner::new(std::time::Duration::from_secs(
            config.ping.timeout_secs,
        )));
        Self::with_runner(config, runner)
    }

    /// State with a caller-supplied process runner
    pub fn with_runner(config: &LabConfig, runner: Arc<dyn ProcessRunner>) -> Result<Self, ServerError> {
        let content_root = ContentRoot::new(&config.content_root)?;
        let highlighter = Arc::new(Highlighter::with_theme(&config.highlight_theme));

        Ok(Self {
            diagnostics: Arc::new(DiagnosticService::new(runner, PingCommand::from(&config.ping))),
            help: Arc::new(HelpResolver::new(content_root.clone(), config.default_locale.clone())),
            sources: Arc::new(SourceResolver::new(content_root.clone(), highlighter)),
            health_checker: Arc::new(HealthChecker::new(content_root, config.ping.program.clone())),
            default_security: config.default_security,
        })
    }
}

/// Query parameters for the exec page
#[derive(Debug, Default, Deserialize)]
pub struct ExecQuery {
    pub security: Option<String>,
    pub ip: Option<String>,
}

/// Form body of the ping form
#[derive(Debug, Default, Deserialize)]
pub struct ExecForm {
    pub ip: Option<String>,
    #[serde(rename = "Submit")]
    pub submit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HelpQuery {
    pub id: Option<String>,
    pub security: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SourceQuery {
    pub id: Option<String>,
    pub security: Option<String>,
}

/// Build the router with all lab routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/vulnerabilities/exec/", get(exec_form_handler).post(exec_submit_handler))
        .route("/vulnerabilities/exec", get(exec_form_handler).post(exec_submit_handler))
        .route("/vulnerabilities/view_help", get(view_help_handler))
        .route("/vulnerabilities/view_source", get(view_source_handler))
        .route("/vulnerabilities/view_source_all", get(view_source_all_handler))
        .fallback(fallback_handler)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serve on an already bound listener until ctrl-c
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

impl AppState {
    fn level_from(&self, raw: Option<&str>) -> SecurityLevel {
        raw.map(SecurityLevel::normalize).unwrap_or(self.default_security)
    }
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(pages::index_page(state.default_security))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health_checker.get_health_status())
}

async fn exec_form_handler(
    State(state): State<AppState>,
    Query(query): Query<ExecQuery>,
) -> Html<String> {
    let level = state.level_from(query.security.as_deref());
    let policy = PolicyFactory::create(level);
    Html(pages::exec_page(level, policy.description(), None))
}

/// Run the diagnostic when the form was submitted.
///
/// The target comes from the form body, falling back to the query string.
async fn exec_submit_handler(
    State(state): State<AppState>,
    Query(query): Query<ExecQuery>,
    Form(form): Form<ExecForm>,
) -> Html<String> {
    let level = state.level_from(query.security.as_deref());
    let policy = PolicyFactory::create(level);

    if form.submit.is_none() {
        return Html(pages::exec_page(level, policy.description(), None));
    }

    let target = form.ip.or(query.ip).unwrap_or_default();
    let report = state.diagnostics.diagnose(level, &target).await;
    info!(run_id = %report.run_id, %level, completed = report.is_completed(), "Exec request handled");

    Html(pages::exec_page(level, policy.description(), Some(&report)))
}

async fn view_help_handler(
    State(state): State<AppState>,
    Query(query): Query<HelpQuery>,
) -> Html<String> {
    let (Some(id), Some(_security), Some(locale)) = (query.id, query.security, query.locale) else {
        return Html(pages::not_found_page(NOT_FOUND_PLACEHOLDER));
    };

    let help = state.help.clone();
    let body = tokio::task::spawn_blocking(move || help.render(&id, &locale))
        .await
        .unwrap_or_else(|e| {
            error!("Help rendering task failed: {}", e);
            NOT_FOUND_PLACEHOLDER.to_string()
        });

    Html(pages::help_page(&body))
}

async fn view_source_handler(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Html<String> {
    let (Some(id), Some(security)) = (query.id, query.security) else {
        return Html(pages::not_found_page(SOURCE_NOT_FOUND));
    };

    // highlighting is CPU bound
    let sources = state.sources.clone();
    match tokio::task::spawn_blocking(move || sources.listing(&id, &security)).await {
        Ok(listing) => Html(pages::source_page(&listing)),
        Err(e) => {
            error!("Source rendering task failed: {}", e);
            Html(pages::not_found_page(SOURCE_NOT_FOUND))
        }
    }
}

async fn view_source_all_handler(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Html<String> {
    let Some(id) = query.id else {
        return Html(pages::not_found_page(SOURCE_NOT_FOUND));
    };

    let sources = state.sources.clone();
    match tokio::task::spawn_blocking(move || sources.listing_all(&id)).await {
        Ok(listings) => Html(pages::source_all_page(&listings)),
        Err(e) => {
            error!("Source rendering task failed: {}", e);
            Html(pages::not_found_page(SOURCE_NOT_FOUND))
        }
    }
}

async fn fallback_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page(NOT_FOUND_PLACEHOLDER)))
}
