// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use quizdeck::{HistoryStore, InMemoryStore};
use quizdeck_api::{
    ApiError, CategoryResponse, CategoryTreeResponse, CreateCategoryRequest, ListQuestionsRequest,
    ListQuestionsResponse, ModerationResponse, RecordHistoryRequest, RecordHistoryResponse,
    ResetHistoryResponse, SubmitQuestionRequest, SubmitQuestionResponse, UniqueQuestionsRequest,
    UniqueQuestionsResponse, UpdateCategoryRequest, UpdatePendingRequest, approve_question,
    create_category, get_category_tree, list_questions, record_history, reject_question,
    reset_history, sample_unique_questions, submit_question, update_category,
    update_pending_question,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

/// `QuizDeck` Server - HTTP server for the `QuizDeck` quiz platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed for the sampler's random source. If not provided, the
    /// generator is seeded from OS entropy.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Deadline for store operations, in milliseconds
    #[arg(long, default_value_t = 5000)]
    store_timeout_ms: u64,
}

/// Application state shared across handlers.
///
/// The store and history are internally synchronized; the sampler's
/// random source is wrapped in a Mutex so concurrent sample requests
/// draw from one generator.
#[derive(Clone)]
struct AppState {
    /// The question store.
    store: Arc<InMemoryStore>,
    /// The per-user delivery history.
    history: Arc<HistoryStore>,
    /// The injected random source for the sampler.
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    fn new(store: InMemoryStore, rng: StdRng) -> Self {
        Self {
            store: Arc::new(store),
            history: Arc::new(HistoryStore::new()),
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

/// Query parameters for the paginated question listing.
#[derive(Debug, Deserialize)]
struct ListQuestionsQuery {
    /// The 1-based page number. Defaults to 1.
    page: Option<usize>,
    /// The number of items per page. Defaults to 25.
    page_size: Option<usize>,
    /// `true` restricts the listing to approved questions, `false` to
    /// questions still awaiting moderation.
    approved: Option<bool>,
    /// Restrict the listing to the requesting user's own submissions.
    only_mine: Option<bool>,
    /// The requesting identity; required when `only_mine` is set.
    user_id: Option<String>,
    /// Restrict the listing to questions in this category.
    category_id: Option<i64>,
}

/// Default page size for the question listing.
const DEFAULT_PAGE_SIZE: usize = 25;

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. }
            | ApiError::InvalidState { .. }
            | ApiError::NoEligibleQuestions => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::Timeout { .. } => {
                error!(error = %err, "Store timeout");
                Self {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    message: err.to_string(),
                }
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handler for POST `/questions/unique` endpoint.
///
/// Samples a unique question set for the requesting user.
async fn handle_sample_questions(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UniqueQuestionsRequest>,
) -> Result<Json<UniqueQuestionsResponse>, HttpError> {
    let mut rng = app_state.rng.lock().await;
    let response: UniqueQuestionsResponse =
        sample_unique_questions(app_state.store.as_ref(), &app_state.history, &mut *rng, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/history` endpoint.
///
/// Records delivered question ids for a user.
async fn handle_record_history(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RecordHistoryRequest>,
) -> Result<Json<RecordHistoryResponse>, HttpError> {
    let response: RecordHistoryResponse = record_history(&app_state.history, &req)?;
    Ok(Json(response))
}

/// Handler for DELETE `/history/{user_id}` endpoint.
///
/// Clears the delivery history of a user.
async fn handle_reset_history(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ResetHistoryResponse>, HttpError> {
    let response: ResetHistoryResponse = reset_history(&app_state.history, &user_id)?;
    Ok(Json(response))
}

/// Handler for GET `/categories` endpoint.
///
/// Returns the category hierarchy as nested payloads.
async fn handle_get_categories(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CategoryTreeResponse>, HttpError> {
    let response: CategoryTreeResponse = get_category_tree(app_state.store.as_ref())?;
    Ok(Json(response))
}

/// Handler for POST `/categories` endpoint.
///
/// Creates a new category.
async fn handle_create_category(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryResponse>, HttpError> {
    let response: CategoryResponse = create_category(app_state.store.as_ref(), &req)?;
    Ok(Json(response))
}

/// Handler for PUT `/categories/{id}` endpoint.
///
/// Renames and/or reparents a category.
async fn handle_update_category(
    AxumState(app_state): AxumState<AppState>,
    Path(category_id): Path<i64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, HttpError> {
    let response: CategoryResponse = update_category(app_state.store.as_ref(), category_id, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/questions/pending` endpoint.
///
/// Submits a question for moderation.
async fn handle_submit_question(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitQuestionRequest>,
) -> Result<Json<SubmitQuestionResponse>, HttpError> {
    let response: SubmitQuestionResponse = submit_question(app_state.store.as_ref(), &req)?;
    Ok(Json(response))
}

/// Handler for POST `/questions/pending/{id}/approve` endpoint.
///
/// Approves a pending question.
async fn handle_approve_question(
    AxumState(app_state): AxumState<AppState>,
    Path(question_id): Path<i64>,
) -> Result<Json<ModerationResponse>, HttpError> {
    let response: ModerationResponse = approve_question(app_state.store.as_ref(), question_id)?;
    Ok(Json(response))
}

/// Handler for POST `/questions/pending/{id}/reject` endpoint.
///
/// Rejects a pending question.
async fn handle_reject_question(
    AxumState(app_state): AxumState<AppState>,
    Path(question_id): Path<i64>,
) -> Result<Json<ModerationResponse>, HttpError> {
    let response: ModerationResponse = reject_question(app_state.store.as_ref(), question_id)?;
    Ok(Json(response))
}

/// Handler for PUT `/questions/pending/{id}` endpoint.
///
/// Updates a question that is still pending moderation.
async fn handle_update_pending(
    AxumState(app_state): AxumState<AppState>,
    Path(question_id): Path<i64>,
    Json(req): Json<UpdatePendingRequest>,
) -> Result<Json<ModerationResponse>, HttpError> {
    let response: ModerationResponse =
        update_pending_question(app_state.store.as_ref(), question_id, &req)?;
    Ok(Json(response))
}

/// Handler for GET `/questions` endpoint.
///
/// Returns one page of a filtered question listing.
async fn handle_list_questions(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<ListQuestionsResponse>, HttpError> {
    let submitter: Option<String> = if query.only_mine.unwrap_or(false) {
        match query.user_id {
            Some(user_id) => Some(user_id),
            None => {
                return Err(HttpError {
                    status: StatusCode::BAD_REQUEST,
                    message: String::from("'only_mine' requires a 'user_id' query parameter"),
                });
            }
        }
    } else {
        None
    };

    // `approved=false` lists the submissions still awaiting moderation.
    let approval: Option<String> = query.approved.map(|approved| {
        if approved {
            String::from("Approved")
        } else {
            String::from("Pending")
        }
    });

    let request: ListQuestionsRequest = ListQuestionsRequest {
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        approval,
        submitter,
        category_id: query.category_id,
    };

    let response: ListQuestionsResponse = list_questions(app_state.store.as_ref(), &request)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/questions/unique", post(handle_sample_questions))
        .route("/questions/pending", post(handle_submit_question))
        .route(
            "/questions/pending/{id}/approve",
            post(handle_approve_question),
        )
        .route(
            "/questions/pending/{id}/reject",
            post(handle_reject_question),
        )
        .route("/questions/pending/{id}", put(handle_update_pending))
        .route("/questions", get(handle_list_questions))
        .route("/history", post(handle_record_history))
        .route("/history/{user_id}", delete(handle_reset_history))
        .route("/categories", get(handle_get_categories))
        .route("/categories", post(handle_create_category))
        .route("/categories/{id}", put(handle_update_category))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing QuizDeck Server");

    let rng: StdRng = match args.seed {
        Some(seed) => {
            info!(seed, "Using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    };

    let store: InMemoryStore =
        InMemoryStore::with_deadline(Duration::from_millis(args.store_timeout_ms));
    let app_state: AppState = AppState::new(store, rng);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
