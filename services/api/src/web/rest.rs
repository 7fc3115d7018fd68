//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the three demo panels (summarizer, contract
//! analyzer, case research), the session and subscription endpoints, and the
//! master definition for the OpenAPI specification.

use crate::web::state::{AppState, CurrentSession};
use crate::web::session::cleared_session_cookie;
use axum::{
    extract::{multipart::MultipartError, Extension, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use lexinary_core::{
    can_run,
    domain::{CaseResult, ClauseFinding, Feature, Subscription},
    ports::PortError,
    session::{Analytics, Session},
    validation::{validate_contract, validate_upload, ValidationError},
    FREE_SUMMARY_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        session_handler,
        end_session_handler,
        summarize_handler,
        download_summary_handler,
        analyze_contract_handler,
        download_contract_handler,
        research_handler,
        subscribe_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            SessionResponse,
            AnalyticsResponse,
            SubscriptionResponse,
            SummaryResponse,
            ContractRequest,
            ClauseFindingResponse,
            ResearchRequest,
            CaseResultResponse,
            ResearchErrorItem,
        )
    ),
    tags(
        (name = "Lexinary AI Demo API", description = "Mocked legal automation: transcript summaries, contract risk and case research.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// Body of every error response rendered as a banner by the page.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// One of `validation`, `quota_exceeded`, `not_found`, `internal`.
    pub kind: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct AnalyticsResponse {
    pub summaries: u64,
    pub contracts: u64,
    pub research: u64,
    pub time_spent: u64,
}

impl From<&Analytics> for AnalyticsResponse {
    fn from(a: &Analytics) -> Self {
        Self {
            summaries: a.summaries,
            contracts: a.contracts,
            research: a.research,
            time_spent: a.time_spent,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct SubscriptionResponse {
    pub status: String,
    pub plan: String,
    pub cost: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(s: Subscription) -> Self {
        Self {
            status: s.status,
            plan: s.plan,
            cost: s.cost,
        }
    }
}

/// Snapshot of the visitor's session for the sidebar and footer.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct SessionResponse {
    pub user_id: String,
    pub free_summary_limit: u32,
    pub free_summaries_used: u32,
    pub free_summaries_remaining: u32,
    /// True when the free tier is used up and no subscription is active.
    pub quota_exhausted: bool,
    pub subscribed: bool,
    pub analytics: AnalyticsResponse,
    pub subscription: Option<SubscriptionResponse>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            free_summary_limit: FREE_SUMMARY_LIMIT,
            free_summaries_used: session.free_summary_count,
            free_summaries_remaining: session.free_summaries_remaining(),
            quota_exhausted: !can_run(session, Feature::Summary),
            subscribed: session.subscribed,
            analytics: (&session.analytics).into(),
            subscription: session.subscription.clone().map(Into::into),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SummaryResponse {
    pub file_name: String,
    pub document_type: String,
    pub summary: String,
    /// First 100 characters of the summary followed by an ellipsis.
    pub preview: String,
    pub summary_count: u32,
    /// Omitted for subscribed sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_remaining: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct ContractRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ClauseFindingResponse {
    pub clause: String,
    pub risk: String,
    pub score: f64,
    pub suggestion: String,
}

impl From<ClauseFinding> for ClauseFindingResponse {
    fn from(f: ClauseFinding) -> Self {
        Self {
            clause: f.clause.to_string(),
            risk: f.risk.to_string(),
            score: f.score,
            suggestion: f.suggestion,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct ResearchRequest {
    pub query: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CaseResultResponse {
    pub case: String,
    pub summary: String,
    pub relevance: f64,
}

impl From<CaseResult> for CaseResultResponse {
    fn from(c: CaseResult) -> Self {
        Self {
            case: c.case,
            summary: c.summary,
            relevance: c.relevance,
        }
    }
}

/// The single element returned for a blank research query.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ResearchErrorItem {
    pub error: String,
}

//=========================================================================================
// Error Mapping
//=========================================================================================

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, kind: &str, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            kind: kind.to_string(),
        }),
    )
}

fn validation_rejection(e: ValidationError) -> HandlerError {
    let status = match e {
        ValidationError::FileTooLarge { .. } | ValidationError::ContractTooLong { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        ValidationError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ValidationError::EmptyContract => StatusCode::BAD_REQUEST,
    };
    warn!("Rejected input: {}", e);
    reject(status, "validation", e.to_string())
}

fn port_rejection(action: &str, e: PortError) -> HandlerError {
    match e {
        PortError::NotFound(what) => reject(StatusCode::NOT_FOUND, "not_found", what),
        PortError::InvalidInput(msg) => reject(StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
        PortError::Unexpected(detail) => {
            error!("Failed to {}: {}", action, detail);
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                format!("Failed to {}", action),
            )
        }
    }
}

fn multipart_rejection(e: MultipartError) -> HandlerError {
    warn!("Rejected upload: {}", e);
    reject(e.status(), "validation", e.body_text())
}

fn quota_message() -> String {
    format!(
        "Free limit reached ({} summaries). Subscribe for $99/month!",
        FREE_SUMMARY_LIMIT
    )
}

fn preview(summary: &str) -> String {
    let head: String = summary.chars().take(100).collect();
    format!("{}...", head)
}

//=========================================================================================
// Session Handlers
//=========================================================================================

/// Current session snapshot: free-tier usage, analytics and subscription.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "The visitor's session", body = SessionResponse)
    )
)]
pub async fn session_handler(
    Extension(current): Extension<CurrentSession>,
) -> Json<SessionResponse> {
    let mut session = current.handle.lock().await;
    session.refresh_time_spent(Utc::now());
    Json(SessionResponse::from(&*session))
}

/// End the visitor's session. Its state is discarded and the cookie cleared.
#[utoipa::path(
    delete,
    path = "/api/session",
    responses(
        (status = 204, description = "Session ended"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn end_session_handler(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<impl IntoResponse, HandlerError> {
    state
        .sessions
        .end(&current.token)
        .await
        .map_err(|e| port_rejection("end session", e))?;

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, cleared_session_cookie())],
    ))
}

//=========================================================================================
// Deposition Summarizer
//=========================================================================================

/// Summarize an uploaded deposition transcript (PDF or Word).
///
/// Accepts a multipart/form-data request with a `file` part. Counts against the
/// free tier unless the session is subscribed.
#[utoipa::path(
    post,
    path = "/api/summaries",
    request_body(content_type = "multipart/form-data", description = "The transcript to summarize."),
    responses(
        (status = 200, description = "Summary generated", body = SummaryResponse),
        (status = 400, description = "Missing file part", body = ErrorResponse),
        (status = 402, description = "Free limit reached", body = ErrorResponse),
        (status = 413, description = "File larger than the upload limit", body = ErrorResponse),
        (status = 415, description = "Not a PDF or Word document", body = ErrorResponse)
    )
)]
pub async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResponse>, HandlerError> {
    // 1. Pull the file part out of the form
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_rejection)? {
        if field.name() != Some("file") && field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.map_err(multipart_rejection)?;
        upload = Some((file_name, content_type, data));
        break;
    }
    let (file_name, content_type, data) = upload.ok_or_else(|| {
        reject(
            StatusCode::BAD_REQUEST,
            "validation",
            "Multipart form must include a file",
        )
    })?;

    // 2. Validate before touching the session
    let kind = validate_upload(
        data.len(),
        state.config.max_upload_bytes,
        content_type.as_deref(),
        file_name.as_deref(),
    )
    .map_err(validation_rejection)?;

    // 3. Quota gate; the lock is held for the rest of this session's cycle
    let mut session = current.handle.lock().await;
    if !can_run(&session, Feature::Summary) {
        info!(user_id = %session.user_id, "Summary blocked by free-tier quota");
        return Err(reject(
            StatusCode::PAYMENT_REQUIRED,
            "quota_exceeded",
            quota_message(),
        ));
    }

    // 4. Extract and summarize
    let transcript = state
        .parser
        .extract_text(&data, kind)
        .await
        .map_err(|e| port_rejection("parse transcript", e))?;
    let summary = state
        .summarizer
        .summarize(&transcript)
        .await
        .map_err(|e| port_rejection("summarize transcript", e))?;

    // 5. Book it
    session.record_summary(summary.clone());
    info!(
        user_id = %session.user_id,
        count = session.free_summary_count,
        "Summary generated"
    );

    Ok(Json(SummaryResponse {
        file_name: file_name.unwrap_or_else(|| "transcript".to_string()),
        document_type: kind.as_str().to_string(),
        preview: preview(&summary),
        summary,
        summary_count: session.free_summary_count,
        free_remaining: (!session.subscribed).then(|| session.free_summaries_remaining()),
    }))
}

/// Download the most recent summary as a text file.
#[utoipa::path(
    get,
    path = "/api/summaries/download",
    responses(
        (status = 200, description = "Plain-text summary", body = String, content_type = "text/plain"),
        (status = 404, description = "No summary generated yet", body = ErrorResponse)
    )
)]
pub async fn download_summary_handler(
    Extension(current): Extension<CurrentSession>,
) -> Result<impl IntoResponse, HandlerError> {
    let session = current.handle.lock().await;
    let summary = session.last_summary.clone().ok_or_else(|| {
        reject(StatusCode::NOT_FOUND, "not_found", "No summary has been generated yet")
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"summary_{}.txt\"", session.user_id),
            ),
        ],
        summary,
    ))
}

//=========================================================================================
// Contract Analyzer
//=========================================================================================

/// Score the risk of the standard clauses in a pasted contract.
#[utoipa::path(
    post,
    path = "/api/contracts",
    request_body = ContractRequest,
    responses(
        (status = 200, description = "Clause findings", body = [ClauseFindingResponse]),
        (status = 400, description = "Empty contract text", body = ErrorResponse),
        (status = 413, description = "Contract longer than the word limit", body = ErrorResponse)
    )
)]
pub async fn analyze_contract_handler(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Json(req): Json<ContractRequest>,
) -> Result<Json<Vec<ClauseFindingResponse>>, HandlerError> {
    validate_contract(&req.text, state.config.max_contract_words)
        .map_err(validation_rejection)?;

    let mut session = current.handle.lock().await;
    let findings = state
        .contract_analyzer
        .analyze_contract(&req.text)
        .await
        .map_err(|e| port_rejection("analyze contract", e))?;
    session.record_contract_analysis(findings.clone());
    info!(user_id = %session.user_id, "Contract analyzed");

    Ok(Json(findings.into_iter().map(Into::into).collect()))
}

/// Download the most recent contract analysis as pretty-printed JSON.
#[utoipa::path(
    get,
    path = "/api/contracts/download",
    responses(
        (status = 200, description = "Analysis JSON", body = [ClauseFindingResponse]),
        (status = 404, description = "No contract analyzed yet", body = ErrorResponse)
    )
)]
pub async fn download_contract_handler(
    Extension(current): Extension<CurrentSession>,
) -> Result<impl IntoResponse, HandlerError> {
    let session = current.handle.lock().await;
    let findings = session.last_analysis.clone().ok_or_else(|| {
        reject(StatusCode::NOT_FOUND, "not_found", "No contract has been analyzed yet")
    })?;

    let rows: Vec<ClauseFindingResponse> = findings.into_iter().map(Into::into).collect();
    let body = serde_json::to_string_pretty(&rows).map_err(|e| {
        error!("Failed to serialize analysis: {:?}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Failed to serialize analysis",
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"contract_analysis_{}.json\"",
                    session.user_id
                ),
            ),
        ],
        body,
    ))
}

//=========================================================================================
// Case Research
//=========================================================================================

/// Search case law. A blank query yields `[{"error": ...}]` with status 422.
#[utoipa::path(
    post,
    path = "/api/research",
    request_body = ResearchRequest,
    responses(
        (status = 200, description = "Matching cases", body = [CaseResultResponse]),
        (status = 422, description = "Blank query", body = [ResearchErrorItem])
    )
)]
pub async fn research_handler(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
    Json(req): Json<ResearchRequest>,
) -> Result<Response, HandlerError> {
    let mut session = current.handle.lock().await;
    // Every search attempt counts, including blank ones.
    session.record_research();

    match state.case_research.search_cases(&req.query).await {
        Ok(cases) => {
            let rows: Vec<CaseResultResponse> = cases.into_iter().map(Into::into).collect();
            Ok(Json(rows).into_response())
        }
        Err(PortError::InvalidInput(message)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(vec![ResearchErrorItem { error: message }]),
        )
            .into_response()),
        Err(e) => Err(port_rejection("search cases", e)),
    }
}

//=========================================================================================
// Subscription
//=========================================================================================

/// Subscribe the session to the unlimited plan (mock, nothing is charged).
#[utoipa::path(
    post,
    path = "/api/subscribe",
    responses(
        (status = 200, description = "Subscription active", body = SubscriptionResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<SubscriptionResponse>, HandlerError> {
    let mut session = current.handle.lock().await;
    if let Some(existing) = session.subscription.clone() {
        return Ok(Json(existing.into()));
    }

    let subscription = state
        .payments
        .subscribe(&session.user_id)
        .await
        .map_err(|e| port_rejection("subscribe", e))?;
    session.activate_subscription(subscription.clone());

    Ok(Json(subscription.into()))
}
