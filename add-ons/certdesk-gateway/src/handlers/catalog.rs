//! Office directory, certificate metadata, the certificate dashboard, and the admin
//! surfaces (status change and review queue, neither authenticated).

use super::{api_error, lock_poisoned, ApiError};
use crate::AppState;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use certdesk_core::{
    CertificateKind, CertificateRecord, CertificateStatus, CoreError, Office, ProgressSummary,
    ReviewCounts, ReviewRequest, TrackerView,
};
use serde::{Deserialize, Serialize};

/// GET /v1/offices
pub(crate) async fn list_offices(State(state): State<AppState>) -> Json<Vec<Office>> {
    Json(state.resolver.knowledge().offices().to_vec())
}

/// GET /v1/offices/:id
pub(crate) async fn get_office(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Office>, ApiError> {
    state
        .resolver
        .knowledge()
        .office(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("unknown office {}", id)))
}

#[derive(Debug, Serialize)]
pub(crate) struct CertificateInfo {
    kind: CertificateKind,
    name: &'static str,
    deadline: Option<String>,
    processing_time: Option<String>,
    fee: Option<String>,
    requirements: Option<Vec<String>>,
    offices: Vec<String>,
}

/// GET /v1/certificates/:kind – metadata fields are null when the knowledge base lacks them.
pub(crate) async fn certificate_info(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CertificateInfo>, ApiError> {
    let kind: CertificateKind = slug
        .parse()
        .map_err(|e: String| api_error(StatusCode::NOT_FOUND, e))?;
    let kb = state.resolver.knowledge();
    Ok(Json(CertificateInfo {
        kind,
        name: kind.display_name(),
        deadline: kb.deadline(kind).map(String::from),
        processing_time: kb.processing_time(kind).map(String::from),
        fee: kb.fee(kind).map(String::from),
        requirements: kb.requirements(kind).map(<[String]>::to_vec),
        offices: kb.offices_for(kind).iter().map(|o| o.name.clone()).collect(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardParams {
    #[serde(default)]
    view: TrackerView,
    #[serde(default)]
    search: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    view: TrackerView,
    summary: ProgressSummary,
    certificates: Vec<CertificateRecord>,
}

/// GET /v1/certificates?view=&search=
pub(crate) async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let tracker = state.tracker.read().map_err(|_| lock_poisoned())?;
    let certificates = tracker
        .view(params.view, params.search.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DashboardResponse {
        view: params.view,
        summary: tracker.summary(),
        certificates,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    status: CertificateStatus,
}

/// POST /v1/admin/certificates/:id/status
pub(crate) async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<CertificateRecord>, ApiError> {
    let today = chrono::Local::now().date_naive();
    let mut tracker = state.tracker.write().map_err(|_| lock_poisoned())?;
    match tracker.update_status(id, update.status, today) {
        Ok(record) => Ok(Json(record.clone())),
        Err(CoreError::UnknownCertificate(id)) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("unknown certificate record {}", id),
        )),
        Err(e) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewQueueResponse {
    counts: ReviewCounts,
    requests: Vec<ReviewRequest>,
}

/// GET /v1/admin/reviews
pub(crate) async fn review_queue(
    State(state): State<AppState>,
) -> Result<Json<ReviewQueueResponse>, ApiError> {
    let reviews = state.reviews.read().map_err(|_| lock_poisoned())?;
    Ok(Json(ReviewQueueResponse {
        counts: reviews.counts(),
        requests: reviews.requests().to_vec(),
    }))
}

fn review_error(e: CoreError) -> ApiError {
    match e {
        CoreError::UnknownReview(id) => {
            api_error(StatusCode::NOT_FOUND, format!("unknown review request {}", id))
        }
        CoreError::AlreadyReviewed(_) => api_error(StatusCode::CONFLICT, e.to_string()),
        e => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// POST /v1/admin/reviews/:id/approve
pub(crate) async fn approve_review(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ReviewRequest>, ApiError> {
    let mut reviews = state.reviews.write().map_err(|_| lock_poisoned())?;
    reviews.approve(id).cloned().map(Json).map_err(review_error)
}

/// POST /v1/admin/reviews/:id/reject
pub(crate) async fn reject_review(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ReviewRequest>, ApiError> {
    let mut reviews = state.reviews.write().map_err(|_| lock_poisoned())?;
    reviews.reject(id).cloned().map(Json).map_err(review_error)
}
