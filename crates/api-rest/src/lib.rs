//! REST surface for the care navigator.
//!
//! Exposes symptom triage and provider lookup over HTTP with OpenAPI/Swagger
//! documentation. Request and response schemas are explicit typed DTOs
//! validated at this boundary; the core crates only ever see well-formed
//! input.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};

use navigator_core::{
    evaluate, narrow_with_broadening, NavigatorError, PatientReport, Provider, TriageDecision,
};
use navigator_places::{static_fallback, PlacesService};

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request
/// handlers, currently the provider lookup service.
#[derive(Clone)]
pub struct AppState {
    places: Arc<PlacesService>,
}

impl AppState {
    pub fn new(places: Arc<PlacesService>) -> Self {
        Self { places }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, triage, places, recommend),
    components(schemas(
        HealthRes,
        TriageReq,
        TriageRes,
        ProviderDto,
        PlacesRes,
        RecommendRes,
        ApiErrorRes,
    ))
)]
pub struct ApiDoc;

#[derive(Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Wire form of a symptom report as posted by the intake widget.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TriageReq {
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub severity: String,
    pub duration: String,
    pub age: u32,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub insurance: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default, rename = "selectedRegion")]
    pub selected_region: String,
}

impl TryFrom<TriageReq> for PatientReport {
    type Error = NavigatorError;

    fn try_from(req: TriageReq) -> Result<Self, Self::Error> {
        let symptoms = req
            .symptoms
            .into_iter()
            .map(|s| {
                navigator_types::SymptomText::new(&s)
                    .map_err(|e| NavigatorError::InvalidInput(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PatientReport {
            symptoms,
            severity: req.severity.parse()?,
            duration: req.duration.parse()?,
            age: req.age,
            sex: req.sex,
            insurance: req.insurance,
            zip: req.zip,
            selected_region: req.selected_region,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TriageRes {
    pub level: String,
    pub rationale: String,
}

impl From<TriageDecision> for TriageRes {
    fn from(decision: TriageDecision) -> Self {
        Self {
            level: decision.level.to_string(),
            rationale: decision.rationale,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProviderDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: String,
    #[serde(rename = "acceptedInsurances")]
    pub accepted_insurances: Vec<String>,
}

impl From<Provider> for ProviderDto {
    fn from(p: Provider) -> Self {
        Self {
            id: p.id,
            name: p.name,
            address: p.address,
            lat: p.lat,
            lng: p.lng,
            phone: p.phone,
            accepted_insurances: p.accepted_insurances,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlacesRes {
    pub providers: Vec<ProviderDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecommendRes {
    pub decision: TriageRes,
    pub keyword: String,
    pub providers: Vec<ProviderDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorRes {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub keyword: String,
}

/// Builds the REST router. Wrong-method requests on any of these paths get a
/// `405 Method Not Allowed` from axum's method routing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/triage", post(triage))
        .route("/api/places", get(places))
        .route("/api/recommend", post(recommend))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Care navigator API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/api/triage",
    request_body = TriageReq,
    responses(
        (status = 200, description = "Triage decision", body = TriageRes),
        (status = 422, description = "Malformed report", body = ApiErrorRes),
        (status = 500, description = "Internal error, degraded to the safe default decision", body = TriageRes)
    )
)]
/// Evaluate a symptom report against the triage rule table
///
/// Malformed reports are rejected with `422` instead of being silently
/// coerced. An internal fault degrades to the safest non-emergency default
/// (`primary` / `server_error`) rather than failing with no answer: triage
/// must always produce a usable decision.
#[axum::debug_handler]
async fn triage(State(_state): State<AppState>, Json(req): Json<TriageReq>) -> Response {
    let report = match PatientReport::try_from(req) {
        Ok(report) => report,
        Err(NavigatorError::InvalidInput(msg)) => {
            tracing::warn!(error = %msg, "rejected malformed triage report");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiErrorRes { error: msg }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("triage failed: {:?}", e);
            return server_error_decision();
        }
    };

    let decision = evaluate(&report);
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(TriageRes::from(decision)),
    )
        .into_response()
}

/// The safe default answer for an internal triage fault.
fn server_error_decision() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(TriageRes {
            level: "primary".into(),
            rationale: "server_error".into(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/places",
    params(
        ("zip" = Option<String>, Query, description = "ZIP code to search near"),
        ("keyword" = Option<String>, Query, description = "Provider keyword, e.g. \"Urgent Care\"")
    ),
    responses(
        (status = 200, description = "Provider candidates (empty when no directory credential is configured)", body = PlacesRes),
        (status = 500, description = "Directory lookup failed", body = ApiErrorRes)
    )
)]
/// Look up care facilities near a ZIP code
///
/// Directory unavailability (timeout, transport failure) is recovered with a
/// static provider list and never surfaced as an error; only an unreadable
/// directory response produces `500 places_failed`.
#[axum::debug_handler]
async fn places(State(state): State<AppState>, Query(query): Query<PlacesQuery>) -> Response {
    match state.places.lookup(&query.zip, &query.keyword).await {
        Ok(providers) => (
            [(header::CACHE_CONTROL, "public, max-age=300")],
            Json(PlacesRes {
                providers: providers.into_iter().map(ProviderDto::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("places lookup error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorRes {
                    error: "places_failed".into(),
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/recommend",
    request_body = TriageReq,
    responses(
        (status = 200, description = "Triage decision with matching providers", body = RecommendRes),
        (status = 422, description = "Malformed report", body = ApiErrorRes)
    )
)]
/// Full intake flow: triage, provider lookup, insurance narrowing
///
/// Evaluates the report, maps the care level to a provider keyword, queries
/// the directory and narrows the candidates by the reported insurance. An
/// empty lookup result falls back to the static provider list, and an
/// insurance filter that matches nothing broadens back to the unfiltered
/// candidates; the response always carries a usable provider list.
#[axum::debug_handler]
async fn recommend(State(state): State<AppState>, Json(req): Json<TriageReq>) -> Response {
    let report = match PatientReport::try_from(req) {
        Ok(report) => report,
        Err(NavigatorError::InvalidInput(msg)) => {
            tracing::warn!(error = %msg, "rejected malformed triage report");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiErrorRes { error: msg }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("recommend failed: {:?}", e);
            return server_error_decision();
        }
    };

    let decision = evaluate(&report);
    let keyword = decision.level.provider_keyword();

    let candidates = match state.places.lookup(&report.zip, keyword).await {
        Ok(providers) => providers,
        Err(e) => {
            tracing::warn!("directory lookup failed during recommend: {:?}", e);
            Vec::new()
        }
    };
    let candidates = if candidates.is_empty() {
        static_fallback(keyword)
    } else {
        candidates
    };

    let providers = narrow_with_broadening(candidates, &report.insurance);

    Json(RecommendRes {
        decision: TriageRes::from(decision),
        keyword: keyword.to_string(),
        providers: providers.into_iter().map(ProviderDto::from).collect(),
    })
    .into_response()
}
