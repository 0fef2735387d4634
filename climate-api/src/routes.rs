//! HTTP routes.
//!
//! - GET /
//! - GET /api/precipitation
//! - GET /api/stations
//! - GET /api/temperature
//! - GET /api/daterange/:start_date
//! - GET /api/daterange/:start_date/:end_date
//!
//! Date segments that cannot be extracted (invalid UTF-8, empty end date)
//! are reported as invalid dates rather than routing errors.

use std::sync::Arc;

use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use climate_db::models::PrecipitationRecord;

use crate::error::{RangeError, Result};
use crate::service;
use crate::store::ClimateStore;

/// Shared application state: the injected data store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClimateStore>,
}

impl AppState {
    pub fn new(store: impl ClimateStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

const WELCOME_PAGE: &str = "<html><body><h1>Welcome to the Climate API!</h1><br/>\
<h2>Available Routes:</h2><br/>\
/api/precipitation<br/>\
/api/stations<br/>\
/api/temperature<br/>\
/api/daterange/&lt;start_date&gt;<br/>\
/api/daterange/&lt;start_date&gt;/&lt;end_date&gt;<br/>\
</body></html>";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/precipitation", get(precipitation))
        .route("/api/stations", get(stations))
        .route("/api/temperature", get(temperature))
        .route("/api/daterange/:start_date", get(daterange_from))
        .route("/api/daterange/:start_date/", get(daterange_blank_end))
        .route("/api/daterange/:start_date/:end_date", get(daterange_between))
        .with_state(state)
}

/// Run a store-backed operation on the blocking pool; rusqlite calls block.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T>
where
    F: FnOnce(&dyn ClimateStore) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(anyhow::Error::from)?
}

async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

async fn precipitation(State(state): State<AppState>) -> Result<Json<Vec<PrecipitationRecord>>> {
    with_store(&state, service::recent_precipitation).await.map(Json)
}

async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    with_store(&state, service::station_names).await.map(Json)
}

async fn temperature(State(state): State<AppState>) -> Result<Json<Vec<f64>>> {
    with_store(&state, service::recent_temperatures).await.map(Json)
}

/// Invalid date for the path segment axum could not extract.
fn rejected_date(uri: &Uri, rejection: &PathRejection) -> RangeError {
    let index = match rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } if key == "end_date" => 1,
            _ => 0,
        },
        _ => 0,
    };
    log::debug!("path extraction failed for {}: {}", uri.path(), rejection);
    let segment = uri
        .path()
        .trim_start_matches("/api/daterange/")
        .split('/')
        .nth(index)
        .unwrap_or_default();
    RangeError::InvalidDateFormat(segment.to_string())
}

async fn daterange_from(
    State(state): State<AppState>,
    uri: Uri,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<[f64; 3]>> {
    let Path(start_date) = path.map_err(|rejection| rejected_date(&uri, &rejection))?;
    temperature_range(&state, start_date, None).await
}

async fn daterange_blank_end(
    State(state): State<AppState>,
    uri: Uri,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<[f64; 3]>> {
    let Path(start_date) = path.map_err(|rejection| rejected_date(&uri, &rejection))?;
    temperature_range(&state, start_date, Some(String::new())).await
}

async fn daterange_between(
    State(state): State<AppState>,
    uri: Uri,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<[f64; 3]>> {
    let Path((start_date, end_date)) =
        path.map_err(|rejection| rejected_date(&uri, &rejection))?;
    temperature_range(&state, start_date, Some(end_date)).await
}

async fn temperature_range(
    state: &AppState,
    start_date: String,
    end_date: Option<String>,
) -> Result<Json<[f64; 3]>> {
    let today = Local::now().date_naive();
    with_store(state, move |store| {
        service::temperature_range(store, &start_date, end_date.as_deref(), today)
    })
    .await
    .map(Json)
}
