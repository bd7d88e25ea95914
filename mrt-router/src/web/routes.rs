//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path as UrlPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDateTime, TimeDelta, Utc};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{
    DayType, InvalidStation, Language, Line, ServiceTime, Station, TimeError, UnknownLanguage,
    resolve_service_clock,
};
use crate::planner::{Planner, RouteError, RouteQuery};

use super::dto::*;
use super::state::AppState;

/// Departures per terminal when the caller does not say.
const DEFAULT_DEPARTURES: usize = 3;

/// Most departures per terminal a board will show.
const MAX_DEPARTURES: usize = 20;

/// Most routes a single query may ask for.
const MAX_ROUTES: usize = 10;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lines", get(list_lines))
        .route("/stations", get(list_stations))
        .route("/stations/:code", get(station_detail))
        .route("/stations/:code/departures", get(station_departures))
        .route("/route", post(plan_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every line with its station codes.
async fn list_lines() -> Json<LinesResponse> {
    let lines = Line::ALL
        .iter()
        .map(|line| LineResult {
            code: line.to_string(),
            stations: line.stations().map(|s| s.code()).collect(),
        })
        .collect();

    Json(LinesResponse { lines })
}

/// Stations with names, optionally on one line.
async fn list_stations(Query(req): Query<StationsQuery>) -> Result<Json<StationsResponse>, AppError> {
    let lang = parse_lang(req.lang.as_deref())?;
    let lines = match req.line.as_deref() {
        Some(code) => vec![Line::parse(code.trim())?],
        None => Line::ALL.to_vec(),
    };

    let stations = lines
        .into_iter()
        .flat_map(|line| line.stations())
        .map(|s| StationResult::from_station(s, lang))
        .collect();

    Ok(Json(StationsResponse { stations }))
}

/// Names, equivalents and transfers of one station.
async fn station_detail(
    State(state): State<AppState>,
    UrlPath(code): UrlPath<String>,
    Query(req): Query<LangQuery>,
) -> Result<Json<StationDetail>, AppError> {
    let station = find_station(&code)?;
    let lang = parse_lang(req.lang.as_deref())?;
    Ok(Json(StationDetail::from_station(station, lang, &state.transfers)))
}

/// Upcoming departures from one station, grouped by terminal.
async fn station_departures(
    State(state): State<AppState>,
    UrlPath(code): UrlPath<String>,
    Query(req): Query<DeparturesQuery>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let station = find_station(&code)?;
    let lang = parse_lang(req.lang.as_deref())?;
    let (day, time) = service_clock(req.time.as_deref(), req.day, req.holiday)?;
    let limit = req.limit.unwrap_or(DEFAULT_DEPARTURES).min(MAX_DEPARTURES);

    let timetable = state.timetable.clone();
    let board = tokio::task::spawn_blocking(move || timetable.departures(station, day, time, limit))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("departure lookup failed: {e}"),
        })?;

    Ok(Json(DeparturesResponse {
        station: station.code(),
        time: time.to_string(),
        day: day.number(),
        departures: board
            .iter()
            .map(|d| DepartureResult::from_departures(d, lang))
            .collect(),
    }))
}

/// Plan routes between two stations.
async fn plan_route(State(state): State<AppState>, body: Bytes) -> Result<Json<RouteResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: RouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid route request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let from = Station::parse(req.from.trim())?;
    let to = Station::parse(req.to.trim())?;
    let lang = parse_lang(req.lang.as_deref())?;
    let (day, time) = service_clock(req.time.as_deref(), req.day, req.holiday)?;
    let k = req.k.unwrap_or(state.config.default_results);
    if k > MAX_ROUTES {
        return Err(AppError::BadRequest {
            message: format!("k must be at most {MAX_ROUTES}, got {k}"),
        });
    }
    let mode = req.mode;
    let constraints = req.constraints.into_constraints()?;
    let query = RouteQuery::new(from, to, time, day);

    let planner_state = state.clone();
    let routes = tokio::task::spawn_blocking(move || {
        let planner = Planner::new(
            &planner_state.transfers,
            &planner_state.timetable,
            &planner_state.config,
        );
        match mode {
            RouteMode::Fastest => planner.route_default(&query, k),
            RouteMode::FewestInterchanges => planner.route_least_interchange(&query, k),
            RouteMode::Custom => planner.route_custom(&query, &constraints, k),
        }
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("route search failed: {e}"),
    })??;

    Ok(Json(RouteResponse {
        from: from.code(),
        to: to.code(),
        time: time.to_string(),
        day: day.number(),
        routes: routes
            .iter()
            .map(|r| RouteResult::from_route(r, lang))
            .collect(),
    }))
}

fn find_station(code: &str) -> Result<Station, AppError> {
    Station::parse(code.trim()).map_err(|e| AppError::NotFound {
        message: e.to_string(),
    })
}

fn parse_lang(tag: Option<&str>) -> Result<Language, AppError> {
    Ok(tag.map(str::parse::<Language>).transpose()?.unwrap_or_default())
}

/// Day type and service time for a request.
///
/// Missing fields come from the current time in Taipei. An explicit time
/// is read as a service time, so "25:10" is ten past one at night. A
/// holiday runs the Sunday timetable, once the day itself has been checked.
fn service_clock(
    time: Option<&str>,
    day: Option<u8>,
    holiday: bool,
) -> Result<(DayType, ServiceTime), AppError> {
    let (today, now) = resolve_service_clock(taipei_now(), holiday);
    let day = match day.map(DayType::from_number).transpose()? {
        Some(_) if holiday => DayType::Sunday,
        Some(day) => day,
        None => today,
    };
    let time = match time {
        Some(s) => ServiceTime::parse_hhmm(s.trim())?,
        None => now,
    };
    Ok((day, time))
}

/// Wall-clock time in Taipei (UTC+8, no daylight saving).
fn taipei_now() -> NaiveDateTime {
    Utc::now().naive_utc() + TimeDelta::hours(8)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<InvalidStation> for AppError {
    fn from(e: InvalidStation) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<TimeError> for AppError {
    fn from(e: TimeError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<UnknownLanguage> for AppError {
    fn from(e: UnknownLanguage) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
