//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ProfileQuery, ProfileView, StateResponse};
use crate::sim::clock::MINUTES_PER_DAY;
use crate::sim::profile::LoadProfilePoint;

/// Returns scenario costs, grid metrics, emissions and savings.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(app): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse::new(&app.config.tariff, &app.state))
}

/// Returns load profile samples, optionally filtered by minute range.
///
/// `GET /profile` → 200 + current profile
/// `GET /profile?view=optimized&from=M&to=N` → filtered range (inclusive)
/// `GET /profile?from=600&to=300` or an unknown view → 400 + `ErrorResponse`
pub async fn get_profile(
    State(app): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
) -> impl IntoResponse {
    let view = match query.view.as_deref() {
        None => ProfileView::default(),
        Some(name) => match ProfileView::parse(name) {
            Some(view) => view,
            None => {
                return Err(bad_request(format!(
                    "unknown view \"{name}\", expected \"current\" or \"optimized\""
                )));
            }
        },
    };

    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(MINUTES_PER_DAY);
    if from > to {
        return Err(bad_request(format!("`from` ({from}) must be <= `to` ({to})")));
    }

    let profile = match view {
        ProfileView::Current => &app.state.current_profile,
        ProfileView::Optimized => &app.state.optimized_profile,
    };
    let points: Vec<LoadProfilePoint> = profile
        .iter()
        .filter(|p| p.minute >= from && p.minute <= to)
        .cloned()
        .collect();

    Ok(Json(points))
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}
