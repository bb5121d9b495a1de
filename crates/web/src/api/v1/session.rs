use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, on, post},
    Json, Router,
};
use flush::{orchestrator::SessionSnapshot, session::SessionHandle};
use model::coordinate::Coordinate;
use serde::Deserialize;

use crate::{
    common::{route_not_found, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(snapshot))
        .route("/click", post(click))
        .route("/confirm", post(confirm))
        .route("/skip", post(skip))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct ClickDto {
    longitude: f64,
    latitude: f64,
}

impl TryFrom<ClickDto> for Coordinate {
    type Error = RouteErrorResponse;

    fn try_from(value: ClickDto) -> Result<Self, Self::Error> {
        if !(-180.0..=180.0).contains(&value.longitude)
            || !(-90.0..=90.0).contains(&value.latitude)
        {
            return Err(RouteErrorResponse::bad_request(format!(
                "({}, {}) is not a valid position.",
                value.longitude, value.latitude
            )));
        }
        Ok(Coordinate::new(value.longitude, value.latitude))
    }
}

async fn snapshot(State(session): State<SessionHandle>) -> RouteResult<Json<SessionSnapshot>> {
    Ok(Json(session.snapshot().await?))
}

/// Outcomes arrive as notifications on the event stream, so input is only
/// acknowledged here.
async fn click(
    State(session): State<SessionHandle>,
    Json(click): Json<ClickDto>,
) -> RouteResult<StatusCode> {
    session.click(Coordinate::try_from(click)?).await?;
    Ok(StatusCode::ACCEPTED)
}

async fn confirm(State(session): State<SessionHandle>) -> RouteResult<StatusCode> {
    session.confirm().await?;
    Ok(StatusCode::ACCEPTED)
}

async fn skip(State(session): State<SessionHandle>) -> RouteResult<StatusCode> {
    session.skip().await?;
    Ok(StatusCode::ACCEPTED)
}
