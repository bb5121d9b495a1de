use axum::{
    extract::State,
    routing::{get, on},
    Json, Router,
};
use flush::{
    config::{valid_camera_altitude, valid_tick_interval, Settings, SettingsUpdate},
    session::SessionHandle,
};

use crate::{
    common::{route_not_found, RouteErrorResponse, RouteResult, METHOD_FILTER_ALL},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(settings).put(update_settings))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn settings(State(session): State<SessionHandle>) -> RouteResult<Json<Settings>> {
    Ok(Json(session.snapshot().await?.settings))
}

async fn update_settings(
    State(session): State<SessionHandle>,
    Json(update): Json<SettingsUpdate>,
) -> RouteResult<Json<Settings>> {
    if update.tick_interval.is_some_and(|tick| !valid_tick_interval(&tick)) {
        return Err(RouteErrorResponse::bad_request(
            "The tick interval must be positive.",
        ));
    }
    if update
        .camera_altitude_m
        .is_some_and(|altitude| !valid_camera_altitude(&altitude))
    {
        return Err(RouteErrorResponse::bad_request(
            "The camera altitude must be positive.",
        ));
    }
    session.update_settings(update).await?;
    Ok(Json(session.snapshot().await?.settings))
}
