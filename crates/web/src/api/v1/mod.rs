use axum::{routing::on, Router};

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

mod events;
mod session;
mod settings;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .nest_service("/session", session::routes(state.clone()))
        .nest_service("/settings", settings::routes(state.clone()))
        .nest_service("/events", events::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}
