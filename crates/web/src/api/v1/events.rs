use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, on},
    Json, Router,
};
use futures::stream::Stream;
use tokio_stream::{wrappers::BroadcastStream, StreamExt as _};
use tower_http::trace::TraceLayer;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    surface::{MapView, WebSurface},
    WebState,
};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(sse_handler))
        .route("/view", get(view))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn view(State(surface): State<Arc<WebSurface>>) -> Json<MapView> {
    Json(surface.view())
}

async fn sse_handler(
    State(surface): State<Arc<WebSurface>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    log::info!("map client connected");

    let stream = BroadcastStream::new(surface.subscribe()).filter_map(|event| match event {
        Ok(event) => match Event::default().json_data(&event) {
            Ok(sse) => Some(Ok(sse)),
            Err(why) => {
                log::error!("could not encode map event: {}", why);
                None
            }
        },
        Err(why) => {
            // slow clients miss events; the view endpoint catches them up
            log::warn!("map client fell behind: {}", why);
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
