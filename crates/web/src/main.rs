use std::{env, sync::Arc};

use arcgis::feed::FeatureServiceFeed;
use flush::{
    config::Config,
    orchestrator::{Collaborators, Orchestrator},
    session::{self, load_service_data},
};
use mapbox::{
    client::{MapboxClient, MapboxCredentials},
    directions::WalkingDirections,
    geocoding::AddressLookup,
};
use tokio_util::sync::CancellationToken;
use web::{
    start_web_server, surface::WebSurface, WebState, DEFAULT_BIND_ADDRESS,
    DEFAULT_STATIC_DIR,
};

/// Map events buffered per connected client.
const EVENT_BUFFER: usize = 1024;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env();
    log::info!("starting with {:?}", config);

    // outside services
    let credentials =
        MapboxCredentials::env().expect("expected mapbox access token in env.");
    let mapbox = MapboxClient::new(credentials, config.request_timeout)
        .expect("expected a usable HTTP client.");
    let feed = Arc::new(
        FeatureServiceFeed::env(config.request_timeout).expect("expected a usable HTTP client."),
    );

    // session
    let surface = Arc::new(WebSurface::new(EVENT_BUFFER));
    let orchestrator = Orchestrator::new(
        config,
        Collaborators {
            paths: Arc::new(WalkingDirections::new(mapbox.clone())),
            geocoder: Arc::new(AddressLookup::new(mapbox)),
            surface: surface.clone(),
            presenter: surface.clone(),
        },
    );
    let shutdown = CancellationToken::new();
    let session = session::run(orchestrator, shutdown.clone());
    tokio::spawn(load_service_data(session.clone(), feed));

    // web server
    let address =
        env::var("FLUSH_BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned());
    let static_dir =
        env::var("FLUSH_STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_owned());
    let result = start_web_server(&address, &static_dir, WebState { session, surface }).await;

    shutdown.cancel();
    if let Err(why) = result {
        log::error!("web server stopped: {}", why);
    }
}
