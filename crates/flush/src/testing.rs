//! Fake services and a recording map shared by the engine tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use geo::polygon;
use model::{
    camera::{CameraEase, CameraPose, FitBounds},
    catchment::Catchment,
    coordinate::Coordinate,
    facility::Facility,
    path::RawPath,
};

use crate::{
    config::Config,
    orchestrator::{Collaborators, Orchestrator},
    services::{FeatureFeed, PathService, ReverseGeocoder},
    surface::{Notification, PathLayer, Presenter, RenderSurface},
    FlushError, FlushResult,
};

pub const CLICK: Coordinate = Coordinate::new(-79.50, 43.70);
pub const HUMBER: Coordinate = Coordinate::new(-79.4930, 43.6300);
pub const UNLISTED_CLICK: Coordinate = Coordinate::new(-79.35, 43.70);
pub const UNLISTED: Coordinate = Coordinate::new(-79.3400, 43.6600);

pub struct FakePaths {
    pub found: bool,
}

#[async_trait]
impl PathService for FakePaths {
    async fn find_path(&self, start: Coordinate, end: Coordinate) -> FlushResult<Option<RawPath>> {
        if !self.found {
            return Ok(None);
        }
        Ok(RawPath::new(straight(start, end, 8)))
    }
}

/// Never answers, like a service behind a dead connection.
pub struct StalledPaths;

#[async_trait]
impl PathService for StalledPaths {
    async fn find_path(
        &self,
        _start: Coordinate,
        _end: Coordinate,
    ) -> FlushResult<Option<RawPath>> {
        futures::future::pending().await
    }
}

pub struct FakeGeocoder {
    pub reachable: bool,
}

#[async_trait]
impl ReverseGeocoder for FakeGeocoder {
    async fn describe(&self, _point: Coordinate) -> FlushResult<Option<String>> {
        if self.reachable {
            Ok(Some("100 Queen St W, Toronto".to_owned()))
        } else {
            Err(FlushError::upstream("reverse-lookup", "timed out"))
        }
    }
}

pub struct FakeFeed;

#[async_trait]
impl FeatureFeed for FakeFeed {
    async fn facilities(&self) -> FlushResult<Vec<Facility>> {
        Ok(facilities())
    }

    async fn catchments(&self) -> FlushResult<Vec<Catchment>> {
        Ok(catchments())
    }
}

#[derive(Default)]
pub struct Recorder {
    pub poses: Mutex<Vec<CameraPose>>,
    pub eases: Mutex<Vec<CameraEase>>,
    pub fits: Mutex<Vec<FitBounds>>,
    pub paths: Mutex<Vec<(PathLayer, Vec<Vec<Coordinate>>)>>,
    pub highlighted: Mutex<Vec<String>>,
    pub notifications: Mutex<Vec<Notification>>,
}

impl RenderSurface for Recorder {
    fn set_camera(&self, pose: CameraPose) {
        self.poses.lock().unwrap().push(pose);
    }

    fn set_paths(&self, layer: PathLayer, paths: Vec<Vec<Coordinate>>) {
        self.paths.lock().unwrap().push((layer, paths));
    }

    fn ease_camera(&self, ease: CameraEase) {
        self.eases.lock().unwrap().push(ease);
    }

    fn fit_bounds(&self, fit: FitBounds) {
        self.fits.lock().unwrap().push(fit);
    }

    fn highlight_facility(&self, facility: &Facility) {
        self.highlighted.lock().unwrap().push(facility.name.clone());
    }
}

impl Presenter for Recorder {
    fn present(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

impl Recorder {
    pub fn last_notification(&self) -> Notification {
        self.notifications.lock().unwrap().last().cloned().unwrap()
    }
}

/// `len` evenly spaced points from `start` to exactly `end`.
pub fn straight(start: Coordinate, end: Coordinate, len: usize) -> Vec<Coordinate> {
    let mut points = (0..len - 1)
        .map(|i| {
            let t = i as f64 / (len - 1) as f64;
            Coordinate::new(
                start.longitude + (end.longitude - start.longitude) * t,
                start.latitude + (end.latitude - start.latitude) * t,
            )
        })
        .collect::<Vec<_>>();
    points.push(end);
    points
}

/// Humber, which has an outfall, and a plant without one.
pub fn catchments() -> Vec<Catchment> {
    vec![
        Catchment::from_polygon(
            Some("HUMBER".to_owned()),
            polygon![
                (x: -79.60, y: 43.58),
                (x: -79.45, y: 43.58),
                (x: -79.45, y: 43.76),
                (x: -79.60, y: 43.76),
            ],
        ),
        Catchment::from_polygon(
            Some("Unlisted".to_owned()),
            polygon![
                (x: -79.45, y: 43.62),
                (x: -79.25, y: 43.62),
                (x: -79.25, y: 43.76),
                (x: -79.45, y: 43.76),
            ],
        ),
    ]
}

pub fn facilities() -> Vec<Facility> {
    vec![
        Facility::new("Humber", HUMBER),
        Facility::new("Unlisted", UNLISTED),
    ]
}

fn build(
    config: Config,
    paths: Arc<dyn PathService>,
    reachable: bool,
) -> (Orchestrator, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let orchestrator = Orchestrator::new(
        config,
        Collaborators {
            paths,
            geocoder: Arc::new(FakeGeocoder { reachable }),
            surface: recorder.clone(),
            presenter: recorder.clone(),
        },
    );
    (orchestrator, recorder)
}

fn loaded(mut orchestrator: Orchestrator) -> Orchestrator {
    orchestrator.load_catchments(catchments());
    orchestrator.load_facilities(facilities());
    orchestrator
}

/// An orchestrator without any loaded data.
pub fn unloaded(found: bool, reachable: bool) -> (Orchestrator, Arc<Recorder>) {
    build(Config::default(), Arc::new(FakePaths { found }), reachable)
}

pub fn setup(found: bool, reachable: bool) -> (Orchestrator, Arc<Recorder>) {
    let (orchestrator, recorder) = unloaded(found, reachable);
    (loaded(orchestrator), recorder)
}

/// A loaded orchestrator whose path service never answers.
pub fn stalled(config: Config) -> (Orchestrator, Arc<Recorder>) {
    let (orchestrator, recorder) = build(config, Arc::new(StalledPaths), true);
    (loaded(orchestrator), recorder)
}
