use std::{future::Future, sync::Arc, time::Duration};

use model::{
    camera::{CameraEase, FitBounds},
    catchment::Catchment,
    coordinate::{Bounds, Coordinate, QueryPoint},
    distance::FlushDistance,
    facility::Facility,
    outfall::OutfallSegment,
    path::RawPath,
};
use serde::Serialize;

use crate::{
    choreographer::{Choreographer, ChoreographerState, Completion, Phase, Step},
    config::{Config, Settings, SettingsUpdate},
    distance::flush_distance,
    outfall::OutfallBuilder,
    resolver::CatchmentResolver,
    services::{PathService, ReverseGeocoder},
    smoothing::smooth,
    surface::{Notification, PathLayer, Presenter, RenderSurface},
    FlushError, FlushResult,
};

pub const FIT_ROUTE_PADDING_PX: u32 = 60;
pub const FIT_ROUTE_DURATION: Duration = Duration::from_millis(1200);
/// Between showing the route and starting the walking flight.
pub const WALKING_LAUNCH_DELAY: Duration = Duration::from_millis(1300);
/// Between leaving the plant and starting the outfall flight.
pub const OUTFALL_LAUNCH_DELAY: Duration = Duration::from_millis(600);
/// Between the initial camera ease of a flight and its first tick.
pub const STARTUP_DELAY: Duration = Duration::from_millis(950);
/// Between skipping a flight and reporting the plant as reached.
pub const SKIP_SETTLE_DELAY: Duration = Duration::from_millis(1000);
/// Between the end of the outfall flight and reporting the journey.
pub const ARRIVAL_SETTLE_DELAY: Duration = Duration::from_millis(1600);

/// Discrete user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// The user clicked a point on the map.
    Click(QueryPoint),
    /// The user confirmed the resolved plant and wants to follow the flush.
    Confirm,
    /// Skips a running flight. At the plant it continues to the outfall, at
    /// the end of the journey it dismisses the result.
    Skip,
}

/// Deferred work the orchestrator asks its scheduler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Launch,
    Tick,
    Settle,
}

/// How the scheduler's single pending wake-up changes after a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Keep whatever is pending.
    Unchanged,
    /// Drop whatever is pending.
    Clear,
    /// Replace whatever is pending.
    After(Duration, Wake),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    pub awaiting_confirmation: bool,
    pub cancel_requested: bool,
    pub outfall_active: bool,
}

#[derive(Clone)]
pub struct Collaborators {
    pub paths: Arc<dyn PathService>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub surface: Arc<dyn RenderSurface>,
    pub presenter: Arc<dyn Presenter>,
}

/// One click's worth of state: where it started, which plant serves it and
/// what has been measured so far.
#[derive(Debug, Clone)]
struct Journey {
    query: QueryPoint,
    facility: Facility,
    address: String,
    raw_path: Option<RawPath>,
    outfall: Option<OutfallSegment>,
    distance: Option<FlushDistance>,
}

#[derive(Debug, Clone)]
struct StagedFlight {
    phase: Phase,
    path: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Idle,
    Flying,
    Landing,
    PausedAtFacility,
    Done,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub phase: Option<Phase>,
    pub data_ready: bool,
    pub flags: Flags,
    pub facility: Option<String>,
    pub address: Option<String>,
    pub distance: Option<FlushDistance>,
    pub settings: Settings,
}

/// Holds the session flags and routes input and timer wake-ups to the
/// resolver, smoother, outfall builder and choreographer.
///
/// Every entry point returns a [`Schedule`] telling the caller when to call
/// [`Orchestrator::wake`] next. The orchestrator itself never waits on a
/// timer, it only awaits the outside services, each for at most
/// [`Config::request_timeout`].
pub struct Orchestrator {
    config: Config,
    resolver: CatchmentResolver,
    outfalls: OutfallBuilder,
    choreographer: Choreographer,
    flags: Flags,
    journey: Option<Journey>,
    staged: Option<StagedFlight>,
    collaborators: Collaborators,
}

impl Orchestrator {
    pub fn new(config: Config, collaborators: Collaborators) -> Self {
        Self {
            resolver: CatchmentResolver::new(),
            outfalls: OutfallBuilder::new(config.discharge_points.clone()),
            choreographer: Choreographer::new(config.look_ahead),
            flags: Flags::default(),
            journey: None,
            staged: None,
            config,
            collaborators,
        }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn state(&self) -> &ChoreographerState {
        self.choreographer.state()
    }

    pub fn settings(&self) -> Settings {
        self.config.settings
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.config.settings.apply(update);
        log::info!("settings changed to {:?}", self.config.settings);
    }

    pub fn load_facilities(&mut self, facilities: Vec<Facility>) {
        self.resolver.load_facilities(facilities);
    }

    pub fn load_catchments(&mut self, catchments: Vec<Catchment>) {
        self.resolver.load_catchments(catchments);
    }

    /// The most recently completed distance, if the journey got that far.
    pub fn distance(&self) -> Option<FlushDistance> {
        self.journey.as_ref().and_then(|journey| journey.distance)
    }

    fn session_state(&self) -> (SessionState, Option<Phase>) {
        match self.choreographer.state() {
            ChoreographerState::Idle => (SessionState::Idle, None),
            ChoreographerState::Flying(flight) => (SessionState::Flying, Some(flight.phase)),
            ChoreographerState::Landing(_) => (SessionState::Landing, None),
            ChoreographerState::PausedAtFacility => (SessionState::PausedAtFacility, None),
            ChoreographerState::Done => (SessionState::Done, None),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (state, phase) = self.session_state();
        SessionSnapshot {
            state,
            phase,
            data_ready: self.resolver.is_ready(),
            flags: self.flags,
            facility: self.journey.as_ref().map(|journey| journey.facility.name.clone()),
            address: self.journey.as_ref().map(|journey| journey.address.clone()),
            distance: self.distance(),
            settings: self.config.settings,
        }
    }

    /// Handles user input. Rejections are reported to the presenter; the
    /// session stays clickable afterwards.
    pub async fn handle(&mut self, input: Input) -> Schedule {
        let result = match input {
            Input::Click(point) => self.click(point).await,
            Input::Confirm => self.confirm().await,
            Input::Skip => Ok(self.skip()),
        };
        result.unwrap_or_else(|why| {
            log::warn!("rejected {:?}: {}", input, why);
            self.collaborators.presenter.present(Notification::from(&why));
            match input {
                // a failed click leaves a running flight alone
                Input::Click(_) => Schedule::Unchanged,
                _ => Schedule::Clear,
            }
        })
    }

    /// Runs the deferred work the last [`Schedule`] asked for.
    pub fn wake(&mut self, wake: Wake) -> Schedule {
        match wake {
            Wake::Launch => self.launch(),
            Wake::Tick => self.tick(),
            Wake::Settle => self.settle(),
        }
    }

    /// Resolves the clicked point and asks the user for confirmation. A
    /// successful click abandons whatever the previous click started.
    pub async fn click(&mut self, point: QueryPoint) -> FlushResult<Schedule> {
        let facility = self.resolver.resolve(&point)?.facility.clone();
        log::info!(
            "({}, {}) is serviced by {}",
            point.longitude,
            point.latitude,
            facility.name
        );
        self.abandon();
        self.collaborators.surface.highlight_facility(&facility);

        let address = self.describe(point).await;
        self.collaborators
            .presenter
            .present(Notification::AwaitingConfirmation {
                address: address.clone(),
                facility: facility.name.clone(),
            });
        self.journey = Some(Journey {
            query: point,
            facility,
            address,
            raw_path: None,
            outfall: None,
            distance: None,
        });
        self.flags.awaiting_confirmation = true;
        Ok(Schedule::Clear)
    }

    /// Fetches and smooths the route to the plant, shows it, and schedules
    /// the walking flight. Ignored unless a click awaits confirmation.
    pub async fn confirm(&mut self) -> FlushResult<Schedule> {
        if !self.flags.awaiting_confirmation {
            log::debug!("nothing to confirm");
            return Ok(Schedule::Unchanged);
        }
        self.flags.awaiting_confirmation = false;
        let Some((start, end)) = self
            .journey
            .as_ref()
            .map(|journey| (journey.query, journey.facility.location))
        else {
            return Ok(Schedule::Unchanged);
        };

        let timeout = self.config.request_timeout;
        let raw = match bounded(
            "path-finding",
            timeout,
            self.collaborators.paths.find_path(start, end),
        )
        .await
        {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.abandon();
                return Err(FlushError::upstream("path-finding", "no path found"));
            }
            Err(why) => {
                self.abandon();
                return Err(why);
            }
        };
        log::info!("route with {} points", raw.len());

        let display = smooth(&raw, self.config.smoothing_window);
        let surface = &self.collaborators.surface;
        surface.set_paths(PathLayer::Route, vec![display.coordinates().to_vec()]);
        if let Some(bounds) = Bounds::around(display.coordinates()) {
            surface.fit_bounds(FitBounds {
                bounds,
                padding_px: FIT_ROUTE_PADDING_PX,
                duration_ms: FIT_ROUTE_DURATION.as_millis() as u64,
            });
        }

        if let Some(journey) = self.journey.as_mut() {
            journey.raw_path = Some(raw);
        }
        self.staged = Some(StagedFlight {
            phase: Phase::Walking,
            path: display.into_coordinates(),
        });
        Ok(Schedule::After(WALKING_LAUNCH_DELAY, Wake::Launch))
    }

    /// Interprets the skip key depending on where the session is.
    pub fn skip(&mut self) -> Schedule {
        if self.staged.is_some() {
            log::debug!("flight about to launch, ignoring skip");
            return Schedule::Unchanged;
        }
        match self.session_state().0 {
            SessionState::Flying => {
                self.flags.cancel_requested = true;
                Schedule::Unchanged
            }
            SessionState::PausedAtFacility => self.continue_to_outfall(),
            SessionState::Done => {
                self.choreographer.reset();
                Schedule::Clear
            }
            SessionState::Idle | SessionState::Landing => Schedule::Unchanged,
        }
    }

    fn continue_to_outfall(&mut self) -> Schedule {
        let Some(journey) = self.journey.as_mut() else {
            return Schedule::Unchanged;
        };
        self.flags.cancel_requested = false;

        let all = self.outfalls.build_all(self.resolver.facilities());
        self.collaborators.surface.set_paths(
            PathLayer::Outfalls,
            all.iter()
                .map(|segment| segment.coordinates().to_vec())
                .collect(),
        );

        let outfall = self.outfalls.build(&journey.facility);
        journey.outfall = outfall.clone();
        match outfall {
            Some(segment) => {
                self.flags.outfall_active = true;
                self.staged = Some(StagedFlight {
                    phase: Phase::Outfall,
                    path: segment.coordinates().to_vec(),
                });
                Schedule::After(OUTFALL_LAUNCH_DELAY, Wake::Launch)
            }
            None => {
                log::info!("{} has no modeled outfall", journey.facility.name);
                self.choreographer.finish();
                self.complete_journey();
                Schedule::Clear
            }
        }
    }

    fn launch(&mut self) -> Schedule {
        let Some(staged) = self.staged.take() else {
            return Schedule::Clear;
        };
        self.flags.cancel_requested = false;
        match self.choreographer.begin(staged.phase, staged.path) {
            Some(ease) => {
                log::debug!("launching {:?} flight", staged.phase);
                self.collaborators.surface.ease_camera(ease);
                Schedule::After(STARTUP_DELAY, Wake::Tick)
            }
            None => Schedule::Clear,
        }
    }

    fn tick(&mut self) -> Schedule {
        let settings = self.config.settings;
        let surface = &self.collaborators.surface;
        match self
            .choreographer
            .step(self.flags.cancel_requested, settings.camera_altitude_m)
        {
            Step::Idle => Schedule::Clear,
            Step::Moved(pose) => {
                log::trace!("camera at {:?}", pose.position);
                surface.set_camera(pose);
                Schedule::After(settings.tick_interval, Wake::Tick)
            }
            Step::Arrived {
                pose,
                phase: Phase::Walking,
                ..
            } => {
                surface.set_camera(pose);
                self.report_facility_reached();
                Schedule::Clear
            }
            Step::Arrived {
                pose,
                phase: Phase::Outfall,
                end,
            } => {
                surface.set_camera(pose);
                self.flags.outfall_active = false;
                surface.ease_camera(CameraEase::top_down(end));
                Schedule::After(ARRIVAL_SETTLE_DELAY, Wake::Settle)
            }
            Step::Cancelled(ease) => {
                log::debug!("flight skipped");
                surface.ease_camera(ease);
                Schedule::After(SKIP_SETTLE_DELAY, Wake::Settle)
            }
        }
    }

    fn settle(&mut self) -> Schedule {
        match self.choreographer.settle() {
            Some(Completion::FacilityReached) => self.report_facility_reached(),
            Some(Completion::JourneyComplete) => self.complete_journey(),
            None => {}
        }
        Schedule::Clear
    }

    fn report_facility_reached(&self) {
        if let Some(journey) = &self.journey {
            self.collaborators
                .presenter
                .present(Notification::FacilityReached {
                    facility: journey.facility.name.clone(),
                });
        }
    }

    fn complete_journey(&mut self) {
        let Some(journey) = self.journey.as_mut() else {
            return;
        };
        let Some(raw_path) = &journey.raw_path else {
            return;
        };
        let distance = flush_distance(raw_path, journey.outfall.as_ref());
        log::info!(
            "flush to {} travelled {:.2} km",
            journey.facility.name,
            distance.total_km
        );
        journey.distance = Some(distance);
        self.collaborators
            .presenter
            .present(Notification::JourneyComplete {
                facility: journey.facility.name.clone(),
                distance,
            });
    }

    /// Forgets the current journey and stops any flight.
    fn abandon(&mut self) {
        self.choreographer.reset();
        self.flags = Flags::default();
        self.journey = None;
        self.staged = None;
    }

    async fn describe(&self, point: Coordinate) -> String {
        let timeout = self.config.request_timeout;
        match bounded(
            "reverse-lookup",
            timeout,
            self.collaborators.geocoder.describe(point),
        )
        .await
        {
            Ok(Some(address)) => address,
            Ok(None) => self.config.fallback_address.clone(),
            Err(why) => {
                log::error!("reverse lookup failed: {}", why);
                self.config.fallback_address.clone()
            }
        }
    }
}

/// Gives up on a service call that has not answered within `timeout`.
async fn bounded<T, F>(service: &'static str, timeout: Duration, call: F) -> FlushResult<T>
where
    F: Future<Output = FlushResult<T>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .unwrap_or_else(|_| Err(FlushError::upstream(service, "timed out")))
}
