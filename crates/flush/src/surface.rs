use model::{
    camera::{CameraEase, CameraPose, FitBounds},
    coordinate::Coordinate,
    distance::FlushDistance,
    facility::Facility,
};
use serde::Serialize;

use crate::FlushError;

/// Line layers the engine draws on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PathLayer {
    /// The smoothed route to the plant.
    Route,
    /// Outfall pipes of all modeled plants.
    Outfalls,
}

/// The map the engine draws on. Only camera placement and line geometry are
/// required; the remaining operations are optional niceties.
pub trait RenderSurface: Send + Sync {
    fn set_camera(&self, pose: CameraPose);

    /// Replaces all lines of `layer`.
    fn set_paths(&self, layer: PathLayer, paths: Vec<Vec<Coordinate>>);

    fn ease_camera(&self, _ease: CameraEase) {}

    fn fit_bounds(&self, _fit: FitBounds) {}

    fn highlight_facility(&self, _facility: &Facility) {}
}

/// Messages for the user. How they are shown (modals, toasts, ...) is up to
/// the [`Presenter`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notification {
    /// A point was resolved; the user has to confirm before the flight.
    #[serde(rename_all = "camelCase")]
    AwaitingConfirmation { address: String, facility: String },
    /// The flush arrived at the plant (or the flight was skipped).
    #[serde(rename_all = "camelCase")]
    FacilityReached { facility: String },
    /// The flush left through the outfall.
    #[serde(rename_all = "camelCase")]
    JourneyComplete {
        facility: String,
        distance: FlushDistance,
    },
    #[serde(rename_all = "camelCase")]
    Rejected { code: &'static str, message: String },
}

impl From<&FlushError> for Notification {
    fn from(value: &FlushError) -> Self {
        Notification::Rejected {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

pub trait Presenter: Send + Sync {
    fn present(&self, notification: Notification);
}
