use serde::{Deserialize, Serialize};

use crate::coordinate::{Bounds, Coordinate};

/// Free camera placement: where the camera is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPose {
    pub position: Coordinate,
    pub altitude_m: f64,
    pub look_at: Coordinate,
}

/// Animated transition of the map camera to a new view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraEase {
    pub center: Coordinate,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub duration_ms: u64,
}

impl CameraEase {
    /// Low, tilted view at the start of every flight.
    pub fn flight_start(center: Coordinate) -> Self {
        Self {
            center,
            zoom: 14.0,
            pitch: 65.0,
            bearing: 0.0,
            duration_ms: 900,
        }
    }

    /// Jump to the end of a flight that was skipped.
    pub fn skip_to(center: Coordinate) -> Self {
        Self {
            center,
            zoom: 15.0,
            pitch: 50.0,
            bearing: 0.0,
            duration_ms: 1000,
        }
    }

    /// Top-down view of the discharge point after the outfall flight.
    pub fn top_down(center: Coordinate) -> Self {
        Self {
            center,
            zoom: 16.0,
            pitch: 0.0,
            bearing: 0.0,
            duration_ms: 1500,
        }
    }
}

/// Request to frame a region in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitBounds {
    pub bounds: Bounds,
    pub padding_px: u32,
    pub duration_ms: u64,
}
