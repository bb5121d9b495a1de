//! Camera flights along a path.
//!
//! The [`Choreographer`] only decides *where* the camera goes on each tick. It
//! never sleeps or schedules anything itself; the session runtime calls
//! [`Choreographer::step`] whenever the next tick is due.
//!
//! ```text
//! Idle --begin--> Flying(Walking) --arrive--> PausedAtFacility
//!                      |                           |
//!                    cancel                      begin
//!                      v                           v
//!             Landing(FacilityReached) <--cancel-- Flying(Outfall)
//!                      |                           |
//!                    settle                      arrive
//!                      v                           v
//!               PausedAtFacility      Landing(JourneyComplete) --settle--> Done
//! ```

use model::{
    camera::{CameraEase, CameraPose},
    coordinate::Coordinate,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// From the clicked point to the plant.
    Walking,
    /// From the plant through the outfall pipe.
    Outfall,
}

/// What a landing ends with once the camera has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Completion {
    FacilityReached,
    JourneyComplete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub phase: Phase,
    pub path: Vec<Coordinate>,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChoreographerState {
    Idle,
    Flying(Flight),
    /// The flight is over and the camera eases into its final view.
    Landing(Completion),
    PausedAtFacility,
    Done,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Nothing is flying.
    Idle,
    /// The camera moved; more ticks follow.
    Moved(CameraPose),
    /// The camera moved for the last time in this phase.
    Arrived {
        pose: CameraPose,
        phase: Phase,
        end: Coordinate,
    },
    /// The flight was skipped; the camera eases straight to the end.
    Cancelled(CameraEase),
}

#[derive(Debug, Clone)]
pub struct Choreographer {
    look_ahead: usize,
    state: ChoreographerState,
}

impl Choreographer {
    pub fn new(look_ahead: usize) -> Self {
        Self {
            look_ahead,
            state: ChoreographerState::Idle,
        }
    }

    pub fn state(&self) -> &ChoreographerState {
        &self.state
    }

    /// Starts a flight along `path` and returns the ease toward its first
    /// point. Paths with fewer than two points can not be flown; the state is
    /// left untouched and `None` returned.
    pub fn begin(&mut self, phase: Phase, path: Vec<Coordinate>) -> Option<CameraEase> {
        if path.len() < 2 {
            return None;
        }
        let ease = CameraEase::flight_start(path[0]);
        self.state = ChoreographerState::Flying(Flight {
            phase,
            path,
            index: 0,
        });
        Some(ease)
    }

    /// Advances the current flight by one tick.
    ///
    /// A requested cancellation ends any flight, walking or outfall, with a
    /// landing that reports the plant as reached.
    pub fn step(&mut self, cancel_requested: bool, altitude_m: f64) -> Step {
        let ChoreographerState::Flying(flight) = &mut self.state else {
            return Step::Idle;
        };
        let last = flight.path.len() - 1;

        if cancel_requested {
            let ease = CameraEase::skip_to(flight.path[last]);
            self.state = ChoreographerState::Landing(Completion::FacilityReached);
            return Step::Cancelled(ease);
        }

        let pose = CameraPose {
            position: flight.path[flight.index],
            altitude_m,
            look_at: flight.path[(flight.index + self.look_ahead).min(last)],
        };
        flight.index += 1;
        if flight.index < last {
            return Step::Moved(pose);
        }

        let phase = flight.phase;
        let end = flight.path[last];
        self.state = match phase {
            Phase::Walking => ChoreographerState::PausedAtFacility,
            Phase::Outfall => ChoreographerState::Landing(Completion::JourneyComplete),
        };
        Step::Arrived { pose, phase, end }
    }

    /// Finishes a landing. Returns what the landing completed, or `None` if
    /// there was nothing to settle.
    pub fn settle(&mut self) -> Option<Completion> {
        let ChoreographerState::Landing(completion) = self.state else {
            return None;
        };
        self.state = match completion {
            Completion::FacilityReached => ChoreographerState::PausedAtFacility,
            Completion::JourneyComplete => ChoreographerState::Done,
        };
        Some(completion)
    }

    /// Ends a session that has no outfall to fly.
    pub fn finish(&mut self) {
        self.state = ChoreographerState::Done;
    }

    /// Drops whatever is going on and returns to `Idle`.
    pub fn reset(&mut self) {
        self.state = ChoreographerState::Idle;
    }
}
