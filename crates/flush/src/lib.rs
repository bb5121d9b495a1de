use std::{error, fmt};

pub mod choreographer;
pub mod config;
pub mod distance;
pub mod orchestrator;
pub mod outfall;
pub mod resolver;
pub mod services;
pub mod session;
pub mod smoothing;
pub mod surface;
#[cfg(test)]
mod testing;

/// Everything that can go wrong while following a flush. None of these are
/// fatal: the user is told and can click again.
#[derive(Debug, Clone, PartialEq)]
pub enum FlushError {
    /// A click arrived before both feature collections were loaded.
    DataNotReady,
    /// No catchment contains the clicked point.
    OutOfCoverage,
    /// A catchment matched, but its plant is not among the loaded facilities.
    UnmodeledAuthority { facility_name: String },
    /// The path-finding or reverse-lookup service failed or had no answer.
    UpstreamUnavailable { service: &'static str, reason: String },
}

impl FlushError {
    pub fn upstream<S: Into<String>>(service: &'static str, reason: S) -> Self {
        Self::UpstreamUnavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DataNotReady => "dataNotReady",
            Self::OutOfCoverage => "outOfCoverage",
            Self::UnmodeledAuthority { .. } => "unmodeledAuthority",
            Self::UpstreamUnavailable { .. } => "upstreamUnavailable",
        }
    }
}

impl error::Error for FlushError {}

impl fmt::Display for FlushError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlushError::DataNotReady => write!(f, "Data still loading, try again in a moment."),
            FlushError::OutOfCoverage => {
                write!(f, "That point is outside of the service area.")
            }
            FlushError::UnmodeledAuthority { facility_name } => write!(
                f,
                "This area is serviced by '{}', a treatment plant outside of this model.",
                facility_name
            ),
            FlushError::UpstreamUnavailable { service, reason } => {
                write!(f, "Could not reach the {} service: {}", service, reason)
            }
        }
    }
}

pub type FlushResult<O> = Result<O, FlushError>;
