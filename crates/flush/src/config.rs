use std::{env, time::Duration};

use indexmap::IndexMap;
use model::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use utility::serde::duration_millis;

use crate::outfall::default_discharge_points;

pub const DEFAULT_FALLBACK_ADDRESS: &str = "Unknown location in Toronto";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Static configuration of the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Half-window of the moving average applied to walking routes.
    pub smoothing_window: usize,
    /// How many points ahead of its position the flying camera looks.
    pub look_ahead: usize,
    /// Shown instead of an address when the reverse lookup fails.
    pub fallback_address: String,
    /// Discharge point of every plant with a modeled outfall, by plant name.
    #[serde(default = "default_discharge_points")]
    pub discharge_points: IndexMap<String, Coordinate>,
    /// Upper bound for every call to an outside service.
    #[serde(with = "duration_millis", default = "default_request_timeout")]
    pub request_timeout: Duration,
    pub settings: Settings,
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

/// Values the user may change while a session is running. Changes apply to
/// the next tick, never to one already scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(with = "duration_millis")]
    pub tick_interval: Duration,
    pub camera_altitude_m: f64,
}

/// Partial update of the runtime [`Settings`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(
        serialize_with = "duration_millis::serialize_option",
        deserialize_with = "duration_millis::deserialize_option",
        default
    )]
    pub tick_interval: Option<Duration>,
    pub camera_altitude_m: Option<f64>,
}

impl Settings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(tick_interval) = update.tick_interval {
            self.tick_interval = tick_interval;
        }
        if let Some(altitude) = update.camera_altitude_m {
            self.camera_altitude_m = altitude;
        }
    }
}

pub fn valid_tick_interval(tick_interval: &Duration) -> bool {
    !tick_interval.is_zero()
}

pub fn valid_camera_altitude(altitude_m: &f64) -> bool {
    altitude_m.is_finite() && *altitude_m > 0.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            camera_altitude_m: 300.0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing_window: 2,
            look_ahead: 6,
            fallback_address: DEFAULT_FALLBACK_ADDRESS.to_owned(),
            discharge_points: default_discharge_points(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            settings: Settings::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from `FLUSH_*` environment variables. Missing
    /// variables fall back to the defaults, unparsable or out of range ones
    /// are logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            smoothing_window: env_or(
                "FLUSH_SMOOTHING_WINDOW",
                defaults.smoothing_window,
                |window| *window > 0,
            ),
            look_ahead: env_or("FLUSH_LOOK_AHEAD", defaults.look_ahead, |_| true),
            fallback_address: env::var("FLUSH_FALLBACK_ADDRESS")
                .unwrap_or(defaults.fallback_address),
            discharge_points: defaults.discharge_points,
            request_timeout: env_or(
                "FLUSH_REQUEST_TIMEOUT_MS",
                defaults.request_timeout,
                |timeout| !timeout.is_zero(),
            ),
            settings: Settings {
                tick_interval: env_or(
                    "FLUSH_TICK_INTERVAL_MS",
                    defaults.settings.tick_interval,
                    valid_tick_interval,
                ),
                camera_altitude_m: env_or(
                    "FLUSH_CAMERA_ALTITUDE_M",
                    defaults.settings.camera_altitude_m,
                    valid_camera_altitude,
                ),
            },
        }
    }
}

/// Values of the `FLUSH_*` variables. Durations are given in milliseconds.
trait EnvValue: Sized {
    fn parse_env(value: &str) -> Option<Self>;
}

impl EnvValue for usize {
    fn parse_env(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl EnvValue for f64 {
    fn parse_env(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl EnvValue for Duration {
    fn parse_env(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(Duration::from_millis)
    }
}

fn env_or<T: EnvValue>(key: &str, default: T, valid: impl Fn(&T) -> bool) -> T {
    parse_or(key, env::var(key).ok().as_deref(), default, valid)
}

fn parse_or<T: EnvValue>(
    key: &str,
    value: Option<&str>,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    let Some(value) = value else {
        return default;
    };
    match T::parse_env(value) {
        Some(parsed) if valid(&parsed) => parsed,
        Some(_) => {
            log::warn!("ignoring out of range value '{}' of {}", value, key);
            default
        }
        None => {
            log::warn!("ignoring unparsable value '{}' of {}", value, key);
            default
        }
    }
}
