//! Runs an [`Orchestrator`] on its own task.
//!
//! Input, data loads and settings changes arrive as [`Command`]s over a
//! channel. The task keeps at most one pending wake-up and replaces it
//! whenever the orchestrator returns a new [`Schedule`], so a new click
//! always supersedes the timers of an older one.

use std::{error, fmt, sync::Arc};

use model::{catchment::Catchment, coordinate::QueryPoint, facility::Facility};
use tokio::{
    sync::{mpsc, oneshot},
    time::{sleep_until, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::{
    config::SettingsUpdate,
    orchestrator::{Input, Orchestrator, Schedule, SessionSnapshot, Wake},
    services::FeatureFeed,
};

const COMMAND_BUFFER: usize = 32;

#[derive(Debug)]
pub enum Command {
    Input(Input),
    Facilities(Vec<Facility>),
    Catchments(Vec<Catchment>),
    Settings(SettingsUpdate),
    Snapshot {
        responder: oneshot::Sender<SessionSnapshot>,
    },
}

#[derive(Debug)]
pub enum SessionError {
    SendError(mpsc::error::SendError<Command>),
    ResponseError(oneshot::error::RecvError),
}

impl From<mpsc::error::SendError<Command>> for SessionError {
    fn from(why: mpsc::error::SendError<Command>) -> Self {
        Self::SendError(why)
    }
}

impl From<oneshot::error::RecvError> for SessionError {
    fn from(why: oneshot::error::RecvError) -> Self {
        Self::ResponseError(why)
    }
}

impl error::Error for SessionError {}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::SendError(_) => write!(f, "session is no longer running"),
            SessionError::ResponseError(_) => write!(f, "session stopped before answering"),
        }
    }
}

pub type SessionResult<O> = Result<O, SessionError>;

/// Cheap, cloneable access to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<Command>,
}

impl SessionHandle {
    async fn send(&self, command: Command) -> SessionResult<()> {
        Ok(self.sender.send(command).await?)
    }

    pub async fn click(&self, point: QueryPoint) -> SessionResult<()> {
        self.send(Command::Input(Input::Click(point))).await
    }

    pub async fn confirm(&self) -> SessionResult<()> {
        self.send(Command::Input(Input::Confirm)).await
    }

    pub async fn skip(&self) -> SessionResult<()> {
        self.send(Command::Input(Input::Skip)).await
    }

    pub async fn load_facilities(&self, facilities: Vec<Facility>) -> SessionResult<()> {
        self.send(Command::Facilities(facilities)).await
    }

    pub async fn load_catchments(&self, catchments: Vec<Catchment>) -> SessionResult<()> {
        self.send(Command::Catchments(catchments)).await
    }

    pub async fn update_settings(&self, update: SettingsUpdate) -> SessionResult<()> {
        self.send(Command::Settings(update)).await
    }

    pub async fn snapshot(&self) -> SessionResult<SessionSnapshot> {
        let (responder, response) = oneshot::channel();
        self.send(Command::Snapshot { responder }).await?;
        Ok(response.await?)
    }
}

/// Spawns the session task. It stops once `shutdown` is cancelled or every
/// handle has been dropped, even while waiting on an outside service.
pub fn run(mut orchestrator: Orchestrator, shutdown: CancellationToken) -> SessionHandle {
    let (sender, mut receiver) = mpsc::channel(COMMAND_BUFFER);

    tokio::spawn(async move {
        let mut pending: Option<(Instant, Wake)> = None;
        loop {
            let deadline = pending.map(|(deadline, _)| deadline);
            tokio::select! {
                _ = shutdown.cancelled() => break,
                command = receiver.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    let schedule = match command {
                        Command::Input(input) => tokio::select! {
                            schedule = orchestrator.handle(input) => schedule,
                            _ = shutdown.cancelled() => break,
                        },
                        Command::Facilities(facilities) => {
                            orchestrator.load_facilities(facilities);
                            Schedule::Unchanged
                        }
                        Command::Catchments(catchments) => {
                            orchestrator.load_catchments(catchments);
                            Schedule::Unchanged
                        }
                        Command::Settings(update) => {
                            orchestrator.update_settings(update);
                            Schedule::Unchanged
                        }
                        Command::Snapshot { responder } => {
                            if responder.send(orchestrator.snapshot()).is_err() {
                                log::debug!("snapshot no longer wanted");
                            }
                            Schedule::Unchanged
                        }
                    };
                    reschedule(&mut pending, schedule);
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((_, wake)) = pending.take() {
                        let schedule = orchestrator.wake(wake);
                        reschedule(&mut pending, schedule);
                    }
                }
            }
        }
        log::info!("session stopped");
    });

    SessionHandle { sender }
}

fn reschedule(pending: &mut Option<(Instant, Wake)>, schedule: Schedule) {
    match schedule {
        Schedule::Unchanged => {}
        Schedule::Clear => *pending = None,
        Schedule::After(delay, wake) => *pending = Some((Instant::now() + delay, wake)),
    }
}

/// Fetches plants and catchments concurrently and hands each collection to
/// the session as soon as it arrives. Failures are logged; the session then
/// keeps rejecting clicks as not ready.
pub async fn load_service_data(session: SessionHandle, feed: Arc<dyn FeatureFeed>) {
    let facilities = async {
        match feed.facilities().await {
            Ok(facilities) => {
                if let Err(why) = session.load_facilities(facilities).await {
                    log::error!("could not hand over facilities: {}", why);
                }
            }
            Err(why) => log::error!("could not load facilities: {}", why),
        }
    };
    let catchments = async {
        match feed.catchments().await {
            Ok(catchments) => {
                if let Err(why) = session.load_catchments(catchments).await {
                    log::error!("could not hand over catchments: {}", why);
                }
            }
            Err(why) => log::error!("could not load catchments: {}", why),
        }
    };
    futures::join!(facilities, catchments);
}
