// pn532-tap/src/reader/supervisor.rs

use std::io::Write;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::cancel::CancellationToken;
use crate::clock::Clock;
use crate::config::{Config, Mode};
use crate::device::{Initialized, TargetController, Timings};
use crate::emulation::CardEmulationSession;
use crate::events::{Event, EventEmitter};
use crate::ndef;
use crate::reader::debounce::TapDebouncer;
use crate::reader::heartbeat::HeartbeatScheduler;
use crate::reader::retry::{RetryDecision, RetryState};
use crate::transport::Connector;
use crate::{Error, ErrorKind, Result};

/// Length of one backoff slice; cancellation and heartbeats are checked
/// between slices.
pub const BACKOFF_SLICE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SupervisorState {
    Disconnected,
    Connecting,
    Scanning,
    RecoverableError,
    Backoff,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Clean,
    Fatal,
}

impl ExitStatus {
    /// Process exit code: 0 clean, 1 fatal
    pub fn code(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::Fatal => 1,
        }
    }
}

/// What runs once the link is up.
enum Workload {
    Reader,
    Emulation { payload: Vec<u8>, chunk_size: usize },
}

/// Heartbeat schedule and IPC sink, kept apart from the link so a session
/// can tick heartbeats while it borrows the controller.
struct Liveness<K: Clock, W: Write> {
    clock: K,
    heartbeat: HeartbeatScheduler,
    emitter: EventEmitter<W>,
}

impl<K: Clock, W: Write> Liveness<K, W> {
    fn tick(&mut self) -> Result<()> {
        if self.heartbeat.tick(self.clock.now()) {
            debug!("heartbeat");
            self.emitter.emit(&Event::Heartbeat)?;
        }
        Ok(())
    }
}

/// Owns the connection lifecycle: connect, scan, recover with exponential
/// backoff, and terminate on cancellation or unrecoverable failure.
pub struct ReconnectSupervisor<C: Connector, K: Clock, W: Write> {
    connector: C,
    token: CancellationToken,
    timings: Timings,
    workload: Workload,
    link: Option<TargetController<Initialized>>,
    live: Liveness<K, W>,
    debouncer: TapDebouncer,
    retry: RetryState,
    state: SupervisorState,
    shutdown_reported: bool,
}

impl<C: Connector, K: Clock, W: Write> ReconnectSupervisor<C, K, W> {
    pub fn new(
        config: &Config,
        connector: C,
        clock: K,
        emitter: EventEmitter<W>,
        token: CancellationToken,
    ) -> Result<Self> {
        let workload = match &config.mode {
            Mode::Reader => Workload::Reader,
            Mode::Emulation { text, chunk_size } => Workload::Emulation {
                payload: ndef::text_message(text)
                    .map_err(|e| Error::Config(format!("emulation text rejected: {}", e)))?,
                chunk_size: *chunk_size,
            },
        };
        let heartbeat = HeartbeatScheduler::new(config.heartbeat_interval, clock.now());

        Ok(Self {
            connector,
            token,
            timings: Timings::default(),
            workload,
            link: None,
            live: Liveness {
                clock,
                heartbeat,
                emitter,
            },
            debouncer: TapDebouncer::new(config.debounce, config.dedup_capacity),
            retry: RetryState::new(config.max_retries),
            state: SupervisorState::Disconnected,
            shutdown_reported: false,
        })
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Run until cancelled or until an unrecoverable failure. The link is
    /// closed on every exit path.
    pub fn run(mut self) -> ExitStatus {
        let status = self.run_loop();
        self.teardown();
        self.set_state(SupervisorState::Terminated);
        info!("supervisor stopped (exit code {})", status.code());
        status
    }

    fn run_loop(&mut self) -> ExitStatus {
        loop {
            if self.token.is_cancelled() {
                return self.shutdown();
            }

            let err = match self.connect_and_scan() {
                Ok(()) => return self.shutdown(),
                Err(e) => e,
            };

            match err.kind() {
                ErrorKind::Cancelled => return self.shutdown(),
                ErrorKind::Transport | ErrorKind::Protocol => {
                    if let Some(status) = self.recover(err) {
                        return status;
                    }
                }
                ErrorKind::Config | ErrorKind::Unexpected => {
                    error!("fatal error: {}", err);
                    self.teardown();
                    self.report_fatal(err.to_string());
                    return ExitStatus::Fatal;
                }
            }
        }
    }

    fn connect_and_scan(&mut self) -> Result<()> {
        self.set_state(SupervisorState::Connecting);
        let port = self.connector.describe();
        info!("connecting to PN532 on {}", port);

        let transport = self.connector.connect()?;
        let controller = TargetController::new(transport, self.token.clone())
            .with_timings(self.timings.clone())
            .initialize()?;
        let firmware = controller.firmware();
        self.link = Some(controller);

        self.live.emitter.emit(&Event::Ready {
            firmware: firmware.to_string(),
            port: port.clone(),
        })?;
        info!("PN532 ready on {} (firmware v{})", port, firmware);
        self.retry.reset();

        self.set_state(SupervisorState::Scanning);
        self.scan()
    }

    /// Returns `Ok(())` only once cancellation is observed.
    fn scan(&mut self) -> Result<()> {
        loop {
            if self.token.is_cancelled() {
                return Ok(());
            }
            self.live.tick()?;

            let Some(link) = self.link.as_mut() else {
                return Err(Error::Unexpected("scan without an open link".into()));
            };

            match &self.workload {
                Workload::Reader => {
                    let timeout = self.timings.poll_timeout_ms;
                    if let Some(uid) = link.poll_passive_target(timeout)? {
                        let hex = uid.to_hex();
                        if self.debouncer.accept(&hex, self.live.clock.now()) {
                            info!("tap: {}", hex);
                            self.live.emitter.emit(&Event::Tap { uid: hex })?;
                        } else {
                            debug!("debounced re-tap of {}", hex);
                        }
                    }
                }
                Workload::Emulation {
                    payload,
                    chunk_size,
                } => {
                    let timeout = self.timings.target_timeout_ms;
                    if let Some(initiator) = link.init_target(timeout)? {
                        let mut session = CardEmulationSession::new(payload, *chunk_size);
                        session.activate(&initiator);
                        let live = &mut self.live;
                        session.run(link, &self.token, || live.tick())?;
                    }
                }
            }
        }
    }

    /// Handle a Transport/Protocol failure. `Some` when the supervisor has
    /// to stop.
    fn recover(&mut self, err: Error) -> Option<ExitStatus> {
        self.set_state(SupervisorState::RecoverableError);
        warn!("{} error: {}", err.kind(), err);
        self.teardown();

        if let Err(ipc) = self.live.emitter.emit(&Event::error(err.to_string(), false)) {
            error!("cannot report error: {}", ipc);
            return Some(ExitStatus::Fatal);
        }

        match self.retry.record_failure() {
            RetryDecision::GiveUp { attempts } => {
                error!("max retries reached after {} attempts", attempts);
                self.report_fatal("Max retries reached".into());
                Some(ExitStatus::Fatal)
            }
            RetryDecision::Retry { attempt, wait } => {
                info!(
                    "retrying in {}s (attempt {}/{})",
                    wait.as_secs(),
                    attempt,
                    self.retry.ceiling()
                );
                self.set_state(SupervisorState::Backoff);
                match self.backoff(wait) {
                    Ok(true) => None,
                    Ok(false) => Some(self.shutdown()),
                    Err(ipc) => {
                        error!("cannot report heartbeat: {}", ipc);
                        Some(ExitStatus::Fatal)
                    }
                }
            }
        }
    }

    /// Interruptible wait. `Ok(false)` when cancelled before it elapsed.
    fn backoff(&mut self, total: Duration) -> Result<bool> {
        let end = self.live.clock.now() + total;
        loop {
            if self.token.is_cancelled() {
                return Ok(false);
            }
            let now = self.live.clock.now();
            if now >= end {
                return Ok(true);
            }
            self.live.clock.sleep((end - now).min(BACKOFF_SLICE));
            self.live.tick()?;
        }
    }

    fn shutdown(&mut self) -> ExitStatus {
        if !self.shutdown_reported {
            self.shutdown_reported = true;
            let reason = self
                .token
                .reason()
                .unwrap_or_else(|| "shutdown requested".to_string());
            info!("shutting down: {}", reason);
            self.teardown();
            if let Err(e) = self.live.emitter.emit(&Event::Shutdown { reason }) {
                warn!("cannot report shutdown: {}", e);
            }
        }
        ExitStatus::Clean
    }

    fn report_fatal(&mut self, message: String) {
        self.live.emitter.report_fatal(message);
    }

    fn teardown(&mut self) {
        if let Some(link) = self.link.take() {
            match link.close() {
                Ok(()) => debug!("link closed"),
                Err(e) => warn!("error closing link: {}", e),
            }
        }
        if self.state != SupervisorState::Terminated {
            self.set_state(SupervisorState::Disconnected);
        }
    }

    fn set_state(&mut self, next: SupervisorState) {
        if self.state != next {
            debug!("supervisor: {} -> {}", self.state, next);
            self.state = next;
        }
    }
}
