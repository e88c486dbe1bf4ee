use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Session clock cadence.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum RacerEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<RacerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<RacerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports releases too
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    tx.send(RacerEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(RacerEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    log::warn!("terminal event read failed: {err}");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RacerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<RacerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<RacerEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RacerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Ticks keep a fixed cadence: key presses between ticks do not push the
/// next tick back.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Cell<Instant>,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Cell::new(Instant::now() + ticker.interval());
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Restart the tick cadence from now, e.g. when a session begins.
    pub fn reset_ticks(&self) {
        self.next_tick.set(Instant::now() + self.ticker.interval());
    }

    /// Blocks until the next event or the next tick deadline, whichever is first
    pub fn step(&self) -> RacerEvent {
        let timeout = self.next_tick.get().saturating_duration_since(Instant::now());
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(err) => {
                if err == RecvTimeoutError::Disconnected {
                    std::thread::sleep(timeout);
                }
                self.next_tick.set(self.next_tick.get() + self.ticker.interval());
                RacerEvent::Tick
            }
        }
    }
}
