//! Ballbot Locator
//!
//! Connects the outside world to the kinematics core. Each tick the
//! [`TrackingLoop`] asks an [`ObjectLocator`] where the tracked object is
//! and feeds the answer into a [`KinematicState`]:
//!
//! - **CenterLocator:** grabs a [`Frame`] of a [`ScreenRegion`] from a
//!   [`FrameSource`] and reports the region center
//! - **ReplayLocator:** replays pre-recorded positions until exhausted
//!
//! Capture backends live outside this workspace; they only need to
//! implement [`FrameSource`].

pub mod locators;
pub mod region;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ballbot_common::clock::Clock;
use ballbot_common::config::TrackingDefaults;
use ballbot_common::error::BallbotResult;
use ballbot_kinematics::{KinematicSnapshot, KinematicState, Vector2D};

pub use locators::{CenterLocator, ReplayLocator};
pub use region::{Frame, ScreenRegion};

/// Trait for screen capture backends.
pub trait FrameSource: Send {
    /// Capture the given region. Fails with `Capture` on device errors.
    fn grab(&mut self, region: &ScreenRegion) -> BallbotResult<Frame>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Trait for strategies that find the tracked object.
pub trait ObjectLocator: Send {
    /// Current position of the tracked object.
    ///
    /// Fails with `NoFrameAvailable` when no further observation exists and
    /// with `Capture` when the underlying device fails.
    fn locate(&mut self) -> BallbotResult<Vector2D>;

    /// Locator name for logging.
    fn name(&self) -> &str;
}

/// The loop that polls a locator once per tick and updates the kinematics.
pub struct TrackingLoop<L, C> {
    locator: L,
    state: KinematicState<C>,
    pause: Duration,
    stop_flag: Arc<AtomicBool>,
    ticks: u64,
}

impl<L: ObjectLocator, C: Clock> TrackingLoop<L, C> {
    /// Create a loop around an existing state, sleeping `pause` between ticks.
    pub fn new(locator: L, state: KinematicState<C>, pause: Duration) -> Self {
        Self {
            locator,
            state,
            pause,
            stop_flag: Arc::new(AtomicBool::new(false)),
            ticks: 0,
        }
    }

    /// Locate the object once to seed the state, then pace ticks according
    /// to `defaults`.
    pub fn start(mut locator: L, clock: C, defaults: &TrackingDefaults) -> BallbotResult<Self> {
        defaults.validate()?;
        let initial = locator.locate()?;
        let state = KinematicState::new(initial, clock);
        Ok(Self::new(locator, state, defaults.tick_pause()))
    }

    /// Perform one observation: locate, then cascade the kinematics.
    pub fn tick(&mut self) -> BallbotResult<KinematicSnapshot> {
        let position = self.locator.locate()?;
        self.state.set_position(position)?;
        self.ticks += 1;
        Ok(self.state.snapshot())
    }

    /// Tick until the stop flag is set or the locator runs out of
    /// observations. Returns the number of ticks performed by this loop.
    ///
    /// Any other error ends the loop and is returned as-is.
    pub async fn run(&mut self) -> BallbotResult<u64> {
        tracing::info!(
            locator = %self.locator.name(),
            pause_ms = self.pause.as_millis() as u64,
            "Tracking loop started"
        );

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.tick() {
                Ok(snapshot) => {
                    tracing::debug!(tick = self.ticks, "{}", snapshot);
                }
                Err(e) if e.is_exhausted() => {
                    tracing::info!(reason = %e, "Locator exhausted");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, ticks = self.ticks, "Tracking loop failed");
                    return Err(e);
                }
            }
            tokio::time::sleep(self.pause).await;
        }

        tracing::info!(ticks = self.ticks, "Tracking loop stopped");
        Ok(self.ticks)
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Number of successful ticks so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> &KinematicState<C> {
        &self.state
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }
}
