//! Forecast loading and user-triggered refresh
//!
//! `ForecastWidget` ties a `ForecastSource` to a `ForecastView`. Every load is
//! tagged with a token from a `RequestSequence`; a result is only rendered if
//! no newer load was started while it was in flight, so a slow stale response
//! can never overwrite a newer one.

use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

use crate::data::ForecastSource;
use crate::render::{render, ForecastView};

/// Summary shown while a fetch is in flight
pub const LOADING_SUMMARY: &str = "Loading weather...";

/// Resting label of the refresh control
pub const REFRESH_LABEL: &str = "Refresh";

/// Label shown briefly after the user triggers a refresh
pub const REFRESHED_LABEL: &str = "Refreshed";

/// How long the refresh acknowledgement stays visible
pub const ACK_DURATION: Duration = Duration::from_millis(1500);

/// Hands out monotonically increasing request tokens
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request and returns its token
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `token` belongs to the most recently started request
    pub fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}

/// The forecast widget: load-time path plus the refresh control
pub struct ForecastWidget<C, V> {
    source: C,
    view: Mutex<V>,
    sequence: RequestSequence,
    acknowledgements: RequestSequence,
    ack_duration: Duration,
}

impl<C: ForecastSource, V: ForecastView> ForecastWidget<C, V> {
    pub fn new(source: C, view: V) -> Self {
        Self {
            source,
            view: Mutex::new(view),
            sequence: RequestSequence::new(),
            acknowledgements: RequestSequence::new(),
            ack_duration: ACK_DURATION,
        }
    }

    /// Overrides how long the refresh acknowledgement is shown
    pub fn with_ack_duration(mut self, ack_duration: Duration) -> Self {
        self.ack_duration = ack_duration;
        self
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Locks the view for reading or drawing
    ///
    /// The lock is never held across an await, so holding it briefly from a
    /// draw loop cannot stall a load.
    pub fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock()
    }

    /// Fetches the forecast and renders the outcome
    ///
    /// Returns `true` if the result was applied to the view, `false` if a newer
    /// load superseded it while it was in flight.
    pub async fn load(&self) -> bool {
        let token = self.sequence.begin();
        self.view.lock().set_summary(LOADING_SUMMARY);

        let outcome = self.source.fetch_forecast().await;

        if !self.sequence.is_latest(token) {
            debug!(token, "discarding superseded forecast result");
            return false;
        }

        self.view.lock().show(render(&outcome));
        true
    }

    /// Handles the refresh control
    ///
    /// Invalidates the cache before anything else, then reloads. The
    /// acknowledgement label reverts after the fixed duration whether or not
    /// the fetch has finished or succeeded. A later trigger restarts that
    /// duration; an earlier trigger's timer leaves the label alone.
    pub async fn refresh(&self) -> bool {
        info!("refreshing forecast");
        self.source.invalidate_cache();
        let ack = self.acknowledgements.begin();
        self.view.lock().set_refresh_label(REFRESHED_LABEL);

        let acknowledge = async {
            tokio::time::sleep(self.ack_duration).await;
            if self.acknowledgements.is_latest(ack) {
                self.view.lock().set_refresh_label(REFRESH_LABEL);
            }
        };

        let (applied, ()) = tokio::join!(self.load(), acknowledge);
        applied
    }
}
