//! Virtual competition time
//!
//! The archive was captured during a fixed window starting at
//! `competition_start`. Clients browse it as if it were live: wall-clock
//! ("alpha") time is shifted back by the distance between the current phase
//! anchor and the start of the window. The anchor is `beta_start` until the
//! detection phase begins, then `detection_start`, so the phase only ever
//! moves forward.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::DateTime;
use pacsocial_config::CompetitionConfig;

/// Offset applied by [`format_pdt`] (UTC-8, fixed regardless of DST)
const PDT_OFFSET_SECS: i64 = -8 * 3600;

/// Display format for human-readable timestamps in the clock payload
const PDT_FORMAT: &str = "%b %d %Y, %I:%M:%S %p PDT";

/// Source of wall-clock epoch seconds
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current epoch seconds
    fn now(&self) -> i64;
}

/// The system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A settable clock for tests and replays
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Competition phase, a pure function of wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before `detection_start`: only beta-flagged entities are visible
    Beta,
    /// From `detection_start` on: only non-beta entities are visible
    Detection,
}

/// Phase-aware time translator shared by every request
#[derive(Debug, Clone)]
pub struct CompetitionClock {
    competition_start: i64,
    beta_start: i64,
    detection_start: i64,
    detection_end: i64,
    clock: Arc<dyn Clock>,
}

impl CompetitionClock {
    pub fn new(config: &CompetitionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            competition_start: config.competition_start,
            beta_start: config.beta_start,
            detection_start: config.detection_start,
            detection_end: config.detection_end,
            clock,
        }
    }

    /// Capture the clock and phase anchor once
    ///
    /// All translations for a single request must go through the same
    /// `Moment` so a phase flip mid-request cannot skew them.
    pub fn moment(&self) -> Moment {
        let now = self.clock.now();
        let phase = if now >= self.detection_start {
            Phase::Detection
        } else {
            Phase::Beta
        };
        let anchor = match phase {
            Phase::Detection => self.detection_start,
            Phase::Beta => self.beta_start,
        };

        Moment {
            now,
            anchor,
            phase,
            competition_start: self.competition_start,
            detection_end: self.detection_end,
        }
    }

    /// Raw wall-clock seconds
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn competition_start(&self) -> i64 {
        self.competition_start
    }

    pub fn detection_end(&self) -> i64 {
        self.detection_end
    }
}

/// A frozen view of the clock: wall time plus the phase anchor at that time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub now: i64,
    pub anchor: i64,
    pub phase: Phase,
    pub competition_start: i64,
    pub detection_end: i64,
}

impl Moment {
    fn offset(&self) -> i64 {
        self.anchor - self.competition_start
    }

    pub fn to_virtual(&self, alpha: i64) -> i64 {
        alpha - self.offset()
    }

    pub fn to_alpha(&self, virtual_time: i64) -> i64 {
        virtual_time + self.offset()
    }

    pub fn current_virtual_time(&self) -> i64 {
        self.to_virtual(self.now)
    }

    /// Clamp a requested virtual time into `[competition_start, current_virtual_time]`
    ///
    /// An absent request means "now". Before the beta anchor the upper bound
    /// sits below `competition_start`; the lower bound wins in that case.
    pub fn clamp(&self, requested: Option<i64>) -> i64 {
        let current = self.current_virtual_time();
        let wanted = requested.unwrap_or(current);
        self.competition_start.max(current.min(wanted))
    }

    pub fn in_beta(&self) -> bool {
        self.phase == Phase::Beta
    }

    /// True once the detection deadline has passed
    pub fn detection_over(&self) -> bool {
        self.now >= self.detection_end
    }
}

/// Render epoch seconds as fixed UTC-8 text, e.g. `Dec 07 2014, 04:00:00 PM PDT`
pub fn format_pdt(epoch: i64) -> String {
    DateTime::from_timestamp(epoch + PDT_OFFSET_SECS, 0)
        .map(|dt| dt.naive_utc().format(PDT_FORMAT).to_string())
        .unwrap_or_default()
}
