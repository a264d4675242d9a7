//! Poll configuration
//!
//! A [`PollSpec`] is built fresh for every mutating operation and discarded
//! once the run ends. Per-kind vocabularies live in [`StatusTable`] constants.

use crate::error::{Result, SpecError};
use std::collections::BTreeSet;
use std::time::Duration;

/// Sentinel target state meaning "the resource no longer exists".
pub const ABSENT: &str = "";

/// Default deadline for one polling run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Default delay before the first check and between checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Classification of one observed status against a [`PollSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    /// Still in progress, keep polling
    Pending,
    /// Converged
    Target,
    /// Terminal domain failure
    Failure,
    /// Not in any set; the run stops
    Unexpected,
}

/// Static state vocabulary for one resource kind and operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTable {
    pub pending: &'static [&'static str],
    pub target: &'static [&'static str],
    pub failure: &'static [&'static str],
}

impl StatusTable {
    pub const fn new(pending: &'static [&'static str], target: &'static [&'static str]) -> Self {
        Self {
            pending,
            target,
            failure: &[],
        }
    }

    pub const fn with_failure(mut self, failure: &'static [&'static str]) -> Self {
        self.failure = failure;
        self
    }
}

/// Immutable configuration for one polling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSpec {
    pending: BTreeSet<String>,
    target: BTreeSet<String>,
    failure: BTreeSet<String>,
    timeout: Duration,
    interval: Duration,
    initial_delay: Duration,
    not_found_checks: u32,
    continuous_target_occurrence: u32,
}

impl PollSpec {
    pub fn builder() -> PollSpecBuilder {
        PollSpecBuilder::default()
    }

    /// Shorthand for a spec built from `table` with default timing.
    pub fn from_table(table: &StatusTable) -> Result<Self> {
        Self::builder().table(table).build()
    }

    pub fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }

    pub fn target(&self) -> &BTreeSet<String> {
        &self.target
    }

    pub fn failure(&self) -> &BTreeSet<String> {
        &self.failure
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn not_found_checks(&self) -> u32 {
        self.not_found_checks
    }

    pub fn continuous_target_occurrence(&self) -> u32 {
        self.continuous_target_occurrence
    }

    /// Whether "resource no longer exists" counts as convergence.
    pub fn accepts_absence(&self) -> bool {
        self.target.contains(ABSENT)
    }

    pub fn classify(&self, status: &str) -> StateClass {
        if self.target.contains(status) {
            StateClass::Target
        } else if self.pending.contains(status) {
            StateClass::Pending
        } else if self.failure.contains(status) {
            StateClass::Failure
        } else {
            StateClass::Unexpected
        }
    }

    /// Every status this spec recognises, for diagnostics.
    pub fn known_states(&self) -> Vec<String> {
        self.pending
            .iter()
            .chain(self.target.iter())
            .chain(self.failure.iter())
            .cloned()
            .collect()
    }
}

/// Builder for [`PollSpec`].
#[derive(Debug, Clone)]
pub struct PollSpecBuilder {
    pending: BTreeSet<String>,
    target: BTreeSet<String>,
    failure: BTreeSet<String>,
    timeout: Duration,
    interval: Duration,
    min_interval: Duration,
    initial_delay: Option<Duration>,
    not_found_checks: u32,
    continuous_target_occurrence: u32,
}

impl Default for PollSpecBuilder {
    fn default() -> Self {
        Self {
            pending: BTreeSet::new(),
            target: BTreeSet::new(),
            failure: BTreeSet::new(),
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            min_interval: Duration::ZERO,
            initial_delay: None,
            not_found_checks: 0,
            continuous_target_occurrence: 1,
        }
    }
}

impl PollSpecBuilder {
    /// Load pending, target and failure sets from a static table.
    ///
    /// States are added to whatever was configured before.
    pub fn table(self, table: &StatusTable) -> Self {
        self.pending(table.pending.iter().copied())
            .target(table.target.iter().copied())
            .failure(table.failure.iter().copied())
    }

    pub fn pending<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn target<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn failure<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failure.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay between checks. Also used before the first check unless
    /// [`initial_delay`](Self::initial_delay) is set.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Floor for the interval. A shorter interval is raised to `floor`.
    pub fn min_interval(mut self, floor: Duration) -> Self {
        self.min_interval = floor;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Consecutive "not found" answers tolerated before giving up, when
    /// absence is not itself a target.
    pub fn not_found_checks(mut self, checks: u32) -> Self {
        self.not_found_checks = checks;
        self
    }

    /// Number of consecutive target observations required to converge.
    pub fn continuous_target_occurrence(mut self, occurrences: u32) -> Self {
        self.continuous_target_occurrence = occurrences;
        self
    }

    pub fn build(self) -> Result<PollSpec> {
        if self.target.is_empty() {
            return Err(SpecError::NoTarget);
        }
        let interval = self.interval.max(self.min_interval);
        if interval.is_zero() {
            return Err(SpecError::ZeroInterval);
        }
        if self.continuous_target_occurrence == 0 {
            return Err(SpecError::ZeroOccurrence);
        }

        let overlap = self
            .pending
            .intersection(&self.target)
            .chain(self.pending.intersection(&self.failure))
            .chain(self.target.intersection(&self.failure))
            .next();
        if let Some(status) = overlap {
            return Err(SpecError::Overlap {
                status: status.clone(),
            });
        }

        Ok(PollSpec {
            initial_delay: self.initial_delay.unwrap_or(interval),
            pending: self.pending,
            target: self.target,
            failure: self.failure,
            timeout: self.timeout,
            interval,
            not_found_checks: self.not_found_checks,
            continuous_target_occurrence: self.continuous_target_occurrence,
        })
    }
}
