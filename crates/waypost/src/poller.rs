//! Status polling loop
//!
//! Repeatedly asks the remote side for the status of one resource until it
//! reaches a target state, fails, or the deadline passes. One fetch is in
//! flight at a time, and a fetch still pending when the deadline passes is
//! dropped.

use crate::error::PollError;
use crate::source::StatusSource;
use crate::spec::{ABSENT, PollSpec, StateClass};
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of a single status fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation<T> {
    /// The resource exists and reports `status`.
    Found { object: T, status: String },
    /// The resource does not exist (HTTP 404 or equivalent).
    Gone,
}

impl<T> Observation<T> {
    pub fn found(object: T, status: impl Into<String>) -> Self {
        Observation::Found {
            object,
            status: status.into(),
        }
    }

    pub fn status(&self) -> &str {
        match self {
            Observation::Found { status, .. } => status,
            Observation::Gone => ABSENT,
        }
    }
}

/// Successful end of a polling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converged<T> {
    /// Last fetched object. `None` when the run converged on absence.
    pub object: Option<T>,

    /// Terminal status that matched the target set
    pub status: String,

    /// Number of fetch calls made
    pub attempts: u32,

    /// Time from the start of the call until convergence
    pub elapsed: Duration,
}

impl<T> Converged<T> {
    /// True when the resource converged by disappearing.
    pub fn is_absent(&self) -> bool {
        self.object.is_none()
    }
}

enum Fetched<R> {
    Done(R),
    Expired,
    Cancelled,
}

/// Drives a polling run for one [`PollSpec`].
#[derive(Debug, Clone)]
pub struct StatusPoller {
    spec: PollSpec,
    label: Option<String>,
    cancel: Option<CancellationToken>,
}

impl StatusPoller {
    pub fn new(spec: PollSpec) -> Self {
        Self {
            spec,
            label: None,
            cancel: None,
        }
    }

    /// Name used for the resource in log events.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Stop early when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn spec(&self) -> &PollSpec {
        &self.spec
    }

    /// Poll `fetch` until the resource converges or the run fails.
    pub async fn poll<T, E, F, Fut>(&self, fetch: F) -> Result<Converged<T>, PollError<T, E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Observation<T>, E>>,
    {
        let label = self.label.as_deref().unwrap_or("resource");
        self.run(label, fetch).await
    }

    /// Poll a [`StatusSource`] until the resource converges or the run fails.
    pub async fn watch<S>(
        &self,
        source: &S,
    ) -> Result<Converged<S::Object>, PollError<S::Object, S::Error>>
    where
        S: StatusSource + ?Sized,
    {
        let label = match &self.label {
            Some(label) => label.clone(),
            None => source.describe(),
        };
        self.run(&label, || source.fetch()).await
    }

    async fn run<T, E, F, Fut>(
        &self,
        label: &str,
        mut fetch: F,
    ) -> Result<Converged<T>, PollError<T, E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Observation<T>, E>>,
    {
        let spec = &self.spec;
        let started = Instant::now();
        let mut attempts: u32 = 0;
        let mut not_found: u32 = 0;
        let mut streak: u32 = 0;
        let mut last_status: Option<String> = None;
        let mut last_object: Option<T> = None;

        debug!(
            resource = %label,
            timeout = ?spec.timeout(),
            interval = ?spec.interval(),
            "Waiting for resource to converge"
        );

        if !self.pause(spec.initial_delay()).await {
            return Err(PollError::Cancelled { attempts });
        }

        loop {
            if self.is_cancelled() {
                return Err(PollError::Cancelled { attempts });
            }

            attempts += 1;
            let budget = spec.timeout().saturating_sub(started.elapsed());
            let observation = match self.bounded(fetch(), budget).await {
                Fetched::Done(Ok(observation)) => observation,
                Fetched::Done(Err(source)) => {
                    warn!(resource = %label, attempt = attempts, "Status check failed");
                    return Err(PollError::FetchFailed {
                        attempt: attempts,
                        source,
                    });
                }
                Fetched::Expired => {
                    let elapsed = started.elapsed();
                    warn!(
                        resource = %label,
                        attempts,
                        elapsed = ?elapsed,
                        status = ?last_status,
                        "Status check outlived the deadline"
                    );
                    return Err(PollError::Timeout {
                        elapsed,
                        attempts,
                        last_status,
                        last_object,
                    });
                }
                Fetched::Cancelled => return Err(PollError::Cancelled { attempts }),
            };

            match observation {
                Observation::Gone if spec.accepts_absence() => {
                    streak += 1;
                    last_status = Some(ABSENT.to_string());
                    last_object = None;
                }
                Observation::Gone => {
                    streak = 0;
                    not_found += 1;
                    if not_found > spec.not_found_checks() {
                        warn!(resource = %label, attempt = attempts, "Resource not found");
                        return Err(PollError::NotFound { attempts });
                    }
                    last_status = None;
                    last_object = None;
                }
                Observation::Found { object, status } => {
                    not_found = 0;
                    match spec.classify(&status) {
                        StateClass::Target => streak += 1,
                        StateClass::Pending => streak = 0,
                        StateClass::Failure => {
                            warn!(
                                resource = %label,
                                attempt = attempts,
                                status = %status,
                                "Resource entered failure state"
                            );
                            return Err(PollError::Failed {
                                status,
                                attempt: attempts,
                                object,
                            });
                        }
                        StateClass::Unexpected => {
                            warn!(
                                resource = %label,
                                attempt = attempts,
                                status = %status,
                                "Unexpected resource state"
                            );
                            return Err(PollError::UnexpectedState {
                                status,
                                attempt: attempts,
                                expected: spec.known_states(),
                            });
                        }
                    }
                    last_status = Some(status);
                    last_object = Some(object);
                }
            }

            let elapsed = started.elapsed();

            if streak >= spec.continuous_target_occurrence() {
                let status = last_status.unwrap_or_default();
                info!(
                    resource = %label,
                    status = %status,
                    attempts,
                    elapsed = ?elapsed,
                    "Resource converged"
                );
                return Ok(Converged {
                    object: last_object,
                    status,
                    attempts,
                    elapsed,
                });
            }

            if elapsed > spec.timeout() {
                warn!(
                    resource = %label,
                    attempts,
                    elapsed = ?elapsed,
                    status = ?last_status,
                    "Timed out waiting for resource"
                );
                return Err(PollError::Timeout {
                    elapsed,
                    attempts,
                    last_status,
                    last_object,
                });
            }

            debug!(
                resource = %label,
                attempt = attempts,
                status = ?last_status,
                "Still pending"
            );

            if !self.pause(spec.interval()).await {
                return Err(PollError::Cancelled { attempts });
            }
        }
    }

    /// Run one fetch, bounded by what is left of the deadline. A fetch that
    /// answers on its first poll always completes, even with no budget left.
    async fn bounded<Fut: Future>(&self, fut: Fut, budget: Duration) -> Fetched<Fut::Output> {
        let fut = timeout(budget, fut);
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                outcome = fut => outcome.map_or(Fetched::Expired, Fetched::Done),
                _ = token.cancelled() => Fetched::Cancelled,
            },
            None => fut.await.map_or(Fetched::Expired, Fetched::Done),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }

    /// Sleep for `delay`. Returns false if cancelled first.
    async fn pause(&self, delay: Duration) -> bool {
        match &self.cancel {
            Some(token) => tokio::select! {
                _ = sleep(delay) => true,
                _ = token.cancelled() => false,
            },
            None => {
                sleep(delay).await;
                true
            }
        }
    }
}

/// Poll `fetch` under `spec` with no label and no cancellation.
pub async fn poll<T, E, F, Fut>(
    fetch: F,
    spec: &PollSpec,
) -> Result<Converged<T>, PollError<T, E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Observation<T>, E>>,
{
    StatusPoller::new(spec.clone()).poll(fetch).await
}
