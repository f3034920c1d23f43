//! Run status poller
//!
//! Observes an asynchronously progressing backend run without the caller
//! managing timers directly. A [`RunPoller`] owns a single timer task that
//! fetches the project record and its accumulated outputs as a pair,
//! reports each complete snapshot through a callback, and halts itself once
//! the run reaches a terminal status.
//!
//! Both fetches of a tick run inside the polling task, so at most one pair
//! is ever in flight; a pair slower than the interval drops ticks instead
//! of letting them bunch up. Stopping is cooperative: an in-flight request
//! is not aborted, but a response that lands after [`RunPoller::stop`] is
//! discarded rather than applied.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use atelier_core::domain::output::AgentOutput;
use atelier_core::domain::project::Project;

use crate::StudioClient;
use crate::error::Result;

/// Source of run state for a poll session
///
/// Implemented by [`StudioClient`]; kept as a trait so sessions can be
/// driven against scripted state in tests.
#[async_trait]
pub trait RunSource: Send + Sync {
    /// Fetch the current project record
    async fn fetch_project(&self, project_id: i64) -> Result<Project>;

    /// Fetch the accumulated agent outputs
    async fn fetch_outputs(&self, project_id: i64) -> Result<Vec<AgentOutput>>;
}

#[async_trait]
impl RunSource for StudioClient {
    async fn fetch_project(&self, project_id: i64) -> Result<Project> {
        self.get_project(project_id).await
    }

    async fn fetch_outputs(&self, project_id: i64) -> Result<Vec<AgentOutput>> {
        self.list_outputs(project_id).await
    }
}

/// One complete observation of a running project
///
/// Produced only when both fetches of a tick succeed; the output list is a
/// full replacement, not a delta.
#[derive(Debug, Clone)]
pub struct RunSnapshot {
    /// Monotonically increasing tick number, starting at 1
    pub tick: u64,
    pub project: Project,
    pub outputs: Vec<AgentOutput>,
}

/// Counters describing a poll session
#[derive(Debug, Clone, Default)]
pub struct PollStats {
    /// Ticks that issued a fetch pair
    pub ticks: u64,
    /// Ticks whose fetch pair failed and was skipped
    pub failures: u64,
    /// Message from the most recent failed tick, if any
    pub last_error: Option<String>,
}

/// Cloneable handle for stopping a poll session from another task
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    /// Request the session to stop; idempotent
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

/// An owned, explicitly stoppable poll session
///
/// The session ends when a terminal status is observed, when [`stop`]
/// is called, or when the poller is dropped; it never resumes on its own.
///
/// [`stop`]: RunPoller::stop
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use atelier_client::{RunPoller, StudioClient};
///
/// # async fn example() {
/// let client = Arc::new(StudioClient::new("http://localhost:8000"));
/// let poller = RunPoller::start(client, 7, Duration::from_secs(5), |snapshot| {
///     println!("{}: {} output(s)", snapshot.project.status, snapshot.outputs.len());
/// });
/// let stats = poller.wait().await;
/// println!("watched for {} tick(s)", stats.ticks);
/// # }
/// ```
pub struct RunPoller {
    handle: Option<JoinHandle<()>>,
    stop: StopHandle,
    stats: Arc<Mutex<PollStats>>,
}

impl RunPoller {
    /// Start polling `project_id` every `interval`
    ///
    /// Issues a paired fetch (project record + output list) immediately and
    /// then once per interval, invoking `on_update` with the latest
    /// snapshot after each tick in which both fetches succeed — never
    /// partially. A failed pair is logged, counted and skipped; polling
    /// continues unchanged. Once a fetched status is terminal the session
    /// stops itself before returning control to the caller.
    pub fn start<S, F>(source: Arc<S>, project_id: i64, interval: Duration, on_update: F) -> Self
    where
        S: RunSource + ?Sized + 'static,
        F: FnMut(RunSnapshot) + Send + 'static,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let stats = Arc::new(Mutex::new(PollStats::default()));

        let handle = tokio::spawn(poll_loop(
            source,
            project_id,
            interval,
            on_update,
            stop_tx.clone(),
            stop_rx,
            Arc::clone(&stats),
        ));

        Self {
            handle: Some(handle),
            stop: StopHandle { tx: stop_tx },
            stats,
        }
    }

    /// Stop the session
    ///
    /// Idempotent; safe to call before the first tick fires (in which case
    /// no fetch is ever issued) and after the session has already ended.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A handle for stopping this session from elsewhere (e.g. a signal
    /// handler)
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Counters observed so far
    pub fn stats(&self) -> PollStats {
        self.stats.lock().unwrap().clone()
    }

    /// Whether the timer task has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Wait for the session to end and return the final counters
    ///
    /// Resolves once a terminal status was observed or the session was
    /// stopped.
    pub async fn wait(mut self) -> PollStats {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("poll task panicked: {}", e);
            }
        }
        self.stats()
    }
}

impl Drop for RunPoller {
    fn drop(&mut self) {
        // Timer release must not depend on the caller remembering stop().
        self.stop.stop();
    }
}

async fn poll_loop<S, F>(
    source: Arc<S>,
    project_id: i64,
    interval: Duration,
    mut on_update: F,
    stop_tx: watch::Sender<bool>,
    mut stop_rx: watch::Receiver<bool>,
    stats: Arc<Mutex<PollStats>>,
) where
    S: RunSource + ?Sized + 'static,
    F: FnMut(RunSnapshot) + Send + 'static,
{
    let mut ticker = time::interval(interval);
    // A pair slower than the interval drops ticks instead of bunching them.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.changed() => break,
            _ = ticker.tick() => {}
        }

        tick += 1;
        debug!(project_id, tick, "polling run state");

        let fetched = fetch_pair(source.as_ref(), project_id).await;

        {
            let mut stats = stats.lock().unwrap();
            stats.ticks = tick;
            if let Err(e) = &fetched {
                stats.failures += 1;
                stats.last_error = Some(e.to_string());
            }
        }

        match fetched {
            Ok((project, outputs)) => {
                // stop() may have raced the fetch; a late snapshot is
                // discarded, never applied.
                if *stop_rx.borrow() {
                    break;
                }

                let terminal = project.status.is_terminal();
                on_update(RunSnapshot {
                    tick,
                    project,
                    outputs,
                });

                if terminal {
                    debug!(project_id, tick, "terminal status observed, stopping");
                    let _ = stop_tx.send(true);
                    break;
                }
            }
            Err(e) => {
                warn!(project_id, tick, error = %e, "poll tick failed, retrying next interval");
            }
        }
    }
}

/// Fetch the project record and output list for one tick
///
/// The outputs are only requested once the project fetch succeeded; either
/// failure voids the whole tick.
async fn fetch_pair<S>(source: &S, project_id: i64) -> Result<(Project, Vec<AgentOutput>)>
where
    S: RunSource + ?Sized,
{
    let project = source.fetch_project(project_id).await?;
    let outputs = source.fetch_outputs(project_id).await?;
    Ok((project, outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn project(status: &str) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "demo",
            "status": status,
            "created_at": "2026-02-11T09:30:00Z",
        }))
        .unwrap()
    }

    fn outputs(count: usize) -> Vec<AgentOutput> {
        (0..count)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": i,
                    "project_id": 1,
                    "agent_name": "Lead Architect",
                    "task_name": "architecture_task",
                    "output_content": format!("output {}", i),
                    "created_at": "2026-02-11T09:31:00Z",
                }))
                .unwrap()
            })
            .collect()
    }

    fn request_failed() -> ClientError {
        ClientError::api_error(500, "boom")
    }

    /// What one scripted tick of the fake backend does
    enum Tick {
        Ok { status: &'static str, outputs: usize },
        ProjectErr,
        OutputsErr { status: &'static str },
    }

    struct FakeSource {
        script: Mutex<VecDeque<Tick>>,
        pending_outputs: Mutex<Option<Result<Vec<AgentOutput>>>>,
        project_fetches: AtomicUsize,
        output_fetches: AtomicUsize,
        output_delay: Duration,
    }

    impl FakeSource {
        fn new(script: Vec<Tick>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                pending_outputs: Mutex::new(None),
                project_fetches: AtomicUsize::new(0),
                output_fetches: AtomicUsize::new(0),
                output_delay: Duration::ZERO,
            })
        }

        fn with_output_delay(script: Vec<Tick>, delay: Duration) -> Arc<Self> {
            let mut source = Self::new(script);
            Arc::get_mut(&mut source).unwrap().output_delay = delay;
            source
        }

        fn project_fetches(&self) -> usize {
            self.project_fetches.load(Ordering::SeqCst)
        }

        fn output_fetches(&self) -> usize {
            self.output_fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RunSource for FakeSource {
        async fn fetch_project(&self, _project_id: i64) -> Result<Project> {
            self.project_fetches.fetch_add(1, Ordering::SeqCst);
            match self.script.lock().unwrap().pop_front() {
                Some(Tick::Ok { status, outputs: n }) => {
                    *self.pending_outputs.lock().unwrap() = Some(Ok(outputs(n)));
                    Ok(project(status))
                }
                Some(Tick::ProjectErr) => {
                    *self.pending_outputs.lock().unwrap() = None;
                    Err(request_failed())
                }
                Some(Tick::OutputsErr { status }) => {
                    *self.pending_outputs.lock().unwrap() = Some(Err(request_failed()));
                    Ok(project(status))
                }
                None => Err(ClientError::ParseError("script exhausted".to_string())),
            }
        }

        async fn fetch_outputs(&self, _project_id: i64) -> Result<Vec<AgentOutput>> {
            self.output_fetches.fetch_add(1, Ordering::SeqCst);
            if self.output_delay > Duration::ZERO {
                time::sleep(self.output_delay).await;
            }
            self.pending_outputs
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(request_failed()))
        }
    }

    fn collecting() -> (
        Arc<Mutex<Vec<RunSnapshot>>>,
        impl FnMut(RunSnapshot) + Send + 'static,
    ) {
        let snapshots = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&snapshots);
        (snapshots, move |s| sink.lock().unwrap().push(s))
    }

    #[tokio::test(start_paused = true)]
    async fn completed_status_stops_after_one_tick() {
        let source = FakeSource::new(vec![Tick::Ok {
            status: "completed",
            outputs: 2,
        }]);
        let (snapshots, on_update) = collecting();

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), on_update);
        let stats = poller.wait().await;

        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.failures, 0);
        let snapshots = snapshots.lock().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].outputs.len(), 2);
        assert!(snapshots[0].project.status.is_terminal());

        // No further network activity for this session.
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.project_fetches(), 1);
        assert_eq!(source.output_fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn error_prefixed_status_is_terminal() {
        let source = FakeSource::new(vec![Tick::Ok {
            status: "error: agent timeout",
            outputs: 0,
        }]);
        let (snapshots, on_update) = collecting();

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), on_update);
        let stats = poller.wait().await;

        assert_eq!(stats.ticks, 1);
        assert_eq!(snapshots.lock().unwrap().len(), 1);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.project_fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unrecognized_status_keeps_polling() {
        let source = FakeSource::new(vec![
            Tick::Ok {
                status: "paused",
                outputs: 0,
            },
            Tick::Ok {
                status: "completed",
                outputs: 0,
            },
        ]);
        let (snapshots, on_update) = collecting();

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), on_update);
        let stats = poller.wait().await;

        assert_eq!(stats.ticks, 2);
        assert_eq!(snapshots.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_the_configured_cadence() {
        // The scenario from the live view: first tick running with no
        // outputs yet, second tick completed with two, then silence.
        let source = FakeSource::new(vec![
            Tick::Ok {
                status: "running",
                outputs: 0,
            },
            Tick::Ok {
                status: "completed",
                outputs: 2,
            },
        ]);
        let (snapshots, on_update) = collecting();

        let started = time::Instant::now();
        let poller =
            RunPoller::start(Arc::clone(&source), 1, Duration::from_millis(5000), on_update);
        let stats = poller.wait().await;

        // Immediate first tick, one interval to the second.
        assert_eq!(started.elapsed(), Duration::from_millis(5000));
        assert_eq!(stats.ticks, 2);

        let snapshots = snapshots.lock().unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].tick, 1);
        assert!(snapshots[0].outputs.is_empty());
        assert_eq!(snapshots[1].tick, 2);
        assert_eq!(snapshots[1].outputs.len(), 2);
        drop(snapshots);

        // No third tick ever fires.
        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.project_fetches(), 2);
        assert_eq!(source.output_fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_first_tick_issues_no_fetches() {
        let source = FakeSource::new(vec![Tick::Ok {
            status: "running",
            outputs: 0,
        }]);
        let (snapshots, on_update) = collecting();

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), on_update);
        // The task has not had a chance to run yet.
        poller.stop();
        let stats = poller.wait().await;

        assert_eq!(stats.ticks, 0);
        assert!(snapshots.lock().unwrap().is_empty());
        assert_eq!(source.project_fetches(), 0);
        assert_eq!(source.output_fetches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let source = FakeSource::new(vec![Tick::Ok {
            status: "running",
            outputs: 0,
        }]);
        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), |_| {});
        let handle = poller.stop_handle();

        poller.stop();
        poller.stop();
        let stats = poller.wait().await;
        // Stopping an already-ended session is also fine.
        handle.stop();

        assert_eq!(stats.ticks, 0);
        assert_eq!(source.project_fetches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_pair_is_skipped_and_polling_continues() {
        let source = FakeSource::new(vec![
            Tick::ProjectErr,
            Tick::Ok {
                status: "running",
                outputs: 1,
            },
            Tick::Ok {
                status: "completed",
                outputs: 3,
            },
        ]);
        let (snapshots, on_update) = collecting();

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), on_update);
        let stats = poller.wait().await;

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.failures, 1);
        assert!(stats.last_error.as_deref().unwrap().contains("status 500"));

        // The failed tick produced no snapshot; the next successful one did.
        let snapshots = snapshots.lock().unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].tick, 2);
        assert_eq!(snapshots[0].outputs.len(), 1);
        assert_eq!(snapshots[1].tick, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn no_partial_update_when_outputs_fetch_fails() {
        let source = FakeSource::new(vec![
            Tick::OutputsErr { status: "running" },
            Tick::Ok {
                status: "completed",
                outputs: 1,
            },
        ]);
        let (snapshots, on_update) = collecting();

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), on_update);
        let stats = poller.wait().await;

        assert_eq!(stats.failures, 1);
        // Both fetches of the failed tick went out, but no half snapshot.
        assert_eq!(source.project_fetches(), 2);
        assert_eq!(source.output_fetches(), 2);
        let snapshots = snapshots.lock().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].tick, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_after_stop_is_discarded() {
        let source = FakeSource::with_output_delay(
            vec![Tick::Ok {
                status: "running",
                outputs: 1,
            }],
            Duration::from_secs(3),
        );
        let (snapshots, on_update) = collecting();

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), on_update);

        // Let the first tick start its (slow) fetch pair, then stop while
        // it is still in flight.
        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.project_fetches(), 1);
        poller.stop();
        let stats = poller.wait().await;

        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.failures, 0);
        assert!(snapshots.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_poller_ends_the_session() {
        let source = FakeSource::new(
            (0..10)
                .map(|_| Tick::Ok {
                    status: "running",
                    outputs: 0,
                })
                .collect(),
        );

        let poller = RunPoller::start(Arc::clone(&source), 1, Duration::from_secs(5), |_| {});
        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.project_fetches(), 1);

        drop(poller);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.project_fetches(), 1);
        assert_eq!(source.output_fetches(), 1);
    }
}
