use ecowatch_core::record::{Record, RecordService};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::stages;

/// Display state of one search view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    /// Raw input as typed, updated on every keystroke
    pub term: String,
    /// Results of the latest completed query for the latest dispatched term
    pub results: Vec<Record>,
    pub in_flight: bool,
}

/// Keystrokes in, record lists out.
///
/// Input is debounced, trimmed and deduplicated before it reaches the
/// [`RecordService`]; a newer term supersedes the request in flight, and a
/// failed request yields an empty list. The first emission is the full
/// listing requested at spawn time.
///
/// One pipeline per view. Dropping it cancels every stage.
pub struct QueryPipeline {
    input: UnboundedSender<String>,
    output: UnboundedReceiver<Vec<Record>>,
    state: Arc<watch::Sender<QueryState>>,
    cancel: CancellationToken,
}

impl QueryPipeline {
    /// Spawns the stages on the current tokio runtime.
    pub fn spawn(service: Arc<dyn RecordService>, debounce: Duration) -> Self {
        let cancel = CancellationToken::new();
        let (state, _) = watch::channel(QueryState {
            in_flight: true,
            ..Default::default()
        });
        let state = Arc::new(state);
        let (input, keystrokes) = mpsc::unbounded_channel::<String>();

        let debounced = stages::debounce(keystrokes, debounce, cancel.child_token());
        let trimmed = stages::map(
            debounced,
            |raw: String| raw.trim().to_string(),
            cancel.child_token(),
        );
        let terms = stages::distinct_until_changed(trimmed, cancel.child_token());

        let initial = run_query(service.clone(), String::new());
        let dispatch_state = state.clone();
        let settled = stages::switch_latest(
            terms,
            Some(initial),
            move |term: String| {
                tracing::debug!("[QueryPipeline] Dispatching '{}'", term);
                dispatch_state.send_modify(|s| s.in_flight = true);
                run_query(service.clone(), term)
            },
            cancel.child_token(),
        );

        let emit_state = state.clone();
        let output = stages::map(
            settled,
            move |results: Vec<Record>| {
                emit_state.send_modify(|s| {
                    s.results = results.clone();
                    s.in_flight = false;
                });
                results
            },
            cancel.child_token(),
        );

        Self {
            input,
            output,
            state,
            cancel,
        }
    }

    /// Feeds one keystroke's worth of input (the whole field value).
    pub fn push(&self, raw: impl Into<String>) {
        let raw = raw.into();
        self.state.send_modify(|s| s.term = raw.clone());
        if self.input.send(raw).is_err() {
            tracing::debug!("[QueryPipeline] Input ignored after shutdown");
        }
    }

    /// Next emitted result list; `None` once the pipeline has stopped.
    pub async fn next(&mut self) -> Option<Vec<Record>> {
        self.output.recv().await
    }

    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for QueryPipeline {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// One remote query with failures folded into an empty list.
fn run_query(service: Arc<dyn RecordService>, term: String) -> BoxFuture<'static, Vec<Record>> {
    async move {
        let result = if term.is_empty() {
            service.list_all().await
        } else {
            service.search(&term).await
        };
        match result {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("[QueryPipeline] Query '{}' failed: {}", term, e);
                Vec::new()
            }
        }
    }
    .boxed()
}
