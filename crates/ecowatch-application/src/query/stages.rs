//! Composable channel stages.
//!
//! Each stage consumes an unbounded receiver, spawns one task and returns the
//! receiver of its output. A stage stops when its input closes, when its
//! output receiver is dropped, or when the shared [`CancellationToken`] fires.

use futures::future::BoxFuture;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Forwards a value only once `interval` has passed with no newer value.
///
/// A value still pending when the input closes is flushed before the output
/// closes.
pub fn debounce<T>(
    mut input: UnboundedReceiver<T>,
    interval: Duration,
    cancel: CancellationToken,
) -> UnboundedReceiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut pending: Option<T> = None;
        let timer = tokio::time::sleep(interval);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                value = input.recv() => match value {
                    Some(value) => {
                        pending = Some(value);
                        timer.as_mut().reset(Instant::now() + interval);
                    }
                    None => {
                        if let Some(value) = pending.take() {
                            let _ = tx.send(value);
                        }
                        break;
                    }
                },
                _ = &mut timer, if pending.is_some() => {
                    if let Some(value) = pending.take() {
                        if tx.send(value).is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });
    rx
}

pub fn map<T, U, F>(
    mut input: UnboundedReceiver<T>,
    mut f: F,
    cancel: CancellationToken,
) -> UnboundedReceiver<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> U + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                value = input.recv() => match value {
                    Some(value) => {
                        if tx.send(f(value)).is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    });
    rx
}

/// Drops values equal to the last one forwarded.
pub fn distinct_until_changed<T>(
    mut input: UnboundedReceiver<T>,
    cancel: CancellationToken,
) -> UnboundedReceiver<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut last: Option<T> = None;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                value = input.recv() => match value {
                    Some(value) if last.as_ref() == Some(&value) => continue,
                    Some(value) => {
                        last = Some(value.clone());
                        if tx.send(value).is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    });
    rx
}

/// Runs `start(value)` for every input value, keeping only the newest future.
///
/// A new value drops the in-flight future, so only the most recently started
/// future ever produces output. `initial` is treated as already in flight.
/// The output closes once the input is closed and nothing is in flight.
pub fn switch_latest<T, U, F>(
    mut input: UnboundedReceiver<T>,
    initial: Option<BoxFuture<'static, U>>,
    mut start: F,
    cancel: CancellationToken,
) -> UnboundedReceiver<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> BoxFuture<'static, U> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut in_flight = initial;
        let mut input_open = true;

        while input_open || in_flight.is_some() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                value = input.recv(), if input_open => match value {
                    Some(value) => in_flight = Some(start(value)),
                    None => input_open = false,
                },
                output = async {
                    match in_flight.as_mut() {
                        Some(future) => future.await,
                        None => std::future::pending().await,
                    }
                } => {
                    in_flight = None;
                    if tx.send(output).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}
