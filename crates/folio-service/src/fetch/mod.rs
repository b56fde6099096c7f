//! Generic `{data, loading, error}` state around one async call.
//!
//! A [`FetchHandle`] does no caching and no de-duplication. Every
//! [`FetchHandle::execute`] bumps a generation counter and only the newest
//! call may write state; a superseded call still returns its own result to
//! its caller.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use tracing::{debug, warn};

use folio_core::{AppError, AppResult};

/// Default number of attempts for [`FetchHandle::with_retry`].
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default delay between attempts for [`FetchHandle::with_retry`].
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

type FetchFn<A, T> = Arc<dyn Fn(A) -> BoxFuture<'static, AppResult<T>> + Send + Sync>;

/// Observable state of a fetch handle.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Last successful result, cleared on failure.
    pub data: Option<T>,
    /// A call is in flight.
    pub loading: bool,
    /// User-facing message of the last failure.
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

struct Optimistic<T> {
    apply: Arc<dyn Fn(&T) + Send + Sync>,
    rollback: Arc<dyn Fn() + Send + Sync>,
}

/// Wraps an async function `A -> AppResult<T>` and tracks its state.
pub struct FetchHandle<A, T> {
    fetch: FetchFn<A, T>,
    state: Arc<Mutex<FetchState<T>>>,
    generation: Arc<AtomicU64>,
    retry: Option<RetryPolicy>,
    optimistic: Option<Optimistic<T>>,
}

impl<A, T> std::fmt::Debug for FetchHandle<A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchHandle")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("retry", &self.retry)
            .field("optimistic", &self.optimistic.is_some())
            .finish()
    }
}

impl<A, T> FetchHandle<A, T>
where
    A: Clone + Send + 'static,
    T: Clone + Send + 'static,
{
    /// Wrap `fetch`. Nothing runs until [`execute`](Self::execute) or
    /// [`immediate`](Self::immediate) is called.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        Self {
            fetch: Arc::new(move |args| Box::pin(fetch(args))),
            state: Arc::new(Mutex::new(FetchState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            retry: None,
            optimistic: None,
        }
    }

    /// Re-invoke up to `attempts` times with a fixed `delay`, stopping
    /// early on a 4xx response.
    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry = Some(RetryPolicy {
            attempts: attempts.max(1),
            delay,
        });
        self
    }

    /// Run `apply` with the result on success and `rollback` on failure.
    pub fn with_optimistic<Ap, Rb>(mut self, apply: Ap, rollback: Rb) -> Self
    where
        Ap: Fn(&T) + Send + Sync + 'static,
        Rb: Fn() + Send + Sync + 'static,
    {
        self.optimistic = Some(Optimistic {
            apply: Arc::new(apply),
            rollback: Arc::new(rollback),
        });
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T> {
        self.lock().clone()
    }

    /// Run the wrapped call once right away (the "on mount" mode).
    pub async fn immediate(&self, args: A) -> Option<T> {
        self.execute(args).await
    }

    /// Invoke the wrapped call, recording the outcome.
    ///
    /// Returns the data on success and `None` on failure. State is only
    /// written when no newer call has started in the meantime.
    pub async fn execute(&self, args: A) -> Option<T> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(generation, |state| {
            state.loading = true;
            state.error = None;
        });

        match self.invoke(args).await {
            Ok(data) => {
                if let Some(optimistic) = &self.optimistic {
                    (optimistic.apply)(&data);
                }
                let stored = data.clone();
                self.update(generation, move |state| {
                    state.data = Some(stored);
                    state.loading = false;
                    state.error = None;
                });
                Some(data)
            }
            Err(err) => {
                warn!(error = %err, status = err.status, "Fetch failed");
                if let Some(optimistic) = &self.optimistic {
                    (optimistic.rollback)();
                }
                let message = err.user_message();
                self.update(generation, move |state| {
                    state.data = None;
                    state.loading = false;
                    state.error = Some(message);
                });
                None
            }
        }
    }

    /// Drop all state. Calls still in flight can no longer write.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock() = FetchState::default();
    }

    async fn invoke(&self, args: A) -> AppResult<T> {
        let Some(policy) = self.retry else {
            return (self.fetch)(args).await;
        };

        let mut attempt = 1;
        loop {
            match (self.fetch)(args.clone()).await {
                Ok(data) => return Ok(data),
                Err(err) if stops_retry(&err) || attempt >= policy.attempts => return Err(err),
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts = policy.attempts,
                        error = %err,
                        "Fetch attempt failed, retrying"
                    );
                    tokio::time::sleep(policy.delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn update(&self, generation: u64, apply: impl FnOnce(&mut FetchState<T>)) {
        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded fetch result");
            return;
        }
        apply(&mut state);
    }

    fn lock(&self) -> MutexGuard<'_, FetchState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn stops_retry(err: &AppError) -> bool {
    err.is_client_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[tokio::test]
    async fn test_execute_success_and_failure() {
        let handle = FetchHandle::new(|n: u32| async move {
            if n == 0 {
                Err(AppError::http(404, "Project not found", None))
            } else {
                Ok(n * 2)
            }
        });

        assert_eq!(handle.execute(21).await, Some(42));
        let state = handle.state();
        assert_eq!(state.data, Some(42));
        assert!(!state.loading);
        assert!(state.error.is_none());

        assert_eq!(handle.execute(0).await, None);
        let state = handle.state();
        assert!(state.data.is_none());
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("The requested resource was not found.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_result_is_discarded() {
        let handle = Arc::new(FetchHandle::new(|delay_ms: u64| async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok(delay_ms)
        }));

        let slow = {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.execute(500).await })
        };
        while !handle.state().loading {
            tokio::task::yield_now().await;
        }
        assert_eq!(handle.execute(10).await, Some(10));

        // The slow call still hands back its own result.
        assert_eq!(slow.await.unwrap(), Some(500));
        assert_eq!(handle.state().data, Some(10));
        assert!(!handle.state().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_from_server_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let handle = FetchHandle::new(move |_: ()| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(AppError::http(503, "unavailable", None))
                } else {
                    Ok("ok")
                }
            }
        })
        .with_retry(DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY);

        assert_eq!(handle.execute(()).await, Some("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_stops_on_client_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let handle = FetchHandle::new(move |_: ()| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Err::<(), _>(AppError::http(422, "invalid", None)) }
        })
        .with_retry(5, Duration::from_millis(10));

        assert_eq!(handle.execute(()).await, None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            handle.state().error.as_deref(),
            Some("Validation failed. Please check your input.")
        );
    }

    #[tokio::test]
    async fn test_optimistic_apply_and_rollback() {
        let applied = Arc::new(AtomicU32::new(0));
        let rolled_back = Arc::new(AtomicU32::new(0));
        let (a, r) = (Arc::clone(&applied), Arc::clone(&rolled_back));
        let handle = FetchHandle::new(|ok: bool| async move {
            if ok {
                Ok(7u32)
            } else {
                Err(AppError::network("offline"))
            }
        })
        .with_optimistic(
            move |v: &u32| {
                a.fetch_add(*v, Ordering::SeqCst);
            },
            move || {
                r.fetch_add(1, Ordering::SeqCst);
            },
        );

        handle.execute(true).await;
        handle.execute(false).await;
        assert_eq!(applied.load(Ordering::SeqCst), 7);
        assert_eq!(rolled_back.load(Ordering::SeqCst), 1);
        assert_eq!(handle.state().error.as_deref(), Some("offline"));
    }

    #[tokio::test]
    async fn test_reset_clears_state() {
        let handle = FetchHandle::new(|_: ()| async { Ok(1) });
        handle.immediate(()).await;
        handle.reset();
        assert_eq!(handle.state(), FetchState::default());
    }
}
