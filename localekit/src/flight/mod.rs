//! Call deduplication for concurrent identical requests.
//!
//! A [`Flight`] maps a request key to a shared, awaitable call handle. The
//! first caller for a key becomes the leader and executes the work; callers
//! arriving while the handle exists wait on it and share the leader's
//! result instead of starting new work. The handle is removed once
//! resolved, so later requests for the same key run fresh (callers layer
//! their own result caching on top).

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, PoisonError};


enum CallState<T> {
    Pending,
    Done(T),
    /// The leader unwound without producing a value; waiters retry.
    Abandoned,
}

struct Call<T> {
    state: Mutex<CallState<T>>,
    ready: Condvar,
}

/// Deduplication group keyed by request string.
pub(crate) struct Flight<T> {
    calls: Mutex<HashMap<String, Arc<Call<T>>>>,
}

impl<T: Clone> Flight<T> {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `work` for `key`, sharing one execution among concurrent callers.
    ///
    /// Exactly one concurrent caller per key executes `work`; the rest block
    /// until the leader finishes and receive a clone of its result. If the
    /// leader panics, one waiter takes over as the new leader.
    pub(crate) fn run(&self, key: &str, work: impl FnOnce() -> T) -> T {
        loop {
            let (call, is_leader) = {
                let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
                match calls.get(key) {
                    Some(existing) => (Arc::clone(existing), false),
                    None => {
                        let call = Arc::new(Call {
                            state: Mutex::new(CallState::Pending),
                            ready: Condvar::new(),
                        });
                        calls.insert(key.to_owned(), Arc::clone(&call));
                        (call, true)
                    }
                }
            };

            if is_leader {
                let lead = Lead {
                    flight: self,
                    key,
                    call: &call,
                    finished: false,
                };
                let value = work();
                lead.finish(value.clone());
                return value;
            }

            let mut state = call.state.lock().unwrap_or_else(PoisonError::into_inner);
            loop {
                match &*state {
                    CallState::Done(value) => return value.clone(),
                    CallState::Abandoned => break,
                    CallState::Pending => {
                        state = call
                            .ready
                            .wait(state)
                            .unwrap_or_else(PoisonError::into_inner);
                    }
                }
            }
            // Leader abandoned the call: loop around and contend again.
        }
    }

    /// Number of calls currently in flight.
    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Publishes the leader's outcome and unregisters the call, even on panic.
struct Lead<'a, T> {
    flight: &'a Flight<T>,
    key: &'a str,
    call: &'a Arc<Call<T>>,
    finished: bool,
}

impl<T> Lead<'_, T> {
    fn finish(mut self, value: T) {
        self.settle(CallState::Done(value));
        self.finished = true;
    }

    fn settle(&self, outcome: CallState<T>) {
        {
            let mut state = self
                .call
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *state = outcome;
        }
        self.call.ready.notify_all();
        self.flight
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(self.key);
    }
}

impl<T> Drop for Lead<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            self.settle(CallState::Abandoned);
        }
    }
}
