//! Run-at-most-once-successfully cell for service clients.

use std::sync::{Condvar, Mutex, MutexGuard, OnceLock};

use super::ServiceInitError;

// Unify lock()/wait() poisoning handling.
fn lock_mutex<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, ()> {
    m.lock().map_err(|std::sync::PoisonError { .. }| ())
}

fn condvar_wait<'a, T>(cv: &Condvar, guard: MutexGuard<'a, T>) -> Result<MutexGuard<'a, T>, ()> {
    cv.wait(guard).map_err(|std::sync::PoisonError { .. }| ())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Empty,
    InProgress,
    Ready,
}

/// Lazily constructed value guarded per slot.
///
/// Concurrent first calls run the constructor exactly once; the others block until it
/// finishes and then observe the same value. A failed (or panicking) construction leaves
/// the slot empty so the next call retries. Each slot has its own lock, so a slow
/// construction never blocks accessors of other slots.
pub(crate) struct Slot<S> {
    service: &'static str,
    state: Mutex<SlotState>,
    ready: Condvar,
    value: OnceLock<S>,
}

impl<S> Slot<S> {
    pub(crate) const fn new(service: &'static str) -> Self {
        Self {
            service,
            state: Mutex::new(SlotState::Empty),
            ready: Condvar::new(),
            value: OnceLock::new(),
        }
    }

    pub(crate) fn get(&self) -> Option<&S> {
        self.value.get()
    }

    pub(crate) fn get_or_try_init<F>(&self, init: F) -> Result<&S, ServiceInitError>
    where
        F: FnOnce() -> Result<S, ServiceInitError>,
    {
        // Fast path: already constructed
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let poisoned = || ServiceInitError::Poisoned {
            service: self.service,
        };

        let mut state = lock_mutex(&self.state).map_err(|()| poisoned())?;
        loop {
            if let Some(value) = self.value.get() {
                return Ok(value);
            }
            if *state == SlotState::InProgress {
                state = condvar_wait(&self.ready, state).map_err(|()| poisoned())?;
                continue;
            }
            *state = SlotState::InProgress;
            break;
        }
        drop(state);

        let mut guard = InitGuard {
            slot: self,
            armed: true,
        };
        let result = init();

        let mut state = lock_mutex(&self.state).map_err(|()| poisoned())?;
        guard.armed = false;
        let outcome = match result {
            Ok(value) => {
                // Only the thread holding InProgress initializes.
                let value = self.value.get_or_init(move || value);
                *state = SlotState::Ready;
                Ok(value)
            }
            Err(err) => {
                *state = SlotState::Empty;
                Err(err)
            }
        };
        drop(state);
        self.ready.notify_all();
        outcome
    }
}

impl<S> std::fmt::Debug for Slot<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("service", &self.service)
            .field("initialized", &self.value.get().is_some())
            .finish()
    }
}

/// Resets the slot if the constructor unwinds, so waiters retry instead of hanging.
struct InitGuard<'a, S> {
    slot: &'a Slot<S>,
    armed: bool,
}

impl<S> Drop for InitGuard<'_, S> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut state) = lock_mutex(&self.slot.state) {
            *state = SlotState::Empty;
        }
        self.slot.ready.notify_all();
    }
}
