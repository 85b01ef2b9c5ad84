//! Deliberately hold a lock from another thread
//!
//! [`LockBlocker`] lets a test simulate "someone else holds this lock": while
//! the returned [`BlockGuard`] is alive a background thread owns the lock, and
//! dropping the guard releases it and joins the thread before returning.
//!
//! ```
//! use backsync_harness::LockBlocker;
//! use std::sync::{Arc, Mutex};
//!
//! let lock = Arc::new(Mutex::new(()));
//! let mut blocker = LockBlocker::new();
//! blocker.block(lock.clone());
//!
//! {
//!     let _guard = blocker.enter().unwrap();
//!     assert!(lock.try_lock().is_err());
//! }
//! assert!(lock.try_lock().is_ok());
//! ```

use backsync_core::{Error, Result};
use std::marker::PhantomData;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Name given to the background thread.
pub const BLOCKER_THREAD_NAME: &str = "Blocker Thread";

/// A lock the blocker thread can acquire and sit on.
pub trait HoldableLock: Send + Sync + 'static {
    /// Acquires the lock, reports on `acquired`, then keeps it until `release`
    /// fires or its sender is dropped.
    fn hold_until(&self, acquired: Sender<()>, release: Receiver<()>);
}

impl<T: Send + 'static> HoldableLock for Mutex<T> {
    fn hold_until(&self, acquired: Sender<()>, release: Receiver<()>) {
        let _guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = acquired.send(());
        let _ = release.recv();
    }
}

/// Holds the write side.
impl<T: Send + Sync + 'static> HoldableLock for RwLock<T> {
    fn hold_until(&self, acquired: Sender<()>, release: Receiver<()>) {
        let _guard = self.write().unwrap_or_else(PoisonError::into_inner);
        let _ = acquired.send(());
        let _ = release.recv();
    }
}

/// Holds a configured lock on a background thread for the life of a scope.
#[derive(Default)]
pub struct LockBlocker {
    lock: Option<Arc<dyn HoldableLock>>,
}

impl LockBlocker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the lock to hold on the next [`enter`](Self::enter).
    pub fn block<L: HoldableLock>(&mut self, lock: Arc<L>) -> &mut Self {
        self.lock = Some(lock as Arc<dyn HoldableLock>);
        self
    }

    /// Starts the background thread and returns once it holds the lock.
    ///
    /// Blocks for as long as someone else holds the lock. Fails with
    /// [`Error::Configuration`] when no lock has been configured.
    pub fn enter(&mut self) -> Result<BlockGuard<'_>> {
        let lock = self
            .lock
            .clone()
            .ok_or_else(|| Error::configuration("Lock was not configured"))?;

        let (acquired_tx, acquired_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name(BLOCKER_THREAD_NAME.to_string())
            .spawn(move || lock.hold_until(acquired_tx, release_rx))?;

        if acquired_rx.recv().is_err() {
            let _ = handle.join();
            return Err(Error::configuration(
                "Blocker thread exited before acquiring the lock",
            ));
        }
        debug!("{} is holding the lock", BLOCKER_THREAD_NAME);

        Ok(BlockGuard {
            release: Some(release_tx),
            handle: Some(handle),
            _blocker: PhantomData,
        })
    }
}

/// Scope during which the blocker thread holds the lock.
///
/// Dropping the guard signals the thread and waits for it to exit, so the
/// lock is free by the time the drop returns.
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct BlockGuard<'a> {
    release: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    _blocker: PhantomData<&'a mut LockBlocker>,
}

impl BlockGuard<'_> {
    /// Releases the lock now rather than at end of scope.
    pub fn release(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if let Some(release) = self.release.take() {
            let _ = release.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("{} panicked while holding the lock", BLOCKER_THREAD_NAME);
            } else {
                debug!("{} released the lock", BLOCKER_THREAD_NAME);
            }
        }
    }
}

impl Drop for BlockGuard<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}
