//! Marshaling of side effects from the animation thread to the application
//! thread.
//!
//! The runtime never calls application code (open/close callbacks, haptics,
//! menu actions) from inside a frame. It posts a task through an
//! [`AppDispatcher`] and the host drains the paired [`AppTaskQueue`] on its
//! application thread.

use smallvec::SmallVec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

type AppTask = Box<dyn FnOnce() + Send + 'static>;

/// Creates a connected dispatcher/queue pair.
pub fn app_channel() -> (AppDispatcher, AppTaskQueue) {
    let (tx, rx) = mpsc::channel();
    let pending = Arc::new(AtomicUsize::new(0));
    (
        AppDispatcher {
            tx,
            pending: pending.clone(),
        },
        AppTaskQueue { rx, pending },
    )
}

/// Sending half: cloneable, usable from any thread.
#[derive(Clone)]
pub struct AppDispatcher {
    tx: mpsc::Sender<AppTask>,
    pending: Arc<AtomicUsize>,
}

impl AppDispatcher {
    /// Enqueues `task` to run on the application thread.
    pub fn post(&self, task: impl FnOnce() + Send + 'static) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(Box::new(task)).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            log::warn!("application task queue dropped; side effect discarded");
        }
    }
}

/// Receiving half, owned by the application thread.
pub struct AppTaskQueue {
    rx: mpsc::Receiver<AppTask>,
    pending: Arc<AtomicUsize>,
}

impl AppTaskQueue {
    /// Runs every task posted so far and returns how many ran.
    pub fn run_pending(&self) -> usize {
        let tasks: SmallVec<[AppTask; 4]> = self.rx.try_iter().collect();
        let count = tasks.len();
        for task in tasks {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            task();
        }
        count
    }

    pub fn has_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}
