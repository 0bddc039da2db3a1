//! Run a closure on its own thread and wait for its result later.
//!
//! Useful for taking a whole-map scan off the calling thread:
//!
//! ```rust
//! use partmap::{task, PartitionedMap};
//! use std::sync::Arc;
//!
//! let map = Arc::new(PartitionedMap::new(4)?);
//! for i in 0..100 {
//!     map.insert(i, i);
//! }
//!
//! let scan = {
//!     let map = Arc::clone(&map);
//!     task::submit(move || map.filter(|v| *v >= 90).len())?
//! };
//! assert_eq!(scan.result()?, 10);
//! # Ok::<(), partmap::Error>(())
//! ```

use crate::error::Error;
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to a closure running on its own thread.
///
/// Dropping the handle detaches the thread instead of joining it, so an
/// unjoined scan keeps running (and keeps its `Arc` to the map) after the
/// handle is gone.
#[must_use = "dropping a TaskHandle detaches the task; call `result` to wait for it"]
pub struct TaskHandle<R> {
    id: u64,
    handle: JoinHandle<R>,
}

/// Start `f` on a new thread.
pub fn submit<F, R>(f: F) -> Result<TaskHandle<R>, Error>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    let handle = thread::Builder::new()
        .name(format!("partmap-task-{}", id))
        .spawn(f)
        .map_err(|e| Error::SpawnFailed(e.to_string()))?;
    debug!(task_id = id, "task submitted");
    Ok(TaskHandle { id, handle })
}

impl<R> TaskHandle<R> {
    /// Block until the task finishes and return what it produced.
    pub fn result(self) -> Result<R, Error> {
        let id = self.id;
        self.handle.join().map_err(|payload| {
            let message = panic_message(payload.as_ref());
            error!(task_id = id, %message, "task panicked");
            Error::TaskPanicked(message)
        })
    }

    /// Whether the task has finished running. Does not block.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Identifier used in the task's thread name and log events.
    pub fn id(&self) -> u64 {
        self.id
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
