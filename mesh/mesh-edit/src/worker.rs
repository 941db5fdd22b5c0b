//! Background execution of a single operation.
//!
//! The operator runs on its own thread and reports [`EditEvent::Started`]
//! before any work and [`EditEvent::Completed`] after it, so a caller can show
//! a busy indicator for exactly the duration of the computation.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use mesh_types::IndexedMesh;
use tracing::{debug, warn};

use crate::config::EditConfig;
use crate::error::{EditError, EditResult};
use crate::operation::Operation;

/// Progress notification from a background edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditEvent {
    /// The operator is about to run.
    Started {
        /// The operation being run.
        operation: Operation,
    },
    /// The operator returned.
    Completed {
        /// The operation that ran.
        operation: Operation,
        /// Whether it produced a mesh.
        succeeded: bool,
    },
}

/// An operation running on a worker thread.
///
/// Hand it back to [`EditSession::finish`](crate::EditSession::finish) to
/// collect the result.
#[derive(Debug)]
pub struct PendingEdit {
    operation: Operation,
    base: EditBase,
    events: Receiver<EditEvent>,
    handle: JoinHandle<EditResult<IndexedMesh>>,
}

/// The session state a background edit started from: cursor and commit count.
pub(crate) type EditBase = (usize, u64);

impl PendingEdit {
    pub(crate) fn spawn(
        operation: Operation,
        base: EditBase,
        mesh: IndexedMesh,
        config: EditConfig,
    ) -> Self {
        let (tx, events) = mpsc::channel();
        let handle = thread::spawn(move || {
            // The receiver may already be gone; the result still comes back through join.
            let _ = tx.send(EditEvent::Started { operation });
            let result = operation.run(&mesh, &config);
            let _ = tx.send(EditEvent::Completed {
                operation,
                succeeded: result.is_ok(),
            });
            result
        });
        debug!(operation = operation.name(), "Spawned background edit");
        Self {
            operation,
            base,
            events,
            handle,
        }
    }

    /// The operation being run.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    pub(crate) const fn base(&self) -> EditBase {
        self.base
    }

    /// Next event if one is ready, without blocking.
    #[must_use]
    pub fn try_event(&self) -> Option<EditEvent> {
        self.events.try_recv().ok()
    }

    /// Block until the next event. `None` once the worker has sent everything.
    #[must_use]
    pub fn wait_event(&self) -> Option<EditEvent> {
        self.events.recv().ok()
    }

    /// Whether the worker thread has returned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker returns and take its result.
    pub(crate) fn join(self) -> EditResult<IndexedMesh> {
        let name = self.operation.name();
        self.handle.join().unwrap_or_else(|_| {
            warn!(operation = name, "Background edit thread panicked");
            Err(EditError::failed(name, "worker thread panicked"))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    #[test]
    fn test_events_arrive_in_order() {
        let op = Operation::Subdivide { levels: 1 };
        let pending = PendingEdit::spawn(op, (0, 0), unit_cube(), EditConfig::default());

        assert_eq!(pending.wait_event(), Some(EditEvent::Started { operation: op }));
        assert_eq!(
            pending.wait_event(),
            Some(EditEvent::Completed {
                operation: op,
                succeeded: true
            })
        );
        assert_eq!(pending.wait_event(), None);
        assert_eq!(pending.join().unwrap().faces.len(), 48);
    }

    #[test]
    fn test_polling_after_finish() {
        let op = Operation::Center;
        let pending = PendingEdit::spawn(op, (0, 0), unit_cube(), EditConfig::default());

        while !pending.is_finished() {
            thread::yield_now();
        }
        assert_eq!(pending.try_event(), Some(EditEvent::Started { operation: op }));
        assert!(matches!(
            pending.try_event(),
            Some(EditEvent::Completed { succeeded: true, .. })
        ));
        assert_eq!(pending.try_event(), None);
        assert!(pending.join().is_ok());
    }

    #[test]
    fn test_failure_is_reported() {
        let op = Operation::Decimate { ratio: -1.0 };
        let pending = PendingEdit::spawn(op, (0, 0), unit_cube(), EditConfig::default());

        assert_eq!(pending.operation(), op);
        let _ = pending.wait_event();
        assert_eq!(
            pending.wait_event(),
            Some(EditEvent::Completed {
                operation: op,
                succeeded: false
            })
        );
        assert!(pending.join().is_err());
    }
}
