//! Undoable mesh editing sessions.
//!
//! An [`EditSession`] owns a history of mesh snapshots and a cursor. Each
//! [`Operation`] runs on the current snapshot and, if it succeeds and its
//! output is a valid mesh, becomes a new snapshot. A failed operation leaves
//! the history exactly as it was.
//!
//! - [`EditSession::apply`] runs an operation on the calling thread
//! - [`EditSession::spawn`] runs it on a worker thread that reports
//!   [`EditEvent::Started`] and [`EditEvent::Completed`], and
//!   [`EditSession::finish`] commits the result
//! - [`mesh_stats`] reads counts and bounds without touching history
//!
//! Operator failures are folded into [`EditError`]: geometry faults become
//! [`EditError::InvalidGeometry`], everything else
//! [`EditError::OperationFailed`].
//!
//! # Example
//!
//! ```
//! use mesh_edit::{EditEvent, EditSession, Operation};
//! use mesh_types::unit_cube;
//!
//! let mut session = EditSession::load(unit_cube());
//! session.apply(&Operation::Smooth { strength: 50.0, iterations: 2 })?;
//!
//! let pending = session.spawn(Operation::Subdivide { levels: 1 });
//! assert!(matches!(pending.wait_event(), Some(EditEvent::Started { .. })));
//! let stats = session.finish(pending)?;
//! assert_eq!(stats.triangle_count, 48);
//!
//! assert_eq!(session.len(), 3);
//! # Ok::<(), mesh_edit::EditError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod operation;
mod session;
mod stats;
mod worker;

pub use config::{DEFAULT_SUBDIVIDE_MAX_FACES, EditConfig};
pub use error::{EditError, EditResult};
pub use operation::Operation;
pub use session::EditSession;
pub use stats::{MeshStats, mesh_stats};
pub use worker::{EditEvent, PendingEdit};

// Parameter types carried by `Operation` and `EditConfig`.
pub use mesh_repair::RepairParams;
pub use mesh_transform::ScaleFactor;
