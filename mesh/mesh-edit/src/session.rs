//! Undoable editing session.

use std::collections::VecDeque;

use mesh_types::IndexedMesh;
use tracing::{debug, info, warn};

use crate::config::EditConfig;
use crate::error::{EditError, EditResult};
use crate::operation::Operation;
use crate::stats::{MeshStats, mesh_stats};
use crate::worker::{EditBase, PendingEdit};

/// A mesh with linear undo/redo history.
///
/// History is a list of independent snapshots and a cursor pointing at the
/// current one. Committing discards everything after the cursor, so a branch
/// abandoned by undo can never be redone.
///
/// # Example
///
/// ```
/// use mesh_edit::{EditSession, Operation};
/// use mesh_types::unit_cube;
///
/// let mut session = EditSession::load(unit_cube());
/// let stats = session.apply(&Operation::Subdivide { levels: 1 })?;
/// assert_eq!(stats.triangle_count, 48);
///
/// assert!(session.undo());
/// assert_eq!(session.stats().triangle_count, 12);
/// assert!(session.redo());
/// assert_eq!(session.stats().triangle_count, 48);
/// # Ok::<(), mesh_edit::EditError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EditSession {
    entries: VecDeque<IndexedMesh>,
    cursor: usize,
    /// Number of commits so far.
    generation: u64,
    config: EditConfig,
}

impl EditSession {
    /// Start a session on `mesh` with the default configuration.
    #[must_use]
    pub fn load(mesh: IndexedMesh) -> Self {
        Self::with_config(mesh, EditConfig::default())
    }

    /// Start a session on `mesh` with `config`.
    #[must_use]
    pub fn with_config(mesh: IndexedMesh, config: EditConfig) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(mesh);
        Self {
            entries,
            cursor: 0,
            generation: 0,
            config,
        }
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &EditConfig {
        &self.config
    }

    /// A copy of the current mesh.
    #[must_use]
    pub fn current(&self) -> IndexedMesh {
        self.current_ref().clone()
    }

    fn current_ref(&self) -> &IndexedMesh {
        // cursor < entries.len() and entries is never empty
        &self.entries[self.cursor]
    }

    /// Statistics for the current mesh.
    #[must_use]
    pub fn stats(&self) -> MeshStats {
        mesh_stats(self.current_ref())
    }

    /// Index of the current entry.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries, including the current one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a session holds at least its loaded mesh.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether [`undo`](Self::undo) would move.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`redo`](Self::redo) would move.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Make `mesh` the current entry, discarding any redo entries.
    ///
    /// The mesh is stored as given. Use [`apply`](Self::apply) to run an
    /// operation with validation.
    pub fn commit(&mut self, mesh: IndexedMesh) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(mesh);

        if let Some(cap) = self.config.entry_cap() {
            while self.entries.len() > cap {
                self.entries.pop_front();
            }
        }
        self.cursor = self.entries.len() - 1;
        self.generation += 1;

        debug!(entries = self.entries.len(), cursor = self.cursor, "Committed edit");
    }

    /// Step back one entry. Returns false if already at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            debug!("Nothing to undo");
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns false if already at the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            debug!("Nothing to redo");
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Run `operation` on the current mesh and commit the result.
    ///
    /// On error the history is left exactly as it was.
    ///
    /// # Errors
    ///
    /// [`EditError::InvalidGeometry`](crate::EditError::InvalidGeometry) if the
    /// input or output mesh is unusable,
    /// [`EditError::OperationFailed`](crate::EditError::OperationFailed) if the
    /// operator rejects its parameters.
    pub fn apply(&mut self, operation: &Operation) -> EditResult<MeshStats> {
        info!(operation = %operation, "Applying edit");
        let result = operation.run(self.current_ref(), &self.config);
        self.settle(*operation, result)
    }

    /// Run `operation` on a worker thread.
    ///
    /// The session is not changed until the returned handle is passed to
    /// [`finish`](Self::finish). Committing, undoing or redoing in between
    /// makes the result stale.
    #[must_use]
    pub fn spawn(&self, operation: Operation) -> PendingEdit {
        info!(operation = %operation, "Starting background edit");
        PendingEdit::spawn(operation, self.base(), self.current(), self.config.clone())
    }

    /// Wait for a background edit and commit its result.
    ///
    /// The result is only committed if the session is still at the entry the
    /// edit started from.
    ///
    /// # Errors
    ///
    /// As [`apply`](Self::apply), plus
    /// [`EditError::OperationFailed`](crate::EditError::OperationFailed) if the
    /// worker thread panicked or the session moved since
    /// [`spawn`](Self::spawn). History is left untouched in both cases.
    pub fn finish(&mut self, pending: PendingEdit) -> EditResult<MeshStats> {
        let operation = pending.operation();
        let base = pending.base();
        let result = pending.join();

        if base != self.base() {
            warn!(
                operation = operation.name(),
                started_at = base.0,
                cursor = self.cursor,
                "Discarding stale background edit"
            );
            return Err(EditError::failed(
                operation.name(),
                "session changed while the edit was running",
            ));
        }
        self.settle(operation, result)
    }

    const fn base(&self) -> EditBase {
        (self.cursor, self.generation)
    }

    fn settle(
        &mut self,
        operation: Operation,
        result: EditResult<IndexedMesh>,
    ) -> EditResult<MeshStats> {
        let checked = result.and_then(|mesh| {
            mesh.require_positions()?;
            mesh.validate()?;
            Ok(mesh)
        });

        match checked {
            Ok(mesh) => {
                let stats = mesh_stats(&mesh);
                self.commit(mesh);
                info!(
                    operation = operation.name(),
                    vertices = stats.vertex_count,
                    triangles = stats.triangle_count,
                    "Edit committed"
                );
                Ok(stats)
            }
            Err(err) => {
                warn!(operation = operation.name(), error = %err, "Edit rejected");
                Err(err)
            }
        }
    }
}
