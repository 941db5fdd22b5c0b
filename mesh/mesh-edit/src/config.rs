//! Session-level configuration.

use mesh_repair::RepairParams;

/// Face budget for subdivision when none is configured.
pub const DEFAULT_SUBDIVIDE_MAX_FACES: usize = 10_000_000;

/// Knobs that apply to every operation run through an [`EditSession`].
///
/// Per-call values (strength, levels, ratio, factor) live on
/// [`Operation`]; everything here is fixed for the session.
///
/// # Example
///
/// ```
/// use mesh_edit::EditConfig;
///
/// let config = EditConfig::default()
///     .with_history_limit(50)
///     .with_smooth_preserve_boundaries(true);
/// assert_eq!(config.history_limit, Some(50));
/// ```
///
/// [`EditSession`]: crate::EditSession
/// [`Operation`]: crate::Operation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditConfig {
    /// Maximum number of history entries kept, including the current one.
    /// `None` keeps everything. Default: `None`
    pub history_limit: Option<usize>,

    /// Subdivision fails instead of producing more faces than this.
    /// Default: [`DEFAULT_SUBDIVIDE_MAX_FACES`]
    pub subdivide_max_faces: usize,

    /// Keep open-boundary vertices fixed while decimating. Default: true
    pub decimate_preserve_boundary: bool,

    /// Keep open-boundary vertices fixed while smoothing. Default: false
    pub smooth_preserve_boundaries: bool,

    /// Passes run by [`Operation::Repair`](crate::Operation::Repair).
    pub repair: RepairParams,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            subdivide_max_faces: DEFAULT_SUBDIVIDE_MAX_FACES,
            decimate_preserve_boundary: true,
            smooth_preserve_boundaries: false,
            repair: RepairParams::default(),
        }
    }
}

impl EditConfig {
    /// Keep at most `limit` entries (at least one is always kept).
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Set the subdivision face budget.
    #[must_use]
    pub const fn with_subdivide_max_faces(mut self, max_faces: usize) -> Self {
        self.subdivide_max_faces = max_faces;
        self
    }

    /// Set boundary preservation for decimation.
    #[must_use]
    pub const fn with_decimate_preserve_boundary(mut self, preserve: bool) -> Self {
        self.decimate_preserve_boundary = preserve;
        self
    }

    /// Set boundary preservation for smoothing.
    #[must_use]
    pub const fn with_smooth_preserve_boundaries(mut self, preserve: bool) -> Self {
        self.smooth_preserve_boundaries = preserve;
        self
    }

    /// Set the repair passes.
    #[must_use]
    pub fn with_repair(mut self, repair: RepairParams) -> Self {
        self.repair = repair;
        self
    }

    /// The effective entry cap, never below one.
    pub(crate) fn entry_cap(&self) -> Option<usize> {
        self.history_limit.map(|limit| limit.max(1))
    }
}
