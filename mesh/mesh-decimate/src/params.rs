//! Parameters for mesh decimation.

/// Parameters for mesh decimation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimateParams {
    /// Ratio of triangles to keep (0.0 to 1.0). Default: 0.5
    pub target_ratio: f64,

    /// Never move vertices that lie on an open boundary. Default: true
    pub preserve_boundary: bool,

    /// Maximum quadric error allowed for a single collapse. If None, no limit.
    pub max_error: Option<f64>,

    /// Cost multiplier for edges touching the boundary when `preserve_boundary`
    /// is false. Higher values make them less likely to collapse. Default: 10.0
    pub boundary_penalty: f64,
}

impl Default for DecimateParams {
    fn default() -> Self {
        Self {
            target_ratio: 0.5,
            preserve_boundary: true,
            max_error: None,
            boundary_penalty: 10.0,
        }
    }
}

impl DecimateParams {
    /// Create params targeting a ratio of original triangles.
    ///
    /// The ratio is validated when decimating, not here.
    #[must_use]
    pub fn with_target_ratio(ratio: f64) -> Self {
        Self {
            target_ratio: ratio,
            ..Default::default()
        }
    }

    /// Create aggressive decimation params (more simplification).
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            target_ratio: 0.25,
            preserve_boundary: false,
            boundary_penalty: 1.0,
            ..Default::default()
        }
    }

    /// Set preserve boundary option.
    #[must_use]
    pub const fn with_preserve_boundary(mut self, preserve: bool) -> Self {
        self.preserve_boundary = preserve;
        self
    }

    /// Set maximum error threshold.
    #[must_use]
    pub const fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = Some(max_error);
        self
    }

    /// Triangle floor for a mesh with `triangles` faces.
    ///
    /// `round(ratio * triangles)` clamped to `[1, triangles]`, or 0 for a
    /// mesh without faces.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn target_triangles(&self, triangles: usize) -> usize {
        if triangles == 0 {
            return 0;
        }
        let target = (triangles as f64 * self.target_ratio).round() as usize;
        target.clamp(1, triangles)
    }
}
