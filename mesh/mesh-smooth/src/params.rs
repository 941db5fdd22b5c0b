//! Smoothing parameters.

/// Upper bound on the per-pass blend factor.
pub const MAX_LAMBDA: f64 = 0.5;

/// Parameters for Laplacian smoothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothParams {
    /// Smoothing strength in `[0, 100]`. Zero leaves the mesh unchanged.
    pub strength: f64,

    /// Number of smoothing passes. Zero leaves the mesh unchanged.
    pub iterations: u32,

    /// Keep vertices on open boundary edges fixed. Default: false
    pub preserve_boundaries: bool,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self {
            strength: 50.0,
            iterations: 3,
            preserve_boundaries: false,
        }
    }
}

impl SmoothParams {
    /// Create params with the given strength and pass count.
    #[must_use]
    pub fn new(strength: f64, iterations: u32) -> Self {
        Self {
            strength,
            iterations,
            ..Self::default()
        }
    }

    /// Light smoothing that keeps open edges in place.
    #[must_use]
    pub const fn gentle() -> Self {
        Self {
            strength: 20.0,
            iterations: 2,
            preserve_boundaries: true,
        }
    }

    /// Set strength.
    #[must_use]
    pub const fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Set number of passes.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set whether boundary vertices are held fixed.
    #[must_use]
    pub const fn with_preserve_boundaries(mut self, preserve: bool) -> Self {
        self.preserve_boundaries = preserve;
        self
    }

    /// Blend factor applied per pass: `min(strength / 100, 0.5)`.
    #[must_use]
    pub fn lambda(&self) -> f64 {
        (self.strength / 100.0).min(MAX_LAMBDA)
    }

    /// True when these params cannot move any vertex.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.strength <= 0.0 || self.iterations == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambda_is_capped() {
        assert_relative_eq!(SmoothParams::new(20.0, 1).lambda(), 0.2);
        assert_relative_eq!(SmoothParams::new(50.0, 1).lambda(), 0.5);
        assert_relative_eq!(SmoothParams::new(100.0, 1).lambda(), MAX_LAMBDA);
    }

    #[test]
    fn test_identity_params() {
        assert!(SmoothParams::new(0.0, 10).is_identity());
        assert!(SmoothParams::new(80.0, 0).is_identity());
        assert!(!SmoothParams::default().is_identity());
    }

    #[test]
    fn test_builder() {
        let params = SmoothParams::gentle()
            .with_strength(70.0)
            .with_iterations(4)
            .with_preserve_boundaries(false);
        assert_relative_eq!(params.strength, 70.0);
        assert_eq!(params.iterations, 4);
        assert!(!params.preserve_boundaries);
    }
}
