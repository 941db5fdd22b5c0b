//! Subdivision parameters.

/// Parameters for midpoint subdivision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdivideParams {
    /// Number of subdivision levels. Zero leaves the mesh unchanged.
    pub levels: u32,

    /// Maximum faces allowed in result (prevents memory issues).
    pub max_faces: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            levels: 1,
            max_faces: 10_000_000, // 10M faces max
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of levels.
    #[must_use]
    pub const fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Face count after subdivision: `current * 4^levels`.
    ///
    /// Saturates at `usize::MAX` instead of overflowing.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> usize {
        let mut faces = current_faces;
        let mut i = 0;
        while i < self.levels {
            faces = faces.saturating_mul(4);
            i += 1;
        }
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SubdivideParams::default();
        assert_eq!(params.levels, 1);
        assert_eq!(params.max_faces, 10_000_000);
    }

    #[test]
    fn test_builder() {
        let params = SubdivideParams::new().with_levels(3).with_max_faces(1_000);
        assert_eq!(params.levels, 3);
        assert_eq!(params.max_faces, 1_000);
    }

    #[test]
    fn test_expected_faces() {
        assert_eq!(SubdivideParams::new().with_levels(0).expected_faces(12), 12);
        assert_eq!(SubdivideParams::new().with_levels(1).expected_faces(12), 48);
        assert_eq!(SubdivideParams::new().with_levels(2).expected_faces(12), 192);
        assert_eq!(
            SubdivideParams::new().with_levels(64).expected_faces(12),
            usize::MAX
        );
    }
}
