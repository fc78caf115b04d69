//! Tolerances for geometric comparisons.

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Linear distance tolerance in scene units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 linear).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Smallest triangle area considered non-degenerate.
    pub fn min_area(&self) -> f64 {
        self.linear * self.linear
    }
}
