pub use nalgebra as na;
pub use nalgebra_glm as glm;

pub use glm::DVec2;

/// Absolute-tolerance float comparison, used everywhere in place of `==`.
///
/// `2^-10`, coarse on purpose: good enough for pixel-integer input. See
/// [`Eps`] for operations that want a different tolerance.
pub const DEFAULT_EPS: f64 = 0.0009765625; // 2^-10

/// A tolerance value threaded through kernel operations that branch on zero
/// (side-of-line, parallelism, angle clamping). Defaults to [`DEFAULT_EPS`]
/// but can be scaled for inputs with larger coordinate magnitudes than a
/// typical canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eps(pub f64);

impl Default for Eps {
    fn default() -> Self {
        Eps(DEFAULT_EPS)
    }
}

impl Eps {
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.0
    }
}

/// Check if two floats are equal within [`DEFAULT_EPS`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    Eps::default().approx_eq(a, b)
}

/// Check if two points are equal within [`DEFAULT_EPS`] on each axis.
pub fn point_eq(a: DVec2, b: DVec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Every fallible geometric operation in this crate returns
/// `Result<T, SquaringError>`. There is no retry once a stage fails.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SquaringError {
    /// A geometric operation hit a case the algorithm assumes away: a split
    /// expecting two segment intersections found fewer, an intersection of
    /// parallel lines was requested unchecked, or a "triangle" turned out
    /// collinear.
    #[error("degenerate geometry: {reason}")]
    Degenerate { reason: String },

    /// In `rectangle_to_square`, neither or both sub-shapes of a cut had a
    /// 3-vertex convex hull.
    #[error("bad cut: {reason}")]
    BadCut { reason: String },

    /// `FrameSequence::get(i)` was called past the final produced frame.
    #[error("frame index {requested} out of bounds (produced {available} frames)")]
    OutOfBounds { requested: usize, available: usize },
}
