use serde::{Deserialize, Serialize};

/// Which ball order feeds the geometry.
///
/// The left-to-right order is always computed and reported. `InputOrder`
/// reads `balls[0..3]` as given; `SortedByX` reads them left to right.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallOrdering {
    #[default]
    InputOrder,
    SortedByX,
}

/// Configuration for [`crate::TriangulationSolver`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Ball order used for the pairwise distances.
    pub ordering: BallOrdering,
    /// Smallest accepted magnitude for `sin(angle1)` and the direction
    /// denominator.
    pub min_denominator: f64,
    /// Two balls at most this many pixels apart are treated as coincident.
    ///
    /// Identical positions are always coincident.
    pub min_separation_px: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            ordering: BallOrdering::InputOrder,
            min_denominator: 1e-12,
            min_separation_px: 0.0,
        }
    }
}

impl SolverParams {
    pub fn with_ordering(mut self, ordering: BallOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}
