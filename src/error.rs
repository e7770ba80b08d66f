//! Error types for the Kepler solvers.

use core::fmt;

use thiserror::Error;

/// Result type for the iterative anomaly conversions.
pub type Result<T> = core::result::Result<T, KeplerError>;

/// The conic regime a solver is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitRegime {
    /// Closed orbits, `0 <= e < 1`.
    Elliptic,
    /// Open orbits, `e > 1`.
    Hyperbolic,
}

impl fmt::Display for OrbitRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitRegime::Elliptic => f.write_str("elliptic (0 <= e < 1)"),
            OrbitRegime::Hyperbolic => f.write_str("hyperbolic (e > 1)"),
        }
    }
}

/// Errors that the Kepler-equation solvers can report.
///
/// The closed-form relations never fail; they let NaN and infinities
/// propagate through IEEE arithmetic instead.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum KeplerError {
    /// The eccentricity does not belong to the regime the solver handles.
    ///
    /// Parabolic trajectories (`e == 1`) are rejected by every solver.
    #[error("eccentricity {eccentricity} is outside the {regime} regime")]
    EccentricityOutOfRange {
        /// The offending eccentricity.
        eccentricity: f64,
        /// The regime the called solver expects.
        regime: OrbitRegime,
    },

    /// The mean anomaly was NaN or infinite.
    #[error("mean anomaly {0} is not finite")]
    NonFiniteMeanAnomaly(f64),

    /// The fallback loop used up its iteration budget.
    #[error("solver did not converge after {iterations} iterations (last step {last_step:e})")]
    NotConverged {
        /// Number of fallback iterations performed.
        iterations: u32,
        /// Absolute difference between the last two iterates.
        last_step: f64,
    },
}
