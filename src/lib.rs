//! # Keplerian Element Conversions
//! This library crate converts between equivalent descriptions of a
//! two-body Keplerian orbit.
//!
//! There is no time stepping and no perturbation modeling here: every
//! function is a pure, stateless mapping from one set of numbers to
//! another, safe to call from any number of threads at once.
//!
//! ## Getting started
//! The crate is split into three layers:
//! - [`relations`]: closed-form formulas relating pairs and triples of
//!   scalar orbital elements, like the eccentricity, the semi-latus rectum,
//!   or the specific orbital energy.
//! - [`anomaly`] and [`solvers`]: conversions between the mean, eccentric,
//!   and true anomalies. Going from the mean anomaly to the eccentric anomaly
//!   means solving Kepler's equation, which is done by a [`KeplerSolver`].
//! - [`state`]: whole orbital states. [`OrbitalStateNat`] and
//!   [`OrbitalStateCompat`] are two element sets describing the same orbit,
//!   and both can be turned into Cartesian [`OrbitalStateRect`] vectors.
//!
//! ## Example
//!
//! ```rust
//! use kepler_conv::{eccentric_anomaly_from_mean_anomaly, OrbitalStateCompat};
//!
//! # fn main() -> kepler_conv::Result<()> {
//! let ecc_anom = eccentric_anomaly_from_mean_anomaly(0.1, 1.0)?;
//! assert!((ecc_anom - 0.1 * ecc_anom.sin() - 1.0).abs() < 1e-9);
//!
//! // A circular orbit of radius 1 meter around a body with mu = 1
//! let state = OrbitalStateCompat {
//!     semi_major_axis: 1.0,
//!     eccentricity: 0.0,
//!     inclination: 0.0,
//!     lon_ascending_node: 0.0,
//!     lon_periapsis: 0.0,
//!     mean_lon_at_epoch: 0.0,
//!     std_grav_param: 1.0,
//!     true_anomaly: 0.0,
//! };
//! let rect = state.to_rect();
//! assert_eq!(rect.position, glam::DVec3::new(1.0, 0.0, 0.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//! The solvers report through the [`log`] facade when they enter their slow
//! fallback paths or give up. No logger is installed by this crate.

#![warn(missing_docs)]

pub mod anomaly;
mod error;
pub mod relations;
pub mod solvers;
pub mod state;

pub use error::{KeplerError, OrbitRegime, Result};
pub use solvers::{
    eccentric_anomaly_from_mean_anomaly, elliptic_eccentric_anomaly, hyperbolic_eccentric_anomaly,
    true_anomaly_from_mean_anomaly, KeplerSolver,
};
pub use state::{OrbitalStateCompat, OrbitalStateNat, OrbitalStateRect};

/// A three-dimensional vector of `f64`s.
pub type Vector3 = glam::DVec3;

/// The Newtonian constant of gravitation, in m^3 kg^-1 s^-2.
///
/// CODATA 2018 recommended value.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// The default convergence tolerance of the Kepler solvers.
///
/// Iteration stops once two consecutive iterates differ by less than this
/// absolute amount.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// The default maximum number of iterations of the solver fallback loops.
///
/// This is used to prevent infinite loops in case the method fails to converge.
///
/// The hyperbolic fixed-point iteration contracts by roughly `1 / (e cosh H)`
/// per step, so near-parabolic orbits with `e` barely above 1 need thousands
/// of iterations; the budget is sized well beyond that.
pub const MAX_FALLBACK_ITERS: u32 = 100_000;

#[cfg(test)]
mod tests;

#[inline]
fn keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - (eccentricity * eccentric_anomaly.sin()) - mean_anomaly
}
#[inline]
fn keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    1.0 - (eccentricity * eccentric_anomaly.cos())
}

/// Get the hyperbolic sine and cosine of a number.
///
/// Usually faster than calling `x.sinh()` and `x.cosh()` separately.
///
/// Returns a tuple which contains:
/// - 0: The hyperbolic sine of the number.
/// - 1: The hyperbolic cosine of the number.
pub fn sinhcosh(x: f64) -> (f64, f64) {
    let e_x = x.exp();
    let e_neg_x = (-x).exp();

    ((e_x - e_neg_x) * 0.5, (e_x + e_neg_x) * 0.5)
}
