//! Solvers for Kepler's equation.
//!
//! Kepler's equation has no closed-form inverse, so getting the eccentric
//! anomaly from a mean anomaly takes a numerical root finder.
//! Closed orbits are handled by [`KeplerSolver::elliptic`], open ones by
//! [`KeplerSolver::hyperbolic`], and [`KeplerSolver::eccentric_anomaly`]
//! picks the right one from the eccentricity.
//!
//! Both solvers first run a short fixed number of cheap iterations that
//! settle the vast majority of inputs, then fall back to a slower loop
//! that is bounded by [`KeplerSolver::max_iterations`].
//!
//! The free functions in this module use [`KeplerSolver::default`].

use core::f64::consts::TAU;

use crate::{
    anomaly::true_anomaly_from_eccentric_anomaly,
    error::{KeplerError, OrbitRegime, Result},
    keplers_equation, keplers_equation_derivative, CONVERGENCE_TOLERANCE, MAX_FALLBACK_ITERS,
};

/// Newton-Raphson iterations tried before the bracketed fallback.
const ELLIPTIC_FAST_ITERS: u32 = 7;

/// Fixed-point iterations tried before the plain fallback loop.
const HYPERBOLIC_FAST_ITERS: u32 = 12;

/// Tuning parameters for the Kepler-equation solvers.
///
/// # Example
/// ```
/// use kepler_conv::KeplerSolver;
///
/// let solver = KeplerSolver {
///     tolerance: 1e-10,
///     ..KeplerSolver::default()
/// };
///
/// let ecc_anom = solver.eccentric_anomaly(0.1, 1.0).unwrap();
/// assert!((ecc_anom - 0.1 * ecc_anom.sin() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeplerSolver {
    /// Iteration stops once two consecutive iterates differ by less than this.
    pub tolerance: f64,

    /// The maximum number of iterations of the fallback loop.
    ///
    /// Running out yields [`KeplerError::NotConverged`].
    pub max_iterations: u32,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            tolerance: CONVERGENCE_TOLERANCE,
            max_iterations: MAX_FALLBACK_ITERS,
        }
    }
}

impl KeplerSolver {
    /// Gets the eccentric anomaly at a given mean anomaly.
    ///
    /// Delegates to [`elliptic`][Self::elliptic] when the eccentricity is
    /// below 1 and to [`hyperbolic`][Self::hyperbolic] otherwise.
    /// An eccentricity of exactly 1 is rejected by the hyperbolic solver.
    pub fn eccentric_anomaly(&self, eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
        if eccentricity < 1.0 {
            self.elliptic(eccentricity, mean_anomaly)
        } else {
            self.hyperbolic(eccentricity, mean_anomaly)
        }
    }

    /// Gets the true anomaly at a given mean anomaly.
    pub fn true_anomaly(&self, eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
        self.eccentric_anomaly(eccentricity, mean_anomaly)
            .map(|ecc_anom| true_anomaly_from_eccentric_anomaly(eccentricity, ecc_anom))
    }

    /// Gets the elliptic eccentric anomaly by solving `M = E - e sin(E)`.
    ///
    /// # Errors
    /// - [`KeplerError::EccentricityOutOfRange`] unless `0 <= e < 1`.
    /// - [`KeplerError::NonFiniteMeanAnomaly`] if `M` is NaN or infinite.
    /// - [`KeplerError::NotConverged`] if the fallback runs out of iterations.
    ///
    /// # Algorithm
    /// Kepler's equation is periodic, so `M` is first reduced into
    /// `[-pi, pi]` and the removed multiple of `2pi` is added back to the
    /// result. Without this, the spacing between neighbouring doubles
    /// outgrows the tolerance once `|M|` reaches about `1e4`.
    ///
    /// Newton-Raphson from `E_0 = M`. The derivative `1 - e cos(E)` stays
    /// positive for `e < 1`, so two to four steps usually suffice.
    ///
    /// About 1% of inputs, mostly at high eccentricities, are still moving
    /// after seven steps. Those continue in a safeguarded
    /// Newton loop: the root is bracketed by `[M - 2pi, M + 2pi]`, and any
    /// step that would leave the bracket is replaced by a bisection step.
    /// Kepler's equation is monotonically increasing in `E`, so the sign of
    /// the residual tells which half of the bracket holds the root.
    pub fn elliptic(&self, eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(KeplerError::EccentricityOutOfRange {
                eccentricity,
                regime: OrbitRegime::Elliptic,
            });
        }
        if !mean_anomaly.is_finite() {
            return Err(KeplerError::NonFiniteMeanAnomaly(mean_anomaly));
        }

        // Solve on [-pi, pi] and add the whole turns back afterwards
        let turns = (mean_anomaly / TAU).round();
        let mean_anomaly = mean_anomaly - turns * TAU;

        self.elliptic_reduced(eccentricity, mean_anomaly)
            .map(|ecc_anom| ecc_anom + turns * TAU)
    }

    fn elliptic_reduced(&self, eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
        let newton_step = |ecc_anom: f64| {
            ecc_anom
                - keplers_equation(mean_anomaly, ecc_anom, eccentricity)
                    / keplers_equation_derivative(ecc_anom, eccentricity)
        };

        let mut ecc_anom = mean_anomaly;

        for _ in 0..ELLIPTIC_FAST_ITERS {
            let next = newton_step(ecc_anom);
            if (next - ecc_anom).abs() < self.tolerance {
                return Ok(next);
            }
            ecc_anom = next;
        }

        log::trace!(
            "elliptic Kepler solver entering bracketed fallback (e = {eccentricity}, M = {mean_anomaly})"
        );

        let mut min = mean_anomaly - TAU;
        let mut max = mean_anomaly + TAU;
        let mut last_step = f64::INFINITY;

        for _ in 0..self.max_iterations {
            // Tighten the bracket with what the current iterate tells us
            if ecc_anom > min && ecc_anom < max {
                if keplers_equation(mean_anomaly, ecc_anom, eccentricity) > 0.0 {
                    max = ecc_anom;
                } else {
                    min = ecc_anom;
                }
            }

            let mut next = newton_step(ecc_anom);

            // `!(a..=b).contains` also catches a NaN step
            if !(min..=max).contains(&next) {
                let center = min + (max - min) * 0.5;
                if keplers_equation(mean_anomaly, center, eccentricity) > 0.0 {
                    max = center;
                } else {
                    min = center;
                }
                next = min + (max - min) * 0.5;
            }

            last_step = (next - ecc_anom).abs();
            if last_step < self.tolerance {
                return Ok(next);
            }
            ecc_anom = next;
        }

        Err(self.give_up(OrbitRegime::Elliptic, last_step))
    }

    /// Gets the hyperbolic eccentric anomaly by solving `M = e sinh(H) - H`.
    ///
    /// # Errors
    /// - [`KeplerError::EccentricityOutOfRange`] unless `e > 1`.
    /// - [`KeplerError::NonFiniteMeanAnomaly`] if `M` is NaN or infinite.
    /// - [`KeplerError::NotConverged`] if the fallback runs out of iterations.
    ///
    /// # Algorithm
    /// Fixed-point iteration `H := asinh((H + M) / e)` from `H_0 = M`.
    /// The map has a slope of about `1 / (e cosh H)`, so it is a contraction
    /// for every open orbit, although it slows down considerably as `e`
    /// approaches 1 and `M` approaches 0.
    ///
    /// # Near-parabolic limit
    /// The fallback needs on the order of `1 / (e cosh H - 1)` iterations.
    /// With the default budget this covers eccentricities down to about
    /// `1 + 2e-4` for any mean anomaly. Closer to 1, small mean anomalies
    /// can exhaust [`max_iterations`][Self::max_iterations] and return
    /// [`KeplerError::NotConverged`]; for example `e = 1 + 1e-7` with
    /// `M = 1e-9` needs around `1e8` steps.
    pub fn hyperbolic(&self, eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
        if eccentricity.is_nan() || eccentricity <= 1.0 {
            return Err(KeplerError::EccentricityOutOfRange {
                eccentricity,
                regime: OrbitRegime::Hyperbolic,
            });
        }
        if !mean_anomaly.is_finite() {
            return Err(KeplerError::NonFiniteMeanAnomaly(mean_anomaly));
        }

        let step = |ecc_anom: f64| ((ecc_anom + mean_anomaly) / eccentricity).asinh();

        let mut ecc_anom = mean_anomaly;

        for _ in 0..HYPERBOLIC_FAST_ITERS {
            let next = step(ecc_anom);
            if (next - ecc_anom).abs() < self.tolerance {
                return Ok(next);
            }
            ecc_anom = next;
        }

        log::trace!(
            "hyperbolic Kepler solver entering fixed-point fallback (e = {eccentricity}, M = {mean_anomaly})"
        );

        let mut last_step = f64::INFINITY;

        for _ in 0..self.max_iterations {
            let next = step(ecc_anom);

            last_step = (next - ecc_anom).abs();
            if last_step < self.tolerance {
                return Ok(next);
            }
            ecc_anom = next;
        }

        Err(self.give_up(OrbitRegime::Hyperbolic, last_step))
    }

    fn give_up(&self, regime: OrbitRegime, last_step: f64) -> KeplerError {
        log::warn!(
            "{regime} Kepler solver gave up after {} fallback iterations (last step {last_step:e})",
            self.max_iterations
        );

        KeplerError::NotConverged {
            iterations: self.max_iterations,
            last_step,
        }
    }
}

/// Gets the eccentric anomaly at a given mean anomaly.
///
/// When the orbit is open (has an eccentricity above 1),
/// the hyperbolic eccentric anomaly is returned instead.
///
/// The eccentric anomaly is an angular parameter that defines the position
/// of a body that is moving along an elliptic Kepler orbit.
///
/// From [Wikipedia](https://en.wikipedia.org/wiki/Eccentric_anomaly)
///
/// # Performance
/// This function uses numerical approach methods and therefore is not
/// very performant. It is recommended to cache this value if you can.
///
/// # Example
/// ```
/// use kepler_conv::{eccentric_anomaly_from_mean_anomaly, KeplerError};
///
/// let ecc_anom = eccentric_anomaly_from_mean_anomaly(0.1, 1.0).unwrap();
/// assert!((ecc_anom - 1.0886).abs() < 1e-4);
///
/// // Parabolic trajectories are not supported
/// assert!(matches!(
///     eccentric_anomaly_from_mean_anomaly(1.0, 1.0),
///     Err(KeplerError::EccentricityOutOfRange { .. }),
/// ));
/// ```
pub fn eccentric_anomaly_from_mean_anomaly(eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
    KeplerSolver::default().eccentric_anomaly(eccentricity, mean_anomaly)
}

/// Gets the elliptic eccentric anomaly at a given mean anomaly.
///
/// See [`KeplerSolver::elliptic`].
pub fn elliptic_eccentric_anomaly(eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
    KeplerSolver::default().elliptic(eccentricity, mean_anomaly)
}

/// Gets the hyperbolic eccentric anomaly at a given mean anomaly.
///
/// See [`KeplerSolver::hyperbolic`].
pub fn hyperbolic_eccentric_anomaly(eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
    KeplerSolver::default().hyperbolic(eccentricity, mean_anomaly)
}

/// Gets the true anomaly at a given mean anomaly.
///
/// The true anomaly is derived from the eccentric anomaly, which
/// uses numerical approach methods and so is not performant.
pub fn true_anomaly_from_mean_anomaly(eccentricity: f64, mean_anomaly: f64) -> Result<f64> {
    KeplerSolver::default().true_anomaly(eccentricity, mean_anomaly)
}
