//! Closed-form conversions between the mean, eccentric and true anomalies.
//!
//! The inverse direction, mean anomaly to eccentric anomaly, requires
//! solving Kepler's equation and lives in [`crate::solvers`].
//!
//! For open orbits (eccentricity of at least 1) the "eccentric anomaly"
//! here means the
//! [hyperbolic eccentric anomaly](https://space.stackexchange.com/questions/27602/what-is-hyperbolic-eccentric-anomaly-f).
//! Parabolic trajectories are not supported; the formulas degrade into
//! `NaN`s or nonsensical values there.

use crate::{keplers_equation, sinhcosh};

/// Gets the mean anomaly at a given eccentric anomaly.
///
/// Uses Kepler's equation for closed orbits, `M = E - e sin(E)`,
/// and the hyperbolic Kepler equation for open orbits, `M = e sinh(H) - H`.
///
/// The mean anomaly is the fraction of an elliptical orbit's period
/// that has elapsed since the orbiting body passed periapsis,
/// expressed as an angle.
///
/// From [Wikipedia](https://en.wikipedia.org/wiki/Mean_anomaly)
///
/// # Example
/// ```
/// use kepler_conv::anomaly::mean_anomaly_from_eccentric_anomaly;
///
/// // Both apsides are fixed points of Kepler's equation
/// assert_eq!(mean_anomaly_from_eccentric_anomaly(0.5, 0.0), 0.0);
/// assert_eq!(
///     mean_anomaly_from_eccentric_anomaly(0.5, std::f64::consts::PI),
///     std::f64::consts::PI - 0.5 * std::f64::consts::PI.sin(),
/// );
/// ```
pub fn mean_anomaly_from_eccentric_anomaly(eccentricity: f64, eccentric_anomaly: f64) -> f64 {
    if eccentricity < 1.0 {
        // https://en.wikipedia.org/wiki/Kepler%27s_equation#Equation
        keplers_equation(0.0, eccentric_anomaly, eccentricity)
    } else {
        // https://en.wikipedia.org/wiki/Kepler%27s_equation#Hyperbolic_Kepler_equation
        eccentricity * eccentric_anomaly.sinh() - eccentric_anomaly
    }
}

/// Gets the eccentric anomaly at a given true anomaly.
///
/// Uses the half-angle tangent identity
/// `E = 2 atan(sqrt((1 - e) / (1 + e)) tan(f / 2))`
/// for closed orbits and its hyperbolic counterpart
/// `H = 2 atanh(sqrt((e - 1) / (e + 1)) tan(f / 2))` for open ones.
///
/// The result lies in `(-pi, pi)` for closed orbits.
/// On open orbits, true anomalies beyond the asymptotes have no
/// eccentric anomaly and yield `NaN`.
pub fn eccentric_anomaly_from_true_anomaly(eccentricity: f64, true_anomaly: f64) -> f64 {
    let half_tan = (true_anomaly * 0.5).tan();

    if eccentricity < 1.0 {
        2.0 * (((1.0 - eccentricity) / (1.0 + eccentricity)).sqrt() * half_tan).atan()
    } else {
        // From the presentation "Spacecraft Dynamics and Control"
        // by Matthew M. Peet, slide 25 of 27:
        // tan(f/2) = sqrt((e+1)/(e-1)) * tanh(H/2)
        2.0 * (((eccentricity - 1.0) / (eccentricity + 1.0)).sqrt() * half_tan).atanh()
    }
}

/// Gets the true anomaly at a given eccentric anomaly.
///
/// Closed orbits:
/// `cos(f) = (cos(E) - e) / (1 - e cos(E))`,
/// `sin(f) = sqrt(1 - e^2) sin(E) / (1 - e cos(E))`.
///
/// Open orbits:
/// `cos(f) = (e - cosh(H)) / (e cosh(H) - 1)`,
/// `sin(f) = sqrt(e^2 - 1) sinh(H) / (e cosh(H) - 1)`.
///
/// Both denominators are positive, so the quadrant is recovered with
/// `atan2` and the result carries the sign of the eccentric anomaly.
/// It lies in `[-pi, pi]`.
///
/// # Example
/// ```
/// use kepler_conv::anomaly::true_anomaly_from_eccentric_anomaly;
///
/// // A circle has no distinction between the two
/// let f = true_anomaly_from_eccentric_anomaly(0.0, -1.25);
/// assert!((f + 1.25).abs() < 1e-15);
/// ```
pub fn true_anomaly_from_eccentric_anomaly(eccentricity: f64, eccentric_anomaly: f64) -> f64 {
    if eccentricity < 1.0 {
        let (sin, cos) = eccentric_anomaly.sin_cos();
        let q_mult = ((1.0 - eccentricity) * (1.0 + eccentricity)).sqrt();

        (q_mult * sin).atan2(cos - eccentricity)
    } else {
        let (sinh, cosh) = sinhcosh(eccentric_anomaly);
        let q_mult = ((eccentricity - 1.0) * (eccentricity + 1.0)).sqrt();

        (q_mult * sinh).atan2(eccentricity - cosh)
    }
}

/// Gets the mean anomaly at a given true anomaly.
///
/// This goes through the eccentric anomaly and is therefore subject to
/// the same range limits as [`eccentric_anomaly_from_true_anomaly`].
#[doc(alias = "mean_anomaly_at_angle")]
pub fn mean_anomaly_from_true_anomaly(eccentricity: f64, true_anomaly: f64) -> f64 {
    mean_anomaly_from_eccentric_anomaly(
        eccentricity,
        eccentric_anomaly_from_true_anomaly(eccentricity, true_anomaly),
    )
}
