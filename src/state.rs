//! Full orbital states and the conversions between them.
//!
//! Three representations are provided:
//! - [`OrbitalStateNat`]: based on the semi-latus rectum, valid for every
//!   conic section.
//! - [`OrbitalStateCompat`]: based on the semi-major axis, mean longitude
//!   and gravitational parameter, which is the element set many simulation
//!   hosts expose. It cannot describe parabolic orbits.
//! - [`OrbitalStateRect`]: Cartesian position and velocity.
//!
//! Elements can be turned into state vectors, but not the other way round.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    anomaly::{eccentric_anomaly_from_true_anomaly, mean_anomaly_from_eccentric_anomaly},
    relations::{
        angular_momentum_from_semi_latus_rectum_and_mu,
        arg_periapsis_from_lon_periapsis_and_lon_ascending_node, distance_from_true_anomaly,
        energy_from_mu_speed_and_distance, lon_periapsis_from_arg_periapsis_and_lon_ascending_node,
        mean_lon_from_mean_anomaly_and_lon_periapsis,
        semi_latus_rectum_from_eccentricity_and_semi_major_axis,
        semi_major_axis_from_eccentricity_and_semi_latus_rectum,
        std_grav_param_from_semi_latus_rectum_and_angular_momentum,
    },
    Vector3,
};

/// An orbital state parameterized by the semi-latus rectum.
///
/// Unlike the semi-major axis, the semi-latus rectum is finite and positive
/// for elliptic, parabolic and hyperbolic orbits alike, which makes this
/// the most general of the element sets.
///
/// # Example
/// ```
/// use kepler_conv::OrbitalStateNat;
///
/// // A circular orbit of radius 1 around a body with mu = 1
/// let state = OrbitalStateNat {
///     semi_latus_rectum: 1.0,
///     eccentricity: 0.0,
///     inclination: 0.0,
///     lon_ascending_node: 0.0,
///     arg_periapsis: 0.0,
///     spec_rel_ang_momentum: 1.0,
///     true_anomaly: 0.0,
/// };
///
/// let rect = state.to_rect();
/// assert_eq!(rect.position.x, 1.0);
/// assert_eq!(rect.velocity.y, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalStateNat {
    /// The semi-latus rectum, in meters. Always positive.
    ///
    /// This is the distance from the focus at a true anomaly of 90 degrees.
    pub semi_latus_rectum: f64,

    /// The eccentricity of the orbit.
    /// e < 1: ellipse
    /// e = 1: parabola
    /// e > 1: hyperbola
    ///
    /// See more: <https://en.wikipedia.org/wiki/Orbital_eccentricity>
    pub eccentricity: f64,

    /// The inclination of the orbit, in radians.
    pub inclination: f64,

    /// The longitude of the ascending node, in radians.
    ///
    /// Undefined for equatorial orbits, but any value still produces a
    /// valid state.
    pub lon_ascending_node: f64,

    /// The argument of periapsis, in radians.
    ///
    /// The angle from the body's ascending node to its periapsis, measured
    /// in the direction of motion.
    pub arg_periapsis: f64,

    /// The specific relative angular momentum, in square meters per second.
    /// Always positive.
    pub spec_rel_ang_momentum: f64,

    /// The true anomaly of the body, in radians.
    pub true_anomaly: f64,
}

/// An orbital state parameterized by the semi-major axis.
///
/// This matches the element set exposed by common simulation hosts.
/// The semi-major axis is positive for elliptic orbits, negative for
/// hyperbolic ones, and undefined for parabolic ones; do not use this
/// struct for the latter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalStateCompat {
    /// The semi-major axis, in meters.
    pub semi_major_axis: f64,

    /// The eccentricity of the orbit.
    pub eccentricity: f64,

    /// The inclination of the orbit, in radians.
    pub inclination: f64,

    /// The longitude of the ascending node, in radians.
    pub lon_ascending_node: f64,

    /// The longitude of periapsis, in radians.
    ///
    /// The sum of the longitude of the ascending node and the argument of
    /// periapsis.
    pub lon_periapsis: f64,

    /// The mean longitude at epoch, in radians.
    ///
    /// The sum of the longitude of periapsis and the mean anomaly.
    pub mean_lon_at_epoch: f64,

    /// The gravitational parameter of the parent body, in cubic meters per
    /// square second. Always positive.
    pub std_grav_param: f64,

    /// The true anomaly of the body, in radians.
    pub true_anomaly: f64,
}

/// A position and velocity in Cartesian coordinates.
///
/// The position vector is in meters, while the velocity vector is in
/// meters per second.
///
/// Instances are only ever derived from orbital elements, through
/// [`OrbitalStateNat::to_rect`] or [`OrbitalStateCompat::to_rect`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct OrbitalStateRect {
    /// The position relative to the parent body.
    pub position: Vector3,
    /// The velocity relative to the parent body.
    pub velocity: Vector3,
}

impl OrbitalStateRect {
    /// Gets the distance from the parent body.
    pub fn radius(&self) -> f64 {
        self.position.length()
    }

    /// Gets the orbital speed.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Gets the specific relative angular momentum vector, `r x v`.
    pub fn angular_momentum(&self) -> Vector3 {
        self.position.cross(self.velocity)
    }

    /// Gets the specific orbital energy around a body with the given
    /// gravitational parameter.
    pub fn specific_energy(&self, std_grav_param: f64) -> f64 {
        energy_from_mu_speed_and_distance(std_grav_param, self.speed(), self.radius())
    }
}

impl OrbitalStateNat {
    /// Gets the Cartesian position and velocity of the body.
    ///
    /// The position is the perifocal position rotated by the argument of
    /// latitude (`arg_periapsis + true_anomaly`), the inclination, and the
    /// longitude of the ascending node, in that order.
    ///
    /// The velocity is split into a radial part,
    /// `h e sin(f) / (r p)` times the position, and a transverse part of
    /// magnitude `h / r`.
    ///
    /// # Performance
    /// This is a direct computation using a handful of trigonometric
    /// operations; no iteration is involved.
    #[doc(alias = "nat_to_rect")]
    pub fn to_rect(&self) -> OrbitalStateRect {
        let radius =
            distance_from_true_anomaly(self.eccentricity, self.semi_latus_rectum, self.true_anomaly);

        let (sin_wv, cos_wv) = (self.arg_periapsis + self.true_anomaly).sin_cos();
        let (sin_lan, cos_lan) = self.lon_ascending_node.sin_cos();
        let (sin_inc, cos_inc) = self.inclination.sin_cos();

        let position = radius
            * Vector3::new(
                cos_wv * cos_lan - sin_wv * sin_lan * cos_inc,
                cos_wv * sin_lan + sin_wv * cos_lan * cos_inc,
                sin_wv * sin_inc,
            );

        let transverse = Vector3::new(
            -(sin_wv * cos_lan + cos_wv * sin_lan * cos_inc),
            -(sin_wv * sin_lan - cos_wv * cos_lan * cos_inc),
            cos_wv * sin_inc,
        );

        let h = self.spec_rel_ang_momentum;
        let radial_scale =
            h * self.eccentricity * self.true_anomaly.sin() / (radius * self.semi_latus_rectum);

        OrbitalStateRect {
            position,
            velocity: position * radial_scale + transverse * (h / radius),
        }
    }

    /// Converts this state into the semi-major-axis based element set.
    ///
    /// Shape, orientation and true anomaly carry over unchanged.
    /// The mean longitude is derived through the eccentric and mean
    /// anomalies, which only takes closed-form steps.
    ///
    /// Parabolic orbits yield an infinite semi-major axis.
    #[doc(alias = "nat_to_compat")]
    pub fn to_compat(&self) -> OrbitalStateCompat {
        let ecc_anom = eccentric_anomaly_from_true_anomaly(self.eccentricity, self.true_anomaly);
        let mean_anomaly = mean_anomaly_from_eccentric_anomaly(self.eccentricity, ecc_anom);
        let lon_periapsis = lon_periapsis_from_arg_periapsis_and_lon_ascending_node(
            self.arg_periapsis,
            self.lon_ascending_node,
        );

        OrbitalStateCompat {
            semi_major_axis: semi_major_axis_from_eccentricity_and_semi_latus_rectum(
                self.eccentricity,
                self.semi_latus_rectum,
            ),
            eccentricity: self.eccentricity,
            inclination: self.inclination,
            lon_ascending_node: self.lon_ascending_node,
            lon_periapsis,
            mean_lon_at_epoch: mean_lon_from_mean_anomaly_and_lon_periapsis(
                mean_anomaly,
                lon_periapsis,
            ),
            std_grav_param: std_grav_param_from_semi_latus_rectum_and_angular_momentum(
                self.semi_latus_rectum,
                self.spec_rel_ang_momentum,
            ),
            true_anomaly: self.true_anomaly,
        }
    }
}

impl OrbitalStateCompat {
    /// Converts this state into the semi-latus-rectum based element set.
    ///
    /// Eccentricity, inclination, longitude of the ascending node and true
    /// anomaly carry over unchanged. The mean longitude is not needed, as
    /// the true anomaly already pins down the position.
    #[doc(alias = "compat_to_nat")]
    pub fn to_nat(&self) -> OrbitalStateNat {
        let semi_latus_rectum = semi_latus_rectum_from_eccentricity_and_semi_major_axis(
            self.eccentricity,
            self.semi_major_axis,
        );

        OrbitalStateNat {
            semi_latus_rectum,
            eccentricity: self.eccentricity,
            inclination: self.inclination,
            lon_ascending_node: self.lon_ascending_node,
            arg_periapsis: arg_periapsis_from_lon_periapsis_and_lon_ascending_node(
                self.lon_periapsis,
                self.lon_ascending_node,
            ),
            spec_rel_ang_momentum: angular_momentum_from_semi_latus_rectum_and_mu(
                semi_latus_rectum,
                self.std_grav_param,
            ),
            true_anomaly: self.true_anomaly,
        }
    }

    /// Gets the Cartesian position and velocity of the body.
    ///
    /// Equivalent to `self.to_nat().to_rect()`.
    #[doc(alias = "compat_to_rect")]
    pub fn to_rect(&self) -> OrbitalStateRect {
        self.to_nat().to_rect()
    }
}

impl From<OrbitalStateNat> for OrbitalStateCompat {
    fn from(state: OrbitalStateNat) -> Self {
        state.to_compat()
    }
}

impl From<OrbitalStateCompat> for OrbitalStateNat {
    fn from(state: OrbitalStateCompat) -> Self {
        state.to_nat()
    }
}

impl From<OrbitalStateNat> for OrbitalStateRect {
    fn from(state: OrbitalStateNat) -> Self {
        state.to_rect()
    }
}

impl From<OrbitalStateCompat> for OrbitalStateRect {
    fn from(state: OrbitalStateCompat) -> Self {
        state.to_rect()
    }
}
