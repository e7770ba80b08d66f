//! Closed-form relations between scalar orbital elements.
//!
//! Every function here is pure algebra: no iteration, no tolerance, and no
//! failure modes beyond what IEEE arithmetic produces on its own.
//! Degenerate inputs (e.g. a parabolic orbit's infinite semi-major axis)
//! come back as infinities or `NaN`s and are not trapped.
//!
//! The functions are grouped in families of mutually inverse formulas.
//! Callers pick whichever form matches the data they already have.
//!
//! # Conventions
//! - Eccentricity `e` ranges over `[0, inf)`; many relations break at `e == 1`.
//! - The semi-latus rectum `p` is always positive and defined for every conic.
//! - The semi-major axis `a` is positive for ellipses, negative for hyperbolas,
//!   and undefined for parabolas.
//! - The gravitational parameter `mu` and the specific relative angular
//!   momentum `h` are always positive.
//! - The specific orbital energy is negative for ellipses, positive for
//!   hyperbolas and zero for parabolas.
//! - Angles are in radians, distances in meters, speeds in meters per second.

use core::f64::consts::TAU;

use crate::GRAVITATIONAL_CONSTANT;

// ==== Semi-latus rectum / periapsis / eccentricity ====

/// Gets the eccentricity from the semi-latus rectum and the periapsis distance.
pub fn eccentricity_from_semi_latus_rectum_and_periapsis(
    semi_latus_rectum: f64,
    periapsis: f64,
) -> f64 {
    semi_latus_rectum / periapsis - 1.0
}

/// Gets the semi-latus rectum from the eccentricity and the periapsis distance.
pub fn semi_latus_rectum_from_eccentricity_and_periapsis(eccentricity: f64, periapsis: f64) -> f64 {
    periapsis * (1.0 + eccentricity)
}

/// Gets the periapsis distance from the semi-latus rectum and the eccentricity.
///
/// This is the polar conic equation evaluated at a true anomaly of zero.
pub fn periapsis_from_semi_latus_rectum_and_eccentricity(
    semi_latus_rectum: f64,
    eccentricity: f64,
) -> f64 {
    semi_latus_rectum / (1.0 + eccentricity)
}

// ==== Semi-latus rectum / gravitational parameter / angular momentum ====

/// Gets the semi-latus rectum from the gravitational parameter and the
/// specific relative angular momentum.
///
/// `p = h^2 / mu`
pub fn semi_latus_rectum_from_mu_and_angular_momentum(
    std_grav_param: f64,
    spec_rel_ang_momentum: f64,
) -> f64 {
    spec_rel_ang_momentum * spec_rel_ang_momentum / std_grav_param
}

/// Gets the gravitational parameter from the semi-latus rectum and the
/// specific relative angular momentum.
pub fn std_grav_param_from_semi_latus_rectum_and_angular_momentum(
    semi_latus_rectum: f64,
    spec_rel_ang_momentum: f64,
) -> f64 {
    spec_rel_ang_momentum * spec_rel_ang_momentum / semi_latus_rectum
}

/// Gets the specific relative angular momentum from the semi-latus rectum
/// and the gravitational parameter.
pub fn angular_momentum_from_semi_latus_rectum_and_mu(
    semi_latus_rectum: f64,
    std_grav_param: f64,
) -> f64 {
    (semi_latus_rectum * std_grav_param).sqrt()
}

// ==== Semi-major axis / semi-latus rectum / eccentricity ====

/// Gets the eccentricity from the semi-major axis and the semi-latus rectum.
///
/// `e = sqrt(1 - p / a)`
///
/// This works for hyperbolic orbits as well, since `a` is negative there
/// and the radicand exceeds one.
pub fn eccentricity_from_semi_major_axis_and_semi_latus_rectum(
    semi_major_axis: f64,
    semi_latus_rectum: f64,
) -> f64 {
    (1.0 - semi_latus_rectum / semi_major_axis).sqrt()
}

/// Gets the semi-major axis from the eccentricity and the semi-latus rectum.
///
/// Returns an infinity for parabolic orbits.
pub fn semi_major_axis_from_eccentricity_and_semi_latus_rectum(
    eccentricity: f64,
    semi_latus_rectum: f64,
) -> f64 {
    semi_latus_rectum / (1.0 - eccentricity * eccentricity)
}

/// Gets the semi-latus rectum from the eccentricity and the semi-major axis.
pub fn semi_latus_rectum_from_eccentricity_and_semi_major_axis(
    eccentricity: f64,
    semi_major_axis: f64,
) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity)
}

// ==== Semi-major axis / gravitational parameter / orbital energy ====

/// Gets the semi-major axis from the gravitational parameter and the
/// specific orbital energy.
///
/// `a = -mu / (2 epsilon)`
///
/// Learn more: <https://en.wikipedia.org/wiki/Specific_orbital_energy>
pub fn semi_major_axis_from_mu_and_energy(std_grav_param: f64, spec_orbital_energy: f64) -> f64 {
    -std_grav_param / (2.0 * spec_orbital_energy)
}

/// Gets the gravitational parameter from the semi-major axis and the
/// specific orbital energy.
pub fn std_grav_param_from_semi_major_axis_and_energy(
    semi_major_axis: f64,
    spec_orbital_energy: f64,
) -> f64 {
    -2.0 * spec_orbital_energy * semi_major_axis
}

/// Gets the specific orbital energy from the semi-major axis and the
/// gravitational parameter.
///
/// Negative for elliptic orbits and positive for hyperbolic ones.
/// Parabolic orbits have an infinite semi-major axis and hence zero energy.
///
/// Learn more: <https://en.wikipedia.org/wiki/Specific_orbital_energy>
pub fn energy_from_semi_major_axis_and_mu(semi_major_axis: f64, std_grav_param: f64) -> f64 {
    -std_grav_param / (2.0 * semi_major_axis)
}

// ==== Semi-major axis / periapsis / eccentricity ====

/// Gets the eccentricity from the semi-major axis and the periapsis distance.
pub fn eccentricity_from_semi_major_axis_and_periapsis(semi_major_axis: f64, periapsis: f64) -> f64 {
    1.0 - periapsis / semi_major_axis
}

/// Gets the semi-major axis from the eccentricity and the periapsis distance.
pub fn semi_major_axis_from_eccentricity_and_periapsis(eccentricity: f64, periapsis: f64) -> f64 {
    periapsis / (1.0 - eccentricity)
}

/// Gets the periapsis distance from the eccentricity and the semi-major axis.
pub fn periapsis_from_eccentricity_and_semi_major_axis(eccentricity: f64, semi_major_axis: f64) -> f64 {
    (1.0 - eccentricity) * semi_major_axis
}

// ==== Angles ====

/// Gets the argument of periapsis from the longitude of periapsis and the
/// longitude of the ascending node.
///
/// The result is not wrapped into any particular range.
pub fn arg_periapsis_from_lon_periapsis_and_lon_ascending_node(
    lon_periapsis: f64,
    lon_ascending_node: f64,
) -> f64 {
    lon_periapsis - lon_ascending_node
}

/// Gets the longitude of periapsis from the argument of periapsis and the
/// longitude of the ascending node.
///
/// The longitude of periapsis is a "dogleg" angle: it is measured partly in
/// the reference plane (up to the ascending node) and partly in the orbital
/// plane (from the node to periapsis).
///
/// Learn more: <https://en.wikipedia.org/wiki/Longitude_of_periapsis>
pub fn lon_periapsis_from_arg_periapsis_and_lon_ascending_node(
    arg_periapsis: f64,
    lon_ascending_node: f64,
) -> f64 {
    lon_ascending_node + arg_periapsis
}

/// Gets the longitude of the ascending node from the argument of periapsis
/// and the longitude of periapsis.
pub fn lon_ascending_node_from_arg_periapsis_and_lon_periapsis(
    arg_periapsis: f64,
    lon_periapsis: f64,
) -> f64 {
    lon_periapsis - arg_periapsis
}

/// Gets the mean anomaly from the mean longitude at epoch and the longitude
/// of periapsis.
pub fn mean_anomaly_from_mean_lon_and_lon_periapsis(mean_lon_at_epoch: f64, lon_periapsis: f64) -> f64 {
    mean_lon_at_epoch - lon_periapsis
}

/// Gets the longitude of periapsis from the mean anomaly and the mean
/// longitude at epoch.
pub fn lon_periapsis_from_mean_anomaly_and_mean_lon(mean_anomaly: f64, mean_lon_at_epoch: f64) -> f64 {
    mean_lon_at_epoch - mean_anomaly
}

/// Gets the mean longitude at epoch from the mean anomaly and the longitude
/// of periapsis.
pub fn mean_lon_from_mean_anomaly_and_lon_periapsis(mean_anomaly: f64, lon_periapsis: f64) -> f64 {
    mean_anomaly + lon_periapsis
}

// ==== Vis-viva, energy form ====

/// Gets the gravitational parameter from the specific orbital energy, and
/// the speed and distance at any one point of the orbit.
pub fn std_grav_param_from_energy_speed_and_distance(
    spec_orbital_energy: f64,
    speed: f64,
    distance: f64,
) -> f64 {
    distance * (speed * speed / 2.0 - spec_orbital_energy)
}

/// Gets the specific orbital energy from the gravitational parameter, and
/// the speed and distance at any one point of the orbit.
///
/// `epsilon = v^2 / 2 - mu / r`
pub fn energy_from_mu_speed_and_distance(std_grav_param: f64, speed: f64, distance: f64) -> f64 {
    speed * speed / 2.0 - std_grav_param / distance
}

/// Gets the orbital speed at a given distance from the gravitational
/// parameter and the specific orbital energy.
pub fn speed_from_mu_energy_and_distance(
    std_grav_param: f64,
    spec_orbital_energy: f64,
    distance: f64,
) -> f64 {
    (2.0 * (spec_orbital_energy + std_grav_param / distance)).sqrt()
}

/// Gets the distance at which the body has a given speed, from the
/// gravitational parameter and the specific orbital energy.
pub fn distance_from_mu_energy_and_speed(
    std_grav_param: f64,
    spec_orbital_energy: f64,
    speed: f64,
) -> f64 {
    std_grav_param / (speed * speed / 2.0 - spec_orbital_energy)
}

// ==== Eccentricity / energy / angular momentum ====

/// Gets the eccentricity from the gravitational parameter, the specific
/// orbital energy, and the specific relative angular momentum.
///
/// `e = sqrt(1 + 2 epsilon h^2 / mu^2)`
///
/// Learn more: <https://en.wikipedia.org/wiki/Orbital_eccentricity>
pub fn eccentricity_from_energy_and_angular_momentum(
    std_grav_param: f64,
    spec_orbital_energy: f64,
    spec_rel_ang_momentum: f64,
) -> f64 {
    // Radicand is e^2, never negative for a physical orbit
    (1.0 + (2.0 * spec_orbital_energy * spec_rel_ang_momentum * spec_rel_ang_momentum)
        / (std_grav_param * std_grav_param))
        .sqrt()
}

/// Gets the gravitational parameter from the eccentricity, the specific
/// orbital energy and the specific relative angular momentum.
///
/// Undefined for parabolic orbits.
pub fn std_grav_param_from_eccentricity_energy_and_angular_momentum(
    eccentricity: f64,
    spec_orbital_energy: f64,
    spec_rel_ang_momentum: f64,
) -> f64 {
    (spec_orbital_energy * (-2.0 * spec_rel_ang_momentum * spec_rel_ang_momentum)
        / (1.0 - eccentricity * eccentricity))
        .sqrt()
}

/// Gets the specific orbital energy from the eccentricity, the gravitational
/// parameter and the specific relative angular momentum.
pub fn energy_from_eccentricity_mu_and_angular_momentum(
    eccentricity: f64,
    std_grav_param: f64,
    spec_rel_ang_momentum: f64,
) -> f64 {
    std_grav_param * std_grav_param * (1.0 - eccentricity * eccentricity)
        / (-2.0 * spec_rel_ang_momentum * spec_rel_ang_momentum)
}

/// Gets the specific relative angular momentum from the eccentricity, the
/// gravitational parameter and the specific orbital energy.
///
/// Undefined for parabolic orbits.
pub fn angular_momentum_from_eccentricity_mu_and_energy(
    eccentricity: f64,
    std_grav_param: f64,
    spec_orbital_energy: f64,
) -> f64 {
    // Elliptic: 1 - e^2 > 0 and energy < 0.
    // Hyperbolic: 1 - e^2 < 0 and energy > 0.
    // The quotient is positive either way.
    (std_grav_param * std_grav_param * (1.0 - eccentricity * eccentricity)
        / (-2.0 * spec_orbital_energy))
        .sqrt()
}

// ==== Vis-viva, semi-major axis form ====

/// Gets the semi-major axis from the gravitational parameter, and the
/// distance and speed at any one point of the orbit.
pub fn semi_major_axis_from_mu_distance_and_speed(std_grav_param: f64, distance: f64, speed: f64) -> f64 {
    distance * std_grav_param / (2.0 * std_grav_param - distance * speed * speed)
}

/// Gets the gravitational parameter from the semi-major axis, and the speed
/// and distance at any one point of the orbit.
pub fn std_grav_param_from_semi_major_axis_speed_and_distance(
    semi_major_axis: f64,
    speed: f64,
    distance: f64,
) -> f64 {
    speed * speed * distance * semi_major_axis / (2.0 * semi_major_axis - distance)
}

/// Gets the orbital speed at a given distance using the vis-viva equation.
///
/// `v = sqrt(mu (2/r - 1/a))`
///
/// Learn more: <https://en.wikipedia.org/wiki/Vis-viva_equation>
#[doc(alias = "vis_viva")]
pub fn speed_from_semi_major_axis_mu_and_distance(
    semi_major_axis: f64,
    std_grav_param: f64,
    distance: f64,
) -> f64 {
    (std_grav_param * (2.0 / distance - 1.0 / semi_major_axis)).sqrt()
}

/// Gets the distance at which the body has a given speed, using the
/// vis-viva equation.
pub fn distance_from_semi_major_axis_mu_and_speed(
    semi_major_axis: f64,
    std_grav_param: f64,
    speed: f64,
) -> f64 {
    2.0 * std_grav_param * semi_major_axis / (speed * speed * semi_major_axis + std_grav_param)
}

// ==== Auxiliary ====

/// Gets the gravitational parameter of a body with the given mass.
///
/// `mu = G M`, with `G` being [`GRAVITATIONAL_CONSTANT`].
///
/// # Example
/// ```
/// use kepler_conv::relations::std_grav_param_from_mass;
///
/// let earth_mu = std_grav_param_from_mass(5.972e24);
/// assert!((earth_mu / 3.986e14 - 1.0).abs() < 1e-3);
/// ```
#[doc(alias = "mu")]
pub fn std_grav_param_from_mass(mass: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * mass
}

/// Gets the time it takes to complete one revolution of the orbit.
///
/// `T = 2 pi |a| sqrt(|a| / mu)`
///
/// For hyperbolic orbits this is the period of an elliptic orbit sharing
/// the same `|a|`, which keeps mean motion well-defined on open orbits.
/// Parabolic orbits have an infinite semi-major axis, and so an infinite
/// period.
///
/// Learn more: <https://en.wikipedia.org/wiki/Orbital_period>
pub fn period(semi_major_axis: f64, std_grav_param: f64) -> f64 {
    let semi_major_axis = semi_major_axis.abs();
    TAU * semi_major_axis * (semi_major_axis / std_grav_param).sqrt()
}

/// Gets the mean anomaly after a given time since periapsis passage.
///
/// The time may be negative when the body has yet to reach periapsis.
pub fn mean_anomaly_from_period_and_time(period: f64, time_since_periapsis: f64) -> f64 {
    TAU * time_since_periapsis / period
}

/// Gets the time elapsed since periapsis passage at a given mean anomaly.
pub fn time_since_periapsis_from_period_and_mean_anomaly(period: f64, mean_anomaly: f64) -> f64 {
    period * mean_anomaly / TAU
}

/// Gets the apoapsis distance from the eccentricity and the semi-latus rectum.
///
/// For hyperbolic orbits the result is negative, and for parabolic orbits
/// it is infinite.
pub fn apoapsis_from_eccentricity_and_semi_latus_rectum(eccentricity: f64, semi_latus_rectum: f64) -> f64 {
    semi_latus_rectum / (1.0 - eccentricity)
}

/// Gets the distance from the focus at a given true anomaly.
///
/// This is the polar form of a conic section:
/// `r = p / (1 + e cos(f))`
pub fn distance_from_true_anomaly(eccentricity: f64, semi_latus_rectum: f64, true_anomaly: f64) -> f64 {
    semi_latus_rectum / (1.0 + eccentricity * true_anomaly.cos())
}

/// Gets the distance from the focus at a given elliptic eccentric anomaly.
///
/// `r = a (1 - e cos(E))`
///
/// Hyperbolic orbits need the hyperbolic cosine instead, which this
/// function does not do.
pub fn distance_from_eccentric_anomaly(
    eccentricity: f64,
    semi_major_axis: f64,
    eccentric_anomaly: f64,
) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}

/// Gets the orbital speed at periapsis.
pub fn speed_at_periapsis(eccentricity: f64, semi_latus_rectum: f64, std_grav_param: f64) -> f64 {
    (1.0 + eccentricity) * (std_grav_param / semi_latus_rectum).sqrt()
}

/// Gets the orbital speed at apoapsis.
///
/// Only meaningful for elliptic orbits.
pub fn speed_at_apoapsis(eccentricity: f64, semi_latus_rectum: f64, std_grav_param: f64) -> f64 {
    (1.0 - eccentricity) * (std_grav_param / semi_latus_rectum).sqrt()
}

/// Gets the escape speed at a given distance from the parent body.
pub fn escape_speed(std_grav_param: f64, distance: f64) -> f64 {
    (2.0 * std_grav_param / distance).sqrt()
}

/// Gets the magnitude of the gravitational acceleration at a given distance.
pub fn gravitational_acceleration(std_grav_param: f64, distance: f64) -> f64 {
    std_grav_param / (distance * distance)
}
