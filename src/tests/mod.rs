#![cfg(test)]

use core::f64::consts::{PI, TAU};

use crate::{
    anomaly::{
        eccentric_anomaly_from_true_anomaly, mean_anomaly_from_eccentric_anomaly,
        true_anomaly_from_eccentric_anomaly,
    },
    eccentric_anomaly_from_mean_anomaly, elliptic_eccentric_anomaly,
    hyperbolic_eccentric_anomaly,
    relations::{
        energy_from_semi_major_axis_and_mu, mean_anomaly_from_mean_lon_and_lon_periapsis,
        speed_from_semi_major_axis_mu_and_distance,
        std_grav_param_from_semi_latus_rectum_and_angular_momentum,
    },
    true_anomaly_from_mean_anomaly, KeplerError, OrbitRegime, OrbitalStateCompat,
    OrbitalStateNat, Vector3,
};

const RANDOM_SAMPLES: usize = 4096;


use assertions::*;
use seeders::*;

fn unit_circle() -> OrbitalStateNat {
    OrbitalStateNat {
        semi_latus_rectum: 1.0,
        eccentricity: 0.0,
        inclination: 0.0,
        lon_ascending_node: 0.0,
        arg_periapsis: 0.0,
        spec_rel_ang_momentum: 1.0,
        true_anomaly: 0.0,
    }
}

#[test]
fn elliptic_mean_anomaly_round_trip() {
    let grid = (0..=99).flat_map(|i| {
        let e = i as f64 / 100.0;
        (0..=64).map(move |j| (e, -PI + TAU * j as f64 / 64.0))
    });
    let random = (0..RANDOM_SAMPLES).map(|_| random_elliptic_anomaly());

    for (e, mean_anomaly) in grid.chain(random) {
        let ecc_anom = eccentric_anomaly_from_mean_anomaly(e, mean_anomaly)
            .unwrap_or_else(|err| panic!("solver failed for e = {e}, M = {mean_anomaly}: {err}"));

        assert_almost_eq(
            mean_anomaly_from_eccentric_anomaly(e, ecc_anom),
            mean_anomaly,
            &format!("mean anomaly round trip (e = {e}, M = {mean_anomaly})"),
        );
    }
}

#[test]
fn hyperbolic_mean_anomaly_round_trip() {
    let grid = [1.01, 1.1, 1.5, 2.0, 5.0, 20.0, 1000.0].into_iter().flat_map(|e| {
        (0..=100).map(move |j| (e, -50.0 + j as f64))
    });
    let random = (0..RANDOM_SAMPLES).map(|_| random_hyperbolic_anomaly());

    for (e, mean_anomaly) in grid.chain(random) {
        let ecc_anom = eccentric_anomaly_from_mean_anomaly(e, mean_anomaly)
            .unwrap_or_else(|err| panic!("solver failed for e = {e}, M = {mean_anomaly}: {err}"));

        assert_almost_eq(
            mean_anomaly_from_eccentric_anomaly(e, ecc_anom),
            mean_anomaly,
            &format!("hyperbolic mean anomaly round trip (e = {e}, M = {mean_anomaly})"),
        );
    }
}

#[test]
fn true_and_eccentric_anomaly_agree() {
    for _ in 0..RANDOM_SAMPLES {
        let e = rand::random_range(0.0..=0.99);
        let true_anomaly = rand::random_range(-PI..PI);

        let ecc_anom = eccentric_anomaly_from_true_anomaly(e, true_anomaly);
        let back = true_anomaly_from_eccentric_anomaly(e, ecc_anom);

        assert_almost_eq_angle(
            back,
            true_anomaly,
            &format!("true anomaly (e = {e}, E = {ecc_anom})"),
        );
    }
}

#[test]
fn ecc_anom_scenario_elliptic() {
    let (e, mean_anomaly) = (0.1, 1.0);
    let ecc_anom = eccentric_anomaly_from_mean_anomaly(e, mean_anomaly).unwrap();

    assert_almost_eq(ecc_anom, 1.0885977523978936, "eccentric anomaly");
    assert_almost_eq(
        ecc_anom - e * ecc_anom.sin(),
        mean_anomaly,
        "back-substituted mean anomaly",
    );
}

#[test]
fn ecc_anom_scenario_hyperbolic() {
    let (e, mean_anomaly) = (2.0, 5.0);
    let ecc_anom = eccentric_anomaly_from_mean_anomaly(e, mean_anomaly).unwrap();

    assert_almost_eq(ecc_anom, 1.96024536871218, "hyperbolic eccentric anomaly");
    assert_almost_eq(
        e * ecc_anom.sinh() - ecc_anom,
        mean_anomaly,
        "back-substituted mean anomaly",
    );
}

#[test]
fn elliptic_large_mean_anomaly() {
    let fixed = [1e4, 1e6, -1e5].into_iter();
    let spread = (3..=8)
        .map(|exp| 10f64.powi(exp))
        .flat_map(|base| (0..50).map(move |k| base + k as f64 * 0.123));

    for mean_anomaly in fixed.chain(spread) {
        for e in [0.1, 0.5, 0.9] {
            let ecc_anom = elliptic_eccentric_anomaly(e, mean_anomaly)
                .unwrap_or_else(|err| panic!("solver failed for e = {e}, M = {mean_anomaly}: {err}"));

            assert_almost_eq_rel(
                mean_anomaly_from_eccentric_anomaly(e, ecc_anom),
                mean_anomaly,
                &format!("back-substituted mean anomaly (e = {e}, M = {mean_anomaly})"),
            );

            // |E - M| = e |sin E|, so whole turns must not be lost
            let offset = (ecc_anom - mean_anomaly).abs();
            assert!(
                offset <= e + 1e-6,
                "E = {ecc_anom} is {offset} away from M = {mean_anomaly} for e = {e}"
            );
        }
    }
}

#[test]
fn parabolic_is_rejected() {
    assert_eq!(
        elliptic_eccentric_anomaly(1.0, 0.5),
        Err(KeplerError::EccentricityOutOfRange {
            eccentricity: 1.0,
            regime: OrbitRegime::Elliptic,
        })
    );
    assert_eq!(
        hyperbolic_eccentric_anomaly(1.0, 0.5),
        Err(KeplerError::EccentricityOutOfRange {
            eccentricity: 1.0,
            regime: OrbitRegime::Hyperbolic,
        })
    );
    assert!(eccentric_anomaly_from_mean_anomaly(1.0, 0.5).is_err());
}

#[test]
fn error_messages() {
    let err = elliptic_eccentric_anomaly(1.0, 0.5).unwrap_err();
    assert_eq!(
        err.to_string(),
        "eccentricity 1 is outside the elliptic (0 <= e < 1) regime"
    );

    let err = hyperbolic_eccentric_anomaly(2.0, f64::NAN).unwrap_err();
    assert_eq!(err.to_string(), "mean anomaly NaN is not finite");
}

#[test]
fn nat_compat_nat_is_identity() {
    let seeders: [(&str, fn() -> OrbitalStateNat); 4] = [
        ("circular", random_circular),
        ("elliptic", random_elliptic),
        ("near-parabolic", random_near_parabolic),
        ("hyperbolic", random_hyperbolic),
    ];

    for (what, seeder) in seeders {
        for _ in 0..RANDOM_SAMPLES {
            let state = seeder();
            let compat = state.to_compat();
            let back = compat.to_nat();

            assert_almost_eq_nat(&back, &state, &format!("{what} state {state:?}"));
            assert_eq!(OrbitalStateNat::from(compat), back);
        }
    }
}

#[test]
fn compat_semi_major_axis_sign() {
    let elliptic = random_elliptic().to_compat();
    assert!(elliptic.semi_major_axis > 0.0);

    let hyperbolic = random_hyperbolic().to_compat();
    assert!(hyperbolic.semi_major_axis < 0.0);
}

#[test]
fn compat_keeps_gravitational_parameter() {
    let state = OrbitalStateNat {
        semi_latus_rectum: 6.9e6,
        eccentricity: 0.01,
        inclination: 0.9,
        lon_ascending_node: 0.3,
        arg_periapsis: 1.2,
        spec_rel_ang_momentum: (6.9e6_f64 * 3.986004418e14).sqrt(),
        true_anomaly: 2.0,
    };
    let compat = OrbitalStateCompat::from(state);

    assert_almost_eq_rel(compat.std_grav_param, 3.986004418e14, "mu");
    assert_almost_eq(compat.lon_periapsis, 1.5, "longitude of periapsis");
}

#[test]
fn mean_longitude_recovers_position() {
    for _ in 0..RANDOM_SAMPLES {
        let state = random_elliptic();
        let compat = state.to_compat();

        let mean_anomaly =
            mean_anomaly_from_mean_lon_and_lon_periapsis(compat.mean_lon_at_epoch, compat.lon_periapsis);
        let true_anomaly = true_anomaly_from_mean_anomaly(compat.eccentricity, mean_anomaly).unwrap();

        assert_almost_eq_angle(
            true_anomaly,
            state.true_anomaly,
            &format!("true anomaly recovered from mean longitude of {state:?}"),
        );
    }
}

#[test]
fn circular_equatorial_rect() {
    for _ in 0..RANDOM_SAMPLES {
        let state = OrbitalStateNat {
            inclination: 0.0,
            ..random_circular()
        };
        let mu = std_grav_param_from_semi_latus_rectum_and_angular_momentum(
            state.semi_latus_rectum,
            state.spec_rel_ang_momentum,
        );
        let rect = state.to_rect();

        assert_almost_eq_rel(
            rect.radius(),
            state.semi_latus_rectum,
            &format!("radius of {state:?}"),
        );
        assert_almost_eq_rel(
            rect.speed(),
            (mu / state.semi_latus_rectum).sqrt(),
            &format!("speed of {state:?}"),
        );
        assert_almost_eq(rect.position.z, 0.0, "out-of-plane position");
        assert_almost_eq(rect.velocity.z, 0.0, "out-of-plane velocity");
        assert_almost_eq(
            rect.position.normalize().dot(rect.velocity.normalize()),
            0.0,
            "flight path angle",
        );
    }
}

#[test]
fn unit_circle_positions() {
    let tests = [
        (0.0, Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
        (0.5 * PI, Vector3::new(0.0, 1.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)),
        (PI, Vector3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0)),
        (1.5 * PI, Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
    ];

    for (true_anomaly, position, velocity) in tests {
        let rect = OrbitalStateNat {
            true_anomaly,
            ..unit_circle()
        }
        .to_rect();

        assert_almost_eq_vec3(rect.position, position, &format!("position at f = {true_anomaly}"));
        assert_almost_eq_vec3(rect.velocity, velocity, &format!("velocity at f = {true_anomaly}"));
    }
}

#[test]
fn polar_orbit_tilt() {
    // Inclined by 90 degrees, the orbit's Y axis swings into Z
    let state = OrbitalStateNat {
        inclination: 0.5 * PI,
        true_anomaly: 0.5 * PI,
        ..unit_circle()
    };
    let rect = state.to_rect();

    assert_almost_eq_vec3(rect.position, Vector3::new(0.0, 0.0, 1.0), "position");
    assert_almost_eq_vec3(rect.velocity, Vector3::new(-1.0, 0.0, 0.0), "velocity");
}

#[test]
fn periapsis_and_apoapsis_positions() {
    let state = OrbitalStateNat {
        semi_latus_rectum: 1.5,
        eccentricity: 0.5,
        ..unit_circle()
    };

    let periapsis = state.to_rect();
    assert_almost_eq_vec3(periapsis.position, Vector3::new(1.0, 0.0, 0.0), "periapsis");

    let apoapsis = OrbitalStateNat {
        true_anomaly: PI,
        ..state
    }
    .to_rect();
    assert_almost_eq_vec3(apoapsis.position, Vector3::new(-3.0, 0.0, 0.0), "apoapsis");
}

#[test]
fn rect_conserves_orbit_invariants() {
    let seeders: [(&str, fn() -> OrbitalStateNat); 3] = [
        ("elliptic", random_elliptic),
        ("near-parabolic", random_near_parabolic),
        ("hyperbolic", random_hyperbolic),
    ];

    for (what, seeder) in seeders {
        for _ in 0..RANDOM_SAMPLES {
            let state = seeder();
            let compat = state.to_compat();
            let rect = state.to_rect();
            let mu = compat.std_grav_param;

            let normal = Vector3::new(
                state.inclination.sin() * state.lon_ascending_node.sin(),
                -state.inclination.sin() * state.lon_ascending_node.cos(),
                state.inclination.cos(),
            );

            let h = rect.angular_momentum();
            assert_almost_eq_rel(
                h.length(),
                state.spec_rel_ang_momentum,
                &format!("angular momentum of {what} {state:?}"),
            );
            assert_almost_eq_vec3(h.normalize(), normal, &format!("orbit normal of {what}"));

            // Near apoapsis of a near-parabolic orbit, vis-viva cancels
            // catastrophically, so leave those out
            if what != "near-parabolic" {
                let speed = speed_from_semi_major_axis_mu_and_distance(
                    compat.semi_major_axis,
                    mu,
                    rect.radius(),
                );
                assert_almost_eq(
                    rect.speed() / speed,
                    1.0,
                    &format!("vis-viva speed of {what} {state:?}"),
                );
            }

            if what == "elliptic" {
                let energy = energy_from_semi_major_axis_and_mu(compat.semi_major_axis, mu);
                assert_almost_eq(
                    rect.specific_energy(mu) / energy,
                    1.0,
                    &format!("specific energy of {what} {state:?}"),
                );
            }
        }
    }
}

#[test]
fn compat_rect_matches_nat_rect() {
    for _ in 0..RANDOM_SAMPLES {
        let state = random_elliptic();
        let compat = state.to_compat();

        let a = state.to_rect();
        let b = compat.to_rect();

        assert_almost_eq_vec3_rel(a.position, b.position, "position");
        assert_almost_eq_vec3_rel(a.velocity, b.velocity, "velocity");
        assert_eq!(crate::OrbitalStateRect::from(compat), b);
    }
}
