use donorpanel_core::accel::compute_accelerations;
use donorpanel_core::velocity::VelocityRecord;

fn velocity(donor_id: i64, fiscal_year: i32, simple: f64, rolling: f64) -> VelocityRecord {
    VelocityRecord {
        donor_id,
        fiscal_year,
        simple_velocity: simple,
        rolling_velocity: rolling,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The first year in a donor's sequence has no predecessor; both
/// accelerations are defined as 0, not omitted.
#[test]
fn first_year_acceleration_is_zero() {
    let velocities = vec![velocity(1000, 2015, 1.0, 0.0)];

    let accels = compute_accelerations(&velocities);

    assert_eq!(accels.len(), 1);
    assert_eq!(accels[0].simple_acceleration, 0.0);
    assert_eq!(accels[0].rolling_acceleration, 0.0);
}

/// Acceleration is the year-over-year first difference of each
/// velocity within the donor's own sequence.
#[test]
fn acceleration_is_first_difference() {
    let velocities = vec![
        velocity(1000, 2018, 0.4, 1.0),
        velocity(1000, 2019, 0.7, 0.5),
        velocity(1000, 2020, 0.6, 2.0),
    ];

    let accels = compute_accelerations(&velocities);

    assert!((accels[1].simple_acceleration - 0.3).abs() < 1e-9);
    assert!((accels[1].rolling_acceleration - (-0.5)).abs() < 1e-9);
    assert!((accels[2].simple_acceleration - (-0.1)).abs() < 1e-9);
    assert!((accels[2].rolling_acceleration - 1.5).abs() < 1e-9);
}

/// An undefined (NaN) simple velocity enters the difference as 0, so
/// the first year with a defined velocity accelerates from 0.
#[test]
fn undefined_velocity_differences_as_zero() {
    let velocities = vec![
        velocity(1000, 2018, f64::NAN, 0.0),
        velocity(1000, 2019, f64::NAN, 0.0),
        velocity(1000, 2020, 1.0, 0.0),
    ];

    let accels = compute_accelerations(&velocities);

    assert_eq!(accels[0].simple_acceleration, 0.0);
    assert_eq!(accels[1].simple_acceleration, 0.0);
    assert_eq!(accels[2].simple_acceleration, 1.0);
}

/// Output aligns one-to-one with the velocity sequence.
#[test]
fn accelerations_align_with_velocities() {
    let velocities = vec![
        velocity(1000, 2018, 0.2, 0.1),
        velocity(1000, 2019, 0.3, 0.2),
    ];

    let accels = compute_accelerations(&velocities);

    assert_eq!(accels.len(), velocities.len());
    for (accel, velocity) in accels.iter().zip(&velocities) {
        assert_eq!(accel.donor_id, velocity.donor_id);
        assert_eq!(accel.fiscal_year, velocity.fiscal_year);
    }
}
