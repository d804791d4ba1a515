use rotorlink::Pose;

/// Assert that the vehicle is at or above the given altitude
#[track_caller]
pub fn assert_altitude_at_least(pose: &Pose, altitude: f64) {
    assert!(
        pose.altitude() >= altitude,
        "altitude {:.3} below expected minimum {:.3}",
        pose.altitude(),
        altitude
    );
}

/// Assert that the vehicle is at or below the given altitude
#[track_caller]
pub fn assert_altitude_at_most(pose: &Pose, altitude: f64) {
    assert!(
        pose.altitude() <= altitude,
        "altitude {:.3} above expected maximum {:.3}",
        pose.altitude(),
        altitude
    );
}
