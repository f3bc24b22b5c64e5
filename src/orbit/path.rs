//! Parametric approach orbit
//!
//! Not a physical trajectory: the approaching body is drawn on a fixed
//! ellipse whose size follows the miss distance and whose eccentricity marks
//! the hazard flag. Scene units are 1000 km, so Earth's radius is 6.371.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::consts::*;
use crate::error::{VisualError, VisualResult};

/// Orbit construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub earth_radius_units: f64,
    /// Number of path segments; the path has one more point than this
    pub segments: usize,
    /// Display tilt about the x axis
    pub tilt_rad: f64,
    /// How fast the body moves along the path
    pub phase_rate_rad_per_ms: f64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            earth_radius_units: EARTH_RADIUS_UNITS,
            segments: ORBIT_SEGMENTS,
            tilt_rad: ORBIT_TILT_RAD,
            phase_rate_rad_per_ms: PHASE_RATE_RAD_PER_MS,
        }
    }
}

/// Closed elliptical path in the orbit's own plane (z = 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitEllipse {
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub eccentricity: f64,
    pub tilt_rad: f64,
    /// Untilted points; the last repeats the first
    pub points: Vec<DVec3>,
}

/// Eccentricity used to draw a body's path
#[inline]
pub fn eccentricity_for(is_hazardous: bool) -> f64 {
    if is_hazardous {
        HAZARDOUS_ECCENTRICITY
    } else {
        NOMINAL_ECCENTRICITY
    }
}

/// Build the default 128-segment, 45° tilted path
pub fn build(miss_distance_km: f64, is_hazardous: bool, earth_radius_units: f64) -> OrbitEllipse {
    let settings = OrbitSettings {
        earth_radius_units,
        ..OrbitSettings::default()
    };
    build_with(miss_distance_km, is_hazardous, &settings)
}

/// Build a path with explicit settings
///
/// Negative miss distances are treated as zero and a non-positive Earth
/// radius as [`MIN_DIMENSION`], so the ellipse always has positive axes.
pub fn build_with(miss_distance_km: f64, is_hazardous: bool, settings: &OrbitSettings) -> OrbitEllipse {
    let miss = if miss_distance_km.is_finite() { miss_distance_km.max(0.0) } else { 0.0 };
    let earth = settings.earth_radius_units.max(MIN_DIMENSION);
    let segments = settings.segments.max(MIN_ORBIT_SEGMENTS);

    let semi_major_axis = miss / KM_PER_SCENE_UNIT + earth;
    let eccentricity = eccentricity_for(is_hazardous);
    let semi_minor_axis = semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt();

    let mut points: Vec<DVec3> = (0..segments)
        .map(|i| {
            let theta = i as f64 / segments as f64 * TAU;
            DVec3::new(semi_major_axis * theta.cos(), semi_minor_axis * theta.sin(), 0.0)
        })
        .collect();
    points.push(points[0]);

    log::debug!(
        "Orbit a={:.3} b={:.3} e={} ({} points)",
        semi_major_axis,
        semi_minor_axis,
        eccentricity,
        points.len()
    );

    OrbitEllipse {
        semi_major_axis,
        semi_minor_axis,
        eccentricity,
        tilt_rad: settings.tilt_rad,
        points,
    }
}

impl OrbitEllipse {
    /// Rotation taking path coordinates to scene coordinates
    pub fn tilt(&self) -> DQuat {
        DQuat::from_rotation_x(self.tilt_rad)
    }

    /// Path points as drawn in the scene
    pub fn tilted_points(&self) -> Vec<DVec3> {
        let tilt = self.tilt();
        self.points.iter().map(|&p| tilt * p).collect()
    }

    /// Index of the sampled point for a phase in [0, 2π)
    pub fn index_for(&self, phase: f64) -> VisualResult<usize> {
        if !(0.0..TAU).contains(&phase) {
            return Err(VisualError::InvalidPhase { phase });
        }
        let count = self.points.len();
        let index = (phase / TAU * count as f64).floor() as usize;
        Ok(index.min(count - 1))
    }

    /// Sampled point nearest a phase, in path coordinates
    pub fn position_at(&self, phase: f64) -> VisualResult<DVec3> {
        Ok(self.points[self.index_for(phase)?])
    }

    /// Sampled point nearest a phase, in scene coordinates
    pub fn world_position_at(&self, phase: f64) -> VisualResult<DVec3> {
        Ok(self.tilt() * self.position_at(phase)?)
    }
}

/// Free-function form of [`OrbitEllipse::position_at`]
pub fn position_at(ellipse: &OrbitEllipse, phase: f64) -> VisualResult<DVec3> {
    ellipse.position_at(phase)
}

/// Advancing orbit phase, always kept in [0, 2π)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitClock {
    pub phase: f64,
    pub rate_rad_per_ms: f64,
}

impl Default for OrbitClock {
    fn default() -> Self {
        Self::new(PHASE_RATE_RAD_PER_MS)
    }
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_phase(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU || wrapped.is_nan() { 0.0 } else { wrapped }
}

impl OrbitClock {
    pub fn new(rate_rad_per_ms: f64) -> Self {
        Self {
            phase: 0.0,
            rate_rad_per_ms: rate_rad_per_ms.max(0.0),
        }
    }

    /// Move forward by `dt_ms`; time never runs backwards
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        self.phase = wrap_phase(self.phase + self.rate_rad_per_ms * dt_ms.max(0.0));
        self.phase
    }

    /// Phase reached after `elapsed_ms` from phase 0
    pub fn phase_after(&self, elapsed_ms: f64) -> f64 {
        wrap_phase(self.rate_rad_per_ms * elapsed_ms.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_hazardous_reference_orbit() {
        let orbit = build(500_000.0, true, EARTH_RADIUS_UNITS);
        assert!((orbit.semi_major_axis - 506.371).abs() < 1e-9);
        assert_eq!(orbit.eccentricity, 0.7);
        let expected_b = 506.371 * 0.51f64.sqrt();
        assert!((orbit.semi_minor_axis - expected_b).abs() < 1e-9);
        assert!((orbit.semi_minor_axis - 361.6).abs() < 0.1);
    }

    #[test]
    fn test_nominal_eccentricity() {
        let orbit = build(100_000.0, false, EARTH_RADIUS_UNITS);
        assert_eq!(orbit.eccentricity, 0.5);
        assert!((orbit.semi_minor_axis / orbit.semi_major_axis - 0.75f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_path_is_closed() {
        let orbit = build(500_000.0, true, EARTH_RADIUS_UNITS);
        assert_eq!(orbit.points.len(), 129);
        assert_eq!(orbit.points[0], orbit.points[128]);
        assert!(orbit.points.iter().all(|p| p.z == 0.0));
        // Quarter of the way round sits on the minor axis
        let quarter = orbit.points[32];
        assert!(quarter.x.abs() < 1e-9);
        assert!((quarter.y - orbit.semi_minor_axis).abs() < 1e-9);
    }

    #[test]
    fn test_position_at_zero_is_periapsis_side() {
        let orbit = build(500_000.0, true, EARTH_RADIUS_UNITS);
        let p = orbit.position_at(0.0).unwrap();
        assert_eq!(p, DVec3::new(orbit.semi_major_axis, 0.0, 0.0));
        // The x axis is the tilt axis, so this point is unmoved in the scene
        let w = orbit.world_position_at(0.0).unwrap();
        assert!((w - p).length() < 1e-9);
    }

    #[test]
    fn test_position_index_mapping() {
        let orbit = build(0.0, false, EARTH_RADIUS_UNITS);
        assert_eq!(orbit.index_for(PI).unwrap(), 64);
        assert_eq!(orbit.index_for(TAU - 1e-12).unwrap(), 128);
        assert!(position_at(&orbit, PI / 2.0).is_ok());
    }

    #[test]
    fn test_out_of_range_phase() {
        let orbit = build(0.0, false, EARTH_RADIUS_UNITS);
        for phase in [-0.1, TAU, 7.0, f64::NAN] {
            assert!(matches!(
                orbit.position_at(phase),
                Err(VisualError::InvalidPhase { .. })
            ));
        }
    }

    #[test]
    fn test_tilt_is_45_degrees_about_x() {
        let orbit = build(0.0, false, EARTH_RADIUS_UNITS);
        let tilted = orbit.tilted_points();
        let q = tilted[32];
        let b = orbit.semi_minor_axis;
        assert!((q.y - b * (PI / 4.0).cos()).abs() < 1e-9);
        assert!((q.z - b * (PI / 4.0).sin()).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_are_clamped() {
        let orbit = build(-50.0, true, -1.0);
        assert!(orbit.semi_major_axis > 0.0);
        assert!(orbit.semi_minor_axis > 0.0);
        let few = build_with(0.0, false, &OrbitSettings { segments: 0, ..Default::default() });
        assert_eq!(few.points.len(), MIN_ORBIT_SEGMENTS + 1);
    }

    #[test]
    fn test_clock_wraps() {
        let mut clock = OrbitClock::default();
        assert!((clock.advance(10_000.0) - 1.0).abs() < 1e-12);
        let phase = clock.advance(70_000.0);
        assert!((phase - (8.0 - TAU)).abs() < 1e-9);
        assert!(clock.advance(-500.0) == phase);
        assert!((0.0..TAU).contains(&clock.phase_after(1e9)));
        assert_eq!(wrap_phase(-1e-20), 0.0);
    }
}
