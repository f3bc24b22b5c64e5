//! Orbit scene extras: body marker, impact trajectory, starfield

use glam::{DVec3, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::path::{OrbitClock, OrbitEllipse, OrbitSettings, build_with};
use crate::consts::*;
use crate::error::VisualResult;
use crate::impact::BodyDescriptor;

/// Radius of the sphere drawn for a body, in scene units
///
/// Real asteroids are far below a pixel at this scale, so the marker never
/// shrinks below [`MIN_BODY_MARKER_RADIUS`].
pub fn body_marker_radius(diameter_m: f64) -> f64 {
    let radius = diameter_m / KM_PER_SCENE_UNIT / 2.0;
    if radius.is_nan() { MIN_BODY_MARKER_RADIUS } else { radius.max(MIN_BODY_MARKER_RADIUS) }
}

/// Temporary line from the body to Earth's centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactTrajectory {
    pub from: DVec3,
    pub to: DVec3,
    pub lifetime_ms: f64,
}

impl ImpactTrajectory {
    pub fn toward_earth(from: DVec3) -> Self {
        Self {
            from,
            to: DVec3::ZERO,
            lifetime_ms: TRAJECTORY_LIFETIME_MS,
        }
    }

    pub fn length(&self) -> f64 {
        (self.to - self.from).length()
    }

    /// Whether the line should be removed `age_ms` after it was drawn
    pub fn is_expired(&self, age_ms: f64) -> bool {
        age_ms >= self.lifetime_ms
    }
}

/// Background star positions, reproducible from `seed`
pub fn starfield(seed: u64, count: usize, extent: f32) -> Vec<Vec3> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut coord = || (rng.random::<f32>() - 0.5) * 2.0 * extent;
    (0..count)
        .map(|_| {
            let x = coord();
            let y = coord();
            let z = coord();
            Vec3::new(x, y, z)
        })
        .collect()
}

/// Everything the 3D orbit view needs for one selected body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitScene {
    pub body: BodyDescriptor,
    pub ellipse: OrbitEllipse,
    pub marker_radius: f64,
    pub clock: OrbitClock,
}

impl OrbitScene {
    pub fn new(body: BodyDescriptor, settings: &OrbitSettings) -> Self {
        let ellipse = build_with(body.miss_distance_km, body.is_hazardous, settings);
        let marker_radius = body_marker_radius(body.diameter_m);
        log::info!(
            "Orbit scene: miss {:.0} km, hazardous={}, marker {:.2}",
            body.miss_distance_km,
            body.is_hazardous,
            marker_radius
        );
        Self {
            body,
            ellipse,
            marker_radius,
            clock: OrbitClock::new(settings.phase_rate_rad_per_ms),
        }
    }

    /// Advance the clock and return the body's scene position
    pub fn tick(&mut self, dt_ms: f64) -> VisualResult<DVec3> {
        let phase = self.clock.advance(dt_ms);
        self.ellipse.world_position_at(phase)
    }

    /// Current body position in scene coordinates
    pub fn body_position(&self) -> VisualResult<DVec3> {
        self.ellipse.world_position_at(self.clock.phase)
    }

    /// Line from the body's current position to Earth's centre
    pub fn impact_trajectory(&self) -> VisualResult<ImpactTrajectory> {
        Ok(ImpactTrajectory::toward_earth(self.body_position()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_radius() {
        assert_eq!(body_marker_radius(120.0), MIN_BODY_MARKER_RADIUS);
        assert_eq!(body_marker_radius(3000.0), 1.5);
        assert_eq!(body_marker_radius(f64::NAN), MIN_BODY_MARKER_RADIUS);
    }

    #[test]
    fn test_starfield_is_seeded() {
        let a = starfield(42, 500, 1000.0);
        let b = starfield(42, 500, 1000.0);
        let c = starfield(43, 500, 1000.0);
        assert_eq!(a.len(), 500);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|p| p.abs().max_element() <= 1000.0));
    }

    #[test]
    fn test_scene_tick_follows_path() {
        let mut scene = OrbitScene::new(BodyDescriptor::sample(), &OrbitSettings::default());
        let start = scene.body_position().unwrap();
        assert!((start.x - scene.ellipse.semi_major_axis).abs() < 1e-9);

        // Half a turn at 1e-4 rad/ms
        let halfway = scene.tick(std::f64::consts::PI / 1e-4).unwrap();
        assert!(halfway.x < 0.0);
        assert!(halfway.length() <= scene.ellipse.semi_major_axis + 1e-9);
    }

    #[test]
    fn test_trajectory() {
        let scene = OrbitScene::new(BodyDescriptor::sample(), &OrbitSettings::default());
        let line = scene.impact_trajectory().unwrap();
        assert_eq!(line.to, DVec3::ZERO);
        assert!((line.length() - scene.ellipse.semi_major_axis).abs() < 1e-9);
        assert!(!line.is_expired(1999.0));
        assert!(line.is_expired(2000.0));
    }
}
