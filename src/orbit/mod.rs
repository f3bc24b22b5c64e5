//! Approach orbit for the 3D scene
//!
//! A fixed parametric ellipse around Earth plus a phase clock. There is no
//! gravitational integration here.

pub mod path;
pub mod scene;

pub use path::{
    OrbitClock, OrbitEllipse, OrbitSettings, build, build_with, eccentricity_for, position_at,
    wrap_phase,
};
pub use scene::{ImpactTrajectory, OrbitScene, body_marker_radius, starfield};
