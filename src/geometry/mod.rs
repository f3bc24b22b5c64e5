//! Impact geometry
//!
//! Pure, stateless generators that turn crater dimensions and yield into
//! renderable surfaces and profiles:
//! - Fixed empirical scaling only
//! - No rendering or platform dependencies
//! - Same inputs always give the same output

pub mod crater;
pub mod cross_section;
pub mod scaling;
pub mod topography;

pub use crater::{CraterShape, RadialZone, SeamMode};
pub use cross_section::{BandLabel, CrossSectionProfile, DamageBand, ProfileAnnotations};
pub use scaling::{
    EffectRadii, fireball_radius_km, rim_height_m, seismic_radius_km, shock_wave_radius_km,
    wind_blast_radius_km,
};
pub use topography::{ElevationGrid, SurfaceVertex, elevation_color};
