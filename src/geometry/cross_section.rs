//! 2D crater cross-section with damage bands
//!
//! The profile is the crater surface cut along one diameter, so it reuses the
//! same radial elevation function as the 3D surface.

use serde::{Deserialize, Serialize};

use super::crater::{CraterShape, SeamMode};
use super::topography::symmetric_coordinate;
use crate::consts::*;
use crate::error::{VisualError, VisualResult};
use crate::impact::DamageZones;

/// Damage severity of a background band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandLabel {
    TotalDestruction,
    HeavyDamage,
    ModerateDamage,
    LightDamage,
}

impl BandLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BandLabel::TotalDestruction => "Total destruction",
            BandLabel::HeavyDamage => "Heavy damage",
            BandLabel::ModerateDamage => "Moderate damage",
            BandLabel::LightDamage => "Light damage",
        }
    }

    /// Translucent band fill; inner bands are more opaque
    pub fn fill_rgba(&self) -> [f32; 4] {
        match self {
            BandLabel::TotalDestruction => [211.0 / 255.0, 47.0 / 255.0, 47.0 / 255.0, 0.15],
            BandLabel::HeavyDamage => [1.0, 87.0 / 255.0, 34.0 / 255.0, 0.10],
            BandLabel::ModerateDamage => [1.0, 152.0 / 255.0, 0.0, 0.08],
            BandLabel::LightDamage => [251.0 / 255.0, 188.0 / 255.0, 4.0 / 255.0, 0.05],
        }
    }
}

/// A vertical band spanning `-radius_km..radius_km`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageBand {
    pub radius_km: f64,
    pub label: BandLabel,
}

/// Chart annotations marking the crater floor and the rim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnnotations {
    /// `(0, -depth)` in km
    pub depth_marker_km: (f64, f64),
    /// `(radius, rim height)` in km
    pub rim_marker_km: (f64, f64),
    /// Original ground line, spanning `±max_range`
    pub surface_line_km: [(f64, f64); 2],
}

/// Sampled crater profile along one diameter, in km
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionProfile {
    pub x_km: Vec<f64>,
    pub y_km: Vec<f64>,
    /// Innermost (most severe) band first
    pub damage_bands: Vec<DamageBand>,
    pub annotations: ProfileAnnotations,
}

impl CrossSectionProfile {
    pub fn max_range_km(&self) -> f64 {
        self.x_km.last().copied().unwrap_or(0.0)
    }
}

/// Half-width of the profile window (m)
pub fn max_range_m(crater_radius_m: f64, zones: &DamageZones) -> f64 {
    (zones.light_damage_km.max(0.0) * 1000.0).max(crater_radius_m * PROFILE_EXTENT)
}

/// Build the profile with the default seam handling
pub fn generate(
    crater_radius_m: f64,
    crater_depth_m: f64,
    zones: &DamageZones,
    sample_count: usize,
) -> VisualResult<CrossSectionProfile> {
    let shape = CraterShape::new(crater_radius_m, crater_depth_m, SeamMode::default())?;
    generate_for(&shape, zones, sample_count)
}

/// Build the profile for an already validated shape
///
/// Produces `sample_count + 1` points from `-max_range` to `+max_range`.
pub fn generate_for(
    shape: &CraterShape,
    zones: &DamageZones,
    sample_count: usize,
) -> VisualResult<CrossSectionProfile> {
    if sample_count == 0 {
        return Err(VisualError::dimension("sample count", 0.0));
    }
    if !zones.is_nested() {
        log::warn!("Damage zones are not nested: {:?}", zones);
    }

    let max_range = max_range_m(shape.radius_m, zones);
    let points = sample_count + 1;

    let (x_km, y_km): (Vec<f64>, Vec<f64>) = (0..points)
        .map(|i| {
            let x = symmetric_coordinate(i, points, max_range);
            (x / 1000.0, shape.elevation_at(x) / 1000.0)
        })
        .unzip();

    let [total, heavy, moderate, light] = zones.radii_km();
    let damage_bands = vec![
        DamageBand { radius_km: total, label: BandLabel::TotalDestruction },
        DamageBand { radius_km: heavy, label: BandLabel::HeavyDamage },
        DamageBand { radius_km: moderate, label: BandLabel::ModerateDamage },
        DamageBand { radius_km: light, label: BandLabel::LightDamage },
    ];

    let range_km = max_range / 1000.0;
    let annotations = ProfileAnnotations {
        depth_marker_km: (0.0, -shape.depth_m / 1000.0),
        rim_marker_km: (shape.radius_m / 1000.0, shape.rim_height_m / 1000.0),
        surface_line_km: [(-range_km, 0.0), (range_km, 0.0)],
    };

    log::debug!("Cross-section: {} points over ±{:.2} km", points, range_km);

    Ok(CrossSectionProfile { x_km, y_km, damage_bands, annotations })
}
