//! Assembly of every ground-level visual for one impact

use serde::{Deserialize, Serialize};

use crate::error::VisualResult;
use crate::geometry::{CraterShape, CrossSectionProfile, EffectRadii, ElevationGrid, cross_section, topography};
use crate::impact::ImpactPhysicalResult;
use crate::reveal::{DamageRingLayer, standard_layers};
use crate::settings::VisualSettings;

/// Geometry and ring layers derived from one impact result
///
/// Ocean impacts leave no crater, so `surface` and `profile` are `None` for
/// them; the rings are still produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactVisuals {
    pub radii: EffectRadii,
    pub surface: Option<ElevationGrid>,
    pub profile: Option<CrossSectionProfile>,
    /// Already in reveal order
    pub layers: Vec<DamageRingLayer>,
}

impl ImpactVisuals {
    pub fn build(impact: &ImpactPhysicalResult, settings: &VisualSettings) -> VisualResult<Self> {
        settings.validate()?;

        let radii = EffectRadii::derive(
            impact.tnt_equivalent_megatons,
            impact.damage_zones.light_damage_km,
        )?;
        let layers = standard_layers(impact)?;

        let (surface, profile) = if impact.is_ocean {
            log::info!("Ocean impact: skipping crater surface and profile");
            (None, None)
        } else {
            let shape = CraterShape::new(
                impact.crater_radius_m(),
                impact.crater_depth_m,
                settings.seam_mode,
            )?;
            let surface = topography::generate_for(&shape, settings.grid_size)?;
            let profile = cross_section::generate_for(&shape, &impact.damage_zones, settings.profile_samples)?;
            (Some(surface), Some(profile))
        };

        log::info!(
            "Built impact visuals: {} rings, crater {:.2} km",
            layers.len(),
            impact.crater_diameter_km
        );

        Ok(Self {
            radii,
            surface,
            profile,
            layers,
        })
    }

    pub fn has_crater(&self) -> bool {
        self.surface.is_some()
    }
}
