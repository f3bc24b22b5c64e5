//! Simulation results handed to the engine
//!
//! These arrive from the impact simulation backend as JSON and are immutable
//! for the lifetime of one simulation run. Field names follow the backend's
//! snake_case payload.

use serde::{Deserialize, Serialize};

use crate::error::VisualResult;

/// Radii of the ground damage zones (km), outermost last
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageZones {
    pub total_destruction_km: f64,
    pub heavy_damage_km: f64,
    pub moderate_damage_km: f64,
    pub light_damage_km: f64,
}

impl DamageZones {
    /// Radii clamped to be non-negative, in total -> light order
    pub fn radii_km(&self) -> [f64; 4] {
        [
            self.total_destruction_km.max(0.0),
            self.heavy_damage_km.max(0.0),
            self.moderate_damage_km.max(0.0),
            self.light_damage_km.max(0.0),
        ]
    }

    /// True when each zone is at least as large as the one inside it
    pub fn is_nested(&self) -> bool {
        self.radii_km().windows(2).all(|w| w[0] <= w[1])
    }
}

/// Per-effect casualty estimates from the population model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasualtyEstimates {
    pub crater_casualties: f64,
    pub thermal_casualties: f64,
    pub shockwave_casualties: f64,
    pub wind_casualties: f64,
    pub earthquake_casualties: f64,
}

fn default_yield_mt() -> f64 {
    1.0
}

/// Physical outcome of one simulated impact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactPhysicalResult {
    pub crater_diameter_km: f64,
    pub crater_depth_m: f64,
    /// Missing yields are treated as 1 Mt
    #[serde(default = "default_yield_mt")]
    pub tnt_equivalent_megatons: f64,
    pub damage_zones: DamageZones,
    #[serde(default)]
    pub is_ocean: bool,
    #[serde(default)]
    pub population_impact: Option<CasualtyEstimates>,
}

impl ImpactPhysicalResult {
    /// Parse a backend payload
    pub fn from_json(json: &str) -> VisualResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Crater radius in meters
    pub fn crater_radius_m(&self) -> f64 {
        self.crater_diameter_km * 1000.0 / 2.0
    }

    /// Crater radius in kilometers
    pub fn crater_radius_km(&self) -> f64 {
        self.crater_diameter_km / 2.0
    }

    /// Casualty estimates, zeroed when the backend sent none
    pub fn casualties(&self) -> CasualtyEstimates {
        self.population_impact.unwrap_or_default()
    }
}

fn default_miss_distance_km() -> f64 {
    crate::consts::DEFAULT_MISS_DISTANCE_KM
}

/// An approaching body selected for the orbit view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub diameter_m: f64,
    pub velocity_ms: f64,
    #[serde(default = "default_miss_distance_km")]
    pub miss_distance_km: f64,
    #[serde(default)]
    pub is_hazardous: bool,
}

impl BodyDescriptor {
    /// Built-in sample body used when no catalogue entry is selected
    pub fn sample() -> Self {
        Self {
            diameter_m: 500.0,
            velocity_ms: 20_000.0,
            miss_distance_km: crate::consts::DEFAULT_MISS_DISTANCE_KM,
            is_hazardous: true,
        }
    }
}
