//! Damage ring layers for the ground-level map
//!
//! Each ring is a circle centred on the impact point. Every ring kind shares
//! the same payload; the kind only selects its styling.

use serde::{Deserialize, Serialize};

use crate::error::VisualResult;
use crate::geometry::EffectRadii;
use crate::impact::ImpactPhysicalResult;

/// Which physical effect a ring shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RingKind {
    Crater,
    Fireball,
    ShockWave,
    WindBlast,
    Seismic,
}

/// Renderer styling for a ring kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub name: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub fill_opacity: f64,
    pub stroke_weight: f32,
    /// Dash and gap lengths in pixels; `None` for a solid outline
    pub dash: Option<(f32, f32)>,
}

impl RingKind {
    pub const ALL: [RingKind; 5] = [
        RingKind::Seismic,
        RingKind::WindBlast,
        RingKind::ShockWave,
        RingKind::Fireball,
        RingKind::Crater,
    ];

    pub fn style(&self) -> RingStyle {
        match self {
            RingKind::Seismic => RingStyle {
                name: "Earthquake Effect",
                description: "Seismic waves felt",
                color: "#9c27b0",
                fill_opacity: 0.05,
                stroke_weight: 2.0,
                dash: Some((10.0, 10.0)),
            },
            RingKind::WindBlast => RingStyle {
                name: "Wind Blast Zone",
                description: "Hurricane-force winds, trees knocked down",
                color: "#607d8b",
                fill_opacity: 0.08,
                stroke_weight: 2.0,
                dash: None,
            },
            RingKind::ShockWave => RingStyle {
                name: "Shock Wave Zone",
                description: "Buildings collapse, ruptured eardrums",
                color: "#ff9800",
                fill_opacity: 0.12,
                stroke_weight: 2.0,
                dash: None,
            },
            RingKind::Fireball => RingStyle {
                name: "Fireball Zone",
                description: "Intense thermal radiation, severe burns",
                color: "#ff5722",
                fill_opacity: 0.18,
                stroke_weight: 3.0,
                dash: None,
            },
            RingKind::Crater => RingStyle {
                name: "Impact Crater",
                description: "Total vaporization",
                color: "#000000",
                fill_opacity: 0.6,
                stroke_weight: 4.0,
                dash: None,
            },
        }
    }
}

/// Parse a `#rrggbb` colour token into linear RGBA with the given alpha
pub fn parse_color(token: &str, alpha: f32) -> Option<[f32; 4]> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([
        channel(0)? as f32 / 255.0,
        channel(2)? as f32 / 255.0,
        channel(4)? as f32 / 255.0,
        alpha,
    ])
}

/// One ring of the staged damage reveal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRingLayer {
    pub id: u32,
    pub kind: RingKind,
    pub radius_km: f64,
    pub color: String,
    pub target_fill_opacity: f64,
    /// Lower is revealed first
    pub reveal_order: u32,
    pub casualty_estimate: f64,
}

impl DamageRingLayer {
    /// Ring with the default styling for its kind
    pub fn new(id: u32, kind: RingKind, radius_km: f64, casualty_estimate: f64) -> Self {
        let style = kind.style();
        Self {
            id,
            kind,
            radius_km,
            color: style.color.to_string(),
            target_fill_opacity: style.fill_opacity.clamp(0.0, 1.0),
            reveal_order: 0,
            casualty_estimate: casualty_estimate.max(0.0),
        }
    }

    /// Whether revealing this ring would draw anything
    pub fn is_revealable(&self) -> bool {
        self.radius_km.is_finite() && self.radius_km > 0.0 && self.target_fill_opacity > 0.0
    }

    /// Target radius in meters, as map renderers expect
    pub fn radius_m(&self) -> f64 {
        self.radius_km * 1000.0
    }

    pub fn rgba(&self) -> [f32; 4] {
        parse_color(&self.color, self.target_fill_opacity as f32).unwrap_or([0.0, 0.0, 0.0, 1.0])
    }
}

/// Sort rings outermost first and number them in reveal order
///
/// Input order is irrelevant; ties keep their relative order.
pub fn order_layers(mut layers: Vec<DamageRingLayer>) -> Vec<DamageRingLayer> {
    layers.sort_by(|a, b| b.radius_km.total_cmp(&a.radius_km));
    for (index, layer) in layers.iter_mut().enumerate() {
        layer.reveal_order = index as u32;
    }
    layers
}

/// The five standard rings for an impact, already in reveal order
pub fn standard_layers(impact: &ImpactPhysicalResult) -> VisualResult<Vec<DamageRingLayer>> {
    let radii = EffectRadii::derive(
        impact.tnt_equivalent_megatons,
        impact.damage_zones.light_damage_km,
    )?;
    let casualties = impact.casualties();

    let layers = RingKind::ALL
        .iter()
        .enumerate()
        .map(|(id, &kind)| {
            let (radius_km, lost) = match kind {
                RingKind::Seismic => (radii.seismic_km, casualties.earthquake_casualties),
                RingKind::WindBlast => (radii.wind_blast_km, casualties.wind_casualties),
                RingKind::ShockWave => (radii.shock_wave_km, casualties.shockwave_casualties),
                RingKind::Fireball => (radii.fireball_km, casualties.thermal_casualties),
                RingKind::Crater => (impact.crater_radius_km(), casualties.crater_casualties),
            };
            DamageRingLayer::new(id as u32, kind, radius_km, lost)
        })
        .collect();

    Ok(order_layers(layers))
}
