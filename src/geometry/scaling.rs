//! Empirical scaling of effect radii from yield and crater size
//!
//! Every function here is pure. Out-of-range inputs are clamped instead of
//! rejected: a non-positive yield is raised to [`MIN_YIELD_MT`] before the
//! power law is applied, so the result is always a finite positive number.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{VisualError, VisualResult};

/// Raise non-positive or NaN yields to the smallest scalable value
#[inline]
pub fn clamp_yield(tnt_mt: f64) -> f64 {
    // f64::max returns the other operand for NaN
    tnt_mt.max(MIN_YIELD_MT)
}

/// Thermal fireball radius (km)
#[inline]
pub fn fireball_radius_km(tnt_mt: f64) -> f64 {
    FIREBALL_COEFF * clamp_yield(tnt_mt).powf(FIREBALL_EXP)
}

/// Destructive overpressure radius (km)
#[inline]
pub fn shock_wave_radius_km(tnt_mt: f64) -> f64 {
    SHOCK_WAVE_COEFF * clamp_yield(tnt_mt).powf(BLAST_EXP)
}

/// Hurricane-force wind radius (km)
#[inline]
pub fn wind_blast_radius_km(tnt_mt: f64) -> f64 {
    WIND_BLAST_COEFF * clamp_yield(tnt_mt).powf(BLAST_EXP)
}

/// Felt-shaking radius (km), a fixed multiple of the light damage radius
#[inline]
pub fn seismic_radius_km(light_damage_km: f64) -> f64 {
    SEISMIC_FACTOR * light_damage_km.max(0.0)
}

/// Height of the raised crater lip (m)
#[inline]
pub fn rim_height_m(crater_depth_m: f64) -> f64 {
    RIM_HEIGHT_FRACTION * crater_depth_m.max(0.0)
}

/// All yield-driven radii for one impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectRadii {
    pub fireball_km: f64,
    pub shock_wave_km: f64,
    pub wind_blast_km: f64,
    pub seismic_km: f64,
}

impl EffectRadii {
    /// Derive the effect radii for a yield and light damage radius
    ///
    /// Only an infinite yield can make this fail; clamping covers the rest.
    pub fn derive(tnt_mt: f64, light_damage_km: f64) -> VisualResult<Self> {
        if tnt_mt <= 0.0 || tnt_mt.is_nan() {
            log::warn!("Yield {} Mt clamped to {} Mt", tnt_mt, MIN_YIELD_MT);
        }

        let radii = Self {
            fireball_km: fireball_radius_km(tnt_mt),
            shock_wave_km: shock_wave_radius_km(tnt_mt),
            wind_blast_km: wind_blast_radius_km(tnt_mt),
            seismic_km: seismic_radius_km(light_damage_km),
        };

        let finite = radii.fireball_km.is_finite()
            && radii.shock_wave_km.is_finite()
            && radii.wind_blast_km.is_finite();
        if !finite {
            return Err(VisualError::DegenerateYield { yield_mt: tnt_mt });
        }

        Ok(radii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_megaton_is_exact() {
        assert_eq!(fireball_radius_km(1.0), 0.5);
        assert_eq!(shock_wave_radius_km(1.0), 2.5);
        assert_eq!(wind_blast_radius_km(1.0), 3.5);
    }

    #[test]
    fn test_seismic_and_rim() {
        assert_eq!(seismic_radius_km(40.0), 60.0);
        assert_eq!(seismic_radius_km(-3.0), 0.0);
        assert!((rim_height_m(1500.0) - 225.0).abs() < 1e-9);
        assert_eq!(rim_height_m(-10.0), 0.0);
    }

    #[test]
    fn test_non_positive_yield_is_clamped() {
        for y in [0.0, -5.0, f64::NAN] {
            let r = fireball_radius_km(y);
            assert!(r.is_finite() && r > 0.0, "yield {y} gave {r}");
            assert!(shock_wave_radius_km(y) > 0.0);
            assert!(wind_blast_radius_km(y) > 0.0);
        }
    }

    #[test]
    fn test_derive_bundle() {
        let radii = EffectRadii::derive(1.0, 10.0).unwrap();
        assert_eq!(radii.fireball_km, 0.5);
        assert_eq!(radii.seismic_km, 15.0);
        assert!(EffectRadii::derive(0.0, 1.0).is_ok());
    }

    #[test]
    fn test_infinite_yield_is_degenerate() {
        let err = EffectRadii::derive(f64::INFINITY, 1.0).unwrap_err();
        assert!(matches!(err, VisualError::DegenerateYield { .. }));
    }

    proptest! {
        #[test]
        fn prop_radii_increase_with_yield(a in 1e-6f64..1e6, factor in 1.001f64..100.0) {
            let b = a * factor;
            prop_assert!(fireball_radius_km(b) > fireball_radius_km(a));
            prop_assert!(shock_wave_radius_km(b) > shock_wave_radius_km(a));
            prop_assert!(wind_blast_radius_km(b) > wind_blast_radius_km(a));
        }

        #[test]
        fn prop_seismic_increases_with_light_damage(a in 1e-6f64..1e5, delta in 1e-3f64..1e3) {
            prop_assert!(seismic_radius_km(a + delta) > seismic_radius_km(a));
        }
    }
}
