//! Radial crater profile shared by the surface and the cross-section
//!
//! Elevation depends only on the planar distance `d` from the impact point:
//!
//! - `d <= r`: parabolic bowl, plus a rim bulge over the outer 15% of the radius
//! - `r < d <= 1.5r`: ejecta blanket decaying away from the rim
//! - `d > 1.5r`: undisturbed ground at 0
//!
//! [`SeamMode::Legacy`] reproduces the first-generation formulas exactly. Its
//! rim term is a half sine that is back to zero at `d = r` while the ejecta
//! term starts at the full rim height, so the surface jumps by `rim_height`
//! at the rim and by `rim_height * e^-3` at the ejecta edge.
//! [`SeamMode::Continuous`] closes both seams.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use super::scaling::rim_height_m;
use crate::consts::*;
use crate::error::{VisualResult, require_positive};

/// How the rim and ejecta terms meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SeamMode {
    /// Quarter-sine rim peaking at `r`, tapered ejecta reaching 0 at `1.5r`
    #[default]
    Continuous,
    /// Half-sine rim and untapered ejecta, seams included
    Legacy,
}

/// Which radial zone a distance falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadialZone {
    Bowl,
    Ejecta,
    Flat,
}

/// Validated crater dimensions (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraterShape {
    pub radius_m: f64,
    pub depth_m: f64,
    pub rim_height_m: f64,
    pub seam: SeamMode,
}

impl CraterShape {
    pub fn new(radius_m: f64, depth_m: f64, seam: SeamMode) -> VisualResult<Self> {
        let radius_m = require_positive("crater radius", radius_m)?;
        let depth_m = require_positive("crater depth", depth_m)?;
        Ok(Self {
            radius_m,
            depth_m,
            rim_height_m: rim_height_m(depth_m),
            seam,
        })
    }

    /// Outer edge of the ejecta blanket (m)
    #[inline]
    pub fn ejecta_edge_m(&self) -> f64 {
        self.radius_m * EJECTA_EXTENT
    }

    pub fn zone(&self, distance_m: f64) -> RadialZone {
        let d = distance_m.abs();
        if d <= self.radius_m {
            RadialZone::Bowl
        } else if d <= self.ejecta_edge_m() {
            RadialZone::Ejecta
        } else {
            RadialZone::Flat
        }
    }

    /// Rim bulge weight in [0, 1] for a normalized distance inside the bowl
    ///
    /// Zero up to the rim onset (0.85 r).
    pub fn rim_factor(&self, normalized: f64) -> f64 {
        if normalized <= RIM_ONSET {
            return 0.0;
        }
        let t = ((normalized - RIM_ONSET) / (1.0 - RIM_ONSET)).min(1.0);
        match self.seam {
            SeamMode::Continuous => (t * FRAC_PI_2).sin(),
            SeamMode::Legacy => (t * PI).sin(),
        }
    }

    /// Ejecta elevation for a fraction `f` in [0, 1] of the blanket width
    pub fn ejecta_elevation(&self, f: f64) -> f64 {
        let decay = (-EJECTA_DECAY * f).exp() * (PI * f).cos();
        match self.seam {
            SeamMode::Continuous => self.rim_height_m * (decay + f * (-EJECTA_DECAY).exp()),
            SeamMode::Legacy => self.rim_height_m * decay,
        }
    }

    /// Elevation (m) at planar distance `distance_m` from the impact point
    pub fn elevation_at(&self, distance_m: f64) -> f64 {
        let d = distance_m.abs();
        match self.zone(d) {
            RadialZone::Bowl => {
                let normalized = d / self.radius_m;
                let bowl = -self.depth_m * (1.0 - normalized * normalized);
                bowl + self.rim_height_m * self.rim_factor(normalized)
            }
            RadialZone::Ejecta => {
                let f = (d - self.radius_m) / (self.radius_m * (EJECTA_EXTENT - 1.0));
                self.ejecta_elevation(f)
            }
            RadialZone::Flat => 0.0,
        }
    }
}
