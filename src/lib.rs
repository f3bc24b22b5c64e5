//! Impact Viz - geometry and animation for asteroid impact visualizations
//!
//! Core modules:
//! - `impact`: Physical impact result and body descriptors (input data)
//! - `geometry`: Effect radii, crater topography, cross-section profile
//! - `reveal`: Damage ring layers and the staged reveal animator
//! - `orbit`: Approach ellipse, phase clock, scene extras
//! - `visuals`: One-call assembly of everything a view needs
//! - `settings`: Data-driven configuration

pub mod error;
pub mod geometry;
pub mod impact;
pub mod orbit;
pub mod reveal;
pub mod settings;
pub mod visuals;

pub use error::{VisualError, VisualResult};
pub use impact::{BodyDescriptor, CasualtyEstimates, DamageZones, ImpactPhysicalResult};
pub use settings::{QualityPreset, VisualSettings};
pub use visuals::ImpactVisuals;

/// Engine constants
pub mod consts {
    /// Smallest yield fed to the power laws (megatons)
    pub const MIN_YIELD_MT: f64 = 1e-9;
    /// Smallest crater radius or depth treated as real geometry (meters)
    pub const MIN_DIMENSION: f64 = 1e-6;

    /// Effect radius scaling, radius_km = coeff * yield^exp
    pub const FIREBALL_COEFF: f64 = 0.5;
    pub const FIREBALL_EXP: f64 = 0.4;
    pub const SHOCK_WAVE_COEFF: f64 = 2.5;
    pub const WIND_BLAST_COEFF: f64 = 3.5;
    /// Shared by shock wave and wind blast (roughly cube-root scaling)
    pub const BLAST_EXP: f64 = 0.33;
    /// Seismic radius as a multiple of the light damage radius
    pub const SEISMIC_FACTOR: f64 = 1.5;
    /// Rim height as a fraction of crater depth
    pub const RIM_HEIGHT_FRACTION: f64 = 0.15;

    /// Crater profile, in multiples of the crater radius
    pub const RIM_ONSET: f64 = 0.85;
    pub const EJECTA_EXTENT: f64 = 1.5;
    pub const EJECTA_DECAY: f64 = 3.0;
    /// Surface grid half-width
    pub const SURFACE_EXTENT: f64 = 2.5;
    /// Minimum cross-section half-width
    pub const PROFILE_EXTENT: f64 = 3.0;

    pub const DEFAULT_GRID_SIZE: usize = 100;
    pub const DEFAULT_PROFILE_SAMPLES: usize = 200;

    /// Reveal timing
    pub const INTER_LAYER_DELAY_MS: f64 = 800.0;
    pub const PER_LAYER_DURATION_MS: f64 = 600.0;
    pub const STEPS_PER_LAYER: u32 = 30;
    pub const POPUP_HOLD_MS: f64 = 2000.0;
    /// Upper bounds on reveal timing (frames per ring, any single interval)
    pub const MAX_STEPS_PER_LAYER: u32 = 600;
    pub const MAX_TIMING_MS: f64 = 60_000.0;
    /// Padding applied to the largest ring when fitting the view
    pub const FIT_VIEW_MARGIN: f64 = 1.1;

    /// Orbit view (scene units are 1000 km)
    pub const KM_PER_SCENE_UNIT: f64 = 1000.0;
    pub const EARTH_RADIUS_UNITS: f64 = 6.371;
    pub const ORBIT_SEGMENTS: usize = 128;
    pub const MIN_ORBIT_SEGMENTS: usize = 3;
    pub const ORBIT_TILT_RAD: f64 = std::f64::consts::FRAC_PI_4;
    pub const HAZARDOUS_ECCENTRICITY: f64 = 0.7;
    pub const NOMINAL_ECCENTRICITY: f64 = 0.5;
    pub const DEFAULT_MISS_DISTANCE_KM: f64 = 500_000.0;
    pub const PHASE_RATE_RAD_PER_MS: f64 = 1e-4;

    /// Orbit scene extras
    pub const TRAJECTORY_LIFETIME_MS: f64 = 2000.0;
    pub const MIN_BODY_MARKER_RADIUS: f64 = 0.5;
    pub const STARFIELD_COUNT: usize = 10_000;
    pub const STARFIELD_EXTENT: f32 = 1000.0;
}
