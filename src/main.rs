//! Impact Viz entry point
//!
//! Builds every visual for one impact result, plays the ring reveal on a
//! simulated clock and prints a JSON summary.
//!
//! Usage: `impact-viz [impact.json] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Impact Viz (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use impact_viz::orbit::{OrbitScene, starfield};
    use impact_viz::reveal::{RevealEvent, RevealEventKind, StagedRevealAnimator};
    use impact_viz::{BodyDescriptor, ImpactPhysicalResult, ImpactVisuals, VisualResult, VisualSettings};
    use serde_json::json;

    /// Simulated frame interval (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    const SAMPLE_IMPACT: &str = r#"{
        "crater_diameter_km": 10.0,
        "crater_depth_m": 1500.0,
        "tnt_equivalent_megatons": 8.0,
        "damage_zones": {
            "total_destruction_km": 5.0,
            "heavy_damage_km": 12.0,
            "moderate_damage_km": 25.0,
            "light_damage_km": 40.0
        },
        "is_ocean": false,
        "population_impact": {
            "crater_casualties": 120000,
            "thermal_casualties": 340000,
            "shockwave_casualties": 910000,
            "wind_casualties": 450000,
            "earthquake_casualties": 15000
        }
    }"#;

    pub fn run() -> VisualResult<()> {
        let mut args = std::env::args().skip(1);

        let impact = match args.next() {
            Some(path) => {
                log::info!("Reading impact from {}", path);
                ImpactPhysicalResult::from_json(&std::fs::read_to_string(path)?)?
            }
            None => ImpactPhysicalResult::from_json(SAMPLE_IMPACT)?,
        };
        let settings = match args.next() {
            Some(path) => VisualSettings::load(path)?,
            None => VisualSettings::default(),
        };

        let visuals = ImpactVisuals::build(&impact, &settings)?;
        let events = play_reveal(&visuals, &settings);

        let mut scene = OrbitScene::new(BodyDescriptor::sample(), &settings.orbit);
        let position = scene.tick(1000.0)?;
        let trajectory = scene.impact_trajectory()?;
        let stars = starfield(settings.starfield_seed, settings.starfield_count, settings.starfield_extent);

        let fit_view = events.iter().find_map(|e| match e.kind {
            RevealEventKind::FitView { bound_km } => Some(json!({ "at_ms": e.at_ms, "bound_km": bound_km })),
            _ => None,
        });

        let summary = json!({
            "effect_radii": visuals.radii,
            "surface": visuals.surface.as_ref().map(|s| json!({
                "size": s.size,
                "min_elevation_m": s.min_elevation(),
                "max_elevation_m": s.max_elevation(),
            })),
            "profile": visuals.profile.as_ref().map(|p| json!({
                "points": p.x_km.len(),
                "max_range_km": p.max_range_km(),
                "damage_bands": p.damage_bands,
                "annotations": p.annotations,
            })),
            "layers": visuals.layers,
            "reveal": {
                "events": events.len(),
                "last_at_ms": events.last().map(|e| e.at_ms),
                "fit_view": fit_view,
            },
            "orbit": {
                "semi_major_axis": scene.ellipse.semi_major_axis,
                "semi_minor_axis": scene.ellipse.semi_minor_axis,
                "eccentricity": scene.ellipse.eccentricity,
                "marker_radius": scene.marker_radius,
                "body_position": position,
                "trajectory_length": trajectory.length(),
                "stars": stars.len(),
            },
        });

        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

    /// Drive the reveal to completion on a fixed-rate simulated clock
    fn play_reveal(visuals: &ImpactVisuals, settings: &VisualSettings) -> Vec<RevealEvent> {
        let mut animator = StagedRevealAnimator::new(settings.reveal);
        let mut events = Vec::new();
        animator.start(visuals.layers.clone(), 0.0);

        let mut now = 0.0;
        while animator.is_active() {
            now += FRAME_MS;
            animator.advance(now, &mut events);
        }
        log::info!("Reveal finished after {:.0} ms ({} events)", now, events.len());
        events
    }
}
