//! Staged damage-ring reveal
//!
//! Rings are defined and revealed outermost first. The animator only produces
//! `(layer, radius, opacity)` frames on a host-driven clock; what "revealing"
//! means is up to the map renderer.

pub mod animator;
pub mod layer;

pub use animator::{
    CancellationToken, LayerAnimation, LayerPhase, RevealEvent, RevealEventKind, RevealFrame,
    RevealHandle, RevealObserver, RevealTiming, SequenceId, StagedRevealAnimator, ease_out_cubic,
};
pub use layer::{DamageRingLayer, RingKind, RingStyle, order_layers, standard_layers};
