//! Staged reveal of damage rings
//!
//! A reveal sequence grows each ring from nothing to its target radius and
//! fill opacity, one ring after another, outermost first. The animator never
//! sleeps or spawns anything: the host calls [`StagedRevealAnimator::advance`]
//! from its frame loop with the current clock, and every event that has come
//! due is handed to a [`RevealObserver`].
//!
//! At most one sequence is active. Starting a new one cancels the old one, and
//! a cancelled sequence never emits again.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

use super::layer::{DamageRingLayer, RingKind, order_layers};
use crate::consts::*;
use crate::error::{VisualError, VisualResult};

/// Cubic ease-out: fast start, gentle landing
#[inline]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Timing of a reveal sequence (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    /// Gap between the starts of consecutive rings
    pub inter_layer_delay_ms: f64,
    /// How long one ring takes to grow
    pub per_layer_duration_ms: f64,
    /// Frames per ring
    pub steps_per_layer: u32,
    /// How long a settled ring's info popup stays open
    pub popup_hold_ms: f64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            inter_layer_delay_ms: INTER_LAYER_DELAY_MS,
            per_layer_duration_ms: PER_LAYER_DURATION_MS,
            steps_per_layer: STEPS_PER_LAYER,
            popup_hold_ms: POPUP_HOLD_MS,
        }
    }
}

/// Clamp a timing value into `[0, MAX_TIMING_MS]`; NaN and infinities become 0
fn bounded_ms(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, MAX_TIMING_MS) } else { 0.0 }
}

impl RevealTiming {
    /// Interval between two frames of the same ring
    pub fn step_ms(&self) -> f64 {
        self.duration() / self.steps() as f64
    }

    /// Reject timings that would build an oversized or endless sequence
    pub fn validate(&self) -> VisualResult<()> {
        if !(1..=MAX_STEPS_PER_LAYER).contains(&self.steps_per_layer) {
            return Err(VisualError::Config(format!(
                "reveal.steps_per_layer must be in 1..={}, got {}",
                MAX_STEPS_PER_LAYER, self.steps_per_layer
            )));
        }
        let durations = [
            ("reveal.inter_layer_delay_ms", self.inter_layer_delay_ms),
            ("reveal.per_layer_duration_ms", self.per_layer_duration_ms),
            ("reveal.popup_hold_ms", self.popup_hold_ms),
        ];
        for (name, value) in durations {
            if !(0.0..=MAX_TIMING_MS).contains(&value) {
                return Err(VisualError::Config(format!(
                    "{} must be in 0..={} ms, got {}",
                    name, MAX_TIMING_MS, value
                )));
            }
        }
        Ok(())
    }

    // The accessors below clamp, so an unvalidated timing still yields a
    // bounded sequence.

    fn steps(&self) -> u32 {
        self.steps_per_layer.clamp(1, MAX_STEPS_PER_LAYER)
    }

    fn delay(&self) -> f64 {
        bounded_ms(self.inter_layer_delay_ms)
    }

    fn duration(&self) -> f64 {
        bounded_ms(self.per_layer_duration_ms)
    }

    fn popup_hold(&self) -> f64 {
        bounded_ms(self.popup_hold_ms)
    }
}

/// Shared cancel flag for one reveal sequence
///
/// Clones observe the same flag, so the host can keep one and cancel the
/// sequence without going through the animator.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Identifies one call to `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceId(pub u64);

/// Handle returned by `start`
#[derive(Debug, Clone)]
pub struct RevealHandle {
    pub sequence: SequenceId,
    token: CancellationToken,
}

impl RevealHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// One intermediate ring size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealFrame {
    pub layer_id: u32,
    pub kind: RingKind,
    /// 0-based frame index within the ring
    pub step: u32,
    pub radius_km: f64,
    pub opacity: f64,
}

/// Everything a reveal sequence tells the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RevealEventKind {
    /// The ring is added to the map at radius 0, opacity 0
    LayerStarted { layer_id: u32, kind: RingKind },
    Frame(RevealFrame),
    /// The ring reached its target; the host may open its info popup
    LayerSettled { layer_id: u32, casualty_estimate: f64 },
    /// Close the popup opened on `LayerSettled`
    PopupExpired { layer_id: u32 },
    /// Frame the view on a square of half-width `bound_km` around the impact
    FitView { bound_km: f64 },
    /// Last event of the sequence
    Finished,
}

/// A timestamped reveal event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealEvent {
    pub sequence: SequenceId,
    /// Host clock time the event was scheduled for
    pub at_ms: f64,
    pub kind: RevealEventKind,
}

/// Receives reveal events as they come due
pub trait RevealObserver {
    fn on_event(&mut self, event: &RevealEvent);
}

impl RevealObserver for Vec<RevealEvent> {
    fn on_event(&mut self, event: &RevealEvent) {
        self.push(*event);
    }
}

impl<F: FnMut(&RevealEvent)> RevealObserver for F {
    fn on_event(&mut self, event: &RevealEvent) {
        self(event)
    }
}

/// Where a ring is in its reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerPhase {
    Pending,
    Growing,
    Settled,
    /// Not drawable; occupies its time slot without emitting
    Skipped,
}

/// Transient per-ring animation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerAnimation {
    pub layer: DamageRingLayer,
    pub start_ms: f64,
    pub phase: LayerPhase,
    pub step_index: u32,
    pub current_radius_km: f64,
    pub current_opacity: f64,
}

/// A running reveal sequence
#[derive(Debug)]
struct RevealSequence {
    id: SequenceId,
    token: CancellationToken,
    layers: Vec<LayerAnimation>,
    timeline: Vec<RevealEvent>,
    cursor: usize,
}

impl RevealSequence {
    fn new(
        id: SequenceId,
        layers: Vec<DamageRingLayer>,
        timing: &RevealTiming,
        now_ms: f64,
    ) -> Self {
        let layers: Vec<LayerAnimation> = order_layers(layers)
            .into_iter()
            .enumerate()
            .map(|(slot, layer)| LayerAnimation {
                start_ms: now_ms + slot as f64 * timing.delay(),
                phase: if layer.is_revealable() {
                    LayerPhase::Pending
                } else {
                    log::warn!(
                        "Skipping ring {} ({:?}): radius {} km, opacity {}",
                        layer.id,
                        layer.kind,
                        layer.radius_km,
                        layer.target_fill_opacity
                    );
                    LayerPhase::Skipped
                },
                step_index: 0,
                current_radius_km: 0.0,
                current_opacity: 0.0,
                layer,
            })
            .collect();

        let timeline = build_timeline(id, &layers, timing, now_ms);

        Self {
            id,
            token: CancellationToken::new(),
            layers,
            timeline,
            cursor: 0,
        }
    }

    fn apply(&mut self, event: &RevealEvent) {
        let layer_id = match event.kind {
            RevealEventKind::LayerStarted { layer_id, .. }
            | RevealEventKind::LayerSettled { layer_id, .. } => layer_id,
            RevealEventKind::Frame(frame) => frame.layer_id,
            _ => return,
        };
        let Some(anim) = self.layers.iter_mut().find(|a| a.layer.id == layer_id) else {
            return;
        };
        match event.kind {
            RevealEventKind::LayerStarted { .. } => anim.phase = LayerPhase::Growing,
            RevealEventKind::Frame(frame) => {
                anim.step_index = frame.step + 1;
                anim.current_radius_km = frame.radius_km;
                anim.current_opacity = frame.opacity;
            }
            RevealEventKind::LayerSettled { .. } => anim.phase = LayerPhase::Settled,
            _ => {}
        }
    }
}

/// Lay out every event of a sequence in emission order
fn build_timeline(
    sequence: SequenceId,
    layers: &[LayerAnimation],
    timing: &RevealTiming,
    now_ms: f64,
) -> Vec<RevealEvent> {
    let steps = timing.steps();
    let step_ms = timing.step_ms();
    let mut timeline = Vec::with_capacity(layers.len() * (steps as usize + 3) + 2);
    let event = |at_ms: f64, kind: RevealEventKind| RevealEvent { sequence, at_ms, kind };

    for anim in layers.iter().filter(|a| a.phase != LayerPhase::Skipped) {
        let layer = &anim.layer;
        timeline.push(event(
            anim.start_ms,
            RevealEventKind::LayerStarted { layer_id: layer.id, kind: layer.kind },
        ));

        for step in 0..steps {
            let eased = ease_out_cubic((step + 1) as f64 / steps as f64);
            timeline.push(event(
                anim.start_ms + step as f64 * step_ms,
                RevealEventKind::Frame(RevealFrame {
                    layer_id: layer.id,
                    kind: layer.kind,
                    step,
                    radius_km: layer.radius_km * eased,
                    opacity: layer.target_fill_opacity * eased,
                }),
            ));
        }

        let settled_ms = anim.start_ms + (steps - 1) as f64 * step_ms;
        timeline.push(event(
            settled_ms,
            RevealEventKind::LayerSettled {
                layer_id: layer.id,
                casualty_estimate: layer.casualty_estimate,
            },
        ));
        timeline.push(event(
            settled_ms + timing.popup_hold(),
            RevealEventKind::PopupExpired { layer_id: layer.id },
        ));
    }

    let largest = layers
        .iter()
        .filter(|a| a.phase != LayerPhase::Skipped)
        .map(|a| a.layer.radius_km)
        .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |m| m.max(r))));

    if let Some(largest) = largest {
        let slots = layers.len() as f64;
        let all_grown = (slots - 1.0) * timing.delay() + timing.duration();
        let fit_ms = now_ms + (slots * timing.delay()).max(all_grown);
        timeline.push(event(
            fit_ms,
            RevealEventKind::FitView { bound_km: largest * FIT_VIEW_MARGIN },
        ));
    }

    // Stable: events sharing a timestamp keep their per-layer order
    timeline.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

    let end_ms = timeline.last().map_or(now_ms, |e| e.at_ms);
    timeline.push(event(end_ms, RevealEventKind::Finished));
    timeline
}

/// Drives at most one reveal sequence at a time
#[derive(Debug, Default)]
pub struct StagedRevealAnimator {
    timing: RevealTiming,
    active: Option<RevealSequence>,
    next_sequence: u64,
}

impl StagedRevealAnimator {
    pub fn new(timing: RevealTiming) -> Self {
        Self {
            timing,
            active: None,
            next_sequence: 1,
        }
    }

    pub fn timing(&self) -> &RevealTiming {
        &self.timing
    }

    /// Begin revealing `layers` at host time `now_ms` with the default timing
    pub fn start(&mut self, layers: Vec<DamageRingLayer>, now_ms: f64) -> RevealHandle {
        let timing = self.timing;
        self.start_with(layers, timing, now_ms)
    }

    /// Begin revealing `layers` with a timing used for this sequence only
    ///
    /// Any running sequence is cancelled first; none of its remaining events
    /// will be emitted. Out-of-range timing values are clamped.
    pub fn start_with(
        &mut self,
        layers: Vec<DamageRingLayer>,
        timing: RevealTiming,
        now_ms: f64,
    ) -> RevealHandle {
        if let Some(previous) = self.active.take() {
            previous.token.cancel();
            log::info!("Reveal sequence {} superseded", previous.id.0);
        }

        let id = SequenceId(self.next_sequence.max(1));
        self.next_sequence = id.0 + 1;

        let sequence = RevealSequence::new(id, layers, &timing, now_ms);
        log::info!(
            "Reveal sequence {} started: {} rings, {} events",
            id.0,
            sequence.layers.len(),
            sequence.timeline.len()
        );

        let handle = RevealHandle {
            sequence: id,
            token: sequence.token.clone(),
        };
        self.active = Some(sequence);
        handle
    }

    /// Stop the running sequence and drop its state
    pub fn cancel(&mut self) {
        if let Some(sequence) = self.active.take() {
            sequence.token.cancel();
            log::info!("Reveal sequence {} cancelled", sequence.id.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_sequence(&self) -> Option<SequenceId> {
        self.active.as_ref().map(|s| s.id)
    }

    /// Per-ring state of the running sequence, in reveal order
    pub fn layer_states(&self) -> &[LayerAnimation] {
        self.active.as_ref().map_or(&[], |s| s.layers.as_slice())
    }

    /// Host time of the next due event, if any
    pub fn next_due_ms(&self) -> Option<f64> {
        let sequence = self.active.as_ref()?;
        sequence.timeline.get(sequence.cursor).map(|e| e.at_ms)
    }

    /// Emit every event due at or before `now_ms`
    ///
    /// Returns the number of events emitted. The sequence's state is dropped
    /// once its `Finished` event has gone out, or as soon as its token is
    /// found cancelled.
    pub fn advance<O: RevealObserver + ?Sized>(&mut self, now_ms: f64, observer: &mut O) -> usize {
        let Some(sequence) = self.active.as_mut() else {
            return 0;
        };

        let mut emitted = 0;
        while let Some(event) = sequence.timeline.get(sequence.cursor).copied() {
            if sequence.token.is_cancelled() {
                log::info!("Reveal sequence {} cancelled by handle", sequence.id.0);
                self.active = None;
                return emitted;
            }
            if event.at_ms > now_ms {
                return emitted;
            }
            sequence.cursor += 1;
            sequence.apply(&event);
            observer.on_event(&event);
            emitted += 1;
        }

        if sequence.token.is_cancelled() {
            log::info!("Reveal sequence {} cancelled by handle", sequence.id.0);
        } else {
            log::info!("Reveal sequence {} finished", sequence.id.0);
        }
        self.active = None;
        emitted
    }
}
