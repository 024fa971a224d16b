//! Scene recipes: one tagged variant per metaphor
//!
//! Composition instead of a subclass hierarchy: every recipe is a plain
//! struct with `build`/`update`/`trigger`, and the single driver in
//! `Scene::frame` dispatches on the tag. Presets come from the verse table,
//! so several verses can share a recipe with different numbers.

pub mod collapse;
pub mod decoherence;
pub mod doubleslit;
pub mod entanglement;
pub mod superposition;
pub mod symmetry;

pub use collapse::Collapse;
pub use decoherence::Decoherence;
pub use doubleslit::DoubleSlit;
pub use entanglement::Entanglement;
pub use superposition::Superposition;
pub use symmetry::SymmetryBreak;

use crate::entity::Entity;
use crate::scene::{Input, SceneEvent, TransitionState};
use crate::transition::TimerSet;
use crate::verses::{SceneKind, VerseRecord};
use glam::Vec3;
use rand::Rng;

pub enum Recipe {
    DoubleSlit(DoubleSlit),
    Collapse(Collapse),
    Entanglement(Entanglement),
    Decoherence(Decoherence),
    SymmetryBreak(SymmetryBreak),
    Superposition(Superposition),
}

impl Recipe {
    pub fn build(verse: &VerseRecord, entities: &mut Vec<Entity>) -> Self {
        match verse.kind {
            SceneKind::DoubleSlit => Recipe::DoubleSlit(DoubleSlit::build(&verse.preset, entities)),
            SceneKind::Collapse => Recipe::Collapse(Collapse::build(&verse.preset, entities)),
            SceneKind::Entanglement => {
                Recipe::Entanglement(Entanglement::build(&verse.preset, entities))
            }
            SceneKind::Decoherence => {
                Recipe::Decoherence(Decoherence::build(&verse.preset, entities))
            }
            SceneKind::SymmetryBreak => {
                Recipe::SymmetryBreak(SymmetryBreak::build(&verse.preset, entities))
            }
            SceneKind::Superposition => {
                Recipe::Superposition(Superposition::build(&verse.preset, entities))
            }
        }
    }

    pub fn update(
        &mut self,
        time: f32,
        dt: f32,
        entities: &mut Vec<Entity>,
        timers: &mut TimerSet<SceneEvent>,
        state: &mut TransitionState,
        events: &[SceneEvent],
    ) {
        match self {
            Recipe::DoubleSlit(r) => r.update(time, dt, entities, timers, state, events),
            Recipe::Collapse(r) => r.update(time, dt, entities, timers, state, events),
            Recipe::Entanglement(r) => r.update(time, dt, entities, timers, state, events),
            Recipe::Decoherence(r) => r.update(time, dt, entities, timers, state, events),
            Recipe::SymmetryBreak(r) => r.update(time, dt, entities, timers, state, events),
            Recipe::Superposition(r) => r.update(time, dt, entities, timers, state, events),
        }
    }

    pub fn trigger(
        &mut self,
        input: Input,
        entities: &mut Vec<Entity>,
        timers: &mut TimerSet<SceneEvent>,
        state: &mut TransitionState,
    ) {
        match self {
            Recipe::DoubleSlit(r) => r.trigger(input, entities, timers, state),
            Recipe::Collapse(r) => r.trigger(input, entities, timers, state),
            Recipe::Entanglement(r) => r.trigger(input, entities, timers, state),
            Recipe::Decoherence(r) => r.trigger(input, entities, timers, state),
            Recipe::SymmetryBreak(r) => r.trigger(input, entities, timers, state),
            Recipe::Superposition(r) => r.trigger(input, entities, timers, state),
        }
    }

    pub fn lines(&self, entities: &[Entity]) -> Vec<(Vec3, Vec3, [f32; 4])> {
        match self {
            Recipe::DoubleSlit(r) => r.lines(),
            Recipe::Entanglement(r) => r.lines(entities),
            _ => Vec::new(),
        }
    }

    pub fn status(&self) -> String {
        match self {
            Recipe::DoubleSlit(r) => r.status(),
            Recipe::Collapse(r) => r.status(),
            Recipe::Entanglement(r) => r.status(),
            Recipe::Decoherence(r) => r.status(),
            Recipe::SymmetryBreak(r) => r.status(),
            Recipe::Superposition(r) => r.status(),
        }
    }

    /// Binary observation flag, where the recipe has one.
    pub fn observed(&self) -> Option<bool> {
        match self {
            Recipe::DoubleSlit(r) => Some(r.observing()),
            Recipe::Collapse(r) => Some(r.observed()),
            Recipe::Entanglement(r) => Some(r.measured()),
            _ => None,
        }
    }

    pub fn coupling(&self) -> Option<f32> {
        match self {
            Recipe::Decoherence(r) => Some(r.coupling()),
            _ => None,
        }
    }

    pub fn amplitude(&self) -> Option<f32> {
        match self {
            Recipe::Superposition(r) => Some(r.amplitude()),
            _ => None,
        }
    }
}

/// Standard normal sample (Box-Muller); enough for visual jitter.
pub(crate) fn gauss<R: Rng>(rng: &mut R) -> f32 {
    let u: f32 = rng.gen_range(1e-6..1.0f32);
    let v: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    (-2.0 * u.ln()).sqrt() * v.cos()
}

/// Uniformly random unit vector.
pub(crate) fn random_axis<R: Rng>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len = v.length();
        if len > 1e-3 && len <= 1.0 {
            return v / len;
        }
    }
}
