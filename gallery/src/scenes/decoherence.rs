//! Decoherence scene: a ring of oscillators losing phase alignment
//!
//! Every oscillator starts in phase. Environment coupling injects random
//! phase drift; the coherence metric |⟨e^{iφ}⟩| decays toward the mixed
//! state. A perturbation trigger fires a staggered burst of phase kicks
//! through the scene timers.

use crate::entity::{Entity, MotionParams};
use crate::scene::{Input, SceneEvent, TransitionState};
use crate::scenes::gauss;
use crate::transition::TimerSet;
use crate::verses::ScenePreset;
use common::palette;
use glam::Vec3;
use std::f32::consts::TAU;

pub struct Decoherence {
    coupling: f32,
    phases: Vec<f32>,
    coherence: f32,
    burst_active: bool,
    primary: [f32; 4],
    secondary: [f32; 4],
}

impl Decoherence {
    pub fn build(preset: &ScenePreset, entities: &mut Vec<Entity>) -> Self {
        let n = preset.particles;
        for i in 0..n {
            let angle = i as f32 / n as f32 * TAU;
            let home = Vec3::new(angle.cos(), 0.0, angle.sin()) * preset.radius;
            let mut e = Entity::new(home, 0.14, preset.primary);
            e.params = MotionParams {
                amplitude: 0.55,
                frequency: preset.speed,
                ..Default::default()
            };
            entities.push(e);
        }
        Self {
            coupling: 0.25,
            phases: vec![0.0; n],
            coherence: 1.0,
            burst_active: false,
            primary: preset.primary,
            secondary: preset.secondary,
        }
    }

    pub fn update(
        &mut self,
        time: f32,
        dt: f32,
        entities: &mut Vec<Entity>,
        _timers: &mut TimerSet<SceneEvent>,
        state: &mut TransitionState,
        events: &[SceneEvent],
    ) {
        let mut rng = rand::thread_rng();

        for event in events {
            match event {
                SceneEvent::Flash => {
                    for phase in &mut self.phases {
                        *phase += gauss(&mut rng) * 0.9;
                    }
                }
                SceneEvent::Settle => {
                    self.burst_active = false;
                    *state = TransitionState::Settled;
                }
                SceneEvent::Release => {}
            }
        }

        // Phase diffusion: variance grows linearly with coupling and time
        let sigma = self.coupling * dt.max(0.0).sqrt() * 0.8;
        for phase in &mut self.phases {
            *phase += gauss(&mut rng) * sigma;
        }

        let (mut sum_cos, mut sum_sin) = (0.0f32, 0.0f32);
        for phase in &self.phases {
            sum_cos += phase.cos();
            sum_sin += phase.sin();
        }
        let n = self.phases.len().max(1) as f32;
        self.coherence = (sum_cos * sum_cos + sum_sin * sum_sin).sqrt() / n;

        for (e, phase) in entities.iter_mut().zip(&self.phases) {
            let radial = e.home.normalize_or_zero();
            let swing = e.params.amplitude * (e.params.frequency * time + *phase).sin();
            e.position = e.home + radial * swing;
            // Drifted oscillators shade toward the environment color
            let drift = 0.5 * (1.0 - phase.cos());
            e.color = palette::mix(self.primary, self.secondary, drift);
        }
    }

    pub fn trigger(
        &mut self,
        input: Input,
        entities: &mut Vec<Entity>,
        timers: &mut TimerSet<SceneEvent>,
        state: &mut TransitionState,
    ) {
        match input {
            Input::Coupling(value) => {
                self.coupling = value.clamp(0.0, 2.0);
            }
            Input::Primary => {
                if self.burst_active {
                    return;
                }
                self.burst_active = true;
                *state = TransitionState::Triggered;
                timers.schedule(0.0, SceneEvent::Flash);
                timers.schedule(0.25, SceneEvent::Flash);
                timers.schedule(0.5, SceneEvent::Flash);
                timers.schedule(0.9, SceneEvent::Settle);
            }
            Input::Reset => {
                self.phases.iter_mut().for_each(|p| *p = 0.0);
                self.coherence = 1.0;
                self.burst_active = false;
                timers.cancel_all();
                *state = TransitionState::Idle;
                for e in entities.iter_mut() {
                    e.restore();
                }
            }
            _ => {}
        }
    }

    pub fn status(&self) -> String {
        format!(
            "coherence {:.2} — environment coupling {:.2}",
            self.coherence, self.coupling
        )
    }

    pub fn coupling(&self) -> f32 {
        self.coupling
    }

    pub fn coherence(&self) -> f32 {
        self.coherence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::scenes::Recipe;
    use crate::verses::{SceneKind, VERSES};

    fn ring_scene() -> Scene {
        let verse = VERSES
            .iter()
            .find(|v| v.kind == SceneKind::Decoherence)
            .unwrap();
        Scene::build(verse)
    }

    fn coherence(scene: &Scene) -> f32 {
        match scene.recipe() {
            Recipe::Decoherence(d) => d.coherence(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn coupled_ring_loses_coherence() {
        let mut scene = ring_scene();
        scene.trigger(Input::Coupling(2.0));
        for _ in 0..600 {
            scene.frame(0.05);
        }
        assert!(coherence(&scene) < 0.9);
    }

    #[test]
    fn reset_restores_alignment() {
        let mut scene = ring_scene();
        scene.trigger(Input::Coupling(2.0));
        for _ in 0..200 {
            scene.frame(0.05);
        }
        scene.trigger(Input::Reset);
        assert_eq!(coherence(&scene), 1.0);
        assert_eq!(scene.state, TransitionState::Idle);
    }

    #[test]
    fn perturbation_burst_is_guarded_while_in_flight() {
        let mut scene = ring_scene();
        scene.trigger(Input::Primary);
        let pending = scene.timers.pending();
        // Re-trigger while the burst is still scheduled: no extra timers
        scene.trigger(Input::Primary);
        assert_eq!(scene.timers.pending(), pending);
        scene.frame(1.0);
        assert_eq!(scene.state, TransitionState::Settled);
        // Burst finished; the trigger arms again
        scene.trigger(Input::Primary);
        assert!(scene.timers.pending() > 0);
    }

    #[test]
    fn coupling_slider_clamps() {
        let mut scene = ring_scene();
        scene.trigger(Input::Coupling(99.0));
        match scene.recipe() {
            Recipe::Decoherence(d) => assert_eq!(d.coupling(), 2.0),
            _ => unreachable!(),
        }
    }
}
