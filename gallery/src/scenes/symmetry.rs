//! Symmetry-breaking scene: a balanced ring tips into one of two wells
//!
//! Particles shimmer on the ridge of a symmetric potential until the
//! trigger tips them, staggered, into a randomly chosen well. Which well
//! is history, not essence; reset restores the ridge.

use crate::entity::{Entity, MotionParams};
use crate::motion;
use crate::scene::{Input, SceneEvent, TransitionState};
use crate::scenes::gauss;
use crate::transition::{Easing, TimerSet, Transition};
use crate::verses::ScenePreset;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

struct Settling {
    progress: Transition,
    starts: Vec<Vec3>,
    targets: Vec<Vec3>,
    /// Per-entity delay fraction so the fall ripples around the ring
    staggers: Vec<f32>,
}

pub struct SymmetryBreak {
    broken: bool,
    chose_right: bool,
    settling: Option<Settling>,
    well_offset: f32,
    secondary: [f32; 4],
}

impl SymmetryBreak {
    pub fn build(preset: &ScenePreset, entities: &mut Vec<Entity>) -> Self {
        let n = preset.particles;
        for i in 0..n {
            let angle = i as f32 / n as f32 * TAU;
            let home = Vec3::new(angle.cos(), 0.0, angle.sin()) * preset.radius;
            let mut e = Entity::new(home, 0.1, preset.primary);
            e.params = MotionParams {
                amplitude: 0.12,
                frequency: 3.0,
                phase: angle * 2.0,
                ..Default::default()
            };
            entities.push(e);
        }
        Self {
            broken: false,
            chose_right: false,
            settling: None,
            well_offset: preset.radius * 0.9,
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
        for event in events {
            if *event == SceneEvent::Settle {
                *state = TransitionState::Settled;
                for e in entities.iter_mut() {
                    e.color = self.secondary;
                }
            }
        }

        if let Some(settling) = &mut self.settling {
            settling.progress.advance(dt);
            let p = settling.progress.value();
            for (i, e) in entities.iter_mut().enumerate() {
                let stagger = settling.staggers[i];
                // Each particle waits its turn, then eases over its window
                let local = ((p - stagger) / (1.0 - stagger).max(1e-3)).clamp(0.0, 1.0);
                let t = Easing::QuadOut.apply(local);
                e.position = settling.starts[i].lerp(settling.targets[i], t);
            }
        } else {
            for e in entities.iter_mut() {
                let radial = e.home.normalize_or_zero();
                e.position = motion::oscillate(e.home, radial, &e.params, time);
            }
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
            Input::Primary => {
                if self.broken {
                    return;
                }
                self.broken = true;
                *state = TransitionState::Triggered;

                let mut rng = rand::thread_rng();
                self.chose_right = rng.gen_bool(0.5);
                let well = Vec3::new(
                    if self.chose_right {
                        self.well_offset
                    } else {
                        -self.well_offset
                    },
                    -1.2,
                    0.0,
                );

                let starts: Vec<Vec3> = entities.iter().map(|e| e.position).collect();
                let targets = entities
                    .iter()
                    .map(|_| {
                        well + Vec3::new(
                            gauss(&mut rng) * 0.5,
                            gauss(&mut rng) * 0.2,
                            gauss(&mut rng) * 0.5,
                        )
                    })
                    .collect();
                let staggers = (0..entities.len())
                    .map(|_| rng.gen_range(0.0..0.5f32))
                    .collect();

                self.settling = Some(Settling {
                    progress: Transition::new(0.0, 1.0, 1.6, Easing::SineInOut),
                    starts,
                    targets,
                    staggers,
                });
                timers.schedule(2.1, SceneEvent::Settle);
            }
            Input::Reset => {
                self.broken = false;
                self.settling = None;
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
        if self.broken {
            format!(
                "settled into the {} well",
                if self.chose_right { "right" } else { "left" }
            )
        } else {
            "balanced on the ridge — tip it".into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::verses::{SceneKind, VERSES};

    fn ridge_scene() -> Scene {
        let verse = VERSES
            .iter()
            .find(|v| v.kind == SceneKind::SymmetryBreak)
            .unwrap();
        Scene::build(verse)
    }

    #[test]
    fn tipping_is_one_shot() {
        let mut scene = ridge_scene();
        scene.trigger(Input::Primary);
        let pending = scene.timers.pending();
        scene.trigger(Input::Primary);
        assert_eq!(scene.timers.pending(), pending);
    }

    #[test]
    fn everyone_ends_in_the_same_well() {
        let mut scene = ridge_scene();
        scene.trigger(Input::Primary);
        for _ in 0..40 {
            scene.frame(0.1);
        }
        assert_eq!(scene.state, TransitionState::Settled);
        let side = scene.entities[0].position.x.signum();
        for e in &scene.entities {
            assert_eq!(e.position.x.signum(), side);
            assert!(e.position.y < 0.0);
        }
    }

    #[test]
    fn reset_restores_the_ridge() {
        let mut scene = ridge_scene();
        scene.trigger(Input::Primary);
        scene.frame(3.0);
        scene.trigger(Input::Reset);
        assert_eq!(scene.state, TransitionState::Idle);
        for e in &scene.entities {
            assert_eq!(e.position, e.home);
            assert_eq!(e.color, e.base_color);
        }
    }
}
