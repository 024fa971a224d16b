//! Entanglement scene: a correlated pair and the link between them
//!
//! Two particles orbit in counter-phase joined by a link line. Measuring
//! either fixes both into anti-correlated colors at once and burns the
//! link away; re-measuring is guarded until reset.

use crate::entity::{Entity, MotionParams};
use crate::motion;
use crate::scene::{Input, SceneEvent, TransitionState};
use crate::scenes::random_axis;
use crate::transition::{Easing, TimerSet, Transition};
use crate::verses::ScenePreset;
use common::palette;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Ambient dust particles around the pair
const DUST: usize = 40;

pub struct Entanglement {
    measured: bool,
    flash: Option<Transition>,
    primary: [f32; 4],
    secondary: [f32; 4],
}

impl Entanglement {
    pub fn build(preset: &ScenePreset, entities: &mut Vec<Entity>) -> Self {
        let mut rng = rand::thread_rng();

        for phase in [0.0, PI] {
            let mut e = Entity::new(Vec3::ZERO, 0.45, palette::MIST);
            e.params = MotionParams {
                phase,
                orbit_radius: preset.radius,
                axis: Vec3::Y,
                speed: preset.speed,
                ..Default::default()
            };
            entities.push(e);
        }

        for _ in 0..DUST {
            let mut e = Entity::new(
                Vec3::ZERO,
                rng.gen_range(0.03..0.07),
                palette::with_alpha(palette::MIST, 0.3),
            );
            e.params = MotionParams {
                phase: rng.gen_range(0.0..2.0 * PI),
                orbit_radius: preset.radius * rng.gen_range(1.3..2.2),
                axis: random_axis(&mut rng),
                speed: preset.speed * rng.gen_range(0.2..0.6),
                ..Default::default()
            };
            entities.push(e);
        }

        Self {
            measured: false,
            flash: None,
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
        for event in events {
            match event {
                // Measurement accent over; sizes relax, colors stay fixed
                SceneEvent::Release => {
                    for e in entities.iter_mut().take(2) {
                        e.size = e.base_size;
                    }
                }
                SceneEvent::Settle => *state = TransitionState::Settled,
                SceneEvent::Flash => {}
            }
        }

        if let Some(flash) = &mut self.flash {
            flash.advance(dt);
        }

        for e in entities.iter_mut() {
            e.position = motion::orbit(Vec3::ZERO, &e.params, time);
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
                if self.measured {
                    return;
                }
                self.measured = true;
                *state = TransitionState::Triggered;

                let up_first = rand::thread_rng().gen_bool(0.5);
                let (a, b) = if up_first {
                    (self.primary, self.secondary)
                } else {
                    (self.secondary, self.primary)
                };
                entities[0].color = a;
                entities[1].color = b;
                entities[0].size = entities[0].base_size * 1.35;
                entities[1].size = entities[1].base_size * 1.35;

                self.flash = Some(Transition::new(0.9, 0.0, 1.2, Easing::SineInOut));
                timers.schedule(0.8, SceneEvent::Release);
                timers.schedule(1.4, SceneEvent::Settle);
            }
            Input::Reset => {
                self.measured = false;
                self.flash = None;
                timers.cancel_all();
                *state = TransitionState::Idle;
                for e in entities.iter_mut() {
                    e.restore();
                }
            }
            _ => {}
        }
    }

    /// The shared-state link, while any correlation is left to show.
    pub fn lines(&self, entities: &[Entity]) -> Vec<(Vec3, Vec3, [f32; 4])> {
        if entities.len() < 2 {
            return Vec::new();
        }
        let alpha = match (&self.flash, self.measured) {
            (_, false) => 0.85,
            (Some(flash), true) => flash.value(),
            (None, true) => 0.0,
        };
        if alpha <= 0.01 {
            return Vec::new();
        }
        vec![(
            entities[0].position,
            entities[1].position,
            palette::with_alpha(palette::VIOLET, alpha),
        )]
    }

    pub fn status(&self) -> String {
        if self.measured {
            "measured — outcomes anti-correlated, link consumed".into()
        } else {
            "entangled pair — measure either one".into()
        }
    }

    pub fn measured(&self) -> bool {
        self.measured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::verses::{SceneKind, VERSES};

    fn pair_scene() -> Scene {
        let verse = VERSES
            .iter()
            .find(|v| v.kind == SceneKind::Entanglement)
            .unwrap();
        Scene::build(verse)
    }

    #[test]
    fn measurement_anticorrelates_the_pair() {
        let mut scene = pair_scene();
        scene.trigger(Input::Primary);
        let a = scene.entities[0].color;
        let b = scene.entities[1].color;
        assert_ne!(a, b);
        assert_eq!(scene.recipe().observed(), Some(true));
    }

    #[test]
    fn second_measurement_is_a_no_op() {
        let mut scene = pair_scene();
        scene.trigger(Input::Primary);
        let colors = (scene.entities[0].color, scene.entities[1].color);
        scene.trigger(Input::Primary);
        assert_eq!(colors, (scene.entities[0].color, scene.entities[1].color));
    }

    #[test]
    fn link_fades_after_measurement() {
        let mut scene = pair_scene();
        assert_eq!(scene.lines().len(), 1);
        scene.trigger(Input::Primary);
        for _ in 0..30 {
            scene.frame(0.1);
        }
        assert!(scene.lines().is_empty());
        assert_eq!(scene.state, TransitionState::Settled);
    }

    #[test]
    fn release_timer_relaxes_the_accent() {
        let mut scene = pair_scene();
        scene.trigger(Input::Primary);
        assert!(scene.entities[0].size > scene.entities[0].base_size);
        scene.frame(1.0);
        assert_eq!(scene.entities[0].size, scene.entities[0].base_size);
    }

    #[test]
    fn pair_orbits_in_counter_phase() {
        let mut scene = pair_scene();
        scene.frame(0.3);
        let a = scene.entities[0].position;
        let b = scene.entities[1].position;
        // Opposite sides of the shared center
        assert!((a + b).length() < 1e-3);
    }
}
