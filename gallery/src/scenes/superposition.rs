//! Superposition scene: a breathing probability cloud
//!
//! Purely ambient motion with one knob: the breathing amplitude slider.
//! Several verses reuse this recipe with different presets.

use crate::entity::{Entity, MotionParams};
use crate::motion;
use crate::scene::{Input, SceneEvent, TransitionState};
use crate::scenes::{gauss, random_axis};
use crate::transition::TimerSet;
use crate::verses::ScenePreset;
use common::palette;
use glam::Vec3;
use rand::Rng;

const DEFAULT_AMPLITUDE: f32 = 0.6;

pub struct Superposition {
    amplitude: f32,
}

impl Superposition {
    pub fn build(preset: &ScenePreset, entities: &mut Vec<Entity>) -> Self {
        let mut rng = rand::thread_rng();
        for _ in 0..preset.particles {
            let home = Vec3::new(
                gauss(&mut rng),
                gauss(&mut rng),
                gauss(&mut rng),
            ) * preset.radius * 0.45;
            let shade = rng.gen_range(0.0..1.0);
            let mut e = Entity::new(
                home,
                rng.gen_range(0.04..0.1),
                palette::with_alpha(palette::mix(preset.primary, preset.secondary, shade), 0.7),
            );
            e.params = MotionParams {
                amplitude: rng.gen_range(0.2..0.6),
                frequency: rng.gen_range(0.4..1.2) * preset.speed.max(0.1),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                orbit_radius: rng.gen_range(0.1..0.5),
                axis: random_axis(&mut rng),
                speed: preset.speed * rng.gen_range(0.4..1.1),
            };
            entities.push(e);
        }
        Self {
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    pub fn update(
        &mut self,
        time: f32,
        _dt: f32,
        entities: &mut Vec<Entity>,
        _timers: &mut TimerSet<SceneEvent>,
        _state: &mut TransitionState,
        _events: &[SceneEvent],
    ) {
        for e in entities.iter_mut() {
            let mut p = e.params;
            p.amplitude *= self.amplitude;
            e.position = motion::swirl(e.home, &p, time);
            e.size = e.base_size * motion::breathe(&p, time);
        }
    }

    pub fn trigger(
        &mut self,
        input: Input,
        entities: &mut Vec<Entity>,
        _timers: &mut TimerSet<SceneEvent>,
        state: &mut TransitionState,
    ) {
        match input {
            Input::Amplitude(value) => {
                self.amplitude = value.clamp(0.0, 2.0);
            }
            Input::Reset => {
                self.amplitude = DEFAULT_AMPLITUDE;
                *state = TransitionState::Idle;
                for e in entities.iter_mut() {
                    e.restore();
                }
            }
            _ => {}
        }
    }

    pub fn status(&self) -> String {
        format!("breathing, amplitude {:.2}", self.amplitude)
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::scenes::Recipe;
    use crate::verses::{SceneKind, VERSES};

    fn cloud_scene() -> Scene {
        let verse = VERSES
            .iter()
            .find(|v| v.kind == SceneKind::Superposition)
            .unwrap();
        Scene::build(verse)
    }

    #[test]
    fn amplitude_slider_clamps() {
        let mut scene = cloud_scene();
        scene.trigger(Input::Amplitude(5.0));
        match scene.recipe() {
            Recipe::Superposition(s) => assert_eq!(s.amplitude(), 2.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn zero_amplitude_stills_the_breathing() {
        let mut scene = cloud_scene();
        scene.trigger(Input::Amplitude(0.0));
        scene.frame(0.5);
        for e in &scene.entities {
            assert_eq!(e.size, e.base_size);
        }
    }

    #[test]
    fn primary_trigger_is_ignored() {
        let mut scene = cloud_scene();
        scene.trigger(Input::Primary);
        assert_eq!(scene.state, TransitionState::Idle);
        assert_eq!(scene.timers.pending(), 0);
    }
}
