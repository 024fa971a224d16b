//! Collapse scene: a superposed cloud fixed by a single observation
//!
//! The cloud orbits freely until the first observation, which gathers
//! every point toward one randomly measured site. The `observed` guard
//! makes any further observation a no-op until reset.

use crate::entity::{Entity, MotionParams};
use crate::scene::{Input, SceneEvent, TransitionState};
use crate::scenes::{gauss, random_axis};
use crate::transition::{Easing, TimerSet, Transition};
use crate::verses::ScenePreset;
use common::palette;
use glam::Vec3;
use rand::Rng;

/// Candidate outcomes the measurement can land on
const EIGEN_SITES: [Vec3; 3] = [
    Vec3::new(2.4, 0.2, 0.0),
    Vec3::new(-1.8, 1.5, 0.8),
    Vec3::new(-0.6, -1.9, -1.2),
];

struct Gather {
    progress: Transition,
    starts: Vec<Vec3>,
    offsets: Vec<Vec3>,
    target: Vec3,
}

pub struct Collapse {
    observed: bool,
    collapse_count: u32,
    gather: Option<Gather>,
    secondary: [f32; 4],
}

impl Collapse {
    pub fn build(preset: &ScenePreset, entities: &mut Vec<Entity>) -> Self {
        let mut rng = rand::thread_rng();
        for _ in 0..preset.particles {
            let radius = (preset.radius + gauss(&mut rng) * preset.radius * 0.25).max(0.4);
            let mut e = Entity::new(
                Vec3::ZERO,
                rng.gen_range(0.05..0.12),
                palette::with_alpha(preset.primary, 0.75),
            );
            e.params = MotionParams {
                amplitude: rng.gen_range(0.1..0.4),
                frequency: rng.gen_range(0.5..1.5),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
                orbit_radius: radius,
                axis: random_axis(&mut rng),
                speed: preset.speed * rng.gen_range(0.5..1.5),
            };
            entities.push(e);
        }
        Self {
            observed: false,
            collapse_count: 0,
            gather: None,
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
                    e.size = e.base_size * 0.55;
                    e.color = self.secondary;
                }
            }
        }

        if let Some(gather) = &mut self.gather {
            gather.progress.advance(dt);
            let t = gather.progress.value();
            for ((e, start), offset) in entities
                .iter_mut()
                .zip(&gather.starts)
                .zip(&gather.offsets)
            {
                e.position = start.lerp(gather.target + *offset, t);
            }
        } else {
            for e in entities.iter_mut() {
                e.position = crate::motion::swirl(Vec3::ZERO, &e.params, time);
                e.size = e.base_size * crate::motion::breathe(&e.params, time);
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
                if self.observed {
                    return;
                }
                self.observed = true;
                self.collapse_count += 1;
                *state = TransitionState::Triggered;

                let mut rng = rand::thread_rng();
                let target = EIGEN_SITES[rng.gen_range(0..EIGEN_SITES.len())];
                let starts = entities.iter().map(|e| e.position).collect();
                let offsets = entities
                    .iter()
                    .map(|_| {
                        Vec3::new(gauss(&mut rng), gauss(&mut rng), gauss(&mut rng)) * 0.28
                    })
                    .collect();
                self.gather = Some(Gather {
                    progress: Transition::new(0.0, 1.0, 1.4, Easing::CubicInOut),
                    starts,
                    offsets,
                    target,
                });
                timers.schedule(1.8, SceneEvent::Settle);
            }
            Input::Reset => {
                self.observed = false;
                self.gather = None;
                // A pending settle must not land on the reset cloud
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
        if self.observed {
            "collapsed — one outcome registered".into()
        } else {
            "superposed — observe to collapse".into()
        }
    }

    pub fn observed(&self) -> bool {
        self.observed
    }

    pub fn collapse_count(&self) -> u32 {
        self.collapse_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::scenes::Recipe;
    use crate::verses::{SceneKind, VERSES};

    fn collapse_scene() -> Scene {
        let verse = VERSES
            .iter()
            .find(|v| v.kind == SceneKind::Collapse)
            .unwrap();
        Scene::build(verse)
    }

    fn counter(scene: &Scene) -> u32 {
        match scene.recipe() {
            Recipe::Collapse(c) => c.collapse_count(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn first_click_collapses_exactly_once() {
        let mut scene = collapse_scene();
        assert_eq!(scene.recipe().observed(), Some(false));

        scene.trigger(Input::Primary);
        assert_eq!(scene.recipe().observed(), Some(true));
        assert_eq!(counter(&scene), 1);
        assert_eq!(scene.state, TransitionState::Triggered);

        // Second click in rapid succession: guarded, no second collapse
        scene.trigger(Input::Primary);
        assert_eq!(scene.recipe().observed(), Some(true));
        assert_eq!(counter(&scene), 1);
    }

    #[test]
    fn collapse_settles_through_the_timer() {
        let mut scene = collapse_scene();
        scene.trigger(Input::Primary);
        assert_eq!(scene.timers.pending(), 1);
        scene.frame(2.0);
        assert_eq!(scene.state, TransitionState::Settled);
        assert_eq!(scene.timers.pending(), 0);
    }

    #[test]
    fn gathered_points_reach_their_site() {
        let mut scene = collapse_scene();
        scene.trigger(Input::Primary);
        for _ in 0..40 {
            scene.frame(0.1);
        }
        // All points sit within jitter distance of one shared site
        let site = EIGEN_SITES
            .iter()
            .min_by(|a, b| {
                let da = (scene.entities[0].position - **a).length();
                let db = (scene.entities[0].position - **b).length();
                da.partial_cmp(&db).unwrap()
            })
            .unwrap();
        for e in &scene.entities {
            assert!((e.position - *site).length() < 2.0);
        }
    }

    #[test]
    fn reset_before_settle_cancels_the_timer() {
        let mut scene = collapse_scene();
        scene.trigger(Input::Primary);
        scene.trigger(Input::Reset);
        assert_eq!(scene.timers.pending(), 0);
        scene.frame(2.0);
        // The stale settle never lands: no settled recolor, state untouched
        assert_eq!(scene.state, TransitionState::Idle);
        for e in &scene.entities {
            assert_eq!(e.color, e.base_color);
        }
    }

    #[test]
    fn reset_returns_to_superposition() {
        let mut scene = collapse_scene();
        scene.trigger(Input::Primary);
        scene.frame(2.0);
        scene.trigger(Input::Reset);
        assert_eq!(scene.recipe().observed(), Some(false));
        assert_eq!(scene.state, TransitionState::Idle);
        for e in &scene.entities {
            assert_eq!(e.size, e.base_size);
            assert_eq!(e.color, e.base_color);
        }
    }
}
