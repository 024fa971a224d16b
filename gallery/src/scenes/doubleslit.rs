//! Double-slit scene: particles through two slits, fringes on a screen
//!
//! Unobserved, landings follow the interference pattern; watching the
//! slits switches the statistics to two clumps. Toggling the watch off
//! restores the fringe statistics and the pre-toggle look of every entity.

use crate::entity::{Entity, MotionParams};
use crate::scene::{Input, SceneEvent, TransitionState};
use crate::scenes::gauss;
use crate::transition::TimerSet;
use crate::verses::ScenePreset;
use common::palette;
use glam::Vec3;
use rand::Rng;

const SLIT_Y: f32 = 1.1;
const SLIT_GAP: f32 = 0.35;
const WALL_TOP: f32 = 6.0;
const SCREEN_SPAN: f32 = 5.0;
/// Fringe spatial frequency on the screen
const FRINGE_K: f32 = 2.6;
/// Envelope width of the fringe pattern
const FRINGE_SIGMA: f32 = 1.9;
/// Screen markers kept in a ring buffer
const HIT_POOL: usize = 140;

struct Traveler {
    /// y of the slit this particle threads
    slit: f32,
    /// y where it will land on the screen
    landing: f32,
    prev_progress: f32,
}

pub struct DoubleSlit {
    observing: bool,
    travelers: Vec<Traveler>,
    /// Entities[0..travelers] are in flight; the rest are screen markers
    hit_start: usize,
    next_hit: usize,
    half_width: f32,
    speed: f32,
    primary: [f32; 4],
    secondary: [f32; 4],
}

impl DoubleSlit {
    pub fn build(preset: &ScenePreset, entities: &mut Vec<Entity>) -> Self {
        let mut rng = rand::thread_rng();
        let half_width = preset.radius;
        let n = preset.particles;

        let mut travelers = Vec::with_capacity(n);
        for i in 0..n {
            let phase = i as f32 / n as f32;
            let mut e = Entity::new(Vec3::new(-half_width, 0.0, 0.0), 0.09, preset.primary);
            e.params = MotionParams {
                phase,
                speed: preset.speed,
                ..Default::default()
            };
            entities.push(e);
            travelers.push(Traveler {
                slit: if rng.gen_bool(0.5) { SLIT_Y } else { -SLIT_Y },
                landing: sample_fringe(&mut rng),
                prev_progress: phase,
            });
        }

        let hit_start = entities.len();
        for _ in 0..HIT_POOL {
            let mut e = Entity::new(
                Vec3::new(half_width, 0.0, 0.0),
                0.11,
                palette::with_alpha(preset.primary, 0.0),
            );
            e.color[3] = 0.0;
            e.base_color[3] = 0.0;
            entities.push(e);
        }

        Self {
            observing: false,
            travelers,
            hit_start,
            next_hit: 0,
            half_width,
            speed: preset.speed,
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
            if *event == SceneEvent::Settle && *state == TransitionState::Triggered {
                *state = TransitionState::Settled;
            }
        }

        let mut rng = rand::thread_rng();
        let half = self.half_width;

        for (i, traveler) in self.travelers.iter_mut().enumerate() {
            let e = &mut entities[i];
            let progress = (self.speed * time / (2.0 * half) + e.params.phase).fract();

            // Wrap: the particle just landed; register a hit and relaunch
            if progress < traveler.prev_progress {
                let landing = traveler.landing;
                let hit = &mut entities[self.hit_start + self.next_hit];
                hit.position = Vec3::new(half, landing, 0.0);
                hit.color = palette::with_alpha(
                    if self.observing {
                        self.secondary
                    } else {
                        self.primary
                    },
                    0.95,
                );
                self.next_hit = (self.next_hit + 1) % HIT_POOL;

                traveler.slit = if rng.gen_bool(0.5) { SLIT_Y } else { -SLIT_Y };
                traveler.landing = if self.observing {
                    traveler.slit + gauss(&mut rng) * 0.45
                } else {
                    sample_fringe(&mut rng)
                };
            }
            traveler.prev_progress = progress;

            let e = &mut entities[i];
            let x = -half + progress * 2.0 * half;
            let y = if x < 0.0 {
                // Approach: drift from the emitter line toward the slit
                let t = (x + half) / half;
                traveler.slit * t * t
            } else {
                // Departure: spread from the slit toward the landing point
                let t = x / half;
                traveler.slit + (traveler.landing - traveler.slit) * t
            };
            e.position = Vec3::new(x, y, 0.0);
        }

        // Screen markers cool off slowly so the pattern accumulates
        let fade = (-dt * 0.12).exp();
        for e in &mut entities[self.hit_start..] {
            e.color[3] *= fade;
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
            Input::Primary | Input::ToggleObserve => {
                self.observing = !self.observing;
                self.clear_hits(entities);
                for e in &mut entities[..self.travelers.len()] {
                    if self.observing {
                        e.color = self.secondary;
                        e.size = e.base_size * 1.2;
                    } else {
                        e.restore();
                    }
                }
                *state = TransitionState::Triggered;
                timers.schedule(0.6, SceneEvent::Settle);
            }
            Input::Reset => {
                self.observing = false;
                self.clear_hits(entities);
                timers.cancel_all();
                for e in &mut entities[..self.travelers.len()] {
                    e.restore();
                }
                *state = TransitionState::Idle;
            }
            _ => {}
        }
    }

    fn clear_hits(&mut self, entities: &mut [Entity]) {
        for e in &mut entities[self.hit_start..] {
            e.color[3] = 0.0;
        }
        self.next_hit = 0;
    }

    /// Barrier walls and the detection screen.
    pub fn lines(&self) -> Vec<(Vec3, Vec3, [f32; 4])> {
        let wall = palette::MIST;
        let screen = palette::with_alpha(palette::MIST, 0.35);
        let x = self.half_width;
        vec![
            // Barrier below, between, and above the slits
            (
                Vec3::new(0.0, -WALL_TOP, 0.0),
                Vec3::new(0.0, -SLIT_Y - SLIT_GAP, 0.0),
                wall,
            ),
            (
                Vec3::new(0.0, -SLIT_Y + SLIT_GAP, 0.0),
                Vec3::new(0.0, SLIT_Y - SLIT_GAP, 0.0),
                wall,
            ),
            (
                Vec3::new(0.0, SLIT_Y + SLIT_GAP, 0.0),
                Vec3::new(0.0, WALL_TOP, 0.0),
                wall,
            ),
            (
                Vec3::new(x, -SCREEN_SPAN, 0.0),
                Vec3::new(x, SCREEN_SPAN, 0.0),
                screen,
            ),
        ]
    }

    pub fn status(&self) -> String {
        if self.observing {
            "which-path known — landings clump behind each slit".into()
        } else {
            "paths untraced — landings build interference fringes".into()
        }
    }

    pub fn observing(&self) -> bool {
        self.observing
    }
}

/// Rejection-sample the fringe intensity cos²(Ky)·exp(-y²/2σ²).
fn sample_fringe<R: Rng>(rng: &mut R) -> f32 {
    for _ in 0..64 {
        let y = rng.gen_range(-4.0..4.0f32);
        let envelope = (-(y * y) / (2.0 * FRINGE_SIGMA * FRINGE_SIGMA)).exp();
        let intensity = (FRINGE_K * y).cos().powi(2) * envelope;
        if rng.gen::<f32>() < intensity {
            return y;
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::verses::{SceneKind, VERSES};

    fn slit_scene() -> Scene {
        let verse = VERSES
            .iter()
            .find(|v| v.kind == SceneKind::DoubleSlit)
            .unwrap();
        Scene::build(verse)
    }

    #[test]
    fn toggle_twice_restores_visual_state() {
        let mut scene = slit_scene();
        scene.frame(0.016);
        let before: Vec<(f32, [f32; 4])> = scene
            .entities
            .iter()
            .map(|e| (e.size, e.color))
            .collect();

        scene.trigger(Input::ToggleObserve);
        scene.trigger(Input::ToggleObserve);

        for (e, (size, color)) in scene.entities.iter().zip(&before) {
            assert_eq!(e.size, e.base_size);
            assert_eq!(e.base_size, *size);
            // Hit markers were cleared; travelers keep their base color
            assert_eq!(e.color[0..3], color[0..3]);
        }
    }

    #[test]
    fn toggle_flips_observation_flag() {
        let mut scene = slit_scene();
        assert_eq!(scene.recipe().observed(), Some(false));
        scene.trigger(Input::ToggleObserve);
        assert_eq!(scene.recipe().observed(), Some(true));
        assert_eq!(scene.state, TransitionState::Triggered);
    }

    #[test]
    fn settle_timer_moves_state_on() {
        let mut scene = slit_scene();
        scene.trigger(Input::ToggleObserve);
        scene.frame(1.0);
        assert_eq!(scene.state, TransitionState::Settled);
    }

    #[test]
    fn fringe_samples_stay_in_envelope() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let y = sample_fringe(&mut rng);
            assert!(y.abs() <= 4.0);
        }
    }

    #[test]
    fn barrier_has_two_openings() {
        let scene = slit_scene();
        // Three wall segments plus the screen
        assert_eq!(scene.lines().len(), 4);
    }
}
