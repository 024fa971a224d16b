//! Lifecycle manager: exactly one active scene
//!
//! Owns the verse table and at most one live scene. `activate` tears the
//! previous scene fully down (timers cancelled, entities dropped) before
//! the next is built, in one synchronous step, so a stale scene can never
//! be stepped and no timer survives navigation.

use crate::scene::{Input, Scene};
use crate::verses::{VerseRecord, VERSES};

pub struct Gallery {
    verses: &'static [VerseRecord],
    index: usize,
    active: Option<Scene>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::with_verses(VERSES)
    }

    pub fn with_verses(verses: &'static [VerseRecord]) -> Self {
        Self {
            verses,
            index: 0,
            active: None,
        }
    }

    /// Switch to the verse at `index` (clamped). Teardown of the old scene
    /// completes before the new scene exists.
    pub fn activate(&mut self, index: usize) {
        if self.verses.is_empty() {
            log::warn!("no verses to activate");
            return;
        }
        let index = if index >= self.verses.len() {
            log::warn!("verse index {} out of range, clamping", index);
            self.verses.len() - 1
        } else {
            index
        };

        if let Some(mut old) = self.active.take() {
            old.teardown();
        }

        self.index = index;
        let verse = &self.verses[index];
        self.active = Some(Scene::build(verse));
        log::info!(
            "activated verse {}.{} ({})",
            verse.chapter,
            verse.number,
            verse.kind.label()
        );
    }

    pub fn next(&mut self) {
        if !self.verses.is_empty() {
            self.activate((self.index + 1) % self.verses.len());
        }
    }

    pub fn prev(&mut self) {
        if !self.verses.is_empty() {
            let len = self.verses.len();
            self.activate((self.index + len - 1) % len);
        }
    }

    /// Tear down without a replacement. Calling twice is a no-op.
    pub fn deactivate(&mut self) {
        if let Some(mut scene) = self.active.take() {
            scene.teardown();
        }
    }

    /// Step only the active scene.
    pub fn frame(&mut self, dt: f32) {
        if let Some(scene) = &mut self.active {
            scene.frame(dt);
        }
    }

    pub fn trigger(&mut self, input: Input) {
        if let Some(scene) = &mut self.active {
            scene.trigger(input);
        }
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.active.as_ref()
    }

    pub fn verse(&self) -> Option<&'static VerseRecord> {
        self.verses.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneEvent;

    #[test]
    fn activation_replaces_the_previous_scene() {
        let mut gallery = Gallery::new();
        gallery.activate(0);
        gallery.frame(0.1);
        gallery.frame(0.1);
        assert_eq!(gallery.scene().unwrap().frames, 2);

        gallery.activate(1);
        // The new scene starts from zero: no frames leaked from the old one
        assert_eq!(gallery.scene().unwrap().frames, 0);
        assert_eq!(gallery.index(), 1);
        gallery.frame(0.1);
        assert_eq!(gallery.scene().unwrap().frames, 1);
    }

    #[test]
    fn activation_cancels_old_timers_before_building() {
        let mut gallery = Gallery::new();
        gallery.activate(0);
        if let Some(scene) = gallery.active.as_mut() {
            scene.timers.schedule(5.0, SceneEvent::Settle);
        }
        gallery.activate(1);
        assert_eq!(gallery.scene().unwrap().timers.pending(), 0);
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut gallery = Gallery::new();
        gallery.activate(0);
        gallery.deactivate();
        gallery.deactivate();
        assert!(gallery.scene().is_none());
        // Stepping with nothing active is harmless
        gallery.frame(0.1);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut gallery = Gallery::new();
        let len = gallery.len();
        gallery.activate(len - 1);
        gallery.next();
        assert_eq!(gallery.index(), 0);
        gallery.prev();
        assert_eq!(gallery.index(), len - 1);
    }

    #[test]
    fn empty_gallery_never_panics() {
        let mut gallery = Gallery::with_verses(&[]);
        assert!(gallery.verse().is_none());
        gallery.activate(0);
        gallery.next();
        gallery.prev();
        gallery.frame(0.1);
        assert!(gallery.scene().is_none());
    }

    #[test]
    fn out_of_range_activation_clamps() {
        let mut gallery = Gallery::new();
        gallery.activate(9999);
        assert_eq!(gallery.index(), gallery.len() - 1);
        assert!(gallery.scene().is_some());
    }

    #[test]
    fn triggers_reach_only_the_active_scene() {
        let mut gallery = Gallery::new();
        // No active scene: trigger is a no-op, not a panic
        gallery.trigger(Input::Primary);
        gallery.activate(0);
        gallery.trigger(Input::Primary);
        assert!(gallery.scene().is_some());
    }
}
