//! Verse gallery: animated quantum metaphors for the Mūlamadhyamakakārikā
//!
//! Each verse maps to a scene of point/line entities driven by per-frame
//! procedural motion. User input flips state flags and starts timed
//! transitions; navigating verses tears the active scene fully down before
//! the next one is built.

pub mod entity;
pub mod lifecycle;
pub mod motion;
pub mod panel;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod transition;
pub mod verses;
