//! Timed transitions and scene-scoped timers
//!
//! A `Transition` interpolates one value from A to B over a fixed duration
//! and reports its completion edge exactly once. A `TimerSet` is the scoped
//! cancellation token for a scene: every one-shot registered during the
//! scene's lifetime dies with it.

/// Easing curves available to triggers. Endpoint-exact: f(0)=0, f(1)=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadOut,
    CubicInOut,
    SineInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Easing::SineInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
        }
    }
}

/// Interpolates a scalar from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone)]
pub struct Transition {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    completed: bool,
}

impl Transition {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(1e-3),
            elapsed: 0.0,
            easing,
            completed: false,
        }
    }

    /// Step the transition. Returns `true` on the frame it completes and
    /// never again, so completion side effects fire at most once.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.completed {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.completed = true;
            return true;
        }
        false
    }

    pub fn value(&self) -> f32 {
        let t = self.easing.apply(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn finished(&self) -> bool {
        self.completed
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

#[derive(Debug, Clone)]
struct Timer<E> {
    remaining: f32,
    seq: u64,
    event: E,
}

/// One-shot timers owned by a scene. `cancel_all` on teardown guarantees
/// no timer outlives the scene that scheduled it.
#[derive(Debug, Clone)]
pub struct TimerSet<E> {
    pending: Vec<Timer<E>>,
    next_seq: u64,
}

impl<E> Default for TimerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerSet<E> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, delay: f32, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Timer {
            remaining: delay.max(0.0),
            seq,
            event,
        });
    }

    /// Advance all timers by `dt` and return the events that came due,
    /// ordered by expiry time (scheduling order breaks ties).
    pub fn poll(&mut self, dt: f32) -> Vec<E> {
        for timer in &mut self.pending {
            timer.remaining -= dt;
        }
        let mut due: Vec<Timer<E>> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].remaining <= 0.0 {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| {
            a.remaining
                .partial_cmp(&b.remaining)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|t| t.event).collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_endpoint_exact() {
        for easing in [
            Easing::Linear,
            Easing::QuadOut,
            Easing::CubicInOut,
            Easing::SineInOut,
        ] {
            assert!((easing.apply(0.0)).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn transition_completion_edge_fires_once() {
        let mut tr = Transition::new(0.0, 10.0, 1.0, Easing::Linear);
        assert!(!tr.advance(0.5));
        assert!(tr.advance(0.6));
        // Further stepping never reports completion again
        assert!(!tr.advance(1.0));
        assert!(!tr.advance(1.0));
        assert_eq!(tr.value(), 10.0);
    }

    #[test]
    fn transition_value_tracks_easing() {
        let mut tr = Transition::new(2.0, 4.0, 2.0, Easing::Linear);
        tr.advance(1.0);
        assert!((tr.value() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn timers_fire_in_expiry_order() {
        let mut timers = TimerSet::new();
        timers.schedule(0.5, "late");
        timers.schedule(0.1, "early");
        timers.schedule(0.3, "middle");
        let events = timers.poll(1.0);
        assert_eq!(events, vec!["early", "middle", "late"]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn timers_only_fire_when_due() {
        let mut timers = TimerSet::new();
        timers.schedule(0.5, 1u8);
        timers.schedule(1.5, 2u8);
        assert_eq!(timers.poll(1.0), vec![1]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.poll(1.0), vec![2]);
    }

    #[test]
    fn cancel_all_silences_pending_timers() {
        let mut timers = TimerSet::new();
        timers.schedule(0.1, ());
        timers.schedule(0.2, ());
        timers.cancel_all();
        assert!(timers.poll(10.0).is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn tie_break_is_scheduling_order() {
        let mut timers = TimerSet::new();
        timers.schedule(0.2, "first");
        timers.schedule(0.2, "second");
        assert_eq!(timers.poll(0.2), vec!["first", "second"]);
    }
}
