//! Timed stroke-by-stroke replay of a stored artwork.
//!
//! The scheduler is cooperative: the host calls [`ReplayScheduler::advance`]
//! with the current time (typically once per frame) and every tick that has
//! come due fires in order. Ticks are exactly one delay apart regardless of
//! how late `advance` is called.

mod timer;

pub use timer::{TickId, TickTimer};

use crate::artwork::PathList;
use crate::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Replay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayState {
    #[default]
    Idle,
    Replaying,
    Complete,
}

/// Position of the next point to reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayCursor {
    pub path_index: usize,
    pub point_index: usize,
}

/// Progressively reveals a path list, one point per tick.
#[derive(Debug)]
pub struct ReplayScheduler {
    source: Option<PathList>,
    delay: Duration,
    state: ReplayState,
    revealed: Vec<Path>,
    cursor: ReplayCursor,
    timer: TickTimer,
    ticks: usize,
    revealed_points: usize,
}

impl ReplayScheduler {
    /// Create an idle scheduler revealing one point every `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            source: None,
            delay,
            state: ReplayState::Idle,
            revealed: Vec::new(),
            cursor: ReplayCursor::default(),
            timer: TickTimer::new(),
            ticks: 0,
            revealed_points: 0,
        }
    }

    pub fn state(&self) -> ReplayState {
        self.state
    }

    pub fn is_replaying(&self) -> bool {
        self.state == ReplayState::Replaying
    }

    pub fn is_complete(&self) -> bool {
        self.state == ReplayState::Complete
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the per-point delay. Takes effect from the next scheduled tick.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn source(&self) -> Option<&PathList> {
        self.source.as_ref()
    }

    /// Paths revealed so far.
    pub fn revealed(&self) -> &[Path] {
        &self.revealed
    }

    pub fn cursor(&self) -> ReplayCursor {
        self.cursor
    }

    /// Ticks fired since the last start.
    ///
    /// A full replay fires one tick per point, one per path to step past its
    /// end and one final tick that completes it, so the total is
    /// `points + paths + 1` rather than [`Self::revealed_points`].
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Points revealed since the last start.
    pub fn revealed_points(&self) -> usize {
        self.revealed_points
    }

    /// Fraction of source points revealed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.total_points();
        if total == 0 {
            return if self.is_complete() { 1.0 } else { 0.0 };
        }
        self.revealed_points as f64 / total as f64
    }

    /// When the next tick fires, if one is pending.
    pub fn next_due(&self) -> Option<Instant> {
        self.timer.due()
    }

    pub fn has_pending_tick(&self) -> bool {
        self.timer.is_pending()
    }

    fn total_points(&self) -> usize {
        self.source
            .as_ref()
            .map(|paths| paths.iter().map(Path::len).sum())
            .unwrap_or(0)
    }

    /// Point the scheduler at a different path list.
    ///
    /// Does nothing if `source` is the same list (by reference). Otherwise the
    /// in-flight tick is cancelled and the replay restarts from the beginning,
    /// or goes idle for an empty or absent list. Returns whether the source
    /// changed.
    pub fn set_source(&mut self, source: Option<PathList>, now: Instant) -> bool {
        let unchanged = match (&self.source, &source) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.timer.cancel();
        self.source = source;
        if self.source.as_ref().is_some_and(|paths| !paths.is_empty()) {
            self.start(now);
        } else {
            self.reset();
        }
        true
    }

    /// Restart the replay from the first point. The first tick fires one
    /// delay after `now`.
    pub fn start(&mut self, now: Instant) {
        self.timer.cancel();
        self.clear_progress();
        if self.source.is_none() {
            self.state = ReplayState::Idle;
            return;
        }
        self.state = ReplayState::Replaying;
        self.timer.schedule(now + self.delay);
        log::debug!("Replay started ({} points)", self.total_points());
    }

    /// Reveal everything at once and stop.
    pub fn skip_to_end(&mut self) {
        self.timer.cancel();
        self.revealed = self.source.as_deref().map(<[Path]>::to_vec).unwrap_or_default();
        self.revealed_points = self.total_points();
        self.cursor = ReplayCursor {
            path_index: self.revealed.len(),
            point_index: 0,
        };
        self.state = ReplayState::Complete;
    }

    /// Stop and clear the revealed paths.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.clear_progress();
        self.state = ReplayState::Idle;
    }

    fn clear_progress(&mut self) {
        self.revealed.clear();
        self.cursor = ReplayCursor::default();
        self.ticks = 0;
        self.revealed_points = 0;
    }

    /// Fire every tick due at `now`. Returns how many fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some((_, due)) = self.timer.take_due(now) {
            self.tick(due);
            fired += 1;
        }
        fired
    }

    fn tick(&mut self, fired_at: Instant) {
        self.ticks += 1;
        let Some(source) = self.source.clone() else {
            self.state = ReplayState::Idle;
            return;
        };

        let Some(path) = source.get(self.cursor.path_index) else {
            self.state = ReplayState::Complete;
            log::debug!("Replay complete after {} ticks", self.ticks);
            return;
        };

        // Entering a path reveals it even when it has no points
        if self.revealed.len() == self.cursor.path_index {
            self.revealed.push(path.empty_like());
        }

        match path.points().get(self.cursor.point_index) {
            Some(&point) => {
                if let Some(current) = self.revealed.last_mut() {
                    current.points.push(point);
                }
                self.cursor.point_index += 1;
                self.revealed_points += 1;
            }
            None => {
                self.cursor.path_index += 1;
                self.cursor.point_index = 0;
            }
        }

        self.timer.schedule(fired_at + self.delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::InkColor;
    use crate::path::StrokePoint;

    const DELAY: Duration = Duration::from_millis(10);

    fn path(offset: f64, points: usize) -> Path {
        let points = (0..points)
            .map(|i| StrokePoint::new(offset + i as f64, offset))
            .collect();
        Path::new(points, InkColor::default(), 4.0, 0.8).unwrap()
    }

    fn artwork_a() -> PathList {
        vec![path(0.0, 3), path(100.0, 2)].into()
    }

    fn artwork_b() -> PathList {
        vec![path(500.0, 4)].into()
    }

    fn run_to_end(scheduler: &mut ReplayScheduler, t0: Instant) -> Instant {
        let mut now = t0;
        while scheduler.is_replaying() {
            now += DELAY;
            scheduler.advance(now);
        }
        now
    }

    #[test]
    fn test_starts_idle() {
        let scheduler = ReplayScheduler::new(DELAY);
        assert_eq!(scheduler.state(), ReplayState::Idle);
        assert!(!scheduler.has_pending_tick());
    }

    #[test]
    fn test_one_point_per_delay() {
        let t0 = Instant::now();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(artwork_a()), t0);
        assert!(scheduler.is_replaying());

        assert_eq!(scheduler.advance(t0 + Duration::from_millis(9)), 0);
        assert_eq!(scheduler.advance(t0 + DELAY), 1);
        assert_eq!(scheduler.revealed().len(), 1);
        assert_eq!(scheduler.revealed()[0].len(), 1);

        // A late frame catches up on every missed tick
        assert_eq!(scheduler.advance(t0 + DELAY * 3), 2);
        assert_eq!(scheduler.revealed()[0].len(), 3);
        assert_eq!(scheduler.next_due(), Some(t0 + DELAY * 4));
    }

    #[test]
    fn test_full_replay_matches_source() {
        let t0 = Instant::now();
        let source = artwork_a();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(source.clone()), t0);
        run_to_end(&mut scheduler, t0);

        assert!(scheduler.is_complete());
        assert_eq!(scheduler.revealed(), &source[..]);
        assert_eq!(scheduler.revealed_points(), 5);
        assert!(!scheduler.has_pending_tick());
        assert_eq!(scheduler.progress(), 1.0);
    }

    #[test]
    fn test_replays_are_repeatable() {
        let t0 = Instant::now();
        let source = artwork_a();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(source.clone()), t0);
        let t1 = run_to_end(&mut scheduler, t0);
        let first = (scheduler.ticks(), scheduler.revealed_points(), scheduler.revealed().to_vec());

        scheduler.start(t1);
        run_to_end(&mut scheduler, t1);
        let second = (scheduler.ticks(), scheduler.revealed_points(), scheduler.revealed().to_vec());

        assert_eq!(first, second);
        assert_eq!(second.1, 5);
    }

    #[test]
    fn test_skip_to_end_stops_ticks() {
        let t0 = Instant::now();
        let source = artwork_a();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(source.clone()), t0);
        scheduler.advance(t0 + DELAY * 2);

        scheduler.skip_to_end();
        assert!(scheduler.is_complete());
        assert_eq!(scheduler.revealed(), &source[..]);
        assert!(!scheduler.has_pending_tick());
        assert_eq!(scheduler.advance(t0 + Duration::from_secs(60)), 0);
        assert_eq!(scheduler.revealed(), &source[..]);
    }

    #[test]
    fn test_reset_clears() {
        let t0 = Instant::now();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(artwork_a()), t0);
        scheduler.advance(t0 + DELAY * 2);
        scheduler.reset();
        assert_eq!(scheduler.state(), ReplayState::Idle);
        assert!(scheduler.revealed().is_empty());
        assert_eq!(scheduler.advance(t0 + Duration::from_secs(60)), 0);
    }

    #[test]
    fn test_switching_artwork_cancels_previous_replay() {
        let t0 = Instant::now();
        let a = artwork_a();
        let b = artwork_b();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(a), t0);
        scheduler.advance(t0 + DELAY * 2);

        let switch_at = t0 + DELAY * 2 + Duration::from_millis(3);
        assert!(scheduler.set_source(Some(b.clone()), switch_at));
        assert!(scheduler.revealed().is_empty());
        // The tick A had pending at t0 + 30ms must not fire
        assert_eq!(scheduler.advance(t0 + DELAY * 3), 0);

        run_to_end(&mut scheduler, switch_at);
        assert_eq!(scheduler.revealed(), &b[..]);
        assert!(scheduler.revealed().iter().flat_map(Path::points).all(|p| p.x >= 500.0));
    }

    #[test]
    fn test_same_source_does_not_restart() {
        let t0 = Instant::now();
        let a = artwork_a();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(a.clone()), t0);
        scheduler.advance(t0 + DELAY * 2);
        assert!(!scheduler.set_source(Some(a), t0 + DELAY * 2));
        assert_eq!(scheduler.revealed_points(), 2);

        // Equal contents but a different list still counts as a switch
        assert!(scheduler.set_source(Some(artwork_a()), t0 + DELAY * 2));
        assert_eq!(scheduler.revealed_points(), 0);
    }

    #[test]
    fn test_empty_source_goes_idle() {
        let t0 = Instant::now();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(artwork_a()), t0);
        scheduler.set_source(Some(Vec::<Path>::new().into()), t0);
        assert_eq!(scheduler.state(), ReplayState::Idle);
        assert!(!scheduler.has_pending_tick());

        scheduler.set_source(Some(artwork_b()), t0);
        scheduler.set_source(None, t0);
        assert_eq!(scheduler.state(), ReplayState::Idle);
        assert!(!scheduler.has_pending_tick());
    }

    #[test]
    fn test_pointless_path_survives_replay() {
        let empty = Path {
            points: Vec::new(),
            ..path(50.0, 1)
        };
        let source: PathList = vec![path(0.0, 2), empty, path(100.0, 1)].into();
        let t0 = Instant::now();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(source.clone()), t0);
        run_to_end(&mut scheduler, t0);

        assert!(scheduler.is_complete());
        assert_eq!(scheduler.revealed(), &source[..]);
        assert!(scheduler.revealed()[1].is_empty());
        assert_eq!(scheduler.revealed_points(), 3);
        assert_eq!(scheduler.ticks(), 3 + 3 + 1);

        let replayed = scheduler.revealed().to_vec();
        scheduler.skip_to_end();
        assert_eq!(scheduler.revealed(), &replayed[..]);
    }

    #[test]
    fn test_tick_count_includes_path_steps() {
        let t0 = Instant::now();
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.set_source(Some(artwork_a()), t0);
        run_to_end(&mut scheduler, t0);
        assert_eq!(scheduler.revealed_points(), 5);
        assert_eq!(scheduler.ticks(), 5 + 2 + 1);
    }

    #[test]
    fn test_start_without_source_stays_idle() {
        let mut scheduler = ReplayScheduler::new(DELAY);
        scheduler.start(Instant::now());
        assert_eq!(scheduler.state(), ReplayState::Idle);
        assert!(!scheduler.has_pending_tick());
    }
}
