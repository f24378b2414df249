//! Trajectory buffer
//!
//! Holds the trajectory being played back and the time it started. The buffer is shared between
//! the thread ingesting trajectories and the cyclic sampler, so the active trajectory is only
//! ever swapped as a whole.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

// Internal
use super::Trajectory;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A trajectory which is being played back.
#[derive(Debug)]
pub struct ActiveTrajectory {
    pub trajectory: Trajectory,

    /// Time at which the trajectory was received, playback is relative to this.
    pub start_time: Instant,
}

/// Shared handle to the active trajectory.
///
/// Cloning the handle gives access to the same underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct TrajBuffer {
    state: Arc<Mutex<SamplingState>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Playback state of the buffer.
#[derive(Debug, Clone)]
pub enum SamplingState {
    /// No trajectory is being played back.
    Idle,

    /// A trajectory is being played back.
    Active(Arc<ActiveTrajectory>),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SamplingState {
    fn default() -> Self {
        SamplingState::Idle
    }
}

impl ActiveTrajectory {
    /// Time elapsed since playback started, zero if `now` is before the start.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.checked_duration_since(self.start_time)
            .unwrap_or_default()
    }
}

impl TrajBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new trajectory, discarding any trajectory currently being played back.
    ///
    /// Playback of the new trajectory starts at `arrival_time`. An empty trajectory has nothing to
    /// play back so leaves the buffer idle.
    pub fn replace(&self, trajectory: Trajectory, arrival_time: Instant) {
        let new_state = match trajectory.is_empty() {
            true => SamplingState::Idle,
            false => SamplingState::Active(Arc::new(ActiveTrajectory {
                trajectory,
                start_time: arrival_time,
            })),
        };

        let mut state = self.lock();
        if let SamplingState::Active(_) = *state {
            debug!("Discarding active trajectory");
        }
        *state = new_state;
    }

    /// Stop playback.
    pub fn clear(&self) {
        *self.lock() = SamplingState::Idle;
    }

    /// Stop playback of the given trajectory.
    ///
    /// Has no effect if a different trajectory has been installed since `active` was taken, so
    /// the end of an old trajectory never cancels its replacement.
    ///
    /// Returns `true` if the buffer was cleared.
    pub fn finish(&self, active: &Arc<ActiveTrajectory>) -> bool {
        let mut state = self.lock();

        match &*state {
            SamplingState::Active(current) if Arc::ptr_eq(current, active) => {
                *state = SamplingState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Return `true` if a trajectory is being played back.
    pub fn is_active(&self) -> bool {
        matches!(*self.lock(), SamplingState::Active(_))
    }

    /// Get the trajectory being played back, if any.
    ///
    /// The returned trajectory is never modified, a later `replace` installs a new one instead.
    pub fn snapshot(&self) -> Option<Arc<ActiveTrajectory>> {
        match &*self.lock() {
            SamplingState::Active(a) => Some(a.clone()),
            SamplingState::Idle => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SamplingState> {
        // The state is only ever assigned whole, so it is still consistent after a panic in
        // another holder of the lock.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traj::Waypoint;
    use chrono::Utc;
    use std::thread;

    fn traj(offsets_ms: &[u64]) -> Trajectory {
        Trajectory::new(
            Utc::now(),
            "map",
            offsets_ms
                .iter()
                .map(|ms| Waypoint {
                    time_from_start: Duration::from_millis(*ms),
                    ..Default::default()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_replace_and_clear() {
        let buffer = TrajBuffer::new();
        let t0 = Instant::now();

        assert!(!buffer.is_active());
        assert!(buffer.snapshot().is_none());

        buffer.replace(traj(&[0, 100]), t0);
        assert!(buffer.is_active());

        let snap = buffer.snapshot().unwrap();
        assert_eq!(snap.start_time, t0);
        assert_eq!(snap.trajectory.points().len(), 2);

        buffer.clear();
        assert!(!buffer.is_active());

        // The snapshot taken before clearing is unaffected
        assert_eq!(snap.trajectory.points().len(), 2);
    }

    #[test]
    fn test_replace_discards_old() {
        let buffer = TrajBuffer::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(5);

        buffer.replace(traj(&[0, 100, 200]), t0);
        let old = buffer.snapshot().unwrap();

        buffer.replace(traj(&[50]), t1);
        let new = buffer.snapshot().unwrap();

        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(new.start_time, t1);
        assert_eq!(new.trajectory.points().len(), 1);
    }

    #[test]
    fn test_empty_replace_is_idle() {
        let buffer = TrajBuffer::new();

        buffer.replace(traj(&[0]), Instant::now());
        buffer.replace(traj(&[]), Instant::now());

        assert!(!buffer.is_active());
    }

    #[test]
    fn test_finish_only_clears_same_trajectory() {
        let buffer = TrajBuffer::new();

        buffer.replace(traj(&[0]), Instant::now());
        let old = buffer.snapshot().unwrap();

        // A new trajectory arrives before the old one is finished
        buffer.replace(traj(&[0, 100]), Instant::now());
        assert!(!buffer.finish(&old));
        assert!(buffer.is_active());

        let new = buffer.snapshot().unwrap();
        assert!(buffer.finish(&new));
        assert!(!buffer.is_active());
    }

    #[test]
    fn test_elapsed_saturates() {
        let t0 = Instant::now();
        let active = ActiveTrajectory {
            trajectory: traj(&[0]),
            start_time: t0 + Duration::from_secs(1),
        };

        assert_eq!(active.elapsed(t0), Duration::from_secs(0));
        assert_eq!(
            active.elapsed(t0 + Duration::from_millis(1500)),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_concurrent_snapshots_are_whole() {
        let buffer = TrajBuffer::new();
        let writer = buffer.clone();

        let jh = thread::spawn(move || {
            for i in 0..200u64 {
                let n = (i % 5 + 1) as usize;
                let offsets: Vec<u64> = (0..n as u64).map(|k| k * 100 + i).collect();
                writer.replace(traj(&offsets), Instant::now());
            }
        });

        // Every snapshot belongs to exactly one of the installed trajectories, whose offsets all
        // share the same remainder.
        for _ in 0..1000 {
            if let Some(snap) = buffer.snapshot() {
                let points = snap.trajectory.points();
                let base = points[0].time_from_start.as_millis() % 100;
                assert!(points
                    .iter()
                    .all(|p| p.time_from_start.as_millis() % 100 == base));
            }
        }

        jh.join().unwrap();
    }
}
