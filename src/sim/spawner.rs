//! Randomized spawn scheduling
//!
//! Each entity kind has its own timer. When a timer reaches its threshold it
//! resets, draws a fresh threshold from its interval, and reports a spawn.
//! The random source is passed in so tests can drive it from a fixed seed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::{SpawnInterval, Tuning};

/// Accumulating timer with a randomized threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed: f32,
    pub next_in: f32,
    interval: SpawnInterval,
}

impl SpawnTimer {
    pub fn new(interval: SpawnInterval) -> Self {
        Self {
            elapsed: 0.0,
            next_in: interval.max,
            interval,
        }
    }

    /// Zero the timer and draw a fresh threshold
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.elapsed = 0.0;
        self.next_in = self.draw(rng);
    }

    /// Accumulate `dt`; returns true when a spawn is due
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.next_in {
            self.elapsed = 0.0;
            self.next_in = self.draw(rng);
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> SpawnInterval {
        self.interval
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.interval.min..=self.interval.max)
    }
}

/// Which entity kinds are due this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub obstacle: bool,
    pub pickup: bool,
}

/// Obstacle and pickup timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacles: SpawnTimer,
    pub pickups: SpawnTimer,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: SpawnTimer::new(tuning.obstacle_interval),
            pickups: SpawnTimer::new(tuning.pickup_interval),
        }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles.reset(rng);
        self.pickups.reset(rng);
    }

    /// Advance both timers by raw (undilated) time
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> SpawnDue {
        SpawnDue {
            obstacle: self.obstacles.advance(dt, rng),
            pickup: self.pickups.advance(dt, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_thresholds_within_interval() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut timer = SpawnTimer::new(SpawnInterval::new(0.9, 1.2));
        for _ in 0..200 {
            timer.reset(&mut rng);
            assert!((0.9..=1.2).contains(&timer.next_in), "{}", timer.next_in);
        }
    }

    #[test]
    fn test_fires_at_threshold_and_resets() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut timer = SpawnTimer::new(SpawnInterval::new(0.5, 0.5));
        timer.reset(&mut rng);

        assert!(!timer.advance(0.25, &mut rng));
        assert!(timer.advance(0.25, &mut rng));
        assert_eq!(timer.elapsed, 0.0);
        assert_eq!(timer.next_in, 0.5);
        assert!(!timer.advance(0.1, &mut rng));
    }

    #[test]
    fn test_one_spawn_per_tick_even_for_huge_delta() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut timer = SpawnTimer::new(SpawnInterval::new(0.1, 0.2));
        timer.reset(&mut rng);
        assert!(timer.advance(10.0, &mut rng));
        assert_eq!(timer.elapsed, 0.0);
    }

    #[test]
    fn test_seeded_schedule_is_deterministic() {
        let tuning = Tuning::default();
        let schedule = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut spawner = Spawner::new(&tuning);
            spawner.reset(&mut rng);
            (0..600)
                .map(|_| spawner.advance(1.0 / 60.0, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(schedule(42), schedule(42));
    }

    #[test]
    fn test_independent_timers() {
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = Tuning {
            obstacle_interval: SpawnInterval::new(1.0, 1.0),
            pickup_interval: SpawnInterval::new(0.5, 0.5),
            ..Default::default()
        };
        let mut spawner = Spawner::new(&tuning);
        spawner.reset(&mut rng);

        let due = spawner.advance(0.5, &mut rng);
        assert_eq!(due, SpawnDue { obstacle: false, pickup: true });
        let due = spawner.advance(0.5, &mut rng);
        assert_eq!(due, SpawnDue { obstacle: true, pickup: true });
    }
}
