//! Simulated sensor: produces one sweep per call
//!
//! Randomness and wall-clock time are injected so tests can script both.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

use super::data::{Point, Sweep};

/// Angular step between returns, in degrees
pub const ANGLE_STEP_DEG: u32 = 5;
/// Returns per sweep (0..=355 every 5°)
pub const POINTS_PER_SWEEP: usize = (360 / ANGLE_STEP_DEG) as usize;

pub const MIN_DISTANCE_CM: f64 = 50.0;
pub const MAX_DISTANCE_CM: f64 = 200.0;
pub const MIN_HEIGHT_CM: f64 = -10.0;
pub const MAX_HEIGHT_CM: f64 = 10.0;

/// Source of uniformly distributed samples
pub trait RandomSource {
    /// Sample from `[low, high)`
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Source of wall-clock time, in seconds since the Unix epoch
pub trait Clock {
    fn now(&self) -> f64;
}

/// Process-wide thread RNG, no seeding contract
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for ThreadRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        use rand::Rng;
        rand::rng().random_range(low..high)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        crate::time::unix_seconds()
    }
}

/// Wraps a clock so that successive readings strictly increase.
///
/// If the inner clock stalls or steps backwards, the reading is bumped to the
/// next representable value above the last one handed out.
#[derive(Debug)]
pub struct MonotonicClock<C> {
    inner: C,
    last_bits: AtomicU64,
}

impl<C: Clock> MonotonicClock<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            last_bits: AtomicU64::new(0f64.to_bits()),
        }
    }
}

impl<C: Clock> Clock for MonotonicClock<C> {
    fn now(&self) -> f64 {
        let raw = self.inner.now();
        let mut issued = raw;
        // Timestamps are non-negative, so bit order matches numeric order
        let _ = self
            .last_bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev_bits| {
                let prev = f64::from_bits(prev_bits);
                issued = if raw > prev {
                    raw
                } else {
                    f64::from_bits(prev_bits + 1)
                };
                Some(issued.to_bits())
            });
        issued
    }
}

/// Produce one sweep: 72 returns, one every 5°, distance then height drawn per point.
pub fn generate_sweep<R, C>(rng: &mut R, clock: &C) -> Sweep
where
    R: RandomSource + ?Sized,
    C: Clock + ?Sized,
{
    let points: Vec<Point> = (0..360)
        .step_by(ANGLE_STEP_DEG as usize)
        .map(|angle| {
            let distance = rng.uniform(MIN_DISTANCE_CM, MAX_DISTANCE_CM);
            let height = rng.uniform(MIN_HEIGHT_CM, MAX_HEIGHT_CM);
            Point::from_polar(angle as f64, distance, height)
        })
        .collect();

    let sweep = Sweep::new(points, clock.now());
    trace!(count = sweep.count, timestamp = sweep.timestamp, "Sweep generated");
    sweep
}

/// A simulated sensor owning its random source prototype and clock.
///
/// Each sweep draws from a fresh clone of the prototype, so the sensor can be
/// shared across concurrent requests without locking.
#[derive(Debug)]
pub struct Sensor<R, C> {
    rng: R,
    clock: C,
}

impl<R, C> Sensor<R, C>
where
    R: RandomSource + Clone,
    C: Clock,
{
    pub fn new(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    pub fn sweep(&self) -> Sweep {
        let mut rng = self.rng.clone();
        generate_sweep(&mut rng, &self.clock)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for Sensor<ThreadRandom, MonotonicClock<SystemClock>> {
    fn default() -> Self {
        Self::new(ThreadRandom, MonotonicClock::new(SystemClock))
    }
}

/// Replays a fixed sequence of samples, cycling when exhausted
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty());
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

/// Always reports the same instant
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedClock(pub f64);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{COLOR_FAR, COLOR_MID, COLOR_NEAR};

    fn angle_of(point: &Point) -> u32 {
        let deg = point.y.atan2(point.x).to_degrees();
        let deg = if deg < 0.0 { deg + 360.0 } else { deg };
        deg.round() as u32 % 360
    }

    #[test]
    fn sweep_has_one_point_per_five_degrees() {
        let sweep = generate_sweep(&mut ThreadRandom, &SystemClock);
        assert_eq!(sweep.points.len(), 72);
        assert_eq!(sweep.count, 72);

        let angles: Vec<u32> = sweep.points.iter().map(angle_of).collect();
        let expected: Vec<u32> = (0..360).step_by(5).collect();
        assert_eq!(angles, expected);
    }

    #[test]
    fn samples_stay_in_sensor_range() {
        let mut rng = ThreadRandom;
        for _ in 0..200 {
            let sweep = generate_sweep(&mut rng, &SystemClock);
            for p in &sweep.points {
                assert!((50.0..200.0).contains(&p.distance), "distance {}", p.distance);
                assert!((-10.0..10.0).contains(&p.z), "height {}", p.z);
                assert!([COLOR_NEAR, COLOR_MID, COLOR_FAR].contains(&p.color));
                let radius = (p.x * p.x + p.y * p.y).sqrt();
                assert!((radius - p.distance).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn scripted_first_point_lies_on_x_axis() {
        let mut rng = ScriptedRandom::new(vec![80.0, 4.0]);
        let sweep = generate_sweep(&mut rng, &FixedClock(1_700_000_000.0));
        let first = sweep.points[0];
        assert_eq!(first.x, 80.0);
        assert_eq!(first.y, 0.0);
        assert_eq!(first.z, 4.0);
        assert_eq!(first.distance, 80.0);
        assert_eq!(first.color, COLOR_NEAR);
        assert_eq!(sweep.timestamp, 1_700_000_000.0);
    }

    #[test]
    fn color_follows_distance_thresholds() {
        let mut rng = ScriptedRandom::new(vec![99.999, 0.0, 100.0, 0.0, 149.999, 0.0, 150.0, 0.0]);
        let sweep = generate_sweep(&mut rng, &FixedClock(0.0));
        let colors: Vec<[f32; 3]> = sweep.points.iter().take(4).map(|p| p.color).collect();
        assert_eq!(colors, vec![COLOR_NEAR, COLOR_MID, COLOR_MID, COLOR_FAR]);
    }

    #[test]
    fn monotonic_clock_never_repeats() {
        let clock = MonotonicClock::new(FixedClock(1_000.0));
        let a = clock.now();
        let b = clock.now();
        let c = clock.now();
        assert_eq!(a, 1_000.0);
        assert!(b > a);
        assert!(c > b);
    }

    #[test]
    fn monotonic_clock_passes_through_advancing_time() {
        let clock = MonotonicClock::new(SystemClock);
        let mut last = clock.now();
        for _ in 0..1000 {
            let next = clock.now();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn sensor_draws_fresh_samples_each_sweep() {
        let sensor = Sensor::new(
            ScriptedRandom::new(vec![120.0, 1.0]),
            MonotonicClock::new(FixedClock(5.0)),
        );
        let first = sensor.sweep();
        let second = sensor.sweep();
        // Prototype is cloned per sweep, so a scripted source replays from the start
        assert_eq!(first.points, second.points);
        assert!(second.timestamp > first.timestamp);
    }
}
