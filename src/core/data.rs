//! Wire-level data structures for one simulated sweep
//!
//! These structures are platform-agnostic (no WASM deps) and shared
//! between the server and the browser client.

use serde::{Deserialize, Serialize};

/// Closer than this (cm) is classified as near.
pub const NEAR_THRESHOLD_CM: f64 = 100.0;
/// At or beyond this (cm) is classified as far.
pub const FAR_THRESHOLD_CM: f64 = 150.0;

pub const COLOR_NEAR: [f32; 3] = [1.0, 0.0, 0.0]; // red
pub const COLOR_MID: [f32; 3] = [1.0, 1.0, 0.0]; // yellow
pub const COLOR_FAR: [f32; 3] = [0.0, 1.0, 0.0]; // green

/// Distance bucket a point falls into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Proximity {
    /// distance < 100
    Near,
    /// 100 <= distance < 150
    Mid,
    /// distance >= 150
    Far,
}

impl Proximity {
    pub fn classify(distance: f64) -> Self {
        if distance < NEAR_THRESHOLD_CM {
            Proximity::Near
        } else if distance < FAR_THRESHOLD_CM {
            Proximity::Mid
        } else {
            Proximity::Far
        }
    }

    pub fn color(self) -> [f32; 3] {
        match self {
            Proximity::Near => COLOR_NEAR,
            Proximity::Mid => COLOR_MID,
            Proximity::Far => COLOR_FAR,
        }
    }
}

/// A single return of the simulated sensor, in centimeters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: [f32; 3],
    pub distance: f64,
}

impl Point {
    /// Build a point from its polar measurement (angle in degrees in the XY plane)
    pub fn from_polar(angle_deg: f64, distance: f64, height: f64) -> Self {
        let [x, y, z] = polar_to_cartesian(angle_deg, distance, height);
        Self {
            x,
            y,
            z,
            color: Proximity::classify(distance).color(),
            distance,
        }
    }

    pub fn proximity(&self) -> Proximity {
        Proximity::classify(self.distance)
    }
}

pub fn polar_to_cartesian(angle_deg: f64, distance: f64, height: f64) -> [f64; 3] {
    let theta = angle_deg.to_radians();
    [distance * theta.cos(), distance * theta.sin(), height]
}

/// One complete 360° scan plus its capture time
///
/// Serializes as `{points, timestamp, count}`, the body of `/api/lidar-data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub points: Vec<Point>,
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    pub count: usize,
}

impl Sweep {
    pub fn new(points: Vec<Point>, timestamp: f64) -> Self {
        let count = points.len();
        Self {
            points,
            timestamp,
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance of the first point, used by the info overlay
    pub fn lead_distance(&self) -> Option<f64> {
        self.points.first().map(|p| p.distance)
    }
}
