//! Client-side scene: the displayed point group, camera and viewport
//!
//! The render loop, the 1 s update timer and resize notifications all mutate
//! a single `Scene`. The render loop only ever sees a complete point set,
//! because `apply_update` builds the replacement list before swapping it in.

use glam::{Mat4, Vec3};
use tracing::{debug, warn};

use super::data::{Point, Sweep};
use super::parser::FetchError;
use crate::fetch_state::FetchState;

/// Update cycle period (fixed, not adaptive to fetch latency)
pub const UPDATE_PERIOD_MS: i32 = 1000;
/// Rotation applied to the point group on every rendered frame
pub const ROTATION_STEP_RAD: f32 = 0.005;
/// World-space radius of one point primitive (cm)
pub const POINT_RADIUS: f32 = 2.0;

const CAMERA_FOV_DEG: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;
const CAMERA_DISTANCE: f32 = 300.0;

/// Perspective camera looking at the sensor origin
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_rad: CAMERA_FOV_DEG.to_radians(),
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_rad, self.aspect, self.near, self.far)
    }
}

/// Output surface size in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// One drawable point, in sensor (world) coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPrimitive {
    pub position: Vec3,
    pub color: [f32; 3],
}

impl From<&Point> for PointPrimitive {
    fn from(p: &Point) -> Self {
        Self {
            position: Vec3::new(p.x as f32, p.y as f32, p.z as f32),
            color: p.color,
        }
    }
}

/// A primitive after projection, ready for the painter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// Pixels from the viewport's left edge
    pub x: f32,
    /// Pixels from the viewport's top edge
    pub y: f32,
    pub radius: f32,
    pub color: [f32; 3],
    /// NDC depth, -1 (near) to 1 (far)
    pub depth: f32,
}

/// The rotating group that holds every displayed primitive
#[derive(Clone, Debug, Default)]
pub struct PointGroup {
    primitives: Vec<PointPrimitive>,
    rotation_y: f32,
}

impl PointGroup {
    /// Swap in a complete new primitive set. Rotation carries over.
    fn replace(&mut self, primitives: Vec<PointPrimitive>) {
        self.primitives = primitives;
    }

    fn rotate(&mut self, delta: f32) {
        self.rotation_y = (self.rotation_y + delta) % std::f32::consts::TAU;
    }

    pub fn primitives(&self) -> &[PointPrimitive] {
        &self.primitives
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

pub struct Scene {
    camera: Camera,
    viewport: Viewport,
    group: PointGroup,
    status: FetchState,
    /// Capture time of the sweep currently displayed
    displayed_timestamp: Option<f64>,
    /// Distance of the first displayed point (info overlay)
    lead_distance: Option<f64>,
    updates_applied: u64,
    updates_failed: u64,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        let viewport = Viewport {
            width: width.max(1.0),
            height: height.max(1.0),
        };
        Self {
            camera: Camera::new(viewport.width / viewport.height),
            viewport,
            group: PointGroup::default(),
            status: FetchState::default(),
            displayed_timestamp: None,
            lead_distance: None,
            updates_applied: 0,
            updates_failed: 0,
        }
    }

    /// Apply the result of one update cycle.
    ///
    /// On success every displayed primitive is replaced by one per point of
    /// the sweep. On failure the display is left untouched. Completions are
    /// applied in arrival order; a late response overwrites a newer one.
    ///
    /// Returns true if the display changed.
    pub fn apply_update(&mut self, result: Result<Sweep, FetchError>) -> bool {
        match result {
            Ok(sweep) => {
                let primitives: Vec<PointPrimitive> =
                    sweep.points.iter().map(PointPrimitive::from).collect();

                if let Some(prev) = self.displayed_timestamp {
                    if sweep.timestamp < prev {
                        debug!(prev, timestamp = sweep.timestamp, "Stale sweep arrived last");
                    }
                }

                self.group.replace(primitives);
                self.displayed_timestamp = Some(sweep.timestamp);
                self.lead_distance = sweep.lead_distance();
                self.status = FetchState::Live;
                self.updates_applied += 1;

                debug!(
                    count = sweep.count,
                    timestamp = sweep.timestamp,
                    "Point group replaced"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Sweep update failed, keeping last display");
                self.status = FetchState::Failed(e.to_string());
                self.updates_failed += 1;
                false
            }
        }
    }

    /// One render-cycle step: advance the group rotation
    pub fn advance_frame(&mut self) {
        self.group.rotate(ROTATION_STEP_RAD);
    }

    /// React to a viewport size change. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Viewport { width, height };
        self.camera.aspect = width / height;
        debug!(width, height, aspect = self.camera.aspect, "Viewport resized");
    }

    /// Project every primitive to viewport pixels, farthest first
    pub fn project(&self) -> Vec<ScreenPoint> {
        let mvp = self.camera.projection_matrix()
            * self.camera.view_matrix()
            * self.group.model_matrix();
        let focal_px = self.viewport.height * 0.5 / (self.camera.fov_y_rad * 0.5).tan();

        let mut projected: Vec<ScreenPoint> = self
            .group
            .primitives()
            .iter()
            .filter_map(|prim| {
                let clip = mvp * prim.position.extend(1.0);
                if clip.w <= self.camera.near {
                    return None;
                }
                let ndc = clip.truncate() / clip.w;
                if !(-1.0..=1.0).contains(&ndc.z) {
                    return None;
                }
                Some(ScreenPoint {
                    x: (ndc.x + 1.0) * 0.5 * self.viewport.width,
                    y: (1.0 - ndc.y) * 0.5 * self.viewport.height,
                    radius: POINT_RADIUS * focal_px / clip.w,
                    color: prim.color,
                    depth: ndc.z,
                })
            })
            .collect();

        projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        projected
    }

    pub fn primitives(&self) -> &[PointPrimitive] {
        self.group.primitives()
    }

    pub fn group(&self) -> &PointGroup {
        &self.group
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn status(&self) -> &FetchState {
        &self.status
    }

    pub fn displayed_timestamp(&self) -> Option<f64> {
        self.displayed_timestamp
    }

    pub fn lead_distance(&self) -> Option<f64> {
        self.lead_distance
    }

    pub fn updates_applied(&self) -> u64 {
        self.updates_applied
    }

    pub fn updates_failed(&self) -> u64 {
        self.updates_failed
    }
}
