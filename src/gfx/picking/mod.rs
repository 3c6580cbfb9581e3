//! # Object Picking System
//!
//! This module turns 2D cursor positions into world-space rays and tests those
//! rays against sphere-bounded bodies and planes.
//!
//! ## How it works
//!
//! 1. **Cursor to Ray**: Unproject the cursor through the inverse view-projection
//! 2. **Ray-Sphere Intersection**: Solve the quadratic against each body's bound
//! 3. **Selection**: Return the closest non-negative hit
//!
//! Dragging a picked body across a camera-facing plane lives in [`drag`].
//!
//! ## Usage
//!
//! ```no_run
//! use orrery::gfx::picking::{pick, Unprojector, Viewport};
//! # fn demo(view: cgmath::Matrix4<f32>, proj: cgmath::Matrix4<f32>, planets: &[orrery::simulation::Planet]) -> orrery::Result<()> {
//! let unprojector = Unprojector::new(view, proj, Viewport::new(1280, 720)?)?;
//! let ray = unprojector.ray(cgmath::Vector2::new(640.0, 360.0));
//! if let Some(hit) = pick(&ray, planets) {
//!     println!("Picked body {} at distance {}", hit.index, hit.distance);
//! }
//! # Ok(())
//! # }
//! ```

pub mod drag;

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector2, Vector3, Vector4};

use crate::{Error, Result};

pub use drag::{smooth_toward, smoothing_alpha, DragController, DragSession, Draggable};

/// Below this the ray is treated as parallel to a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Size of the render target in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::DegenerateViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn center(&self) -> Vector2<f32> {
        Vector2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// Maps pixel coordinates back into world space.
///
/// Holds the inverse of `projection * view`, so it has to be rebuilt whenever
/// the viewport is resized or the camera moves.
#[derive(Debug, Clone, Copy)]
pub struct Unprojector {
    inv_view_proj: Matrix4<f32>,
    viewport: Viewport,
}

impl Unprojector {
    pub fn new(view: Matrix4<f32>, projection: Matrix4<f32>, viewport: Viewport) -> Result<Self> {
        let inv_view_proj = (projection * view)
            .invert()
            .ok_or(Error::SingularViewProjection)?;
        Ok(Self {
            inv_view_proj,
            viewport,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Convert a cursor position (pixels, origin top-left) to a world-space ray
    pub fn ray(&self, cursor: Vector2<f32>) -> Ray {
        // Convert screen coordinates to normalized device coordinates (-1 to 1)
        let ndc_x = (2.0 * cursor.x) / self.viewport.width as f32 - 1.0;
        let ndc_y = 1.0 - (2.0 * cursor.y) / self.viewport.height as f32; // Flip Y axis

        let near = self.unproject(Vector4::new(ndc_x, ndc_y, -1.0, 1.0));
        let far = self.unproject(Vector4::new(ndc_x, ndc_y, 1.0, 1.0));

        Ray::new(near, far - near)
    }

    fn unproject(&self, clip: Vector4<f32>) -> Vector3<f32> {
        let world = self.inv_view_proj * clip;
        world.truncate() / world.w
    }
}

/// Anything that can be picked through a bounding sphere.
pub trait Pickable {
    /// World-space center and radius.
    fn bounding_sphere(&self) -> (Vector3<f32>, f32);
}

/// Nearest non-negative distance along `ray` to the sphere surface.
///
/// When the origin is inside the sphere the far root is returned.
pub fn intersect_sphere(ray: &Ray, center: Vector3<f32>, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let root = disc.sqrt();
    let mut t = -b - root;
    if t < 0.0 {
        t = -b + root;
    }
    (t >= 0.0).then_some(t)
}

/// A plane in point-normal form: every point `p` on it satisfies
/// `normal · p = distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPlane {
    pub normal: Vector3<f32>,
    pub distance: f32,
}

impl DragPlane {
    /// Plane through `point` facing along `forward`.
    pub fn through(point: Vector3<f32>, forward: Vector3<f32>) -> Self {
        let normal = forward.normalize();
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    /// Where `ray` crosses the plane, if it does so in front of its origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Vector3<f32>> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.distance - self.normal.dot(ray.origin)) / denom;
        (t > 0.0).then(|| ray.point_at(t))
    }

    /// Signed distance of `point` from the plane.
    pub fn signed_distance(&self, point: Vector3<f32>) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Index of the picked body
    pub index: usize,
    /// Distance along the ray to the hit
    pub distance: f32,
    /// World space intersection point
    pub point: Vector3<f32>,
}

/// Pick the body whose bounding sphere `ray` hits first.
///
/// Equal distances keep the earlier body.
pub fn pick<T: Pickable>(ray: &Ray, bodies: &[T]) -> Option<PickResult> {
    let mut closest: Option<PickResult> = None;

    for (index, body) in bodies.iter().enumerate() {
        let (center, radius) = body.bounding_sphere();
        let Some(distance) = intersect_sphere(ray, center, radius) else {
            continue;
        };

        if closest.map_or(true, |best| distance < best.distance) {
            closest = Some(PickResult {
                index,
                distance,
                point: ray.point_at(distance),
            });
        }
    }

    closest
}
