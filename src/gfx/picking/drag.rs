//! Dragging picked bodies across a camera-facing plane.
//!
//! On pick, a plane is fixed through the hit point, facing the camera. The
//! world-space motion caused by one pixel of horizontal and vertical cursor
//! travel is measured on that plane once and reused for the whole gesture, so
//! the body tracks the cursor linearly however the cursor moves. The body
//! eases toward its target with exponential smoothing to hide frame jitter.

use cgmath::{Vector2, Vector3, VectorSpace, Zero};
use log::{debug, warn};

use super::{pick, DragPlane, Pickable, Unprojector};
use crate::{config::Config, Error, Result};

/// A pickable body that can be moved by hand and whose orbit can be paused.
pub trait Draggable: Pickable {
    fn position(&self) -> Vector3<f32>;
    fn set_position(&mut self, position: Vector3<f32>);
    fn orbit_speed(&self) -> f32;
    fn set_orbit_speed(&mut self, speed: f32);
    fn is_dragging(&self) -> bool;
    fn set_dragging(&mut self, dragging: bool);
}

/// Fraction of the remaining distance covered in one frame of length `dt`.
pub fn smoothing_alpha(responsiveness: f32, dt: f32) -> f32 {
    1.0 - (-responsiveness * dt).exp()
}

/// Move `current` toward `target` by `alpha` (0 keeps, 1 snaps).
pub fn smooth_toward(current: Vector3<f32>, target: Vector3<f32>, alpha: f32) -> Vector3<f32> {
    current.lerp(target, alpha.clamp(0.0, 1.0))
}

/// State captured when a drag starts. None of it changes until release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub index: usize,
    pub start_cursor: Vector2<f32>,
    pub plane: DragPlane,
    pub plane_hit_start: Vector3<f32>,
    /// Hit point relative to the body center at pick time.
    pub grab_offset: Vector3<f32>,
    pub per_pixel_x: Vector3<f32>,
    pub per_pixel_y: Vector3<f32>,
    pub saved_orbit_speed: f32,
}

impl DragSession {
    /// Where the body should sit for the given cursor position.
    pub fn target(&self, cursor: Vector2<f32>) -> Vector3<f32> {
        let delta = cursor - self.start_cursor;
        let plane_hit = self.plane_hit_start + self.per_pixel_x * delta.x + self.per_pixel_y * delta.y;
        plane_hit - self.grab_offset
    }
}

/// Owns the single in-flight drag, if any.
#[derive(Debug, Clone)]
pub struct DragController {
    session: Option<DragSession>,
    responsiveness: f32,
    min_dt: f32,
}

impl DragController {
    pub fn new(responsiveness: f32, min_dt: f32) -> Self {
        Self {
            session: None,
            responsiveness,
            min_dt,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.drag_smoothing, config.min_drag_dt)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Index of the body being dragged
    pub fn dragged(&self) -> Option<usize> {
        self.session.map(|session| session.index)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Try to grab the body under `cursor`.
    ///
    /// `forward` is the camera's view direction at this moment; it fixes the
    /// drag plane for the rest of the gesture. Returns the grabbed index, or
    /// `None` (leaving any current drag untouched) when nothing is hit.
    pub fn begin<T: Draggable>(
        &mut self,
        unprojector: &Unprojector,
        cursor: Vector2<f32>,
        forward: Vector3<f32>,
        bodies: &mut [T],
    ) -> Result<Option<usize>> {
        let ray = unprojector.ray(cursor);
        let Some(hit) = pick(&ray, bodies) else {
            return Ok(None);
        };

        self.end(bodies)?;

        let body = &mut bodies[hit.index];
        let plane = DragPlane::through(hit.point, forward);
        let saved_orbit_speed = body.orbit_speed();
        body.set_orbit_speed(0.0);
        body.set_dragging(true);

        // The plane passes through the hit, so the pick ray meets it there.
        let center_hit = hit.point;
        let per_pixel = |offset: Vector2<f32>| -> Vector3<f32> {
            match plane.intersect(&unprojector.ray(cursor + offset)) {
                Some(shifted) => shifted - center_hit,
                None => {
                    warn!("drag basis ray missed the drag plane, axis {offset:?} is frozen");
                    Vector3::zero()
                }
            }
        };

        let session = DragSession {
            index: hit.index,
            start_cursor: cursor,
            plane,
            plane_hit_start: hit.point,
            grab_offset: hit.point - body.position(),
            per_pixel_x: per_pixel(Vector2::new(1.0, 0.0)),
            per_pixel_y: per_pixel(Vector2::new(0.0, 1.0)),
            saved_orbit_speed,
        };
        debug!(
            "grabbed body {} at distance {:.3}, per-pixel {:?} / {:?}",
            hit.index, hit.distance, session.per_pixel_x, session.per_pixel_y
        );

        self.session = Some(session);
        Ok(Some(hit.index))
    }

    /// Ease the dragged body toward the cursor. No-op without a drag.
    pub fn update<T: Draggable>(&self, cursor: Vector2<f32>, dt: f32, bodies: &mut [T]) -> Result<()> {
        let Some(session) = self.session else {
            return Ok(());
        };
        let body = bodies
            .get_mut(session.index)
            .ok_or(Error::UnknownBody(session.index))?;

        let alpha = smoothing_alpha(self.responsiveness, dt.max(self.min_dt));
        let position = smooth_toward(body.position(), session.target(cursor), alpha);
        body.set_position(position);
        Ok(())
    }

    /// Drop the session without touching any body when its body is gone or
    /// no longer flagged as dragged, e.g. after the bodies were reset or
    /// replaced. Returns `true` if a session was dropped.
    pub fn discard_stale<T: Draggable>(&mut self, bodies: &[T]) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if bodies.get(session.index).is_some_and(|body| body.is_dragging()) {
            return false;
        }
        warn!("discarding stale drag of body {}", session.index);
        self.session = None;
        true
    }

    /// Release the dragged body and give it back its orbit speed.
    pub fn end<T: Draggable>(&mut self, bodies: &mut [T]) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let body = bodies
            .get_mut(session.index)
            .ok_or(Error::UnknownBody(session.index))?;

        body.set_orbit_speed(session.saved_orbit_speed);
        body.set_dragging(false);
        debug!("released body {}", session.index);
        Ok(())
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
