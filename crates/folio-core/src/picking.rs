//! Pointer picking: which interactive node is under the cursor this frame.

use crate::input::PointerState;
use crate::scene::NodeId;
use crate::state::Camera;
use glam::{Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from the camera eye through a point in normalized device coordinates.
    pub fn from_camera(ndc_x: f32, ndc_y: f32, camera: &Camera) -> Self {
        let inv = camera.view_projection().inverse();
        let p = inv * Vec4::new(ndc_x, ndc_y, 0.5, 1.0);
        let through = p.truncate() / p.w;
        Self::new(camera.eye, through - camera.eye)
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an axis-aligned box.
    pub fn intersects_aabb(&self, min: Vec3, max: Vec3) -> bool {
        let inv = self.direction.recip();
        let t0 = (min - self.origin) * inv;
        let t1 = (max - self.origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        // NaN from 0 * inf means the origin sits on a slab plane; treat as overlap
        if t_near.is_nan() || t_far.is_nan() {
            return true;
        }
        t_far >= t_near.max(0.0)
    }

    /// Möller–Trumbore. Returns the hit distance; back faces (clockwise as
    /// seen from the origin) are rejected when `cull_back_faces` is set.
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3, cull_back_faces: bool) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let normal = edge1.cross(edge2);

        let mut ddn = self.direction.dot(normal);
        let sign = if ddn > 0.0 {
            if cull_back_faces {
                return None;
            }
            1.0
        } else if ddn < 0.0 {
            ddn = -ddn;
            -1.0
        } else {
            return None;
        };

        let diff = self.origin - a;
        let dd_qxe2 = sign * self.direction.dot(diff.cross(edge2));
        if dd_qxe2 < 0.0 {
            return None;
        }
        let dd_e1xq = sign * self.direction.dot(edge1.cross(diff));
        if dd_e1xq < 0.0 || dd_qxe2 + dd_e1xq > ddn {
            return None;
        }
        let qdn = -sign * diff.dot(normal);
        if qdn < 0.0 {
            return None;
        }
        Some(qdn / ddn)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub distance: f32,
    pub point: Vec3,
    pub object: NodeId,
}

/// Scene capability used by the picker.
pub trait PickableScene {
    /// Hits against the interactive nodes (and their descendants).
    fn intersect(&self, ray: &Ray) -> Vec<Intersection>;
    /// Name of the node that owns `object` in the hierarchy.
    fn parent_name(&self, object: NodeId) -> Option<&str>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

impl CursorStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Pointer => "pointer",
        }
    }
}

pub trait CursorView {
    fn set_cursor(&mut self, style: CursorStyle);
}

/// Identifier under the pointer for the current frame; `None` when nothing is hit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTarget(Option<String>);

impl HoverTarget {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

/// Nearest hit resolved to the name of the hit mesh's parent.
pub fn pick(ray: &Ray, scene: &impl PickableScene) -> HoverTarget {
    let hits = scene.intersect(ray);
    let nearest = hits
        .iter()
        .filter(|h| h.distance >= 0.0)
        .min_by(|a, b| a.distance.total_cmp(&b.distance));
    let owner = nearest
        .and_then(|h| scene.parent_name(h.object))
        .filter(|name| !name.is_empty())
        .map(str::to_owned);
    HoverTarget(owner)
}

/// Pointer position and the hover result derived from it each frame.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    pub pointer: PointerState,
    hover: HoverTarget,
}

impl Interaction {
    pub fn hover(&self) -> &HoverTarget {
        &self.hover
    }

    /// Recompute the hover target and set the cursor accordingly. Runs every
    /// frame whether or not the result changed.
    pub fn update(
        &mut self,
        camera: &Camera,
        scene: &impl PickableScene,
        cursor: &mut impl CursorView,
    ) -> &HoverTarget {
        let ray = Ray::from_camera(self.pointer.x, self.pointer.y, camera);
        self.hover = pick(&ray, scene);
        cursor.set_cursor(if self.hover.is_none() {
            CursorStyle::Default
        } else {
            CursorStyle::Pointer
        });
        &self.hover
    }
}
