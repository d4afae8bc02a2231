use glam::Vec2;

/// Pointer position in normalized device coordinates, y up.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Update from a pointer event's client position within a `width` x `height` window.
    #[inline]
    pub fn set_from_client(&mut self, client_x: f32, client_y: f32, width: f32, height: f32) {
        let ndc = pointer_ndc(client_x, client_y, width, height);
        self.x = ndc.x;
        self.y = ndc.y;
    }
}

#[inline]
pub fn pointer_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((client_x / w) * 2.0 - 1.0, -(client_y / h) * 2.0 + 1.0)
}
