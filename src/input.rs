use glam::Vec2;

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Viewport-normalized pointer, [-1, 1] per axis, +y down.
    pub normalized: Vec2,
    pub inside: bool,
}

impl PointerState {
    #[inline]
    pub fn moved(&mut self, client_x: f64, client_y: f64, viewport_w: f64, viewport_h: f64) {
        self.normalized = normalized_pointer(client_x, client_y, viewport_w, viewport_h);
        self.inside = true;
    }

    /// Pointer left the window; parallax eases back to rest.
    #[inline]
    pub fn left(&mut self) {
        self.normalized = Vec2::ZERO;
        self.inside = false;
    }
}

#[inline]
pub fn normalized_pointer(client_x: f64, client_y: f64, viewport_w: f64, viewport_h: f64) -> Vec2 {
    if viewport_w <= 0.0 || viewport_h <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (client_x / viewport_w) * 2.0 - 1.0;
    let y = (client_y / viewport_h) * 2.0 - 1.0;
    Vec2::new(x.clamp(-1.0, 1.0) as f32, y.clamp(-1.0, 1.0) as f32)
}

/// Horizontal line the scroll tracker tests sections against.
#[inline]
pub fn viewport_center_y(viewport_h: f64, fraction: f64) -> f64 {
    viewport_h.max(0.0) * fraction.clamp(0.0, 1.0)
}

/// Canvas backing size for a CSS size and device pixel ratio, never zero.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let w = (css_w.max(0.0) * dpr) as u32;
    let h = (css_h.max(0.0) * dpr) as u32;
    (w.max(1), h.max(1))
}

#[inline]
pub fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// What a `pagehide` means for the running app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Entering the back/forward cache; resumes as-is on `pageshow`.
    Frozen,
    Unloading,
}

impl PageHide {
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Frozen
        } else {
            PageHide::Unloading
        }
    }
}
