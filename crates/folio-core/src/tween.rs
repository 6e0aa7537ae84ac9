//! Time-based tweens and explicitly owned animation handles.
//!
//! There is no global animation registry: whoever starts an animation owns
//! the [`AnimationSlot`] it lives in, and starting a new one in the same slot
//! kills the previous one.

use crate::rect::PanelTransform;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// `1 - (1 - t)^n`, e.g. n = 3 for "power3.out".
    PowerOut(i32),
    /// `t^n`.
    PowerIn(i32),
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(n),
            Ease::PowerIn(n) => t.powi(n),
            Ease::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

#[inline]
fn bezier_axis(a1: f32, a2: f32, s: f32) -> f32 {
    // P0 = 0, P3 = 1
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

#[inline]
fn bezier_axis_slope(a1: f32, a2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }
    // Newton first, bisection when the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_axis(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return bezier_axis(y1, y2, s);
        }
        let d = bezier_axis_slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let v = bezier_axis(x1, x2, s);
        if (v - x).abs() < 1e-6 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier_axis(y1, y2, s)
}

pub trait Lerp: Copy {
    fn lerp_to(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl Lerp for PanelTransform {
    fn lerp_to(self, to: Self, t: f32) -> Self {
        let t = t as f64;
        PanelTransform {
            translate_x: self.translate_x + (to.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (to.translate_y - self.translate_y) * t,
            scale_x: self.scale_x + (to.scale_x - self.scale_x) * t,
            scale_y: self.scale_y + (to.scale_y - self.scale_y) * t,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration_sec: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration_sec.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// Advance by `dt_sec` and return the eased value.
    pub fn step(&mut self, dt_sec: f32) -> T {
        self.elapsed = (self.elapsed + dt_sec.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn value(&self) -> T {
        let p = self.progress();
        if p >= 1.0 {
            return self.to;
        }
        self.from.lerp_to(self.to, self.ease.apply(p))
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Identity of one started animation; stale handles are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationHandle(u64);

/// Holds at most one running tween. Starting a new tween kills the old one.
#[derive(Debug)]
pub struct AnimationSlot<T: Lerp> {
    active: Option<(AnimationHandle, Tween<T>)>,
    next_id: u64,
}

impl<T: Lerp> Default for AnimationSlot<T> {
    fn default() -> Self {
        Self {
            active: None,
            next_id: 1,
        }
    }
}

impl<T: Lerp> AnimationSlot<T> {
    pub fn start(&mut self, tween: Tween<T>) -> AnimationHandle {
        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;
        self.active = Some((handle, tween));
        handle
    }

    /// Kill the animation if `handle` is still the live one.
    pub fn kill(&mut self, handle: AnimationHandle) -> bool {
        match self.active {
            Some((h, _)) if h == handle => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn kill_any(&mut self) {
        self.active = None;
    }

    #[cfg(test)]
    fn is_live(&self, handle: AnimationHandle) -> bool {
        matches!(self.active, Some((h, _)) if h == handle)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the live tween. Returns its value and whether it just finished;
    /// a finished tween is dropped from the slot.
    pub fn step(&mut self, dt_sec: f32) -> Option<(T, bool)> {
        let (_, tween) = self.active.as_mut()?;
        let value = tween.step(dt_sec);
        let done = tween.is_finished();
        if done {
            self.active = None;
        }
        Some((value, done))
    }

    pub fn value(&self) -> Option<T> {
        self.active.as_ref().map(|(_, t)| t.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_pin_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::PowerOut(3),
            Ease::PowerIn(2),
            Ease::CubicBezier(0.2, 0.8, 0.2, 1.0),
        ] {
            assert!(ease.apply(0.0).abs() < 1e-5, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-5, "{ease:?}");
        }
    }

    #[test]
    fn power_out_front_loads_motion() {
        assert!(Ease::PowerOut(3).apply(0.25) > 0.5);
        assert!(Ease::PowerIn(2).apply(0.25) < 0.1);
    }

    #[test]
    fn cubic_bezier_is_monotonic_for_css_curve() {
        let ease = Ease::CubicBezier(0.2, 0.8, 0.2, 1.0);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.apply(i as f32 / 100.0);
            assert!(v + 1e-4 >= prev, "not monotonic at {i}");
            prev = v;
        }
    }

    #[test]
    fn linear_bezier_matches_identity() {
        let ease = Ease::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((ease.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn tween_reaches_target_exactly() {
        let mut tw = Tween::new(0.0_f32, 10.0, 1.0, Ease::PowerOut(3));
        for _ in 0..30 {
            tw.step(1.0 / 60.0);
        }
        assert!(!tw.is_finished());
        for _ in 0..60 {
            tw.step(1.0 / 60.0);
        }
        assert!(tw.is_finished());
        assert_eq!(tw.value(), 10.0);
    }

    #[test]
    fn zero_duration_tween_is_done_immediately() {
        let tw = Tween::new(Vec3::ZERO, Vec3::ONE, 0.0, Ease::Linear);
        assert!(tw.is_finished());
        assert_eq!(tw.value(), Vec3::ONE);
    }

    #[test]
    fn newest_animation_wins_and_stale_handles_are_ignored() {
        let mut slot = AnimationSlot::<f32>::default();
        let first = slot.start(Tween::new(0.0, 1.0, 1.0, Ease::Linear));
        let second = slot.start(Tween::new(5.0, 6.0, 1.0, Ease::Linear));
        assert!(!slot.is_live(first));
        assert!(!slot.kill(first));
        assert!(slot.is_live(second));
        let (v, done) = slot.step(0.5).unwrap();
        assert!((v - 5.5).abs() < 1e-5);
        assert!(!done);
        assert!(slot.kill(second));
        assert!(slot.step(0.1).is_none());
    }
}
