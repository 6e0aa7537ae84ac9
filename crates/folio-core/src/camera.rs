//! Camera choreography: section poses, project inspection and pointer parallax.
//!
//! The animated base position follows the current aim through owned tweens.
//! Parallax is a separate smoothed offset added on top of the base, so scroll
//! motion and pointer motion compose instead of fighting each other.

use crate::constants::*;
use crate::section::{camera_pose, CameraPose, SectionId};
use crate::tween::{AnimationSlot, Ease, Tween};
use glam::{Mat4, Vec2, Vec3};

/// What the camera is currently framing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraAim {
    Section(SectionId),
    Inspect,
}

impl CameraAim {
    pub fn pose(self) -> CameraPose {
        match self {
            CameraAim::Section(s) => camera_pose(s),
            CameraAim::Inspect => CameraPose {
                position: INSPECTION_POSITION,
                look_at: Vec3::ZERO,
                fov_deg: INSPECTION_FOV_DEG,
            },
        }
    }

    fn tween_duration(self) -> f32 {
        match self {
            CameraAim::Section(_) => SECTION_TWEEN_SEC,
            CameraAim::Inspect => INSPECTION_TWEEN_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CameraInputs {
    pub section: SectionId,
    pub project_active: bool,
    /// Pointer position normalized to [-1, 1] per axis, +y pointing down.
    pub pointer: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub fov_deg: f32,
}

impl CameraFrame {
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            aspect.max(1e-3),
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        );
        proj * Mat4::look_at_rh(self.eye, self.look_at, Vec3::Y)
    }
}

#[derive(Debug)]
pub struct CameraChoreographer {
    aim: CameraAim,
    base: Vec3,
    fov_deg: f32,
    position_anim: AnimationSlot<Vec3>,
    fov_anim: AnimationSlot<f32>,
    parallax: Vec3,
}

impl CameraChoreographer {
    /// Start at rest on `section`'s pose.
    pub fn new(section: SectionId) -> Self {
        let pose = camera_pose(section);
        Self {
            aim: CameraAim::Section(section),
            base: pose.position,
            fov_deg: pose.fov_deg,
            position_anim: AnimationSlot::default(),
            fov_anim: AnimationSlot::default(),
            parallax: Vec3::ZERO,
        }
    }

    pub fn aim(&self) -> CameraAim {
        self.aim
    }

    /// Animated base position (no parallax).
    pub fn base_position(&self) -> Vec3 {
        self.base
    }

    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    pub fn is_animating(&self) -> bool {
        self.position_anim.is_running() || self.fov_anim.is_running()
    }

    fn retarget(&mut self, aim: CameraAim) {
        log::debug!("[camera] retarget {:?} -> {:?}", self.aim, aim);
        self.aim = aim;
        let pose = aim.pose();
        let ease = Ease::PowerOut(CAMERA_EASE_POWER);
        let dur = aim.tween_duration();
        // Starting a new tween kills whatever the slot was running.
        self.position_anim
            .start(Tween::new(self.base, pose.position, dur, ease));
        self.fov_anim
            .start(Tween::new(self.fov_deg, pose.fov_deg, dur, ease));
    }

    pub fn update(&mut self, dt_sec: f32, inputs: CameraInputs) -> CameraFrame {
        let aim = if inputs.project_active {
            CameraAim::Inspect
        } else {
            CameraAim::Section(inputs.section)
        };
        if aim != self.aim {
            self.retarget(aim);
        }

        if let Some((pos, _)) = self.position_anim.step(dt_sec) {
            self.base = pos;
        }
        if let Some((fov, _)) = self.fov_anim.step(dt_sec) {
            self.fov_deg = fov;
        }

        let pointer = inputs.pointer.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        let parallax_target = Vec3::new(pointer.x * PARALLAX_X, -pointer.y * PARALLAX_Y, 0.0);
        let a = frame_blend(PARALLAX_BLEND_PER_FRAME, dt_sec);
        self.parallax += (parallax_target - self.parallax) * a;

        CameraFrame {
            eye: self.base + self.parallax,
            look_at: Vec3::ZERO,
            fov_deg: self.fov_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn inputs(section: SectionId, project_active: bool) -> CameraInputs {
        CameraInputs {
            section,
            project_active,
            pointer: Vec2::ZERO,
        }
    }

    #[test]
    fn section_change_animates_rather_than_snaps() {
        let mut cam = CameraChoreographer::new(SectionId::Home);
        let home = camera_pose(SectionId::Home).position;
        let frame = cam.update(DT, inputs(SectionId::Skills, false));
        assert!(frame.eye.distance(home) < 0.2);
        assert!(cam.is_animating());
    }

    #[test]
    fn look_at_is_always_origin() {
        let mut cam = CameraChoreographer::new(SectionId::Home);
        for s in SectionId::ALL {
            let f = cam.update(DT, inputs(s, false));
            assert_eq!(f.look_at, Vec3::ZERO);
        }
    }

    #[test]
    fn parallax_adds_on_top_of_section_pose() {
        let mut cam = CameraChoreographer::new(SectionId::Themes);
        let pose = camera_pose(SectionId::Themes).position;
        let mut frame = cam.update(DT, inputs(SectionId::Themes, false));
        for _ in 0..600 {
            frame = cam.update(
                DT,
                CameraInputs {
                    pointer: Vec2::new(1.0, 1.0),
                    ..inputs(SectionId::Themes, false)
                },
            );
        }
        assert_eq!(cam.base_position(), pose);
        let expected = pose + Vec3::new(PARALLAX_X, -PARALLAX_Y, 0.0);
        assert!(frame.eye.distance(expected) < 1e-3);
    }

    #[test]
    fn inspection_overrides_section_and_returns() {
        let mut cam = CameraChoreographer::new(SectionId::Projects);
        for _ in 0..120 {
            cam.update(DT, inputs(SectionId::Projects, true));
        }
        assert_eq!(cam.aim(), CameraAim::Inspect);
        assert_eq!(cam.base_position(), INSPECTION_POSITION);
        assert_eq!(cam.fov_deg(), INSPECTION_FOV_DEG);

        // Section changes while inspecting do not move the target.
        cam.update(DT, inputs(SectionId::Contact, true));
        assert_eq!(cam.aim(), CameraAim::Inspect);

        for _ in 0..120 {
            cam.update(DT, inputs(SectionId::Contact, false));
        }
        assert_eq!(cam.base_position(), camera_pose(SectionId::Contact).position);
        assert_eq!(cam.fov_deg(), BASE_FOV_DEG);
    }

    #[test]
    fn rapid_retarget_starts_from_current_position() {
        let mut cam = CameraChoreographer::new(SectionId::Home);
        for _ in 0..20 {
            cam.update(DT, inputs(SectionId::Skills, false));
        }
        let mid = cam.base_position();
        let f = cam.update(DT, inputs(SectionId::Themes, false));
        // No jump back to a previous start point.
        assert!(f.eye.distance(mid) < 0.2);
    }
}
