//! Per-frame material blending and vertex deformation of the hero object.

use crate::constants::*;
use crate::project::ProjectId;
use crate::section::{material_mood, MaterialMood, SectionId};
use glam::Vec3;

/// Displayed material values for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodFrame {
    /// Section mood with the pull perturbation already applied.
    pub mood: MaterialMood,
    pub hover_pull: f32,
}

#[derive(Debug)]
pub struct MoodEngine {
    current: MaterialMood,
    hover_pull: f32,
    pull_direction: Vec3,
    base: Vec<Vec3>,
    deformed: Vec<Vec3>,
}

/// Scalar surface displacement of a base vertex, before the pull bias.
#[inline]
pub fn displacement(p: Vec3, time: f32, amplitude: f32) -> f32 {
    let w = (p.x * 2.1 + time * 0.9).sin()
        + 0.8 * (p.y * 2.7 + time * 1.3).sin()
        + 0.6 * (p.z * 3.3 - time * 0.7).sin();
    amplitude * w / 2.4
}

/// Pull target for the current focus: an open project pulls fully, a merely
/// hovered card previews the pull.
pub fn pull_target(active: Option<ProjectId>, hover: Option<ProjectId>) -> (f32, Option<ProjectId>) {
    match (active, hover) {
        (Some(p), _) => (HOVER_PULL_ACTIVE, Some(p)),
        (None, Some(p)) => (HOVER_PULL_PREVIEW, Some(p)),
        (None, None) => (0.0, None),
    }
}

fn blend(current: f32, target: f32, a: f32) -> f32 {
    current + (target - current) * a
}

impl MoodEngine {
    /// `base` is the undeformed vertex snapshot; it is never modified.
    pub fn new(base: Vec<Vec3>, section: SectionId) -> Self {
        let deformed = base.clone();
        Self {
            current: material_mood(section),
            hover_pull: 0.0,
            pull_direction: Vec3::Y,
            base,
            deformed,
        }
    }

    pub fn current(&self) -> MaterialMood {
        self.current
    }

    pub fn hover_pull(&self) -> f32 {
        self.hover_pull
    }

    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    pub fn update_section(
        &mut self,
        dt_sec: f32,
        section: SectionId,
        active: Option<ProjectId>,
        hover: Option<ProjectId>,
    ) -> MoodFrame {
        self.update(dt_sec, material_mood(section), active, hover)
    }

    /// Blend every scalar toward `target` and the pull toward the focus.
    pub fn update(
        &mut self,
        dt_sec: f32,
        target: MaterialMood,
        active: Option<ProjectId>,
        hover: Option<ProjectId>,
    ) -> MoodFrame {
        let a = frame_blend(MOOD_BLEND_PER_FRAME, dt_sec);
        self.current = MaterialMood {
            roughness: blend(self.current.roughness, target.roughness, a),
            clearcoat_roughness: blend(
                self.current.clearcoat_roughness,
                target.clearcoat_roughness,
                a,
            ),
            deform_amplitude: blend(self.current.deform_amplitude, target.deform_amplitude, a),
        };

        let (pull_goal, focus) = pull_target(active, hover);
        if let Some(p) = focus {
            self.pull_direction = p.pull_direction();
        }
        let pa = frame_blend(HOVER_PULL_BLEND_PER_FRAME, dt_sec);
        self.hover_pull = blend(self.hover_pull, pull_goal, pa);

        MoodFrame {
            mood: MaterialMood {
                roughness: (self.current.roughness + self.hover_pull * PULL_ROUGHNESS)
                    .clamp(0.0, 1.0),
                ..self.current
            },
            hover_pull: self.hover_pull,
        }
    }

    /// Recompute every vertex from the base snapshot for time `time`.
    pub fn deform(&mut self, time: f32) -> &[Vec3] {
        let amplitude = self.current.deform_amplitude;
        let pull = self.hover_pull;
        let dir = self.pull_direction;
        for (out, &p) in self.deformed.iter_mut().zip(self.base.iter()) {
            let n = p.normalize_or_zero();
            let bias = pull * PULL_DISPLACEMENT * n.dot(dir).max(0.0);
            *out = p * (1.0 + displacement(p, time, amplitude) + bias);
        }
        &self.deformed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::icosphere;

    const DT: f32 = 1.0 / 60.0;

    fn engine() -> MoodEngine {
        MoodEngine::new(icosphere(1.0, 2).positions, SectionId::Home)
    }

    #[test]
    fn converges_to_section_mood() {
        let mut e = engine();
        for _ in 0..600 {
            e.update_section(DT, SectionId::Experience, None, None);
        }
        let want = material_mood(SectionId::Experience);
        let got = e.current();
        assert!((got.roughness - want.roughness).abs() < 1e-3);
        assert!((got.clearcoat_roughness - want.clearcoat_roughness).abs() < 1e-3);
        assert!((got.deform_amplitude - want.deform_amplitude).abs() < 1e-3);
    }

    #[test]
    fn deformation_starts_from_base_every_frame() {
        let mut e = engine();
        e.update_section(DT, SectionId::Skills, None, None);
        let first: Vec<Vec3> = e.deform(1.25).to_vec();
        for t in [0.0, 3.0, 7.5] {
            e.deform(t);
        }
        let again = e.deform(1.25).to_vec();
        assert_eq!(first, again);
    }

    #[test]
    fn zero_amplitude_and_pull_leaves_base_untouched() {
        let mut e = engine();
        e.current.deform_amplitude = 0.0;
        let base = e.base().to_vec();
        assert_eq!(e.deform(2.0).to_vec(), base);
    }

    #[test]
    fn pull_is_additive_to_section_mood() {
        let mut e = engine();
        let mut frame = e.update_section(DT, SectionId::Home, None, None);
        for _ in 0..600 {
            frame = e.update_section(DT, SectionId::Home, Some(ProjectId::Nexus), None);
        }
        assert!((frame.hover_pull - 1.0).abs() < 1e-3);
        let home = material_mood(SectionId::Home);
        assert!((e.current().roughness - home.roughness).abs() < 1e-3);
        assert!((frame.mood.roughness - (home.roughness + PULL_ROUGHNESS)).abs() < 1e-3);
        assert_eq!(frame.mood.deform_amplitude, e.current().deform_amplitude);
    }

    #[test]
    fn pull_pushes_vertices_toward_project_direction() {
        let mut e = engine();
        e.current.deform_amplitude = 0.0;
        for _ in 0..600 {
            e.update_section(DT, SectionId::Home, Some(ProjectId::PulseForge), None);
        }
        e.current.deform_amplitude = 0.0;
        let dir = ProjectId::PulseForge.pull_direction();
        let base = e.base().to_vec();
        let out = e.deform(0.0).to_vec();
        for (b, o) in base.iter().zip(out.iter()) {
            if b.normalize().dot(dir) > 0.5 {
                assert!(o.length() > b.length());
            } else if b.normalize().dot(dir) < 0.0 {
                assert!((o.length() - b.length()).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn hovering_previews_a_partial_pull() {
        assert_eq!(pull_target(None, Some(ProjectId::InboxIq)).0, HOVER_PULL_PREVIEW);
        assert_eq!(
            pull_target(Some(ProjectId::Nexus), Some(ProjectId::InboxIq)),
            (HOVER_PULL_ACTIVE, Some(ProjectId::Nexus))
        );
        assert_eq!(pull_target(None, None), (0.0, None));
    }
}
