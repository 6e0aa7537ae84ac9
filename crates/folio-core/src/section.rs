//! Page sections and the per-section configuration tables.
//!
//! Every table is an exhaustive `match` over [`SectionId`], so adding a
//! section without camera/mood configuration fails to compile.

use crate::constants::BASE_FOV_DEG;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    Themes,
    Projects,
    Experience,
    Skills,
    Contact,
}

impl SectionId {
    /// Page order, top to bottom.
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::Themes,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Contact,
    ];

    pub const DEFAULT: SectionId = SectionId::Home;

    pub fn dom_id(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Themes => "themes",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Skills => "skills",
            SectionId::Contact => "contact",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<SectionId> {
        SectionId::ALL.into_iter().find(|s| s.dom_id() == id)
    }
}

/// Camera position + look-at target (+ field of view).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_deg: f32,
}

impl CameraPose {
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            look_at: Vec3::ZERO,
            fov_deg: BASE_FOV_DEG,
        }
    }
}

pub fn camera_pose(section: SectionId) -> CameraPose {
    match section {
        SectionId::Home => CameraPose::at(Vec3::new(0.2, 0.1, 6.2)),
        SectionId::Themes => CameraPose::at(Vec3::new(1.4, 0.5, 5.4)),
        SectionId::Projects => CameraPose::at(Vec3::new(-1.2, 0.3, 4.8)),
        SectionId::Experience => CameraPose::at(Vec3::new(0.0, 1.4, 5.6)),
        SectionId::Skills => CameraPose::at(Vec3::new(1.1, -0.6, 4.6)),
        SectionId::Contact => CameraPose::at(Vec3::new(0.0, 0.2, 7.0)),
    }
}

/// Material/deformation parameters associated with a section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialMood {
    pub roughness: f32,
    pub clearcoat_roughness: f32,
    pub deform_amplitude: f32,
}

pub fn material_mood(section: SectionId) -> MaterialMood {
    match section {
        SectionId::Home => MaterialMood {
            roughness: 0.15,
            clearcoat_roughness: 0.10,
            deform_amplitude: 0.08,
        },
        SectionId::Themes => MaterialMood {
            roughness: 0.32,
            clearcoat_roughness: 0.22,
            deform_amplitude: 0.16,
        },
        SectionId::Projects => MaterialMood {
            roughness: 0.08,
            clearcoat_roughness: 0.05,
            deform_amplitude: 0.05,
        },
        SectionId::Experience => MaterialMood {
            roughness: 0.45,
            clearcoat_roughness: 0.30,
            deform_amplitude: 0.12,
        },
        SectionId::Skills => MaterialMood {
            roughness: 0.22,
            clearcoat_roughness: 0.12,
            deform_amplitude: 0.22,
        },
        SectionId::Contact => MaterialMood {
            roughness: 0.60,
            clearcoat_roughness: 0.40,
            deform_amplitude: 0.03,
        },
    }
}

/// Mood lookup by raw DOM id. Unknown ids fall back to the default section.
pub fn mood_for_dom_id(id: &str) -> MaterialMood {
    match SectionId::from_dom_id(id) {
        Some(section) => material_mood(section),
        None => {
            log::warn!("[mood] unknown section id {:?}, using default", id);
            material_mood(SectionId::DEFAULT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_round_trip_for_every_section() {
        for s in SectionId::ALL {
            assert_eq!(SectionId::from_dom_id(s.dom_id()), Some(s));
        }
        assert_eq!(SectionId::from_dom_id("footer"), None);
    }

    #[test]
    fn every_pose_looks_at_origin() {
        for s in SectionId::ALL {
            assert_eq!(camera_pose(s).look_at, Vec3::ZERO);
        }
    }

    #[test]
    fn unknown_dom_id_uses_home_mood() {
        assert_eq!(mood_for_dom_id("footer"), material_mood(SectionId::Home));
        assert_eq!(mood_for_dom_id("skills"), material_mood(SectionId::Skills));
    }
}
