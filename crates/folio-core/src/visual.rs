//! Chooses what the 3D scene shows each frame: the idle hero (with an
//! optional section decoration) or the exploded diagram of the open project.

use crate::constants::*;
use crate::graph::{edges_for, graph_for};
use crate::project::ProjectId;
use crate::section::SectionId;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    FloatingPanels,
    RibbonTorus,
    CapsuleRing,
    Halo,
}

impl Decoration {
    pub fn for_section(section: SectionId) -> Option<Decoration> {
        match section {
            SectionId::Themes => Some(Decoration::FloatingPanels),
            SectionId::Projects => Some(Decoration::RibbonTorus),
            SectionId::Experience => Some(Decoration::CapsuleRing),
            SectionId::Skills => Some(Decoration::Halo),
            SectionId::Home | SectionId::Contact => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneContent {
    Idle { decoration: Option<Decoration> },
    Exploded(ProjectId),
}

pub fn select_content(active: Option<ProjectId>, section: SectionId) -> SceneContent {
    match active {
        Some(p) => SceneContent::Exploded(p),
        None => SceneContent::Idle {
            decoration: Decoration::for_section(section),
        },
    }
}

/// Mesh a scene instance is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Hero,
    Box,
    Panel,
    RibbonTorus,
    Capsule,
    Halo,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub primitive: Primitive,
    pub transform: Mat4,
    pub color: [f32; 4],
}

/// Curved line between two diagram nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    pub from: Vec3,
    pub to: Vec3,
    pub points: Vec<Vec3>,
}

#[derive(Clone, Debug, Default)]
pub struct SceneFrame {
    pub instances: SmallVec<[Instance; 16]>,
    pub connectors: Vec<Connector>,
}

impl SceneFrame {
    pub fn count(&self, primitive: Primitive) -> usize {
        self.instances
            .iter()
            .filter(|i| i.primitive == primitive)
            .count()
    }
}

const HERO_COLOR: [f32; 4] = [0.95, 0.95, 1.0, 1.0];
const PANEL_COLOR: [f32; 4] = [0.7, 0.8, 1.0, 0.35];
const ACCENT_COLOR: [f32; 4] = [0.8, 0.85, 1.0, 0.9];
const NODE_COLOR: [f32; 4] = [0.85, 0.88, 0.95, 0.85];

/// Vertical bow of connector `index` at `time`; independent of the camera.
pub fn connector_bow(index: usize, time: f32) -> f32 {
    CONNECTOR_BOW_BASE + CONNECTOR_BOW_AMP * (time * CONNECTOR_BOW_SPEED + index as f32 * 0.9).sin()
}

/// Sample a quadratic curve from `from` to `to` bowed upward by `bow`.
pub fn connector_points(from: Vec3, to: Vec3, bow: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    let control = (from + to) * 0.5 + Vec3::Y * bow;
    let mut points = Vec::with_capacity(segments + 1);
    points.push(from);
    for i in 1..segments {
        let t = i as f32 / segments as f32;
        let inv = 1.0 - t;
        points.push(from * (inv * inv) + control * (2.0 * inv * t) + to * (t * t));
    }
    points.push(to);
    points
}

pub fn build_frame(content: SceneContent, time: f32) -> SceneFrame {
    let mut frame = SceneFrame::default();
    match content {
        SceneContent::Idle { decoration } => {
            frame.instances.push(Instance {
                primitive: Primitive::Hero,
                transform: Mat4::from_rotation_y(time * 0.15) * Mat4::from_rotation_x(0.3),
                color: HERO_COLOR,
            });
            if let Some(d) = decoration {
                push_decoration(&mut frame, d, time);
            }
        }
        SceneContent::Exploded(project) => {
            let graph = graph_for(project);
            for node in graph.nodes {
                frame.instances.push(Instance {
                    primitive: Primitive::Box,
                    transform: Mat4::from_scale_rotation_translation(
                        node.size,
                        Quat::IDENTITY,
                        node.position,
                    ),
                    color: NODE_COLOR,
                });
            }
            match edges_for(project) {
                Ok(edges) => {
                    for (i, &(a, b)) in edges.iter().enumerate() {
                        let from = graph.nodes[a].position;
                        let to = graph.nodes[b].position;
                        frame.connectors.push(Connector {
                            from,
                            to,
                            points: connector_points(from, to, connector_bow(i, time), CONNECTOR_SEGMENTS),
                        });
                    }
                }
                Err(e) => log::error!("[visual] {:?} graph invalid: {}", project, e),
            }
        }
    }
    frame
}

fn push_decoration(frame: &mut SceneFrame, decoration: Decoration, time: f32) {
    match decoration {
        Decoration::FloatingPanels => {
            for (side, phase) in [(-1.0_f32, 0.0_f32), (1.0, 1.7)] {
                let bob = (time * 0.8 + phase).sin() * 0.12;
                frame.instances.push(Instance {
                    primitive: Primitive::Panel,
                    transform: Mat4::from_scale_rotation_translation(
                        Vec3::new(1.2, 1.6, 0.03),
                        Quat::from_rotation_y(-side * 0.45),
                        Vec3::new(side * 2.1, 0.2 + bob, -0.6),
                    ),
                    color: PANEL_COLOR,
                });
            }
        }
        Decoration::RibbonTorus => {
            frame.instances.push(Instance {
                primitive: Primitive::RibbonTorus,
                transform: Mat4::from_rotation_x(1.1 + (time * 0.3).sin() * 0.1)
                    * Mat4::from_rotation_z(time * 0.25),
                color: ACCENT_COLOR,
            });
        }
        Decoration::CapsuleRing => {
            const COUNT: usize = 8;
            for i in 0..COUNT {
                let a = i as f32 / COUNT as f32 * TAU + time * 0.35;
                let pos = Vec3::new(a.cos() * 2.0, (a * 2.0).sin() * 0.15, a.sin() * 2.0);
                frame.instances.push(Instance {
                    primitive: Primitive::Capsule,
                    transform: Mat4::from_translation(pos) * Mat4::from_rotation_y(-a),
                    color: ACCENT_COLOR,
                });
            }
        }
        Decoration::Halo => {
            frame.instances.push(Instance {
                primitive: Primitive::Halo,
                transform: Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2 - 0.25)
                    * Mat4::from_rotation_z(time * 0.1),
                color: ACCENT_COLOR,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_shows_hero_plus_at_most_one_decoration() {
        for s in SectionId::ALL {
            let frame = build_frame(select_content(None, s), 1.0);
            assert_eq!(frame.count(Primitive::Hero), 1);
            assert_eq!(frame.count(Primitive::Box), 0);
            assert!(frame.connectors.is_empty());
            let decorations = [
                Primitive::Panel,
                Primitive::RibbonTorus,
                Primitive::Capsule,
                Primitive::Halo,
            ]
            .iter()
            .filter(|p| frame.count(**p) > 0)
            .count();
            let expected = usize::from(Decoration::for_section(s).is_some());
            assert_eq!(decorations, expected, "{s:?}");
        }
    }

    #[test]
    fn active_project_replaces_hero() {
        let frame = build_frame(select_content(Some(ProjectId::Nexus), SectionId::Themes), 0.0);
        assert_eq!(frame.count(Primitive::Hero), 0);
        assert_eq!(frame.count(Primitive::Panel), 0);
    }

    #[test]
    fn connector_bow_moves_over_time() {
        let a = connector_points(Vec3::ZERO, Vec3::X, connector_bow(0, 0.0), 8);
        let b = connector_points(Vec3::ZERO, Vec3::X, connector_bow(0, 1.0), 8);
        assert_ne!(a[4], b[4]);
        assert_eq!(a[0], b[0]);
        assert_eq!(a[8], b[8]);
    }
}
