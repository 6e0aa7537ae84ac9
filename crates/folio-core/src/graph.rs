//! Architecture graphs drawn as exploded diagrams, one per project.

use crate::project::ProjectId;
use fnv::FnvHashMap;
use glam::Vec3;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphNode {
    pub id: &'static str,
    pub label: &'static str,
    pub position: Vec3,
    pub size: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct ProjectGraphSpec {
    pub nodes: &'static [GraphNode],
    pub edges: &'static [GraphEdge],
}

#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate node id `{0}`")]
    DuplicateNode(&'static str),
    #[error("edge {from} -> {to} references unknown node `{missing}`")]
    UnknownNode {
        from: &'static str,
        to: &'static str,
        missing: &'static str,
    },
}

impl ProjectGraphSpec {
    pub fn node_index(&self) -> Result<FnvHashMap<&'static str, usize>, GraphError> {
        let mut index = FnvHashMap::default();
        for (i, node) in self.nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(GraphError::DuplicateNode(node.id));
            }
        }
        Ok(index)
    }

    /// Edges as `(from, to)` node indices.
    pub fn resolved_edges(&self) -> Result<Vec<(usize, usize)>, GraphError> {
        let index = self.node_index()?;
        self.edges
            .iter()
            .map(|e| {
                let lookup = |id: &'static str| {
                    index.get(id).copied().ok_or(GraphError::UnknownNode {
                        from: e.from,
                        to: e.to,
                        missing: id,
                    })
                };
                Ok((lookup(e.from)?, lookup(e.to)?))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        self.resolved_edges().map(|_| ())
    }
}

const fn node(id: &'static str, label: &'static str, position: [f32; 3], size: [f32; 3]) -> GraphNode {
    GraphNode {
        id,
        label,
        position: Vec3::new(position[0], position[1], position[2]),
        size: Vec3::new(size[0], size[1], size[2]),
    }
}

const fn edge(from: &'static str, to: &'static str) -> GraphEdge {
    GraphEdge { from, to }
}

pub fn graph_for(id: ProjectId) -> &'static ProjectGraphSpec {
    match id {
        ProjectId::Nexus => &NEXUS_GRAPH,
        ProjectId::InboxIq => &INBOXIQ_GRAPH,
        ProjectId::PulseForge => &PULSEFORGE_GRAPH,
    }
}

type ResolvedEdges = OnceLock<Result<Vec<(usize, usize)>, GraphError>>;

static RESOLVED: [ResolvedEdges; 3] = [OnceLock::new(), OnceLock::new(), OnceLock::new()];

/// Edges of `id`'s graph as node indices, resolved on first use.
pub fn edges_for(id: ProjectId) -> Result<&'static [(usize, usize)], GraphError> {
    let slot = match id {
        ProjectId::Nexus => &RESOLVED[0],
        ProjectId::InboxIq => &RESOLVED[1],
        ProjectId::PulseForge => &RESOLVED[2],
    };
    match slot.get_or_init(|| graph_for(id).resolved_edges()) {
        Ok(edges) => Ok(edges.as_slice()),
        Err(e) => Err(*e),
    }
}

static NEXUS_GRAPH: ProjectGraphSpec = ProjectGraphSpec {
    nodes: &[
        node("services", "Services", [-2.4, 0.0, 0.0], [0.9, 0.6, 0.6]),
        node("exporters", "Exporters", [-1.0, 0.9, 0.2], [0.7, 0.4, 0.4]),
        node("prometheus", "Prometheus", [0.4, 0.9, 0.0], [0.8, 0.5, 0.5]),
        node("grafana", "Grafana", [2.0, 1.1, -0.2], [0.8, 0.5, 0.4]),
        node("shippers", "Log shippers", [-1.0, -0.9, 0.2], [0.7, 0.4, 0.4]),
        node("elk", "ELK", [0.6, -0.9, 0.0], [0.9, 0.5, 0.5]),
        node("postgres", "Postgres", [2.2, -0.6, 0.3], [0.6, 0.6, 0.6]),
    ],
    edges: &[
        edge("services", "exporters"),
        edge("exporters", "prometheus"),
        edge("prometheus", "grafana"),
        edge("services", "shippers"),
        edge("shippers", "elk"),
        edge("elk", "grafana"),
        edge("grafana", "postgres"),
    ],
};

static INBOXIQ_GRAPH: ProjectGraphSpec = ProjectGraphSpec {
    nodes: &[
        node("web", "Next.js app", [-2.2, 0.4, 0.0], [0.9, 0.6, 0.5]),
        node("oauth", "OAuth", [-0.8, 1.2, 0.2], [0.6, 0.4, 0.4]),
        node("gmail", "Gmail", [0.8, 1.4, -0.2], [0.6, 0.4, 0.4]),
        node("outlook", "Outlook", [0.8, 0.4, 0.3], [0.6, 0.4, 0.4]),
        node("triage", "Triage", [0.0, -0.8, 0.0], [0.8, 0.5, 0.5]),
        node("db", "Prisma / DB", [2.0, -0.8, 0.0], [0.7, 0.6, 0.6]),
    ],
    edges: &[
        edge("web", "oauth"),
        edge("oauth", "gmail"),
        edge("oauth", "outlook"),
        edge("gmail", "triage"),
        edge("outlook", "triage"),
        edge("triage", "db"),
        edge("web", "triage"),
    ],
};

static PULSEFORGE_GRAPH: ProjectGraphSpec = ProjectGraphSpec {
    nodes: &[
        node("gateway", "API + JWT", [-2.4, 0.2, 0.0], [0.8, 0.5, 0.5]),
        node("ingest", "Ingest", [-1.0, 0.2, 0.0], [0.7, 0.5, 0.5]),
        node("queue", "Event queue", [0.4, 0.2, 0.0], [1.0, 0.35, 0.35]),
        node("workers", "Workers", [1.8, 1.0, 0.0], [0.7, 0.5, 0.5]),
        node("retry", "Retry / DLQ", [1.8, -0.7, 0.2], [0.6, 0.4, 0.4]),
        node("postgres", "PostgreSQL", [3.0, 0.2, -0.2], [0.6, 0.7, 0.6]),
    ],
    edges: &[
        edge("gateway", "ingest"),
        edge("ingest", "queue"),
        edge("queue", "workers"),
        edge("queue", "retry"),
        edge("retry", "queue"),
        edge("workers", "postgres"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_project_graph_is_consistent() {
        for p in ProjectId::ALL {
            let g = graph_for(p);
            assert!(!g.nodes.is_empty());
            assert_eq!(g.validate(), Ok(()), "{p:?}");
        }
    }

    #[test]
    fn unknown_edge_endpoint_is_reported() {
        static BROKEN: ProjectGraphSpec = ProjectGraphSpec {
            nodes: &[node("a", "A", [0.0; 3], [1.0; 3])],
            edges: &[edge("a", "b")],
        };
        assert_eq!(
            BROKEN.validate(),
            Err(GraphError::UnknownNode {
                from: "a",
                to: "b",
                missing: "b"
            })
        );
    }

    #[test]
    fn duplicate_node_is_reported() {
        static DUP: ProjectGraphSpec = ProjectGraphSpec {
            nodes: &[node("a", "A", [0.0; 3], [1.0; 3]), node("a", "A2", [1.0; 3], [1.0; 3])],
            edges: &[],
        };
        assert_eq!(DUP.validate(), Err(GraphError::DuplicateNode("a")));
    }

    #[test]
    fn edges_are_resolved_once_per_project() {
        for project in ProjectId::ALL {
            let first = edges_for(project).unwrap();
            let again = edges_for(project).unwrap();
            assert!(std::ptr::eq(first, again));
            assert_eq!(first.len(), graph_for(project).edges.len());
        }
    }
}
