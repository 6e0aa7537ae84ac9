use glam::Vec3;

/// Projects that have a 3D case study. The enum is the complete key set for
/// every project-indexed table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectId {
    Nexus,
    InboxIq,
    PulseForge,
}

impl ProjectId {
    pub const ALL: [ProjectId; 3] = [ProjectId::Nexus, ProjectId::InboxIq, ProjectId::PulseForge];

    /// Value of the `data-project` attribute on the card.
    pub fn key(self) -> &'static str {
        match self {
            ProjectId::Nexus => "nexus",
            ProjectId::InboxIq => "inboxiq",
            ProjectId::PulseForge => "pulseforge",
        }
    }

    pub fn from_key(key: &str) -> Option<ProjectId> {
        ProjectId::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Direction the hero surface leans toward while this project is focused.
    pub fn pull_direction(self) -> Vec3 {
        match self {
            ProjectId::Nexus => Vec3::new(1.0, 0.35, 0.2).normalize(),
            ProjectId::InboxIq => Vec3::new(-0.8, 0.5, 0.3).normalize(),
            ProjectId::PulseForge => Vec3::new(0.1, -0.9, 0.45).normalize(),
        }
    }
}

/// Static case-study content shown in the modal panel.
#[derive(Clone, Copy, Debug)]
pub struct ProjectInfo {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub bullets: &'static [&'static str],
    pub stack: &'static [&'static str],
    pub github: &'static str,
}

pub fn project_info(id: ProjectId) -> &'static ProjectInfo {
    match id {
        ProjectId::Nexus => &NEXUS,
        ProjectId::InboxIq => &INBOXIQ,
        ProjectId::PulseForge => &PULSEFORGE,
    }
}

static NEXUS: ProjectInfo = ProjectInfo {
    title: "Nexus",
    subtitle: "Distributed observability stack with SLO-driven monitoring.",
    bullets: &[
        "SLO dashboards and error budgets to prioritize reliability work.",
        "Prometheus + Grafana metrics pipeline with alerting foundations.",
        "Log aggregation workflow designed for fast root-cause analysis.",
    ],
    stack: &["Python", "Prometheus", "Grafana", "ELK", "Postgres"],
    github: "https://github.com/MenaceHecker/nexus",
};

static INBOXIQ: ProjectInfo = ProjectInfo {
    title: "InboxIQ",
    subtitle: "Email organizer with Gmail/Outlook integrations.",
    bullets: &[
        "Unified inbox categorization with search-first UX.",
        "OAuth-based provider integrations for secure access.",
        "Productivity-focused flows designed for speed and clarity.",
    ],
    stack: &["Next.js", "TypeScript", "Prisma", "AWS"],
    github: "https://github.com/MenaceHecker/inboxiq",
};

static PULSEFORGE: ProjectInfo = ProjectInfo {
    title: "PulseForge",
    subtitle: "Event-driven backend platform for reliable async processing.",
    bullets: &[
        "Asynchronous event ingestion and background processing pipeline.",
        "Retry logic, idempotency, and failure handling for resilience.",
        "JWT-based auth with role-based access control.",
    ],
    stack: &["Java", "Spring Boot", "PostgreSQL", "JWT", "Async"],
    github: "https://github.com/MenaceHecker/pulseforge",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back() {
        for p in ProjectId::ALL {
            assert_eq!(ProjectId::from_key(p.key()), Some(p));
        }
        assert_eq!(ProjectId::from_key("crumb"), None);
    }

    #[test]
    fn pull_directions_are_unit_length() {
        for p in ProjectId::ALL {
            assert!((p.pull_direction().length() - 1.0).abs() < 1e-5);
        }
    }
}
