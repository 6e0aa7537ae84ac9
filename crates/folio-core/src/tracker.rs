//! Decides which registered section is "active" for camera/mood purposes.
//!
//! A section's trigger range runs from "its top crosses the viewport center"
//! to "its bottom crosses the viewport center". Entering that range from
//! either direction makes the section current; leaving it does not, so the
//! last entered section stays current until another one is entered.

use crate::section::SectionId;

#[derive(Clone, Copy, Debug)]
struct Trigger {
    id: SectionId,
    inside: bool,
}

/// Live viewport-relative extent of a registered section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSample {
    pub id: SectionId,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug)]
pub struct ScrollTracker {
    triggers: Vec<Trigger>,
    current: SectionId,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self {
            triggers: Vec::new(),
            current: SectionId::DEFAULT,
        }
    }

    /// Registering twice is a no-op.
    pub fn register(&mut self, id: SectionId) {
        if self.triggers.iter().any(|t| t.id == id) {
            return;
        }
        self.triggers.push(Trigger { id, inside: false });
    }

    pub fn deregister_all(&mut self) {
        self.triggers.clear();
    }

    #[cfg(test)]
    fn registered(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.triggers.iter().map(|t| t.id)
    }

    pub fn current(&self) -> SectionId {
        self.current
    }

    /// Feed fresh measurements. Samples for unregistered sections are ignored.
    /// Returns the new current section when it changed.
    pub fn update<I>(&mut self, samples: I, center_y: f64) -> Option<SectionId>
    where
        I: IntoIterator<Item = SectionSample>,
    {
        let mut entered = None;
        for sample in samples {
            let Some(trigger) = self.triggers.iter_mut().find(|t| t.id == sample.id) else {
                continue;
            };
            let inside = sample.top <= center_y && center_y <= sample.bottom;
            if inside && !trigger.inside {
                // Most recently entered wins within one update too.
                entered = Some(sample.id);
            }
            trigger.inside = inside;
        }
        match entered {
            Some(id) if id != self.current => {
                log::debug!("[tracker] section {:?} -> {:?}", self.current, id);
                self.current = id;
                Some(id)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked(scroll: f64) -> Vec<SectionSample> {
        // Each section is 800px tall, laid out in page order.
        SectionId::ALL
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let top = i as f64 * 800.0 - scroll;
                SectionSample {
                    id: *id,
                    top,
                    bottom: top + 800.0,
                }
            })
            .collect()
    }

    fn tracker_with_all() -> ScrollTracker {
        let mut t = ScrollTracker::new();
        for id in SectionId::ALL {
            t.register(id);
        }
        t
    }

    #[test]
    fn scrolling_down_then_up_reenters_sections() {
        let mut t = tracker_with_all();
        let center = 450.0;
        assert_eq!(t.update(stacked(0.0), center), None); // already home
        assert_eq!(t.update(stacked(800.0), center), Some(SectionId::Themes));
        assert_eq!(t.update(stacked(3200.0), center), Some(SectionId::Skills));
        assert_eq!(t.update(stacked(820.0), center), Some(SectionId::Themes));
        assert_eq!(t.current(), SectionId::Themes);
    }

    #[test]
    fn leaving_a_range_keeps_current() {
        let mut t = ScrollTracker::new();
        t.register(SectionId::Projects);
        let center = 400.0;
        let inside = SectionSample {
            id: SectionId::Projects,
            top: 100.0,
            bottom: 900.0,
        };
        assert_eq!(t.update([inside], center), Some(SectionId::Projects));
        let gone = SectionSample {
            top: -2000.0,
            bottom: -1200.0,
            ..inside
        };
        assert_eq!(t.update([gone], center), None);
        assert_eq!(t.current(), SectionId::Projects);
    }

    #[test]
    fn overlapping_entries_resolve_to_most_recent() {
        let mut t = tracker_with_all();
        let a = SectionSample {
            id: SectionId::Experience,
            top: 0.0,
            bottom: 500.0,
        };
        let b = SectionSample {
            id: SectionId::Skills,
            top: 100.0,
            bottom: 600.0,
        };
        assert_eq!(t.update([a, b], 300.0), Some(SectionId::Skills));
    }

    #[test]
    fn unregistered_sections_are_ignored() {
        let mut t = ScrollTracker::new();
        t.register(SectionId::Home);
        let sample = SectionSample {
            id: SectionId::Contact,
            top: 0.0,
            bottom: 1000.0,
        };
        assert_eq!(t.update([sample], 500.0), None);
        t.deregister_all();
        assert_eq!(t.registered().count(), 0);
    }
}
