//! Shared UI state: which project is open, which is hovered, and the rect an
//! open animation starts from.
//!
//! [`SceneState`] is a cheap-clone handle. Listeners are notified
//! synchronously, once per effective change, before the next frame runs.
//! Setters called from inside a listener are applied and produce a follow-up
//! notification round once the current round has finished.

use crate::project::ProjectId;
use crate::rect::Rect;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UiSnapshot {
    pub active_project: Option<ProjectId>,
    pub hover_project: Option<ProjectId>,
    pub transition_origin: Option<Rect>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("scene state used outside of its provider")]
    MissingProvider,
    #[error("a scene state provider is already installed")]
    AlreadyProvided,
}

type Listener = Box<dyn FnMut(&UiSnapshot)>;

struct Inner {
    snapshot: UiSnapshot,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
    notifying: bool,
    dirty: bool,
    // Unsubscribed mid-round; filtered out when the round's listeners return.
    removed: Vec<u64>,
}

#[derive(Clone)]
pub struct SceneState {
    inner: Rc<RefCell<Inner>>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                snapshot: UiSnapshot::default(),
                listeners: Vec::new(),
                next_listener: 1,
                notifying: false,
                dirty: false,
                removed: Vec::new(),
            })),
        }
    }

    pub fn snapshot(&self) -> UiSnapshot {
        self.inner.borrow().snapshot
    }

    pub fn active_project(&self) -> Option<ProjectId> {
        self.inner.borrow().snapshot.active_project
    }

    pub fn hover_project(&self) -> Option<ProjectId> {
        self.inner.borrow().snapshot.hover_project
    }

    pub fn transition_origin(&self) -> Option<Rect> {
        self.inner.borrow().snapshot.transition_origin
    }

    pub fn set_active_project(&self, id: Option<ProjectId>) {
        self.mutate(|s| {
            let changed = s.active_project != id;
            s.active_project = id;
            changed
        });
    }

    pub fn set_hover_project(&self, id: Option<ProjectId>) {
        self.mutate(|s| {
            let changed = s.hover_project != id;
            s.hover_project = id;
            changed
        });
    }

    pub fn set_transition_origin(&self, rect: Option<Rect>) {
        self.mutate(|s| {
            let changed = s.transition_origin != rect;
            s.transition_origin = rect;
            changed
        });
    }

    /// Register a listener. It stays registered while the returned
    /// [`Subscription`] is alive.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl FnMut(&UiSnapshot) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn mutate(&self, f: impl FnOnce(&mut UiSnapshot) -> bool) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let changed = f(&mut inner.snapshot);
            if changed && inner.notifying {
                inner.dirty = true;
                return;
            }
            changed
        };
        if changed {
            self.notify();
        }
    }

    fn notify(&self) {
        loop {
            let (snapshot, mut listeners) = {
                let mut inner = self.inner.borrow_mut();
                inner.notifying = true;
                inner.dirty = false;
                (inner.snapshot, std::mem::take(&mut inner.listeners))
            };
            for (_, listener) in listeners.iter_mut() {
                listener(&snapshot);
            }
            let mut inner = self.inner.borrow_mut();
            // Listeners added during the round were pushed onto the empty vec.
            let added = std::mem::take(&mut inner.listeners);
            listeners.extend(added);
            let removed = std::mem::take(&mut inner.removed);
            listeners.retain(|(id, _)| !removed.contains(id));
            inner.listeners = listeners;
            inner.notifying = false;
            if !inner.dirty {
                break;
            }
        }
    }

    fn remove_listener(inner: &Rc<RefCell<Inner>>, id: u64) {
        if let Ok(mut inner) = inner.try_borrow_mut() {
            if inner.notifying {
                inner.removed.push(id);
            }
            inner.listeners.retain(|(lid, _)| *lid != id);
        }
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    store: Weak<RefCell<Inner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            SceneState::remove_listener(&inner, self.id);
        }
    }
}

thread_local! {
    static PROVIDED: RefCell<Option<SceneState>> = const { RefCell::new(None) };
}

impl SceneState {
    /// Install a page-lifetime store. Consumers look it up with
    /// [`use_scene_state`] while the guard is alive.
    pub fn provide() -> Result<(SceneState, ProviderGuard), StoreError> {
        PROVIDED.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(StoreError::AlreadyProvided);
            }
            let state = SceneState::new();
            *slot = Some(state.clone());
            Ok((state, ProviderGuard { _private: () }))
        })
    }
}

/// Look up the provided store. Fails when called outside a provider scope,
/// which is a wiring defect rather than a runtime condition.
pub fn use_scene_state() -> Result<SceneState, StoreError> {
    PROVIDED.with(|slot| slot.borrow().clone().ok_or(StoreError::MissingProvider))
}

pub struct ProviderGuard {
    _private: (),
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        PROVIDED.with(|slot| {
            slot.borrow_mut().take();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn setters_notify_once_per_change() {
        let state = SceneState::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let _sub = state.subscribe(move |_| h.set(h.get() + 1));
        state.set_active_project(Some(ProjectId::Nexus));
        state.set_active_project(Some(ProjectId::Nexus));
        state.set_hover_project(None);
        assert_eq!(hits.get(), 1);
        state.set_hover_project(Some(ProjectId::InboxIq));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let state = SceneState::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = state.subscribe(move |_| h.set(h.get() + 1));
        assert_eq!(state.listener_count(), 1);
        sub.unsubscribe();
        assert_eq!(state.listener_count(), 0);
        state.set_active_project(Some(ProjectId::PulseForge));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn listener_sees_consistent_snapshot() {
        let state = SceneState::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let _sub = state.subscribe(move |snap| s.borrow_mut().push(*snap));
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        state.set_transition_origin(Some(rect));
        state.set_active_project(Some(ProjectId::Nexus));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].transition_origin, Some(rect));
        assert_eq!(seen[1].active_project, Some(ProjectId::Nexus));
    }

    #[test]
    fn mutation_inside_listener_triggers_follow_up_round() {
        let state = SceneState::new();
        let inner_state = state.clone();
        let rounds = Rc::new(RefCell::new(Vec::new()));
        let r = rounds.clone();
        let _sub = state.subscribe(move |snap| {
            r.borrow_mut().push(snap.transition_origin);
            if snap.active_project.is_none() && snap.transition_origin.is_some() {
                inner_state.set_transition_origin(None);
            }
        });
        state.set_transition_origin(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(state.transition_origin(), None);
        assert_eq!(rounds.borrow().len(), 2);
        assert_eq!(rounds.borrow()[1], None);
    }

    #[test]
    fn lookup_outside_provider_fails() {
        assert_eq!(use_scene_state().err(), Some(StoreError::MissingProvider));
        {
            let (state, _guard) = SceneState::provide().unwrap();
            state.set_hover_project(Some(ProjectId::InboxIq));
            let found = use_scene_state().unwrap();
            assert_eq!(found.hover_project(), Some(ProjectId::InboxIq));
            assert_eq!(SceneState::provide().err(), Some(StoreError::AlreadyProvided));
        }
        assert_eq!(use_scene_state().err(), Some(StoreError::MissingProvider));
    }

    #[test]
    fn handle_captured_at_wiring_outlives_lookup() {
        let captured = {
            let (_state, _guard) = SceneState::provide().unwrap();
            use_scene_state().unwrap()
        };
        assert_eq!(use_scene_state().err(), Some(StoreError::MissingProvider));
        captured.set_hover_project(Some(ProjectId::Nexus));
        assert_eq!(captured.hover_project(), Some(ProjectId::Nexus));
    }
}
