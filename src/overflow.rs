/// How to put `<body>`'s inline `overflow` back when the scroll lock ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverflowRestore {
    /// There was no inline value; drop ours so the stylesheet applies again.
    Remove,
    Set(String),
}

/// Remembers the inline `overflow` that was in place before the lock.
#[derive(Debug, Default)]
pub struct OverflowLock {
    saved: Option<String>,
}

impl OverflowLock {
    pub fn is_locked(&self) -> bool {
        self.saved.is_some()
    }

    /// Returns `true` when the caller should now apply `overflow: hidden`.
    /// Locking twice keeps the first saved value.
    pub fn lock(&mut self, current: impl FnOnce() -> String) -> bool {
        if self.is_locked() {
            return false;
        }
        self.saved = Some(current());
        true
    }

    /// `None` when not locked.
    pub fn release(&mut self) -> Option<OverflowRestore> {
        let prev = self.saved.take()?;
        Some(if prev.is_empty() {
            OverflowRestore::Remove
        } else {
            OverflowRestore::Set(prev)
        })
    }
}
