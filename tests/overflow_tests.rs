// Host-side tests for the page scroll lock bookkeeping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod overflow {
    include!("../src/overflow.rs");
}

use overflow::*;

#[test]
fn restores_the_pre_open_inline_value() {
    let mut lock = OverflowLock::default();
    assert!(lock.lock(|| "scroll".to_string()));
    assert!(lock.is_locked());
    assert_eq!(lock.release(), Some(OverflowRestore::Set("scroll".to_string())));
    assert!(!lock.is_locked());
}

#[test]
fn empty_inline_value_is_removed_not_set() {
    let mut lock = OverflowLock::default();
    assert!(lock.lock(String::new));
    assert_eq!(lock.release(), Some(OverflowRestore::Remove));
}

#[test]
fn second_lock_keeps_first_saved_value() {
    let mut lock = OverflowLock::default();
    assert!(lock.lock(|| "auto".to_string()));
    // The page already shows our "hidden" at this point.
    let mut read = false;
    assert!(!lock.lock(|| {
        read = true;
        "hidden".to_string()
    }));
    assert!(!read);
    assert_eq!(lock.release(), Some(OverflowRestore::Set("auto".to_string())));
}

#[test]
fn release_without_lock_does_nothing() {
    let mut lock = OverflowLock::default();
    assert_eq!(lock.release(), None);
    assert!(lock.lock(|| "visible".to_string()));
    assert!(lock.release().is_some());
    assert_eq!(lock.release(), None);
}
