// Host-side tests for the web front-end's constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_are_distinct_and_non_empty() {
    let ids = [
        CANVAS_ID,
        MODAL_ID,
        MODAL_PANEL_ID,
        MODAL_CLOSE_ID,
        MODAL_TITLE_ID,
        MODAL_SUBTITLE_ID,
        MODAL_BULLETS_ID,
        MODAL_STACK_ID,
        MODAL_GITHUB_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.starts_with('#'), "{a} should be a bare id");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn selectors_match_their_attributes() {
    assert_eq!(CARD_SELECTOR, format!("[{CARD_ATTR}]"));
    assert_eq!(NAV_SELECTOR, format!("[{NAV_ATTR}]"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn render_tuning_is_within_reasonable_bounds() {
    assert!(MAX_FRAME_DT_SEC > 1.0 / 60.0);
    assert!(VIEWPORT_CENTER_FRACTION > 0.0 && VIEWPORT_CENTER_FRACTION < 1.0);
    assert!(MAX_INSTANCES >= 16);
    // Line lists need an even vertex count.
    assert_eq!(MAX_LINE_VERTICES % 2, 0);
    assert!(BLOOM_THRESHOLD > 0.0);
    assert!(BLOOM_STRENGTH + BLOOM_INSPECT_BOOST <= 1.5);
    for c in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&c));
    }
}
