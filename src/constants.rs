// Page anchors and render tuning for the browser front-end.
// Wiring modules never spell DOM ids or selectors inline.

// Canvas that hosts the WebGPU scene
pub const CANVAS_ID: &str = "scene-canvas";

// Project modal
pub const MODAL_ID: &str = "project-modal";
pub const MODAL_PANEL_ID: &str = "project-panel";
pub const MODAL_CLOSE_ID: &str = "project-close";
pub const MODAL_TITLE_ID: &str = "project-title";
pub const MODAL_SUBTITLE_ID: &str = "project-subtitle";
pub const MODAL_BULLETS_ID: &str = "project-bullets";
pub const MODAL_STACK_ID: &str = "project-stack";
pub const MODAL_GITHUB_ID: &str = "project-github";

// Card and navbar hooks
pub const CARD_ATTR: &str = "data-project";
pub const CARD_SELECTOR: &str = "[data-project]";
pub const NAV_ATTR: &str = "data-nav";
pub const NAV_SELECTOR: &str = "[data-nav]";
pub const NAV_ACTIVE_ATTR: &str = "data-active";
// Set on <body> while a project is open
pub const BODY_PROJECT_ATTR: &str = "data-open-project";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Long stalls (hidden tab, debugger) are clamped so tweens don't skip in one frame
pub const MAX_FRAME_DT_SEC: f32 = 0.25;

// Section trigger line, as a fraction of viewport height
pub const VIEWPORT_CENTER_FRACTION: f64 = 0.5;

// Renderer
pub const CLEAR_COLOR: [f64; 4] = [0.012, 0.016, 0.03, 1.0];
pub const KEY_LIGHT_DIR: [f32; 3] = [0.45, 0.8, 0.6];
pub const MAX_INSTANCES: usize = 64;
pub const MAX_LINE_VERTICES: usize = 4096;

// Bloom
pub const BLOOM_STRENGTH: f32 = 0.85;
pub const BLOOM_THRESHOLD: f32 = 0.7;
// Inspection view brightens the bloom slightly
pub const BLOOM_INSPECT_BOOST: f32 = 0.15;
