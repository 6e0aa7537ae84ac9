//! Platform-free core of the portfolio scene: shared UI state, section
//! tracking, camera and material choreography, the exploded project
//! diagrams and the modal panel's transition state machine.
//!
//! Everything here is driven by explicit per-frame `update`/`tick` calls with
//! a `dt`, so it runs and tests without a browser or a GPU.

pub mod camera;
pub mod constants;
pub mod geometry;
pub mod graph;
pub mod modal;
pub mod mood;
pub mod project;
pub mod rect;
pub mod section;
pub mod store;
pub mod tracker;
pub mod tween;
pub mod visual;

pub use camera::*;
pub use graph::*;
pub use modal::*;
pub use mood::*;
pub use project::*;
pub use rect::*;
pub use section::*;
pub use store::*;
pub use tracker::*;
pub use visual::*;
