//! Browser side of the hero animation and scroll reactor
//!
//! Measures the rendered hero through `DomLayout`, reads time from
//! `performance.now()` and advances the `PageSession` once per animation
//! frame. Scroll and resize events feed the same session.
//!
//! Everything in `driver` needs a `window`; when there is none, or the hero
//! root is missing, the page falls back to a session without a hero and the
//! resting headline stays on screen. The ids below are shared with the
//! server-rendered markup.

#[cfg(feature = "hydrate")]
mod driver;

#[cfg(feature = "hydrate")]
pub use driver::{
    DomLayout, Motion, MotionHandle, PerformanceClock, install, motion_handle, replay, sync_scroll,
};

/// Id of the element anchor positions are measured against
pub const HERO_ROOT_ID: &str = "hero";
/// Hidden span used to measure word widths in the headline font
pub const MEASURE_ID: &str = "hero-measure";
/// Sections faded in as they scroll into view
pub const REVEAL_SELECTOR: &str = ".reveal-section";
/// Class added to a revealed section
pub const REVEALED_CLASS: &str = "visible";
