//! Motion core: timeline, easing, pointer, text cycler and scroll reactor
//!
//! Pure Rust with no DOM access, so it runs and tests the same on the
//! server, in the browser and under `cargo test`.

pub mod clock;
#[cfg(feature = "ssr")]
pub mod config;
pub mod easing;
pub mod error;
pub mod hero;
pub mod layout;
pub mod pointer;
pub mod scroll;
pub mod session;
pub mod stage;
pub mod text;
pub mod timeline;
#[cfg(test)]
mod tests;

pub use error::{EffectError, MotionError};
pub use hero::{HeroPhase, HeroPlayer, HeroScript};
pub use session::{PageSession, ScrollSample, ScrollUpdate};
