pub mod motion;
pub mod pages;

pub use pages::{LandingPage, NotFoundPage};
