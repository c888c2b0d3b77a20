//! Presentation state mutated by hero steps
//!
//! [`Presentation`] is the DOM-like state the browser renders: positions,
//! sizes, opacities and text. [`Stage`] pairs it with the live layout so
//! effects can measure anchors and words when they start.

use crate::core::error::EffectError;
use crate::core::layout::{AnchorCache, AnchorId, Layout, Point};
use crate::core::pointer::CursorState;
use crate::core::text::{Headline, Highlight};

/// Hero heading entrance: slide, fade and unblur
#[derive(Clone, Debug, PartialEq)]
pub struct HeadingStyle {
    pub offset_x: f64,
    pub opacity: f64,
    pub blur: f64,
}

impl Default for HeadingStyle {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            opacity: 1.0,
            blur: 0.0,
        }
    }
}

/// Call-to-action button pulse
#[derive(Clone, Debug, PartialEq)]
pub struct CtaStyle {
    pub scale: f64,
    /// 0..1 strength of the glow ring
    pub glow: f64,
}

impl Default for CtaStyle {
    fn default() -> Self {
        Self {
            scale: 1.0,
            glow: 0.0,
        }
    }
}

/// Everything the hero renders
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presentation {
    pub heading: HeadingStyle,
    pub headline: Headline,
    pub highlight: Highlight,
    pub cursor: CursorState,
    pub cta: CtaStyle,
}

/// Presentation plus the geometry it is animated against
pub struct Stage {
    pub view: Presentation,
    pub anchors: AnchorCache,
    layout: Box<dyn Layout>,
}

impl Stage {
    pub fn new(layout: Box<dyn Layout>) -> Self {
        Self {
            view: Presentation::default(),
            anchors: AnchorCache::new(),
            layout,
        }
    }

    /// Resolve an anchor against the current layout, cached until the
    /// next [`Stage::layout_changed`]
    pub fn anchor(&mut self, id: &AnchorId) -> Result<Point, EffectError> {
        self.anchors.resolve(self.layout.as_ref(), id)
    }

    /// Rendered width of a word in the headline font
    pub fn text_width(&self, word: &str) -> Result<f64, EffectError> {
        match self.layout.text_width(word) {
            None => Err(EffectError::MissingTarget(format!("measure \"{word}\""))),
            Some(width) if width <= 0.0 => {
                Err(EffectError::LayoutUnsettled(format!("measure \"{word}\"")))
            }
            Some(width) => Ok(width),
        }
    }

    pub fn layout_changed(&mut self) {
        self.anchors.invalidate();
    }

    pub fn replace_layout(&mut self, layout: Box<dyn Layout>) {
        self.layout = layout;
        self.anchors.invalidate();
    }
}
