//! Page geometry as seen by the motion core
//!
//! The live layout is an external service: the browser implementation reads
//! bounding boxes from the DOM. [`AnchorCache`] keeps resolved anchor
//! positions until the layout changes.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::EffectError;

/// 2D point in page pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Axis-aligned box in page pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// A box with no area has not been laid out yet
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Name of a marker element used as a pointer target
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorId(pub String);

impl AnchorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnchorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Live layout geometry
pub trait Layout {
    /// Bounding box of the marker element, `None` when it is absent
    fn anchor_rect(&self, id: &AnchorId) -> Option<Rect>;

    /// Rendered width of `word` in the headline font, `None` when the
    /// measuring element is absent
    fn text_width(&self, word: &str) -> Option<f64>;
}

/// Layout backed by fixed values, for hosts without a DOM
#[derive(Debug, Clone, Default)]
pub struct FixedLayout {
    anchors: HashMap<AnchorId, Rect>,
    widths: HashMap<String, f64>,
    /// Width per character for words without an explicit width
    pub char_width: Option<f64>,
}

impl FixedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an anchor as a 1x1 box centred on `at`
    pub fn with_anchor(mut self, id: impl Into<String>, at: Point) -> Self {
        self.anchors.insert(
            AnchorId::new(id),
            Rect::new(at.x - 0.5, at.y - 0.5, 1.0, 1.0),
        );
        self
    }

    pub fn with_rect(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.anchors.insert(AnchorId::new(id), rect);
        self
    }

    pub fn with_width(mut self, word: impl Into<String>, width: f64) -> Self {
        self.widths.insert(word.into(), width);
        self
    }

    pub fn move_anchor(&mut self, id: &str, at: Point) {
        self.anchors.insert(
            AnchorId::new(id),
            Rect::new(at.x - 0.5, at.y - 0.5, 1.0, 1.0),
        );
    }

    pub fn remove_anchor(&mut self, id: &str) {
        self.anchors.remove(&AnchorId::new(id));
    }
}

impl Layout for FixedLayout {
    fn anchor_rect(&self, id: &AnchorId) -> Option<Rect> {
        self.anchors.get(id).copied()
    }

    fn text_width(&self, word: &str) -> Option<f64> {
        self.widths
            .get(word)
            .copied()
            .or_else(|| self.char_width.map(|w| w * word.chars().count() as f64))
    }
}

/// Resolved anchor positions, valid until [`AnchorCache::invalidate`]
///
/// Unresolvable anchors are not cached so a later lookup can find an
/// element that appeared since.
#[derive(Debug, Default)]
pub struct AnchorCache {
    resolved: HashMap<AnchorId, Point>,
    generation: u64,
}

impl AnchorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Centre of the anchor's marker element
    pub fn resolve(&mut self, layout: &dyn Layout, id: &AnchorId) -> Result<Point, EffectError> {
        if let Some(point) = self.resolved.get(id) {
            return Ok(*point);
        }

        let rect = layout
            .anchor_rect(id)
            .ok_or_else(|| EffectError::MissingTarget(id.to_string()))?;
        if rect.is_empty() {
            return Err(EffectError::LayoutUnsettled(id.to_string()));
        }

        let center = rect.center();
        self.resolved.insert(id.clone(), center);
        Ok(center)
    }

    /// Drop every cached position; called on resize or DOM mutation
    pub fn invalidate(&mut self) {
        if !self.resolved.is_empty() {
            tracing::debug!(count = self.resolved.len(), "anchor cache invalidated");
        }
        self.resolved.clear();
        self.generation += 1;
    }

    /// Number of invalidations so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_resolves_to_center() {
        let layout = FixedLayout::new().with_rect("cta", Rect::new(100.0, 40.0, 80.0, 20.0));
        let mut cache = AnchorCache::new();

        let point = cache.resolve(&layout, &"cta".into()).unwrap();
        assert_eq!(point, Point::new(140.0, 50.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_anchor() {
        let layout = FixedLayout::new();
        let mut cache = AnchorCache::new();

        let result = cache.resolve(&layout, &"ghost".into());
        assert_eq!(result, Err(EffectError::MissingTarget("ghost".to_string())));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_size_anchor_is_unsettled() {
        let layout = FixedLayout::new().with_rect("a", Rect::new(10.0, 10.0, 0.0, 0.0));
        let mut cache = AnchorCache::new();

        let result = cache.resolve(&layout, &"a".into());
        assert!(matches!(result, Err(EffectError::LayoutUnsettled(_))));
    }

    #[test]
    fn test_cache_survives_layout_shift_until_invalidated() {
        let mut layout = FixedLayout::new().with_anchor("a", Point::new(10.0, 10.0));
        let mut cache = AnchorCache::new();
        let id = AnchorId::new("a");

        cache.resolve(&layout, &id).unwrap();
        layout.move_anchor("a", Point::new(50.0, 60.0));
        assert_eq!(cache.resolve(&layout, &id).unwrap(), Point::new(10.0, 10.0));

        cache.invalidate();
        assert_eq!(cache.generation(), 1);
        assert_eq!(cache.resolve(&layout, &id).unwrap(), Point::new(50.0, 60.0));
    }

    #[test]
    fn test_text_width_falls_back_to_char_width() {
        let mut layout = FixedLayout::new().with_width("scale.", 61.0);
        layout.char_width = Some(10.0);

        assert_eq!(layout.text_width("scale."), Some(61.0));
        assert_eq!(layout.text_width("grow"), Some(40.0));
    }
}
