//! Per-page motion context
//!
//! One [`PageSession`] is built when the page loads and handed to the
//! scroll and animation entry points, so no state hides in globals.

use std::time::Duration;

use crate::core::error::MotionError;
use crate::core::hero::{HeroPhase, HeroPlayer, HeroScript};
use crate::core::layout::Layout;
use crate::core::scroll::{HeaderVisibility, ScrollContext};

/// Geometry read from the page on a scroll or resize event
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub viewport_height: f64,
    /// Top of each reveal section relative to the viewport
    pub section_tops: Vec<f64>,
    /// Bottom edge of the hero in page coordinates
    pub hero_boundary: f64,
}

/// What the page should apply after a scroll sample
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollUpdate {
    pub revealed: Vec<usize>,
    pub header: HeaderVisibility,
}

/// Scroll history plus the hero player, when the hero can run
pub struct PageSession {
    scroll: ScrollContext,
    hero: Option<HeroPlayer>,
}

impl PageSession {
    /// Session without a hero animation; scroll behaviour still works
    pub fn without_hero(section_count: usize) -> Self {
        Self {
            scroll: ScrollContext::new(section_count),
            hero: None,
        }
    }

    pub fn with_hero(
        section_count: usize,
        script: HeroScript,
        layout: Box<dyn Layout>,
    ) -> Result<Self, MotionError> {
        Ok(Self {
            scroll: ScrollContext::new(section_count),
            hero: Some(HeroPlayer::new(script, layout)?),
        })
    }

    pub fn on_scroll(&mut self, sample: &ScrollSample) -> ScrollUpdate {
        let revealed = self
            .scroll
            .reveal(sample.viewport_height, &sample.section_tops);
        let header = self
            .scroll
            .update_header(sample.scroll_y, sample.hero_boundary);
        ScrollUpdate { revealed, header }
    }

    /// Layout changed: cached anchors are stale
    pub fn on_resize(&mut self) {
        if let Some(hero) = &mut self.hero {
            hero.stage_mut().layout_changed();
        }
    }

    /// Start or replay the hero; false when there is none
    pub fn play_hero(&mut self, now: Duration) -> bool {
        match &mut self.hero {
            Some(hero) => {
                hero.play(now);
                true
            }
            None => false,
        }
    }

    /// Advance the hero; returns the phases entered since the last tick
    pub fn tick(&mut self, now: Duration) -> Vec<HeroPhase> {
        self.hero
            .as_mut()
            .map(|hero| hero.tick(now))
            .unwrap_or_default()
    }

    pub fn hero(&self) -> Option<&HeroPlayer> {
        self.hero.as_ref()
    }

    /// Whether frames are still needed
    pub fn is_animating(&self) -> bool {
        self.hero.as_ref().is_some_and(|h| !h.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::FixedLayout;

    #[test]
    fn test_scroll_works_without_hero() {
        let mut session = PageSession::without_hero(2);
        let mut sample = ScrollSample {
            scroll_y: 900.0,
            viewport_height: 1000.0,
            section_tops: vec![100.0, 1200.0],
            hero_boundary: 700.0,
        };
        let update = session.on_scroll(&sample);
        assert_eq!(update.revealed, vec![0]);
        assert_eq!(update.header, HeaderVisibility::Shown);

        sample.scroll_y = 1100.0;
        sample.section_tops = vec![-100.0, 1000.0];
        let update = session.on_scroll(&sample);
        assert!(update.revealed.is_empty());
        assert_eq!(update.header, HeaderVisibility::Hidden);

        assert!(!session.play_hero(Duration::ZERO));
        assert!(session.tick(Duration::from_secs(1)).is_empty());
        assert!(!session.is_animating());
    }

    #[test]
    fn test_hero_session_ticks() {
        let mut layout = FixedLayout::new();
        layout.char_width = Some(10.0);
        let mut session =
            PageSession::with_hero(0, HeroScript::default(), Box::new(layout)).unwrap();

        assert!(session.play_hero(Duration::ZERO));
        assert_eq!(session.tick(Duration::from_millis(10)), vec![HeroPhase::Typing]);
        assert!(session.is_animating());

        session.on_resize();
        session.tick(Duration::from_secs(60));
        assert_eq!(session.hero().map(|h| h.phase()), Some(HeroPhase::Finished));
        assert!(!session.is_animating());
    }
}
