//! Scroll-driven section reveal and header visibility

/// Fraction of the viewport height a section's top must rise above
pub const REVEAL_THRESHOLD: f64 = 0.85;

/// Header state toggled by scroll direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeaderVisibility {
    #[default]
    Shown,
    Hidden,
}

impl HeaderVisibility {
    /// Class added to the header element
    pub fn class_name(&self) -> &'static str {
        match self {
            HeaderVisibility::Shown => "header-visible",
            HeaderVisibility::Hidden => "header-hidden",
        }
    }
}

/// Scroll history and reveal flags for one page session
#[derive(Debug, Default, Clone)]
pub struct ScrollContext {
    /// `None` until the first sample
    last_scroll_y: Option<f64>,
    header: HeaderVisibility,
    revealed: Vec<bool>,
}

impl ScrollContext {
    pub fn new(section_count: usize) -> Self {
        Self {
            last_scroll_y: None,
            header: HeaderVisibility::Shown,
            revealed: vec![false; section_count],
        }
    }

    /// Mark every section whose top (relative to the viewport) is above
    /// `viewport_height × 0.85` as visible.
    ///
    /// Returns indices revealed by this call. A revealed section stays
    /// revealed.
    pub fn reveal(&mut self, viewport_height: f64, section_tops: &[f64]) -> Vec<usize> {
        if self.revealed.len() < section_tops.len() {
            self.revealed.resize(section_tops.len(), false);
        }

        let trigger = viewport_height * REVEAL_THRESHOLD;
        let mut newly = Vec::new();
        for (index, top) in section_tops.iter().enumerate() {
            if !self.revealed[index] && *top < trigger {
                self.revealed[index] = true;
                newly.push(index);
            }
        }
        newly
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }

    /// Update the header from a new scroll offset.
    ///
    /// At or above `hero_boundary` the header is always shown. Below it,
    /// scrolling down hides and scrolling up shows; no movement keeps the
    /// current state. The first sample only records the offset, so a page
    /// restored mid-scroll keeps its header until the user moves.
    pub fn update_header(&mut self, scroll_y: f64, hero_boundary: f64) -> HeaderVisibility {
        let previous = self.last_scroll_y.replace(scroll_y);

        self.header = match previous {
            _ if scroll_y <= hero_boundary => HeaderVisibility::Shown,
            Some(previous) if scroll_y > previous => HeaderVisibility::Hidden,
            Some(previous) if scroll_y < previous => HeaderVisibility::Shown,
            _ => self.header,
        };
        self.header
    }

    pub fn header(&self) -> HeaderVisibility {
        self.header
    }

    pub fn last_scroll_y(&self) -> Option<f64> {
        self.last_scroll_y
    }
}
