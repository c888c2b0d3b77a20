//! requestAnimationFrame driver, DOM measurement and page listeners

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::wasm_bindgen::{JsCast, closure::Closure};

use crate::core::clock::Clock;
use crate::core::layout::{AnchorId, Layout, Rect};
use crate::core::scroll::HeaderVisibility;
use crate::core::stage::Presentation;
use crate::core::{HeroScript, PageSession, ScrollSample};
use crate::ui::motion::{HERO_ROOT_ID, MEASURE_ID, REVEAL_SELECTOR, REVEALED_CLASS};

const RESIZE_DEBOUNCE_MS: u32 = 150;

/// `performance.now()` as a [`Clock`], falling back to `Date.now()`
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> Duration {
        let millis = match &self.performance {
            Some(performance) => performance.now(),
            None => js_sys::Date::now(),
        };
        Duration::from_secs_f64(millis.max(0.0) / 1000.0)
    }
}

/// Live page geometry, relative to the hero root
pub struct DomLayout {
    document: web_sys::Document,
    root: web_sys::Element,
    measure: Option<web_sys::Element>,
}

impl DomLayout {
    pub fn new(document: web_sys::Document, root: web_sys::Element) -> Self {
        let measure = document.get_element_by_id(MEASURE_ID);
        if measure.is_none() {
            warn!("#{} not found, highlight widths cannot be measured", MEASURE_ID);
        }
        Self {
            document,
            root,
            measure,
        }
    }
}

impl Layout for DomLayout {
    fn anchor_rect(&self, id: &AnchorId) -> Option<Rect> {
        let element = self.document.get_element_by_id(id.as_str())?;
        let origin = self.root.get_bounding_client_rect();
        let rect = element.get_bounding_client_rect();
        Some(Rect::new(
            rect.left() - origin.left(),
            rect.top() - origin.top(),
            rect.width(),
            rect.height(),
        ))
    }

    fn text_width(&self, word: &str) -> Option<f64> {
        let measure = self.measure.as_ref()?;
        measure.set_text_content(Some(word));
        Some(measure.get_bounding_client_rect().width())
    }
}

/// Session plus the browser handles that drive it
pub struct Motion {
    session: PageSession,
    clock: PerformanceClock,
    view: RwSignal<Presentation>,
    header: RwSignal<HeaderVisibility>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    frame_pending: bool,
    resize_debounce: Option<Timeout>,
}

/// Page-lifetime slot for [`Motion`]; empty until [`install`] runs
pub type MotionHandle = StoredValue<Option<Motion>, LocalStorage>;

pub fn motion_handle() -> MotionHandle {
    StoredValue::new_local(None)
}

/// Build the session, hook scroll and resize, and start the hero.
///
/// Call once after the page is mounted. Listeners are removed when the
/// calling owner is cleaned up.
pub fn install(
    handle: MotionHandle,
    view: RwSignal<Presentation>,
    header: RwSignal<HeaderVisibility>,
) {
    let Some(window) = web_sys::window() else {
        warn!("no window, motion disabled");
        return;
    };
    let Some(document) = window.document() else {
        warn!("no document, motion disabled");
        return;
    };

    let sections = reveal_sections(&document).len();
    let session = match document.get_element_by_id(HERO_ROOT_ID) {
        Some(root) => {
            let layout = DomLayout::new(document.clone(), root);
            match PageSession::with_hero(sections, HeroScript::default(), Box::new(layout)) {
                Ok(session) => session,
                Err(e) => {
                    warn!("hero script rejected: {}", e);
                    PageSession::without_hero(sections)
                }
            }
        }
        None => {
            warn!("#{} not found, hero animation skipped", HERO_ROOT_ID);
            PageSession::without_hero(sections)
        }
    };

    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    *frame.borrow_mut() = Some(Closure::new(move || on_frame(handle)));

    handle.set_value(Some(Motion {
        session,
        clock: PerformanceClock::new(),
        view,
        header,
        frame,
        frame_pending: false,
        resize_debounce: None,
    }));

    let handle_scroll = window_event_listener(leptos::ev::scroll, move |_| sync_scroll(handle));
    let handle_resize = window_event_listener(leptos::ev::resize, move |_| schedule_resize(handle));
    on_cleanup(move || {
        drop(handle_scroll);
        drop(handle_resize);
    });

    sync_scroll(handle);
    replay(handle);
}

/// Start the hero from the beginning, abandoning a run in progress
pub fn replay(handle: MotionHandle) {
    let mut started = false;
    handle.update_value(|motion| {
        if let Some(motion) = motion {
            let now = motion.clock.now();
            started = motion.session.play_hero(now);
        }
    });
    if started {
        request_frame(handle);
    }
}

/// Sample scroll geometry and apply reveals and header state
pub fn sync_scroll(handle: MotionHandle) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let sections = reveal_sections(&document);
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let sample = ScrollSample {
        scroll_y,
        viewport_height: window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0),
        section_tops: sections
            .iter()
            .map(|s| s.get_bounding_client_rect().top())
            .collect(),
        hero_boundary: document
            .get_element_by_id(HERO_ROOT_ID)
            .map_or(0.0, |hero| hero.get_bounding_client_rect().bottom() + scroll_y),
    };

    handle.update_value(|motion| {
        let Some(motion) = motion else {
            return;
        };
        let update = motion.session.on_scroll(&sample);
        for index in update.revealed {
            if let Some(section) = sections.get(index) {
                let _ = section.class_list().add_1(REVEALED_CLASS);
            }
        }
        if motion.header.get_untracked() != update.header {
            motion.header.set(update.header);
        }
    });
}

/// Debounced resize: drop cached anchors, then resample scroll
fn schedule_resize(handle: MotionHandle) {
    handle.update_value(|motion| {
        if let Some(motion) = motion {
            // Replacing the timeout cancels the previous one
            motion.resize_debounce = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                handle.update_value(|motion| {
                    if let Some(motion) = motion {
                        motion.session.on_resize();
                    }
                });
                sync_scroll(handle);
            }));
        }
    });
}

fn request_frame(handle: MotionHandle) {
    let mut frame = None;
    handle.update_value(|motion| {
        if let Some(motion) = motion
            && !motion.frame_pending
        {
            motion.frame_pending = true;
            frame = Some(motion.frame.clone());
        }
    });
    let Some(frame) = frame else {
        return;
    };

    if let (Some(window), Some(closure)) = (web_sys::window(), frame.borrow().as_ref()) {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn on_frame(handle: MotionHandle) {
    let mut animating = false;
    handle.update_value(|motion| {
        let Some(motion) = motion else {
            return;
        };
        motion.frame_pending = false;

        let now = motion.clock.now();
        // Phase changes are logged by the player
        motion.session.tick(now);
        if let Some(hero) = motion.session.hero() {
            motion.view.set(hero.view().clone());
        }
        animating = motion.session.is_animating();
    });

    if animating {
        request_frame(handle);
    }
}

fn reveal_sections(document: &web_sys::Document) -> Vec<web_sys::Element> {
    let Ok(nodes) = document.query_selector_all(REVEAL_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}
