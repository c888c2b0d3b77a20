//! Hero animation
//!
//! Composes the heading entrance, typewriter, word cycler and cursor route
//! into one timeline and tracks which phase the sequence is in:
//!
//! `Typing → HighlightEnter → WordCycle(1..N-1) → HighlightExit → CtaPulse → PointerExit`
//!
//! Transitions are driven purely by time. The sequence plays once; only an
//! explicit [`HeroPlayer::play`] starts it again.

use std::f64::consts::PI;
use std::fmt;
use std::time::Duration;

use crate::core::easing::Ease;
use crate::core::error::MotionError;
use crate::core::layout::{Layout, Point};
use crate::core::pointer::{Route, RouteExit, Waypoint, click_step};
use crate::core::stage::{HeadingStyle, Presentation, Stage};
use crate::core::text::{Headline, ResizeMode, Typewriter, WordCycle};
use crate::core::timeline::{Position, Step, StepId, TickReport, Timeline, tween};

/// Marker element ids the cursor travels between
pub mod anchors {
    pub const POINT_A: &str = "hero-anchor-a";
    pub const POINT_B: &str = "hero-anchor-b";
    pub const POINT_C: &str = "hero-anchor-c";
    /// Sits on the call-to-action button
    pub const POINT_D: &str = "hero-anchor-d";
    pub const VIA_1: &str = "hero-via-1";
    pub const VIA_2: &str = "hero-via-2";
}

/// One cursor stop in the script
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptStop {
    pub anchor: &'static str,
    pub via: &'static [&'static str],
    pub travel: Duration,
    pub hold: Duration,
    pub ease: &'static str,
}

/// Literal content and timing of the hero
#[derive(Clone, Debug, PartialEq)]
pub struct HeroScript {
    pub sentence: &'static str,
    /// Words shown after the sentence's own final word
    pub cycle_words: &'static [&'static str],
    pub per_char: Duration,
    pub word_duration: Duration,

    pub heading_delay: Duration,
    pub heading_duration: Duration,
    pub heading_from_x: f64,
    pub heading_from_blur: f64,
    pub heading_ease: &'static str,

    /// Pause between the last typed character and the highlight
    pub highlight_gap: Duration,
    pub highlight_enter: Duration,
    pub highlight_enter_ease: &'static str,
    pub highlight_exit: Duration,
    pub highlight_exit_ease: &'static str,

    pub route: &'static [ScriptStop],
    pub pointer_fade_in: Duration,
    pub pointer_exit: Duration,
    pub pointer_exit_offset: Point,

    pub click: Duration,
    pub cta_pulse: Duration,
    pub cta_scale: f64,
}

/// Cursor stops A → B → C → D; D sits on the call-to-action
const DEFAULT_ROUTE: &[ScriptStop] = &[
    ScriptStop {
        anchor: anchors::POINT_A,
        via: &[],
        travel: Duration::ZERO,
        hold: Duration::from_millis(600),
        ease: "none",
    },
    ScriptStop {
        anchor: anchors::POINT_B,
        via: &[anchors::VIA_1],
        travel: Duration::from_millis(1300),
        hold: Duration::from_millis(400),
        ease: "power2.inOut",
    },
    ScriptStop {
        anchor: anchors::POINT_C,
        via: &[],
        travel: Duration::from_millis(1000),
        hold: Duration::from_millis(300),
        ease: "sine.inOut",
    },
    ScriptStop {
        anchor: anchors::POINT_D,
        via: &[anchors::VIA_2],
        travel: Duration::from_millis(1100),
        hold: Duration::from_millis(200),
        ease: "power3.inOut",
    },
];

impl Default for HeroScript {
    fn default() -> Self {
        Self {
            sentence: "Designs that impress.",
            cycle_words: &["convert.", "inspire.", "scale."],
            per_char: Duration::from_millis(50),
            word_duration: Duration::from_millis(1400),

            heading_delay: Duration::from_millis(120),
            heading_duration: Duration::from_millis(800),
            heading_from_x: -40.0,
            heading_from_blur: 8.0,
            heading_ease: "power3.out",

            highlight_gap: Duration::from_millis(100),
            highlight_enter: Duration::from_millis(450),
            highlight_enter_ease: "power2.out",
            highlight_exit: Duration::from_millis(400),
            highlight_exit_ease: "power2.inOut",

            route: DEFAULT_ROUTE,
            pointer_fade_in: Duration::from_millis(300),
            pointer_exit: Duration::from_millis(700),
            pointer_exit_offset: Point::new(180.0, 140.0),

            click: Duration::from_millis(260),
            cta_pulse: Duration::from_millis(600),
            cta_scale: 1.06,
        }
    }
}

impl HeroScript {
    pub fn typewriter(&self) -> Result<Typewriter, MotionError> {
        Typewriter::new(self.sentence, self.per_char)
    }

    /// The sentence's final word followed by the cycle words
    pub fn word_cycle(&self) -> Result<WordCycle, MotionError> {
        let writer = self.typewriter()?;
        let (_, first) = writer.split_final_word();
        let words = std::iter::once(first).chain(self.cycle_words.iter().copied());
        WordCycle::new(words, self.word_duration)
    }

    /// What the hero shows without animation: full sentence, no pointer
    pub fn resting_view(&self) -> Result<Presentation, MotionError> {
        let writer = self.typewriter()?;
        let (prefix, word) = writer.split_final_word();
        Ok(Presentation {
            headline: Headline {
                typed: writer.text().to_string(),
                prefix: prefix.to_string(),
                word: word.to_string(),
                word_index: 0,
                typing_done: true,
            },
            ..Presentation::default()
        })
    }

    pub fn route(&self) -> Result<Route, MotionError> {
        let waypoints = self
            .route
            .iter()
            .map(|stop| -> Result<Waypoint, MotionError> {
                let waypoint = Waypoint::new(stop.anchor)
                    .travel(stop.travel)
                    .hold(stop.hold)
                    .ease(stop.ease.parse()?);
                Ok(stop.via.iter().fold(waypoint, |w, via| w.via(*via)))
            })
            .collect::<Result<Vec<_>, MotionError>>()?;

        Ok(Route::new(waypoints)
            .fade_in(self.pointer_fade_in)
            .exit(RouteExit::OffScreen {
                offset: self.pointer_exit_offset,
                duration: self.pointer_exit,
            }))
    }
}

/// Where the hero sequence currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HeroPhase {
    #[default]
    Idle,
    Typing,
    HighlightEnter,
    /// Index into the full word list, from 1
    WordCycle(usize),
    HighlightExit,
    CtaPulse,
    PointerExit,
    Finished,
}

impl fmt::Display for HeroPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeroPhase::Idle => write!(f, "idle"),
            HeroPhase::Typing => write!(f, "typing"),
            HeroPhase::HighlightEnter => write!(f, "highlight-enter"),
            HeroPhase::WordCycle(i) => write!(f, "word-cycle({i})"),
            HeroPhase::HighlightExit => write!(f, "highlight-exit"),
            HeroPhase::CtaPulse => write!(f, "cta-pulse"),
            HeroPhase::PointerExit => write!(f, "pointer-exit"),
            HeroPhase::Finished => write!(f, "finished"),
        }
    }
}

/// Step ids of the milestones, for hosts and tests
#[derive(Clone, Debug, PartialEq)]
pub struct HeroSteps {
    pub heading: StepId,
    pub typing: StepId,
    pub highlight_enter: StepId,
    pub words: Vec<StepId>,
    pub highlight_exit: StepId,
    pub route: Vec<StepId>,
    pub cta_pulse: StepId,
    pub pointer_exit: Option<StepId>,
}

/// Assembled hero timeline with its phase marks
pub struct HeroSequence {
    pub timeline: Timeline<Stage>,
    pub steps: HeroSteps,
    /// Phase start times, ascending
    marks: Vec<(Duration, HeroPhase)>,
}

impl HeroSequence {
    pub fn build(script: &HeroScript) -> Result<Self, MotionError> {
        let writer = script.typewriter()?;
        let cycle = script.word_cycle()?;
        let route = script.route()?;
        let mut timeline = Timeline::new();

        let typing = timeline.add(Position::At(Duration::ZERO), writer.step())?;

        // Overlaps typing
        let from_x = script.heading_from_x;
        let from_blur = script.heading_from_blur;
        let heading = timeline.add(
            Position::At(script.heading_delay),
            Step::new(
                "heading-entrance",
                script.heading_duration,
                tween(move |s: &mut Stage, p| {
                    let heading = &mut s.view.heading;
                    heading.offset_x = from_x * (1.0 - p);
                    heading.opacity = p;
                    heading.blur = from_blur * (1.0 - p);
                }),
            )
            .ease(script.heading_ease.parse()?),
        )?;

        let enter = ResizeMode::Smooth {
            duration: script.highlight_enter,
            ease: script.highlight_enter_ease.parse()?,
        };
        let exit: (Duration, Ease) = (script.highlight_exit, script.highlight_exit_ease.parse()?);
        let cycle_steps = cycle.schedule(
            &mut timeline,
            Position::After(typing, script.highlight_gap),
            enter,
            ResizeMode::Instant,
            exit,
        )?;

        let route_steps = route.schedule(
            &mut timeline,
            Position::With(cycle_steps.enter, Duration::ZERO),
        )?;

        // Whichever finishes last: the highlight collapse or the cursor's
        // arrival on the button
        let pulse_at = cycle_steps.end.max(route_steps.end);
        let cta_pulse = timeline.add(Position::At(pulse_at), click_step(script.click))?;
        let cta_scale = script.cta_scale;
        let cta_glow = timeline.add(
            Position::With(cta_pulse, Duration::ZERO),
            Step::new(
                "cta-pulse",
                script.cta_pulse,
                tween(move |s: &mut Stage, p| {
                    let wave = (p * PI).sin();
                    s.view.cta.scale = 1.0 + (cta_scale - 1.0) * wave;
                    s.view.cta.glow = wave;
                }),
            ),
        )?;

        let pulse_end = timeline
            .end_of(cta_pulse)
            .max(timeline.end_of(cta_glow))
            .unwrap_or(pulse_at);
        let pointer_exit = route.schedule_exit(&mut timeline, Position::At(pulse_end))?;

        let enter_start = timeline.start_of(cycle_steps.enter).unwrap_or_default();
        let mut marks = vec![
            (Duration::ZERO, HeroPhase::Typing),
            (enter_start, HeroPhase::HighlightEnter),
        ];
        for (i, id) in cycle_steps.words.iter().enumerate() {
            if let Some(at) = timeline.start_of(*id) {
                marks.push((at, HeroPhase::WordCycle(i + 1)));
            }
        }
        if let Some(at) = timeline.start_of(cycle_steps.exit) {
            marks.push((at, HeroPhase::HighlightExit));
        }
        marks.push((pulse_at, HeroPhase::CtaPulse));
        if let Some(at) = pointer_exit.and_then(|id| timeline.start_of(id)) {
            marks.push((at, HeroPhase::PointerExit));
        }
        marks.push((timeline.duration(), HeroPhase::Finished));
        marks.sort_by_key(|(at, _)| *at);

        Ok(Self {
            steps: HeroSteps {
                heading,
                typing,
                highlight_enter: cycle_steps.enter,
                words: cycle_steps.words,
                highlight_exit: cycle_steps.exit,
                route: route_steps.segments,
                cta_pulse,
                pointer_exit,
            },
            timeline,
            marks,
        })
    }

    pub fn marks(&self) -> &[(Duration, HeroPhase)] {
        &self.marks
    }
}

/// Initial look before the first frame: heading offset and hidden cursor
fn initial_view(script: &HeroScript) -> Presentation {
    Presentation {
        heading: HeadingStyle {
            offset_x: script.heading_from_x,
            opacity: 0.0,
            blur: script.heading_from_blur,
        },
        ..Presentation::default()
    }
}

/// Hero sequence bound to a stage, driven by host time
pub struct HeroPlayer {
    script: HeroScript,
    sequence: HeroSequence,
    stage: Stage,
    phase: HeroPhase,
    /// Index of the next mark to enter
    next_mark: usize,
}

impl HeroPlayer {
    pub fn new(script: HeroScript, layout: Box<dyn Layout>) -> Result<Self, MotionError> {
        let sequence = HeroSequence::build(&script)?;
        let mut stage = Stage::new(layout);
        stage.view = initial_view(&script);
        Ok(Self {
            script,
            sequence,
            stage,
            phase: HeroPhase::Idle,
            next_mark: 0,
        })
    }

    /// Start from the beginning. A run in progress is abandoned, not overlapped.
    pub fn play(&mut self, now: Duration) {
        if self.sequence.timeline.is_playing() {
            tracing::info!(phase = %self.phase, "restarting hero sequence");
        }
        self.stage.view = initial_view(&self.script);
        self.stage.layout_changed();
        self.phase = HeroPhase::Idle;
        self.next_mark = 0;
        self.sequence.timeline.play(now);
    }

    /// Advance to `now`; returns every phase entered since the last tick, in
    /// order. A late frame can cross several.
    pub fn tick(&mut self, now: Duration) -> Vec<HeroPhase> {
        let report: TickReport = self.sequence.timeline.tick(&mut self.stage, now);
        if !report.skipped.is_empty() {
            tracing::debug!(count = report.skipped.len(), "hero steps skipped");
        }

        let Some(elapsed) = self.sequence.timeline.elapsed(now) else {
            return Vec::new();
        };
        let finished = self.sequence.timeline.is_finished();

        let mut entered = Vec::new();
        while let Some(&(at, phase)) = self.sequence.marks.get(self.next_mark) {
            // Deferred steps can hold the end past the scheduled duration
            let due = match phase {
                HeroPhase::Finished => finished,
                _ => finished || at <= elapsed,
            };
            if !due {
                break;
            }
            tracing::info!(from = %self.phase, to = %phase, "hero phase");
            self.next_mark += 1;
            self.phase = phase;
            entered.push(phase);
        }
        entered
    }

    pub fn phase(&self) -> HeroPhase {
        self.phase
    }

    pub fn view(&self) -> &Presentation {
        &self.stage.view
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn sequence(&self) -> &HeroSequence {
        &self.sequence
    }

    pub fn is_finished(&self) -> bool {
        self.sequence.timeline.is_finished()
    }

    pub fn duration(&self) -> Duration {
        self.sequence.timeline.duration()
    }
}
