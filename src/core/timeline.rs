//! Timeline sequencer
//!
//! A timeline owns an ordered list of steps. Each step has an absolute start
//! time (flattened from its [`Position`] when the step is added), a
//! duration, an [`Ease`] and an [`Effect`] that mutates the stage `S`.
//!
//! The host drives the timeline by calling [`Timeline::tick`] with the
//! current time, typically once per animation frame. Nothing here reads a
//! clock, so tests drive it with a virtual clock.
//!
//! # Usage Example
//!
//! ```rust
//! use heropage::core::easing::Ease;
//! use heropage::core::timeline::{Position, Step, Timeline, tween};
//! use std::time::Duration;
//!
//! let mut timeline: Timeline<f64> = Timeline::new();
//! timeline
//!     .add(
//!         Position::At(Duration::ZERO),
//!         Step::new("grow", Duration::from_secs(1), tween(|v: &mut f64, p| *v = p * 100.0)),
//!     )
//!     .unwrap();
//!
//! let mut value = 0.0;
//! timeline.play(Duration::ZERO);
//! timeline.tick(&mut value, Duration::from_millis(500));
//! assert_eq!(value, 50.0);
//! ```

use std::fmt;
use std::time::Duration;

use crate::core::easing::Ease;
use crate::core::error::{EffectError, MotionError};

/// Index of a step inside its timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub usize);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a step starts, relative to the timeline or to earlier steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Absolute offset from the timeline origin
    At(Duration),
    /// After the previously added step ends, plus a gap
    Then(Duration),
    /// This long before the previously added step ends
    Overlap(Duration),
    /// Relative to the start of an earlier step
    With(StepId, Duration),
    /// Relative to the end of an earlier step
    After(StepId, Duration),
}

/// Visual mutation driven by a step
pub trait Effect<S> {
    /// Called once when the step's start time is reached.
    ///
    /// Errors skip the step's visuals; [`EffectError::LayoutUnsettled`] is
    /// retried on the next tick once before giving up.
    fn start(&mut self, stage: &mut S) -> Result<(), EffectError> {
        let _ = stage;
        Ok(())
    }

    /// Apply eased progress in `0.0..=1.0`
    fn update(&mut self, stage: &mut S, progress: f64);

    /// Forget anything captured in `start`, before a replay
    fn reset(&mut self) {}
}

struct FnTween<F>(F);

impl<S, F> Effect<S> for FnTween<F>
where
    F: FnMut(&mut S, f64),
{
    fn update(&mut self, stage: &mut S, progress: f64) {
        (self.0)(stage, progress)
    }
}

/// Effect from a closure receiving eased progress
pub fn tween<S, F>(f: F) -> Box<dyn Effect<S>>
where
    F: FnMut(&mut S, f64) + 'static,
    S: 'static,
{
    Box::new(FnTween(f))
}

struct FnCall<F>(F);

impl<S, F> Effect<S> for FnCall<F>
where
    F: FnMut(&mut S) -> Result<(), EffectError>,
{
    fn start(&mut self, stage: &mut S) -> Result<(), EffectError> {
        (self.0)(stage)
    }

    fn update(&mut self, _stage: &mut S, _progress: f64) {}
}

/// Effect that runs once at its start time
pub fn call<S, F>(f: F) -> Box<dyn Effect<S>>
where
    F: FnMut(&mut S) -> Result<(), EffectError> + 'static,
    S: 'static,
{
    Box::new(FnCall(f))
}

type Getter<S> = Box<dyn Fn(&S) -> f64>;
type Setter<S> = Box<dyn Fn(&mut S, f64)>;
type Target<S> = Box<dyn FnMut(&mut S) -> Result<f64, EffectError>>;

/// Tween of a single numeric property from its value at start to a target
///
/// The target is evaluated when the step starts, so measured targets
/// (rendered widths, anchor positions) reflect the layout at that moment.
pub struct PropertyTween<S> {
    get: Getter<S>,
    set: Setter<S>,
    target: Target<S>,
    span: Option<(f64, f64)>,
}

impl<S: 'static> PropertyTween<S> {
    pub fn to(
        get: impl Fn(&S) -> f64 + 'static,
        set: impl Fn(&mut S, f64) + 'static,
        value: f64,
    ) -> Self {
        Self::to_measured(get, set, move |_| Ok(value))
    }

    pub fn to_measured(
        get: impl Fn(&S) -> f64 + 'static,
        set: impl Fn(&mut S, f64) + 'static,
        target: impl FnMut(&mut S) -> Result<f64, EffectError> + 'static,
    ) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
            target: Box::new(target),
            span: None,
        }
    }

    pub fn boxed(self) -> Box<dyn Effect<S>> {
        Box::new(self)
    }
}

impl<S> Effect<S> for PropertyTween<S> {
    fn start(&mut self, stage: &mut S) -> Result<(), EffectError> {
        let to = (self.target)(stage)?;
        self.span = Some(((self.get)(stage), to));
        Ok(())
    }

    fn update(&mut self, stage: &mut S, progress: f64) {
        if let Some((from, to)) = self.span {
            (self.set)(stage, from + (to - from) * progress);
        }
    }

    fn reset(&mut self) {
        self.span = None;
    }
}

/// A step waiting to be added to a timeline
pub struct Step<S> {
    label: String,
    duration: Duration,
    ease: Ease,
    effect: Box<dyn Effect<S>>,
}

impl<S> Step<S> {
    pub fn new(label: impl Into<String>, duration: Duration, effect: Box<dyn Effect<S>>) -> Self {
        Self {
            label: label.into(),
            duration,
            ease: Ease::Linear,
            effect,
        }
    }

    /// Zero-length step that fires once
    pub fn instant(label: impl Into<String>, effect: Box<dyn Effect<S>>) -> Self {
        Self::new(label, Duration::ZERO, effect)
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Lifecycle of a scheduled step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Running,
    Done,
}

struct Scheduled<S> {
    step: Step<S>,
    start: Duration,
    state: StepState,
    skipped: bool,
    deferred: bool,
}

impl<S> Scheduled<S> {
    fn end(&self) -> Duration {
        self.start + self.step.duration
    }
}

/// What changed during one [`Timeline::tick`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub started: Vec<StepId>,
    pub completed: Vec<StepId>,
    pub skipped: Vec<StepId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.started.is_empty() && self.completed.is_empty() && self.skipped.is_empty()
    }
}

/// Ordered collection of steps with flattened start times
pub struct Timeline<S> {
    steps: Vec<Scheduled<S>>,
    /// Step indices sorted by (start, insertion)
    order: Vec<usize>,
    origin: Option<Duration>,
}

impl<S> Default for Timeline<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Timeline<S> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            order: Vec::new(),
            origin: None,
        }
    }

    /// Schedule a step. Its absolute start time is fixed here.
    pub fn add(&mut self, position: Position, step: Step<S>) -> Result<StepId, MotionError> {
        let start = self.resolve(position)?;
        let id = StepId(self.steps.len());

        self.steps.push(Scheduled {
            step,
            start,
            state: StepState::Pending,
            skipped: false,
            deferred: false,
        });

        let at = self
            .order
            .partition_point(|&i| self.steps[i].start <= start);
        self.order.insert(at, id.0);

        Ok(id)
    }

    fn resolve(&self, position: Position) -> Result<Duration, MotionError> {
        let previous = self.steps.last();
        Ok(match position {
            Position::At(at) => at,
            Position::Then(gap) => previous.map_or(Duration::ZERO, |p| p.end()) + gap,
            Position::Overlap(by) => previous
                .map_or(Duration::ZERO, |p| p.end())
                .saturating_sub(by),
            Position::With(id, delay) => self.scheduled(id)?.start + delay,
            Position::After(id, delay) => self.scheduled(id)?.end() + delay,
        })
    }

    fn scheduled(&self, id: StepId) -> Result<&Scheduled<S>, MotionError> {
        self.steps.get(id.0).ok_or(MotionError::UnknownStep(id))
    }

    /// Absolute start offset of a step
    pub fn start_of(&self, id: StepId) -> Option<Duration> {
        self.steps.get(id.0).map(|s| s.start)
    }

    /// Absolute end offset of a step
    pub fn end_of(&self, id: StepId) -> Option<Duration> {
        self.steps.get(id.0).map(|s| s.end())
    }

    pub fn state_of(&self, id: StepId) -> Option<StepState> {
        self.steps.get(id.0).map(|s| s.state)
    }

    /// Whether the step's visuals were skipped after an effect error
    pub fn was_skipped(&self, id: StepId) -> bool {
        self.steps.get(id.0).is_some_and(|s| s.skipped)
    }

    /// End of the last step
    pub fn duration(&self) -> Duration {
        self.steps
            .iter()
            .map(Scheduled::end)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Start (or restart) playback with `now` as the origin.
    ///
    /// Every step goes back to pending, so a replay never overlaps the
    /// previous run.
    pub fn play(&mut self, now: Duration) {
        for scheduled in &mut self.steps {
            scheduled.state = StepState::Pending;
            scheduled.skipped = false;
            scheduled.deferred = false;
            scheduled.step.effect.reset();
        }
        self.origin = Some(now);
    }

    pub fn is_playing(&self) -> bool {
        self.origin.is_some() && !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.origin.is_some() && self.steps.iter().all(|s| s.state == StepState::Done)
    }

    /// Time since the origin, `None` before [`Timeline::play`]
    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        self.origin.map(|origin| now.saturating_sub(origin))
    }

    /// Drive every due step to its progress at `now`
    pub fn tick(&mut self, stage: &mut S, now: Duration) -> TickReport {
        let mut report = TickReport::default();
        let Some(elapsed) = self.elapsed(now) else {
            return report;
        };

        for &index in &self.order {
            let scheduled = &mut self.steps[index];
            let id = StepId(index);

            if scheduled.state == StepState::Done || elapsed < scheduled.start {
                continue;
            }

            if scheduled.state == StepState::Pending {
                match scheduled.step.effect.start(stage) {
                    Ok(()) => report.started.push(id),
                    Err(EffectError::LayoutUnsettled(target)) if !scheduled.deferred => {
                        tracing::debug!(step = %scheduled.step.label, %target, "deferring step to next frame");
                        scheduled.deferred = true;
                        continue;
                    }
                    Err(e) => {
                        tracing::debug!(step = %scheduled.step.label, error = %e, "skipping step");
                        scheduled.skipped = true;
                        report.skipped.push(id);
                    }
                }
                scheduled.state = StepState::Running;
            }

            let local = elapsed - scheduled.start;
            let duration = scheduled.step.duration;
            let progress = if duration.is_zero() {
                1.0
            } else {
                (local.as_secs_f64() / duration.as_secs_f64()).min(1.0)
            };

            if !scheduled.skipped {
                let eased = scheduled.step.ease.apply(progress);
                scheduled.step.effect.update(stage, eased);
            }

            if local >= duration {
                scheduled.state = StepState::Done;
                report.completed.push(id);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_millis((s * 1000.0).round() as u64)
    }

    fn set_value(slot: usize, to: f64) -> Box<dyn Effect<Vec<f64>>> {
        tween(move |v: &mut Vec<f64>, p| v[slot] = p * to)
    }

    #[test]
    fn test_positions_flatten_to_absolute_times() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        let a = tl
            .add(Position::At(secs(0.5)), Step::new("a", secs(1.0), set_value(0, 1.0)))
            .unwrap();
        let b = tl
            .add(Position::Then(secs(0.1)), Step::new("b", secs(1.0), set_value(1, 1.0)))
            .unwrap();
        let c = tl
            .add(Position::Overlap(secs(0.3)), Step::new("c", secs(0.5), set_value(2, 1.0)))
            .unwrap();
        let d = tl
            .add(Position::With(a, secs(0.2)), Step::new("d", secs(0.2), set_value(3, 1.0)))
            .unwrap();
        let e = tl
            .add(Position::After(b, Duration::ZERO), Step::new("e", secs(1.0), set_value(4, 1.0)))
            .unwrap();

        assert_eq!(tl.start_of(a), Some(secs(0.5)));
        assert_eq!(tl.start_of(b), Some(secs(1.6)));
        assert_eq!(tl.start_of(c), Some(secs(2.3)));
        assert_eq!(tl.start_of(d), Some(secs(0.7)));
        assert_eq!(tl.start_of(e), Some(secs(2.6)));
        assert_eq!(tl.duration(), secs(3.6));
    }

    #[test]
    fn test_unknown_reference_is_rejected() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        let result = tl.add(
            Position::After(StepId(3), Duration::ZERO),
            Step::new("x", secs(1.0), set_value(0, 1.0)),
        );
        assert_eq!(result, Err(MotionError::UnknownStep(StepId(3))));
        assert!(tl.is_empty());
    }

    #[test]
    fn test_tick_applies_eased_progress() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        tl.add(
            Position::At(Duration::ZERO),
            Step::new("a", secs(1.0), set_value(0, 1.0)).ease(Ease::POWER2_OUT),
        )
        .unwrap();

        let mut stage = vec![0.0];
        tl.play(secs(10.0));
        tl.tick(&mut stage, secs(10.5));
        assert!((stage[0] - Ease::POWER2_OUT.apply(0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_nothing_runs_before_play() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        tl.add(Position::At(Duration::ZERO), Step::new("a", secs(1.0), set_value(0, 1.0)))
            .unwrap();

        let mut stage = vec![0.0];
        let report = tl.tick(&mut stage, secs(5.0));
        assert!(report.is_empty());
        assert_eq!(stage[0], 0.0);
        assert!(!tl.is_playing());
    }

    #[test]
    fn test_late_tick_lands_final_values_in_order() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        // Declared second but starts first
        tl.add(Position::At(secs(1.0)), Step::new("late", secs(1.0), tween(|v: &mut Vec<f64>, p| {
            v.push(10.0 + p)
        })))
        .unwrap();
        tl.add(Position::At(Duration::ZERO), Step::new("early", secs(1.0), tween(|v: &mut Vec<f64>, p| {
            v.push(p)
        })))
        .unwrap();

        let mut stage = Vec::new();
        tl.play(Duration::ZERO);
        let report = tl.tick(&mut stage, secs(30.0));

        assert_eq!(stage, vec![1.0, 11.0]);
        assert_eq!(report.completed, vec![StepId(1), StepId(0)]);
        assert!(tl.is_finished());
    }

    #[test]
    fn test_overlapping_steps_run_concurrently() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        tl.add(Position::At(Duration::ZERO), Step::new("a", secs(2.0), set_value(0, 1.0)))
            .unwrap();
        tl.add(Position::Overlap(secs(1.0)), Step::new("b", secs(2.0), set_value(1, 1.0)))
            .unwrap();

        let mut stage = vec![0.0, 0.0];
        tl.play(Duration::ZERO);
        tl.tick(&mut stage, secs(1.5));
        assert_eq!(stage, vec![0.75, 0.25]);
    }

    #[test]
    fn test_failed_effect_is_skipped_without_aborting() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        let broken = tl
            .add(
                Position::At(Duration::ZERO),
                Step::instant(
                    "broken",
                    call(|_: &mut Vec<f64>| Err(EffectError::MissingTarget("#nope".to_string()))),
                ),
            )
            .unwrap();
        let next = tl
            .add(Position::Then(Duration::ZERO), Step::new("next", secs(1.0), set_value(0, 2.0)))
            .unwrap();

        let mut stage = vec![0.0];
        tl.play(Duration::ZERO);
        let report = tl.tick(&mut stage, secs(0.5));
        assert_eq!(report.skipped, vec![broken]);
        assert!(report.completed.contains(&broken));
        assert!(tl.was_skipped(broken));

        tl.tick(&mut stage, secs(1.0));
        assert_eq!(stage[0], 2.0);
        assert_eq!(tl.state_of(next), Some(StepState::Done));
    }

    #[test]
    fn test_skipped_step_keeps_its_schedule() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        let missing = tl
            .add(
                Position::At(Duration::ZERO),
                Step::new(
                    "missing",
                    secs(2.0),
                    PropertyTween::to_measured(
                        |v: &Vec<f64>| v[0],
                        |v: &mut Vec<f64>, x| v[0] = x,
                        |_| Err(EffectError::MissingTarget("#gone".to_string())),
                    )
                    .boxed(),
                ),
            )
            .unwrap();

        let mut stage = vec![0.0];
        tl.play(Duration::ZERO);
        let report = tl.tick(&mut stage, secs(1.0));
        assert!(!report.completed.contains(&missing));
        assert_eq!(tl.state_of(missing), Some(StepState::Running));

        let report = tl.tick(&mut stage, secs(2.0));
        assert_eq!(report.completed, vec![missing]);
        assert_eq!(stage[0], 0.0);
    }

    #[test]
    fn test_unsettled_layout_is_deferred_once() {
        use std::cell::Cell;
        use std::rc::Rc;

        let attempts = Rc::new(Cell::new(0));
        let counter = attempts.clone();

        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        let id = tl
            .add(
                Position::At(Duration::ZERO),
                Step::new(
                    "measure",
                    secs(1.0),
                    PropertyTween::to_measured(
                        |v: &Vec<f64>| v[0],
                        |v: &mut Vec<f64>, x| v[0] = x,
                        move |_| {
                            counter.set(counter.get() + 1);
                            if counter.get() == 1 {
                                Err(EffectError::LayoutUnsettled("hero-word".to_string()))
                            } else {
                                Ok(80.0)
                            }
                        },
                    )
                    .boxed(),
                ),
            )
            .unwrap();

        let mut stage = vec![0.0];
        tl.play(Duration::ZERO);
        let first = tl.tick(&mut stage, secs(0.016));
        assert!(first.is_empty());
        assert_eq!(tl.state_of(id), Some(StepState::Pending));

        let second = tl.tick(&mut stage, secs(0.5));
        assert_eq!(second.started, vec![id]);
        assert_eq!(stage[0], 40.0);
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn test_still_unsettled_after_deferral_is_skipped() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        let id = tl
            .add(
                Position::At(Duration::ZERO),
                Step::instant(
                    "measure",
                    call(|_: &mut Vec<f64>| Err(EffectError::LayoutUnsettled("a".to_string()))),
                ),
            )
            .unwrap();

        let mut stage = vec![0.0];
        tl.play(Duration::ZERO);
        tl.tick(&mut stage, secs(0.0));
        let report = tl.tick(&mut stage, secs(0.016));
        assert_eq!(report.skipped, vec![id]);
        assert!(tl.is_finished());
    }

    #[test]
    fn test_property_tween_reads_start_value_at_start() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        tl.add(
            Position::At(secs(1.0)),
            Step::new(
                "width",
                secs(1.0),
                PropertyTween::to(|v: &Vec<f64>| v[0], |v: &mut Vec<f64>, x| v[0] = x, 100.0).boxed(),
            ),
        )
        .unwrap();

        let mut stage = vec![0.0];
        tl.play(Duration::ZERO);
        // Changed between scheduling and start
        stage[0] = 50.0;
        tl.tick(&mut stage, secs(1.5));
        assert_eq!(stage[0], 75.0);
    }

    #[test]
    fn test_replay_resets_steps() {
        let mut tl: Timeline<Vec<f64>> = Timeline::new();
        tl.add(
            Position::At(Duration::ZERO),
            Step::new(
                "width",
                secs(1.0),
                PropertyTween::to(|v: &Vec<f64>| v[0], |v: &mut Vec<f64>, x| v[0] = x, 10.0).boxed(),
            ),
        )
        .unwrap();

        let mut stage = vec![0.0];
        tl.play(Duration::ZERO);
        tl.tick(&mut stage, secs(2.0));
        assert!(tl.is_finished());

        stage[0] = 0.0;
        tl.play(secs(5.0));
        assert!(tl.is_playing());
        tl.tick(&mut stage, secs(5.5));
        assert_eq!(stage[0], 5.0);
    }
}
