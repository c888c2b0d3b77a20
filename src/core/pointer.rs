//! Simulated mouse cursor
//!
//! A [`Route`] moves the decorative cursor through a list of anchors. Each
//! anchor is resolved when its segment begins, so the cursor follows the
//! layout as it is at that moment. A segment whose anchor cannot be found
//! does nothing, but still takes its scheduled time.

use std::f64::consts::PI;
use std::time::Duration;

use crate::core::easing::Ease;
use crate::core::error::{EffectError, MotionError};
use crate::core::layout::{AnchorId, Point};
use crate::core::stage::Stage;
use crate::core::timeline::{Effect, Position, PropertyTween, Step, StepId, Timeline, tween};

/// Scale of the cursor at the bottom of a click
pub const CLICK_SCALE: f64 = 0.82;

/// Position and look of the decorative cursor
#[derive(Clone, Debug, PartialEq)]
pub struct CursorState {
    pub position: Point,
    pub opacity: f64,
    /// Press feedback, 1.0 at rest
    pub scale: f64,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            position: Point::default(),
            opacity: 0.0,
            scale: 1.0,
        }
    }
}

/// One stop on a route
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub anchor: AnchorId,
    /// Intermediate anchors the path curves through
    pub via: Vec<AnchorId>,
    /// Travel time from the previous position
    pub travel: Duration,
    /// Pause at the anchor before the next segment
    pub hold: Duration,
    pub ease: Ease,
}

impl Waypoint {
    pub fn new(anchor: impl Into<AnchorId>) -> Self {
        Self {
            anchor: anchor.into(),
            via: Vec::new(),
            travel: Duration::ZERO,
            hold: Duration::ZERO,
            ease: Ease::POWER2_IN_OUT,
        }
    }

    pub fn travel(mut self, travel: Duration) -> Self {
        self.travel = travel;
        self
    }

    pub fn hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn via(mut self, anchor: impl Into<AnchorId>) -> Self {
        self.via.push(anchor.into());
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// How the cursor leaves after the last waypoint
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RouteExit {
    Stay,
    FadeOut(Duration),
    /// Slide by `offset` while fading out
    OffScreen { offset: Point, duration: Duration },
}

/// Steps scheduled for a route
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSteps {
    pub segments: Vec<StepId>,
    pub fade_in: Option<StepId>,
    /// Last segment arrival plus its hold
    pub end: Duration,
}

/// Ordered list of waypoints the cursor visits
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub waypoints: Vec<Waypoint>,
    pub fade_in: Option<Duration>,
    pub exit: RouteExit,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self {
            waypoints,
            fade_in: None,
            exit: RouteExit::Stay,
        }
    }

    pub fn fade_in(mut self, duration: Duration) -> Self {
        self.fade_in = Some(duration);
        self
    }

    pub fn exit(mut self, exit: RouteExit) -> Self {
        self.exit = exit;
        self
    }

    /// Σ(travel + hold) over every waypoint
    pub fn travel_duration(&self) -> Duration {
        self.waypoints.iter().map(|w| w.travel + w.hold).sum()
    }

    /// Schedule every segment, back to back with holds in between.
    ///
    /// The exit is not scheduled here; see [`Route::schedule_exit`].
    pub fn schedule(
        &self,
        timeline: &mut Timeline<Stage>,
        position: Position,
    ) -> Result<RouteSteps, MotionError> {
        let mut segments: Vec<StepId> = Vec::with_capacity(self.waypoints.len());
        let mut previous: Option<(StepId, Duration)> = None;

        for waypoint in &self.waypoints {
            let at = match previous {
                Some((id, hold)) => Position::After(id, hold),
                None => position,
            };
            let step = Step::new(
                format!("pointer-move-{}", waypoint.anchor),
                waypoint.travel,
                Box::new(MoveTo::new(waypoint)),
            )
            .ease(waypoint.ease);
            let id = timeline.add(at, step)?;
            segments.push(id);
            previous = Some((id, waypoint.hold));
        }

        let fade_in = match (self.fade_in, segments.first()) {
            (Some(duration), Some(&first)) => Some(timeline.add(
                Position::With(first, Duration::ZERO),
                Step::new(
                    "pointer-fade-in",
                    duration,
                    PropertyTween::to(
                        |s: &Stage| s.view.cursor.opacity,
                        |s: &mut Stage, o| s.view.cursor.opacity = o,
                        1.0,
                    )
                    .boxed(),
                )
                .ease(Ease::POWER1_OUT),
            )?),
            _ => None,
        };

        let end = match previous {
            Some((id, hold)) => timeline.end_of(id).unwrap_or_default() + hold,
            None => timeline.duration(),
        };

        Ok(RouteSteps {
            segments,
            fade_in,
            end,
        })
    }

    /// Schedule the exit move, `None` for [`RouteExit::Stay`]
    pub fn schedule_exit(
        &self,
        timeline: &mut Timeline<Stage>,
        position: Position,
    ) -> Result<Option<StepId>, MotionError> {
        let step = match self.exit {
            RouteExit::Stay => return Ok(None),
            RouteExit::FadeOut(duration) => Step::new(
                "pointer-exit",
                duration,
                PropertyTween::to(
                    |s: &Stage| s.view.cursor.opacity,
                    |s: &mut Stage, o| s.view.cursor.opacity = o,
                    0.0,
                )
                .boxed(),
            ),
            RouteExit::OffScreen { offset, duration } => Step::new(
                "pointer-exit",
                duration,
                Box::new(Slide {
                    offset,
                    from: None,
                }),
            ),
        };
        timeline.add(position, step.ease(Ease::POWER2_IN_OUT)).map(Some)
    }
}

/// Press-and-release pulse of the cursor at its current position
pub fn click_step(duration: Duration) -> Step<Stage> {
    Step::new(
        "pointer-click",
        duration,
        tween(|s: &mut Stage, p| {
            s.view.cursor.scale = 1.0 - (1.0 - CLICK_SCALE) * (p * PI).sin();
        }),
    )
}

/// Move along `[current, via.., target]`
struct MoveTo {
    target: AnchorId,
    via: Vec<AnchorId>,
    path: Vec<Point>,
}

impl MoveTo {
    fn new(waypoint: &Waypoint) -> Self {
        Self {
            target: waypoint.anchor.clone(),
            via: waypoint.via.clone(),
            path: Vec::new(),
        }
    }
}

impl Effect<Stage> for MoveTo {
    fn start(&mut self, stage: &mut Stage) -> Result<(), EffectError> {
        let target = stage.anchor(&self.target)?;

        let mut path = Vec::with_capacity(self.via.len() + 2);
        path.push(stage.view.cursor.position);
        for via in &self.via {
            match stage.anchor(via) {
                Ok(point) => path.push(point),
                Err(e) => tracing::debug!(anchor = %via, error = %e, "dropping control point"),
            }
        }
        path.push(target);

        self.path = path;
        Ok(())
    }

    fn update(&mut self, stage: &mut Stage, progress: f64) {
        if !self.path.is_empty() {
            stage.view.cursor.position = point_on_path(&self.path, progress);
        }
    }

    fn reset(&mut self) {
        self.path.clear();
    }
}

/// Offset the cursor from where it was while fading it out
struct Slide {
    offset: Point,
    from: Option<(Point, f64)>,
}

impl Effect<Stage> for Slide {
    fn start(&mut self, stage: &mut Stage) -> Result<(), EffectError> {
        self.from = Some((stage.view.cursor.position, stage.view.cursor.opacity));
        Ok(())
    }

    fn update(&mut self, stage: &mut Stage, progress: f64) {
        if let Some((from, opacity)) = self.from {
            let to = Point::new(from.x + self.offset.x, from.y + self.offset.y);
            stage.view.cursor.position = from.lerp(to, progress);
            stage.view.cursor.opacity = opacity * (1.0 - progress);
        }
    }

    fn reset(&mut self) {
        self.from = None;
    }
}

/// Point at `t` along a Catmull-Rom spline through every point of `path`.
///
/// Two points give a straight line. The curve passes through each point.
pub fn point_on_path(path: &[Point], t: f64) -> Point {
    let t = t.clamp(0.0, 1.0);
    match path {
        [] => Point::default(),
        [only] => *only,
        [from, to] => from.lerp(*to, t),
        _ => {
            let segments = path.len() - 1;
            let scaled = t * segments as f64;
            let index = (scaled.floor() as usize).min(segments - 1);
            let u = scaled - index as f64;

            let p0 = path[index.saturating_sub(1)];
            let p1 = path[index];
            let p2 = path[index + 1];
            let p3 = path[(index + 2).min(segments)];

            Point::new(
                catmull_rom(p0.x, p1.x, p2.x, p3.x, u),
                catmull_rom(p0.y, p1.y, p2.y, p3.y, u),
            )
        }
    }
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * u3)
}
