//! Typewriter and word cycler
//!
//! The typewriter reveals a fixed sentence one character at a time. Once it
//! finishes, the sentence is split into a static prefix and a final word;
//! the word cycler then swaps that final word through a list while the
//! highlight bar behind it tracks the rendered width of the current word.

use std::time::Duration;

use crate::core::easing::Ease;
use crate::core::error::{EffectError, MotionError};
use crate::core::stage::Stage;
use crate::core::timeline::{Effect, Position, PropertyTween, Step, StepId, Timeline, call};

/// Headline text as rendered
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Headline {
    /// Characters revealed so far while typing
    pub typed: String,
    /// Static part of the sentence once typing is done
    pub prefix: String,
    /// Word shown inside the highlight once typing is done
    pub word: String,
    pub word_index: usize,
    pub typing_done: bool,
}

impl Headline {
    /// Text a reader currently sees
    pub fn displayed(&self) -> String {
        if self.typing_done {
            format!("{}{}", self.prefix, self.word)
        } else {
            self.typed.clone()
        }
    }
}

/// Highlight rectangle behind the cycling word
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
    pub width: f64,
    pub opacity: f64,
}

/// Progressive reveal of a sentence at a constant rate
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    text: String,
    per_char: Duration,
    chars: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, per_char: Duration) -> Result<Self, MotionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MotionError::EmptySentence);
        }
        // The typed text must split exactly into prefix + final word
        if text.ends_with(char::is_whitespace) {
            return Err(MotionError::TrailingWhitespace);
        }
        if per_char.is_zero() {
            return Err(MotionError::ZeroTypingRate);
        }
        let chars = text.chars().count();
        Ok(Self {
            text,
            per_char,
            chars,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn per_char(&self) -> Duration {
        self.per_char
    }

    pub fn char_count(&self) -> usize {
        self.chars
    }

    /// `len(text) × per_char`
    pub fn duration(&self) -> Duration {
        self.per_char * self.chars as u32
    }

    /// `floor(elapsed / per_char)`, clamped to the sentence length
    pub fn visible_chars(&self, elapsed: Duration) -> usize {
        let shown = elapsed.as_nanos() / self.per_char.as_nanos();
        usize::try_from(shown).map_or(self.chars, |n| n.min(self.chars))
    }

    /// First `count` characters of the sentence
    pub fn prefix_of(&self, count: usize) -> &str {
        match self.text.char_indices().nth(count) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn visible_text(&self, elapsed: Duration) -> &str {
        self.prefix_of(self.visible_chars(elapsed))
    }

    /// Static prefix (with its trailing space) and the final word; together
    /// they are exactly the typed text
    pub fn split_final_word(&self) -> (&str, &str) {
        match self.text.rfind(char::is_whitespace) {
            Some(at) => {
                let word_start = at + self.text[at..].chars().next().map_or(1, char::len_utf8);
                self.text.split_at(word_start)
            }
            None => ("", self.text.as_str()),
        }
    }

    /// Step that types the sentence over [`Typewriter::duration`]
    pub fn step(&self) -> Step<Stage> {
        Step::new(
            "typing",
            self.duration(),
            Box::new(TypeText {
                writer: self.clone(),
            }),
        )
    }
}

struct TypeText {
    writer: Typewriter,
}

impl Effect<Stage> for TypeText {
    fn start(&mut self, stage: &mut Stage) -> Result<(), EffectError> {
        let headline = &mut stage.view.headline;
        headline.typed.clear();
        headline.typing_done = false;
        Ok(())
    }

    fn update(&mut self, stage: &mut Stage, progress: f64) {
        let total = self.writer.char_count();
        // Progress is linear time; the epsilon absorbs float error at exact
        // character boundaries.
        let shown = ((progress * total as f64) + 1e-9).floor() as usize;
        let shown = shown.min(total);

        let headline = &mut stage.view.headline;
        headline.typed = self.writer.prefix_of(shown).to_string();

        if shown == total && !headline.typing_done {
            let (prefix, word) = self.writer.split_final_word();
            headline.prefix = prefix.to_string();
            headline.word = word.to_string();
            headline.word_index = 0;
            headline.typing_done = true;
        }
    }
}

/// How the highlight follows a word change
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeMode {
    /// Snap to the new width in the same frame as the word swap
    Instant,
    /// Animate between the old and new width
    Smooth { duration: Duration, ease: Ease },
}

impl ResizeMode {
    fn duration(&self) -> Duration {
        match self {
            ResizeMode::Instant => Duration::ZERO,
            ResizeMode::Smooth { duration, .. } => *duration,
        }
    }

    fn ease(&self) -> Ease {
        match self {
            ResizeMode::Instant => Ease::Linear,
            ResizeMode::Smooth { ease, .. } => *ease,
        }
    }
}

/// Word swap plus highlight resize
struct ShowWord {
    index: usize,
    word: String,
    span: Option<(f64, f64)>,
}

impl Effect<Stage> for ShowWord {
    fn start(&mut self, stage: &mut Stage) -> Result<(), EffectError> {
        // Measure before touching the headline so a deferred retry starts clean
        let width = stage.text_width(&self.word)?;

        let headline = &mut stage.view.headline;
        headline.word = self.word.clone();
        headline.word_index = self.index;
        stage.view.highlight.opacity = 1.0;

        self.span = Some((stage.view.highlight.width, width));
        Ok(())
    }

    fn update(&mut self, stage: &mut Stage, progress: f64) {
        if let Some((from, to)) = self.span {
            stage.view.highlight.width = from + (to - from) * progress;
        }
    }

    fn reset(&mut self) {
        self.span = None;
    }
}

/// Steps scheduled for one pass through the word list
#[derive(Clone, Debug, PartialEq)]
pub struct CycleSteps {
    /// Highlight entrance on the first word
    pub enter: StepId,
    /// One step per following word, in order
    pub words: Vec<StepId>,
    pub exit: StepId,
    /// When the highlight has fully collapsed
    pub end: Duration,
}

/// Fixed ordered list of words, each shown for the same duration
#[derive(Clone, Debug, PartialEq)]
pub struct WordCycle {
    words: Vec<String>,
    word_duration: Duration,
}

impl WordCycle {
    pub fn new<I, W>(words: I, word_duration: Duration) -> Result<Self, MotionError>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(MotionError::EmptyWordList);
        }
        Ok(Self {
            words,
            word_duration,
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_duration(&self) -> Duration {
        self.word_duration
    }

    /// Sum of per-word durations, the first word included
    pub fn total_duration(&self) -> Duration {
        self.word_duration * self.words.len() as u32
    }

    /// Schedule enter, every word swap and the exit.
    ///
    /// Word `i` appears at `enter_start + i × word_duration`; the highlight
    /// starts collapsing at `enter_start + total_duration()`.
    pub fn schedule(
        &self,
        timeline: &mut Timeline<Stage>,
        position: Position,
        enter: ResizeMode,
        between: ResizeMode,
        exit: (Duration, Ease),
    ) -> Result<CycleSteps, MotionError> {
        let enter_id = timeline.add(
            position,
            Step::new("highlight-enter", enter.duration(), self.show(0)).ease(enter.ease()),
        )?;

        let mut words = Vec::with_capacity(self.words.len().saturating_sub(1));
        for index in 1..self.words.len() {
            let at = self.word_duration * index as u32;
            let id = timeline.add(
                Position::With(enter_id, at),
                Step::new(format!("word-cycle-{index}"), between.duration(), self.show(index))
                    .ease(between.ease()),
            )?;
            words.push(id);
        }

        let (exit_duration, exit_ease) = exit;
        let exit_id = timeline.add(
            Position::With(enter_id, self.total_duration()),
            Step::new(
                "highlight-exit",
                exit_duration,
                PropertyTween::to(
                    |s: &Stage| s.view.highlight.width,
                    |s: &mut Stage, w| s.view.highlight.width = w,
                    0.0,
                )
                .boxed(),
            )
            .ease(exit_ease),
        )?;
        let hide = timeline.add(
            Position::After(exit_id, Duration::ZERO),
            Step::instant(
                "highlight-hide",
                call(|s: &mut Stage| {
                    s.view.highlight.opacity = 0.0;
                    Ok(())
                }),
            ),
        )?;

        Ok(CycleSteps {
            enter: enter_id,
            words,
            exit: exit_id,
            end: timeline.end_of(hide).unwrap_or_default(),
        })
    }

    fn show(&self, index: usize) -> Box<dyn Effect<Stage>> {
        Box::new(ShowWord {
            index,
            word: self.words[index].clone(),
            span: None,
        })
    }
}
