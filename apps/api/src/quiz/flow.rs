//! Quiz answer lifecycle: created empty, filled one step at a time, finalized
//! into an `AxisTriple` once the last step is answered.

use serde::{Deserialize, Serialize};

use crate::quiz::axis::{Axis, AxisParseError, AxisTriple, BodyType, ColorSeason, StylePreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStep {
    BodyType,
    ColorSeason,
    StylePreference,
}

impl QuizStep {
    pub const COUNT: usize = 3;

    pub fn first() -> Self {
        QuizStep::BodyType
    }

    /// 1-based position, as shown in "ステップ 2 / 3".
    pub fn number(self) -> usize {
        match self {
            QuizStep::BodyType => 1,
            QuizStep::ColorSeason => 2,
            QuizStep::StylePreference => 3,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            QuizStep::BodyType => Some(QuizStep::ColorSeason),
            QuizStep::ColorSeason => Some(QuizStep::StylePreference),
            QuizStep::StylePreference => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            QuizStep::BodyType => None,
            QuizStep::ColorSeason => Some(QuizStep::BodyType),
            QuizStep::StylePreference => Some(QuizStep::ColorSeason),
        }
    }

    /// Progress bar fill in percent.
    pub fn progress_percent(self) -> u32 {
        (self.number() * 100 / Self::COUNT) as u32
    }
}

/// Outcome of advancing the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The current step is unanswered; the UI keeps its button disabled.
    Blocked(QuizStep),
    Next(QuizStep),
    Finished(AxisTriple),
}

/// A partially filled quiz answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    #[serde(default)]
    pub body_type: Option<BodyType>,
    #[serde(default)]
    pub color_season: Option<ColorSeason>,
    #[serde(default)]
    pub style_preference: Option<StylePreference>,
}

impl QuizAnswer {
    /// Records the answer for `step` from a raw option id.
    /// Unknown ids are rejected here; the quiz only offers closed choices.
    pub fn answer(&mut self, step: QuizStep, raw: &str) -> Result<(), AxisParseError> {
        match step {
            QuizStep::BodyType => self.body_type = Some(BodyType::parse_strict(raw)?),
            QuizStep::ColorSeason => self.color_season = Some(ColorSeason::parse_strict(raw)?),
            QuizStep::StylePreference => {
                self.style_preference = Some(StylePreference::parse_strict(raw)?)
            }
        }
        Ok(())
    }

    pub fn can_proceed(&self, step: QuizStep) -> bool {
        match step {
            QuizStep::BodyType => self.body_type.is_some(),
            QuizStep::ColorSeason => self.color_season.is_some(),
            QuizStep::StylePreference => self.style_preference.is_some(),
        }
    }

    /// First step that still has no answer.
    pub fn first_unanswered(&self) -> Option<QuizStep> {
        let mut step = Some(QuizStep::first());
        while let Some(s) = step {
            if !self.can_proceed(s) {
                return Some(s);
            }
            step = s.next();
        }
        None
    }

    pub fn advance(&self, current: QuizStep) -> Advance {
        if !self.can_proceed(current) {
            return Advance::Blocked(current);
        }
        match current.next() {
            Some(next) => Advance::Next(next),
            None => match self.finalize() {
                Some(triple) => Advance::Finished(triple),
                None => Advance::Blocked(self.first_unanswered().unwrap_or(current)),
            },
        }
    }

    pub fn finalize(&self) -> Option<AxisTriple> {
        Some(AxisTriple::new(
            self.body_type?,
            self.color_season?,
            self.style_preference?,
        ))
    }
}
