//! Axis values: the three closed quiz dimensions and their validation.
//!
//! Two ways in from a raw string:
//! - `FromStr` is strict and used where a bad value must be rejected (admin writes).
//! - `parse_or_default` is total and used at the result boundary, so the
//!   resolver always has a triple to work with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {axis}")]
pub struct AxisParseError {
    pub axis: &'static str,
    pub value: String,
}

/// Closed axis enumeration with a wire id and a localized short label.
pub trait Axis: Copy + Sized + 'static {
    const NAME: &'static str;
    const ALL: &'static [Self];
    const DEFAULT: Self;

    fn id(self) -> &'static str;
    fn label(self) -> &'static str;

    /// Maps a raw value to the enum, falling back to `DEFAULT` for anything
    /// empty or unrecognized.
    fn parse_or_default(raw: &str) -> Self {
        Self::parse_strict(raw).unwrap_or(Self::DEFAULT)
    }

    fn parse_strict(raw: &str) -> Result<Self, AxisParseError> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.id() == trimmed)
            .ok_or_else(|| AxisParseError {
                axis: Self::NAME,
                value: raw.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Straight,
    Wave,
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSeason {
    Spring,
    Summer,
    Autumn,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreference {
    Elegant,
    Casual,
    Mode,
}

impl Axis for BodyType {
    const NAME: &'static str = "body type";
    const ALL: &'static [Self] = &[BodyType::Straight, BodyType::Wave, BodyType::Natural];
    const DEFAULT: Self = BodyType::Straight;

    fn id(self) -> &'static str {
        match self {
            BodyType::Straight => "straight",
            BodyType::Wave => "wave",
            BodyType::Natural => "natural",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BodyType::Straight => "ストレート",
            BodyType::Wave => "ウェーブ",
            BodyType::Natural => "ナチュラル",
        }
    }
}

impl Axis for ColorSeason {
    const NAME: &'static str = "color season";
    const ALL: &'static [Self] = &[
        ColorSeason::Spring,
        ColorSeason::Summer,
        ColorSeason::Autumn,
        ColorSeason::Winter,
    ];
    const DEFAULT: Self = ColorSeason::Spring;

    fn id(self) -> &'static str {
        match self {
            ColorSeason::Spring => "spring",
            ColorSeason::Summer => "summer",
            ColorSeason::Autumn => "autumn",
            ColorSeason::Winter => "winter",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ColorSeason::Spring => "スプリング",
            ColorSeason::Summer => "サマー",
            ColorSeason::Autumn => "オータム",
            ColorSeason::Winter => "ウィンター",
        }
    }
}

impl Axis for StylePreference {
    const NAME: &'static str = "style preference";
    const ALL: &'static [Self] = &[
        StylePreference::Elegant,
        StylePreference::Casual,
        StylePreference::Mode,
    ];
    // Mirrors the storefront, which falls back to casual rather than the first option.
    const DEFAULT: Self = StylePreference::Casual;

    fn id(self) -> &'static str {
        match self {
            StylePreference::Elegant => "elegant",
            StylePreference::Casual => "casual",
            StylePreference::Mode => "mode",
        }
    }

    fn label(self) -> &'static str {
        match self {
            StylePreference::Elegant => "エレガント",
            StylePreference::Casual => "カジュアル",
            StylePreference::Mode => "モード",
        }
    }
}

macro_rules! impl_axis_traits {
    ($($ty:ty),*) => {$(
        impl FromStr for $ty {
            type Err = AxisParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Axis>::parse_strict(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    )*};
}

impl_axis_traits!(BodyType, ColorSeason, StylePreference);

/// One concrete value per axis. The primary lookup key for recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTriple {
    pub body_type: BodyType,
    pub color_season: ColorSeason,
    pub style_preference: StylePreference,
}

impl AxisTriple {
    pub fn new(
        body_type: BodyType,
        color_season: ColorSeason,
        style_preference: StylePreference,
    ) -> Self {
        Self {
            body_type,
            color_season,
            style_preference,
        }
    }

    /// All 3 × 4 × 3 combinations, body type outermost.
    pub fn all() -> impl Iterator<Item = AxisTriple> {
        BodyType::ALL.iter().flat_map(|&body_type| {
            ColorSeason::ALL.iter().flat_map(move |&color_season| {
                StylePreference::ALL
                    .iter()
                    .map(move |&style_preference| {
                        AxisTriple::new(body_type, color_season, style_preference)
                    })
            })
        })
    }

    /// Short labels joined with " × ", e.g. "ストレート × スプリング × エレガント".
    pub fn joined_labels(&self) -> String {
        format!(
            "{} × {} × {}",
            self.body_type.label(),
            self.color_season.label(),
            self.style_preference.label()
        )
    }

    /// Query string used for the quiz → result handoff.
    pub fn to_query(&self) -> String {
        format!(
            "bodyType={}&colorSeason={}&stylePreference={}",
            self.body_type.id(),
            self.color_season.id(),
            self.style_preference.id()
        )
    }
}

/// Unvalidated triple as it arrives in a query string or request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTriple {
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub color_season: Option<String>,
    #[serde(default)]
    pub style_preference: Option<String>,
}

impl RawTriple {
    /// Total validation: every missing or unknown axis takes its default.
    pub fn validate_or_default(&self) -> AxisTriple {
        AxisTriple::new(
            BodyType::parse_or_default(self.body_type.as_deref().unwrap_or_default()),
            ColorSeason::parse_or_default(self.color_season.as_deref().unwrap_or_default()),
            StylePreference::parse_or_default(
                self.style_preference.as_deref().unwrap_or_default(),
            ),
        )
    }
}
