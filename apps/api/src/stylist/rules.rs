//! Response rules, quick questions and stylist settings: the tables the
//! scripted stylist reads and the admin screens edit.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::quiz::axis::{AxisTriple, BodyType, ColorSeason, StylePreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reason,
    Advice,
    Styling,
}

/// One scripted answer family. Empty axis filters admit every value of that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRule {
    pub id: String,
    pub category: Category,
    pub trigger: String,
    pub responses: Vec<String>,
    pub product_recommendations: bool,
    #[serde(default)]
    pub body_types: Vec<BodyType>,
    #[serde(default)]
    pub color_seasons: Vec<ColorSeason>,
    #[serde(default)]
    pub style_preferences: Vec<StylePreference>,
}

impl ResponseRule {
    pub fn applies_to(&self, triple: &AxisTriple) -> bool {
        admits(&self.body_types, &triple.body_type)
            && admits(&self.color_seasons, &triple.color_season)
            && admits(&self.style_preferences, &triple.style_preference)
    }

    /// Candidates that actually contain text.
    pub fn candidates(&self) -> Vec<&str> {
        self.responses
            .iter()
            .map(String::as_str)
            .filter(|r| !r.trim().is_empty())
            .collect()
    }
}

fn admits<T: PartialEq>(filter: &[T], value: &T) -> bool {
    filter.is_empty() || filter.contains(value)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRuleInput {
    pub category: Category,
    #[serde(default)]
    pub trigger: String,
    pub responses: Vec<String>,
    #[serde(default)]
    pub product_recommendations: bool,
    #[serde(default)]
    pub body_types: Vec<BodyType>,
    #[serde(default)]
    pub color_seasons: Vec<ColorSeason>,
    #[serde(default)]
    pub style_preferences: Vec<StylePreference>,
}

impl ResponseRuleInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.responses.iter().all(|r| r.trim().is_empty()) {
            return Err("a response rule needs at least one non-empty response".to_string());
        }
        Ok(())
    }

    pub fn into_rule(self, id: String) -> ResponseRule {
        ResponseRule {
            id,
            category: self.category,
            trigger: self.trigger,
            responses: self.responses,
            product_recommendations: self.product_recommendations,
            body_types: self.body_types,
            color_seasons: self.color_seasons,
            style_preferences: self.style_preferences,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickQuestion {
    pub id: String,
    pub text: String,
    pub category: Category,
    pub order: u32,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickQuestionInput {
    pub text: String,
    pub category: Category,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl QuickQuestionInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("quick question text cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Sorted by `order`, ties keep table order.
pub fn ordered_active(questions: &[QuickQuestion]) -> Vec<QuickQuestion> {
    let mut active: Vec<QuickQuestion> = questions.iter().filter(|q| q.active).cloned().collect();
    active.sort_by_key(|q| q.order);
    active
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylistSettings {
    pub response_delay_ms: u64,
    #[serde(default)]
    pub response_jitter_ms: u64,
    pub max_product_recommendations: usize,
    pub enable_typing_indicator: bool,
    pub default_greeting: String,
    /// Used when no rule answers. Placeholders: `{userMessage}`, `{bodyType}`,
    /// `{colorSeason}`, `{stylePreference}`.
    pub fallback_response: String,
}

/// Upper bound accepted from the settings screen.
pub const MAX_RESPONSE_DELAY_MS: u64 = 10_000;

impl StylistSettings {
    pub fn from_config(config: &Config) -> Self {
        StylistSettings {
            response_delay_ms: config.response_delay_ms,
            response_jitter_ms: config.response_jitter_ms,
            max_product_recommendations: config.max_product_recommendations,
            enable_typing_indicator: config.typing_indicator,
            default_greeting: "AIスタイリストがあなたの診断結果について詳しくお答えします"
                .to_string(),
            fallback_response: "ご質問ありがとうございます。「{userMessage}」について、あなたの診断結果（{bodyType} × {colorSeason} × {stylePreference}）を踏まえてお答えします。".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let total = self.response_delay_ms.checked_add(self.response_jitter_ms);
        if total.map_or(true, |ms| ms > MAX_RESPONSE_DELAY_MS) {
            return Err(format!(
                "response delay plus jitter must not exceed {MAX_RESPONSE_DELAY_MS} ms"
            ));
        }
        if self.fallback_response.trim().is_empty() {
            return Err("fallback response cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StylistSettings {
    fn default() -> Self {
        StylistSettings::from_config(&Config::default())
    }
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_rules() -> Vec<ResponseRule> {
    vec![
        ResponseRule {
            id: "1".to_string(),
            category: Category::Reason,
            trigger: "なぜこの診断結果".to_string(),
            responses: texts(&[
                "あなたの診断結果は、選択された体型（{bodyType}）、パーソナルカラー（{colorSeason}）、好みのスタイル（{stylePreference}）の組み合わせによって決まりました。",
                "骨格診断では、あなたの体のラインや骨格の特徴から最も似合うシルエットを分析しました。",
            ]),
            product_recommendations: false,
            body_types: vec![],
            color_seasons: vec![],
            style_preferences: vec![],
        },
        ResponseRule {
            id: "2".to_string(),
            category: Category::Advice,
            trigger: "どんなアイテムを買うべき".to_string(),
            responses: texts(&[
                "{bodyType}タイプの方には、体のラインを活かすアイテムがおすすめです。{colorSeason}カラーを基調とした色選びで、より洗練された印象を演出できます。",
                "まずは基本となるベーシックアイテムから揃えることをおすすめします。あなたの{stylePreference}スタイルに合うアイテムをご紹介します。",
            ]),
            product_recommendations: true,
            body_types: vec![],
            color_seasons: vec![],
            style_preferences: vec![],
        },
        ResponseRule {
            id: "3".to_string(),
            category: Category::Styling,
            trigger: "今のワードローブとの合わせ方".to_string(),
            responses: texts(&[
                "お手持ちのベーシックアイテムに{colorSeason}カラーの小物を一点加えるだけで、印象がぐっと変わります。",
                "{bodyType}タイプの方は、シルエットを意識して今のワードローブを組み合わせると{stylePreference}な雰囲気にまとまります。",
            ]),
            product_recommendations: true,
            body_types: vec![],
            color_seasons: vec![],
            style_preferences: vec![],
        },
    ]
}

pub fn default_quick_questions() -> Vec<QuickQuestion> {
    let q = |id: &str, text: &str, category, order, active| QuickQuestion {
        id: id.to_string(),
        text: text.to_string(),
        category,
        order,
        active,
    };
    vec![
        q("1", "なぜこの診断結果になったの？", Category::Reason, 1, true),
        q("2", "どんなアイテムを買うべき？", Category::Advice, 2, true),
        q("3", "今のワードローブとの合わせ方は？", Category::Styling, 3, true),
        q("4", "おすすめの商品を教えて", Category::Advice, 4, true),
        q("5", "メイクで気をつけることは？", Category::Advice, 5, true),
        q("6", "避けた方がいい色やデザインは？", Category::Advice, 6, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple() -> AxisTriple {
        AxisTriple::new(BodyType::Wave, ColorSeason::Autumn, StylePreference::Mode)
    }

    #[test]
    fn test_empty_filters_apply_to_everything() {
        for rule in default_rules() {
            for t in AxisTriple::all() {
                assert!(rule.applies_to(&t));
            }
        }
    }

    #[test]
    fn test_axis_filter_restricts_rule() {
        let mut rule = default_rules().remove(0);
        rule.color_seasons = vec![ColorSeason::Spring, ColorSeason::Summer];
        assert!(!rule.applies_to(&triple()));
        rule.color_seasons.push(ColorSeason::Autumn);
        assert!(rule.applies_to(&triple()));
    }

    #[test]
    fn test_blank_candidates_ignored() {
        let mut rule = default_rules().remove(1);
        rule.responses.push("   ".to_string());
        assert_eq!(rule.candidates().len(), 2);
    }

    #[test]
    fn test_rule_input_requires_a_response() {
        let input = ResponseRuleInput {
            category: Category::Advice,
            trigger: String::new(),
            responses: vec![String::new()],
            product_recommendations: false,
            body_types: vec![],
            color_seasons: vec![],
            style_preferences: vec![],
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_ordered_active_skips_inactive() {
        let mut questions = default_quick_questions();
        questions.reverse();
        let active = ordered_active(&questions);
        assert_eq!(active.len(), 5);
        assert_eq!(active[0].id, "1");
        assert!(active.iter().all(|q| q.id != "6"));
    }

    #[test]
    fn test_settings_from_config() {
        let settings = StylistSettings::default();
        assert_eq!(settings.response_delay_ms, 1500);
        assert_eq!(settings.max_product_recommendations, 2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_reject_excessive_delay() {
        let settings = StylistSettings {
            response_delay_ms: 9_000,
            response_jitter_ms: 2_000,
            ..StylistSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_reject_overflowing_delay() {
        let settings = StylistSettings {
            response_delay_ms: u64::MAX,
            response_jitter_ms: 1,
            ..StylistSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rule_wire_format() {
        let json = serde_json::to_value(&default_rules()[1]).unwrap();
        assert_eq!(json["category"], "advice");
        assert_eq!(json["productRecommendations"], true);
    }
}
