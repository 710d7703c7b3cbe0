//! Scripted stylist: picks a rule for the question and fills in its placeholders.
//!
//! `AppState` holds an `Arc<dyn Stylist>`; `ScriptedStylist` is the only
//! backend. A reply depends solely on the triggering input and the session's
//! triple, never on earlier chat history.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::catalog::{Catalog, ProductSummary};
use crate::quiz::axis::{Axis, AxisTriple, StylePreference};
use crate::store::ConfigStore;
use crate::stylist::classifier::{classify, is_product_related};
use crate::stylist::random::{choose, shuffle, RandomSource};
use crate::stylist::rules::{Category, ResponseRule, StylistSettings};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylistReply {
    pub content: String,
    pub products: Vec<ProductSummary>,
    /// Category the reply was answered under; `None` for the generic fallback.
    pub category: Option<Category>,
}

#[async_trait]
pub trait Stylist: Send + Sync {
    /// `category` is `Some` for quick questions and `None` for typed text.
    async fn reply(
        &self,
        store: &ConfigStore,
        text: &str,
        category: Option<Category>,
        triple: AxisTriple,
    ) -> StylistReply;
}

pub struct ScriptedStylist {
    catalog: Arc<Catalog>,
    rng: Arc<dyn RandomSource>,
}

impl ScriptedStylist {
    pub fn new(catalog: Arc<Catalog>, rng: Arc<dyn RandomSource>) -> Self {
        Self { catalog, rng }
    }
}

#[async_trait]
impl Stylist for ScriptedStylist {
    async fn reply(
        &self,
        store: &ConfigStore,
        text: &str,
        category: Option<Category>,
        triple: AxisTriple,
    ) -> StylistReply {
        respond(
            &store.rules,
            &store.settings,
            &self.catalog,
            self.rng.as_ref(),
            text,
            category,
            triple,
        )
    }
}

/// Core responder.
///
/// 1. Category: explicit for quick questions, keyword-classified for free text.
/// 2. Rule: first in table order matching the category and admitting the triple.
/// 3. Text: one candidate picked at random, placeholders substituted; the
///    settings' fallback template when no rule applies.
/// 4. Products: when the rule asks for them or the free text was
///    product-related, a shuffled slice of the style's grouping.
pub fn respond(
    rules: &[ResponseRule],
    settings: &StylistSettings,
    catalog: &Catalog,
    rng: &dyn RandomSource,
    text: &str,
    category: Option<Category>,
    triple: AxisTriple,
) -> StylistReply {
    let (category, product_related) = match category {
        Some(c) => (Some(c), false),
        None => (classify(text), is_product_related(text)),
    };

    let rule = category.and_then(|c| {
        rules
            .iter()
            .find(|r| r.category == c && r.applies_to(&triple) && !r.candidates().is_empty())
    });

    let (template, attach, answered_as) = match rule {
        Some(rule) => {
            let candidates = rule.candidates();
            let picked = choose(rng, &candidates).copied().unwrap_or_default();
            (
                picked.to_string(),
                rule.product_recommendations || product_related,
                Some(rule.category),
            )
        }
        None => (settings.fallback_response.clone(), product_related, None),
    };

    let products = if attach {
        pick_products(
            catalog,
            triple.style_preference,
            rng,
            settings.max_product_recommendations,
        )
    } else {
        Vec::new()
    };

    tracing::debug!(
        ?answered_as,
        rule_id = ?rule.map(|r| r.id.as_str()),
        product_count = products.len(),
        "Stylist reply composed"
    );

    StylistReply {
        content: substitute(&template, &triple, text),
        products,
        category: answered_as,
    }
}

/// Replaces axis placeholders with short labels, then `{userMessage}`.
/// The user's text is inserted last so it is never itself substituted.
pub fn substitute(template: &str, triple: &AxisTriple, user_text: &str) -> String {
    template
        .replace("{bodyType}", triple.body_type.label())
        .replace("{colorSeason}", triple.color_season.label())
        .replace("{stylePreference}", triple.style_preference.label())
        .replace("{userMessage}", user_text)
}

/// Shuffled style grouping truncated to `max`.
pub fn pick_products(
    catalog: &Catalog,
    style: StylePreference,
    rng: &dyn RandomSource,
    max: usize,
) -> Vec<ProductSummary> {
    let mut pool = catalog.for_style(style);
    shuffle(rng, &mut pool);
    pool.into_iter().take(max).map(ProductSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::axis::{BodyType, ColorSeason};
    use crate::stylist::random::{FixedSequence, ThreadRandom};
    use crate::stylist::rules::default_rules;

    fn triple(style: StylePreference) -> AxisTriple {
        AxisTriple::new(BodyType::Straight, ColorSeason::Spring, style)
    }

    fn run(text: &str, category: Option<Category>, style: StylePreference) -> StylistReply {
        respond(
            &default_rules(),
            &StylistSettings::default(),
            &Catalog::default(),
            &FixedSequence::new(vec![0]),
            text,
            category,
            triple(style),
        )
    }

    #[test]
    fn test_reason_quick_question_substitutes_labels() {
        let reply = run("なぜこの診断結果になったの？", Some(Category::Reason), StylePreference::Elegant);
        assert!(reply.content.contains("体型（ストレート）"));
        assert!(reply.content.contains("パーソナルカラー（スプリング）"));
        assert!(reply.content.contains("好みのスタイル（エレガント）"));
        assert!(!reply.content.contains('{'));
        assert!(reply.products.is_empty());
        assert_eq!(reply.category, Some(Category::Reason));
    }

    #[test]
    fn test_advice_attaches_at_most_two_products_from_style_subset() {
        let catalog = Catalog::default();
        for &style in StylePreference::ALL {
            let allowed: Vec<u32> = catalog.for_style(style).iter().map(|p| p.id).collect();
            for category in [Category::Advice, Category::Styling] {
                for _ in 0..20 {
                    let reply = respond(
                        &default_rules(),
                        &StylistSettings::default(),
                        &catalog,
                        &ThreadRandom,
                        "",
                        Some(category),
                        triple(style),
                    );
                    assert!(reply.products.len() <= 2);
                    assert!(reply.products.iter().all(|p| allowed.contains(&p.id)));
                }
            }
        }
    }

    #[test]
    fn test_fixed_sequence_makes_products_reproducible() {
        // elegant pool [1,2,3], all-zero draws shuffle to [2,3,1]
        let reply = run("", Some(Category::Advice), StylePreference::Elegant);
        let ids: Vec<u32> = reply.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_free_text_with_osusume_is_advice_with_products() {
        let reply = run("おすすめは？", None, StylePreference::Casual);
        assert_eq!(reply.category, Some(Category::Advice));
        assert!(!reply.products.is_empty());
    }

    #[test]
    fn test_unclassified_text_gets_fallback_echo() {
        let reply = run("こんにちは", None, StylePreference::Mode);
        assert_eq!(reply.category, None);
        assert!(reply.content.contains("「こんにちは」"));
        assert!(reply.content.contains("ストレート × スプリング × モード"));
        assert!(reply.products.is_empty());
    }

    #[test]
    fn test_no_applicable_rule_falls_back() {
        let mut rules = default_rules();
        rules.retain(|r| r.category != Category::Styling);
        let reply = respond(
            &rules,
            &StylistSettings::default(),
            &Catalog::default(),
            &FixedSequence::new(vec![0]),
            "合わせ方は？",
            Some(Category::Styling),
            triple(StylePreference::Casual),
        );
        assert_eq!(reply.category, None);
        assert!(reply.content.contains("合わせ方は？"));
    }

    #[test]
    fn test_rule_filtered_out_by_axis_is_skipped() {
        let mut rules = default_rules();
        for rule in rules.iter_mut() {
            rule.body_types = vec![BodyType::Wave];
        }
        let reply = run_with(&rules, Some(Category::Reason));
        assert_eq!(reply.category, None);
    }

    fn run_with(rules: &[ResponseRule], category: Option<Category>) -> StylistReply {
        respond(
            rules,
            &StylistSettings::default(),
            &Catalog::default(),
            &FixedSequence::new(vec![0]),
            "",
            category,
            triple(StylePreference::Elegant),
        )
    }

    #[test]
    fn test_user_text_is_not_substituted() {
        let out = substitute("「{userMessage}」", &triple(StylePreference::Mode), "{bodyType}");
        assert_eq!(out, "「{bodyType}」");
    }

    #[test]
    fn test_candidate_choice_follows_random_source() {
        let reply = respond(
            &default_rules(),
            &StylistSettings::default(),
            &Catalog::default(),
            &FixedSequence::new(vec![1]),
            "",
            Some(Category::Reason),
            triple(StylePreference::Elegant),
        );
        assert!(reply.content.starts_with("骨格診断では"));
    }

    #[test]
    fn test_zero_max_products_attaches_none() {
        let settings = StylistSettings {
            max_product_recommendations: 0,
            ..StylistSettings::default()
        };
        let reply = respond(
            &default_rules(),
            &settings,
            &Catalog::default(),
            &ThreadRandom,
            "",
            Some(Category::Advice),
            triple(StylePreference::Elegant),
        );
        assert!(reply.products.is_empty());
    }
}
