//! Result resolver: triple → template, and the composed result page view.
//!
//! Both functions are total and pure over the tables passed in. A triple
//! missing from the table, or a partially authored row, still produces a
//! usable result: synthesized title, season palette, placeholder copy.

use serde::Serialize;

use crate::catalog::{Catalog, ProductSummary};
use crate::quiz::axis::AxisTriple;
use crate::result::profiles::{
    body_profile, season_profile, style_profile, AxisProfile, SeasonProfile, PALETTE_SIZE,
};
use crate::result::share::share_text;
use crate::result::templates::{
    palette_strings, synthesize, ResultTemplate, TemplateTable, PLACEHOLDER_DESCRIPTION,
    PLACEHOLDER_TIPS,
};

/// Id reported for templates that do not exist in the table.
pub const SYNTHESIZED_ID: &str = "synthesized";

/// Exact-match lookup with fallback synthesis.
pub fn resolve(table: &TemplateTable, triple: AxisTriple) -> ResultTemplate {
    match table.find(&triple) {
        Some(row) => fill_partial(row.clone()),
        None => synthesize(triple, SYNTHESIZED_ID.to_string()),
    }
}

fn fill_partial(mut row: ResultTemplate) -> ResultTemplate {
    if row.title.trim().is_empty() {
        row.title = row.triple.joined_labels();
    }
    if row.description.trim().is_empty() {
        row.description = PLACEHOLDER_DESCRIPTION.to_string();
    }
    if row.styling_tips.trim().is_empty() {
        row.styling_tips = PLACEHOLDER_TIPS.to_string();
    }
    if row.colors.len() != PALETTE_SIZE {
        row.colors = palette_strings(row.triple.color_season);
    }
    row
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub triple: AxisTriple,
    pub template: ResultTemplate,
    pub body_type: AxisProfile,
    pub color_season: SeasonProfile,
    pub style_preference: AxisProfile,
    pub products: Vec<ProductSummary>,
    pub share_text: String,
}

/// Everything the result page shows for one triple.
///
/// Products: the template's own picks when it names any that exist,
/// otherwise the style grouping in catalog order.
pub fn resolve_view(table: &TemplateTable, catalog: &Catalog, triple: AxisTriple) -> ResultView {
    let template = resolve(table, triple);

    let mut products = catalog.summaries(&template.recommended_products);
    if products.is_empty() {
        products = catalog
            .for_style(triple.style_preference)
            .into_iter()
            .map(ProductSummary::from)
            .collect();
    }

    ResultView {
        triple,
        body_type: body_profile(triple.body_type),
        color_season: season_profile(triple.color_season),
        style_preference: style_profile(triple.style_preference),
        share_text: share_text(&triple),
        template,
        products,
    }
}
