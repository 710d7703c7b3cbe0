//! Result templates keyed by axis triple, plus the admin "generate missing
//! combinations" operation that fills the table up to all 36 triples.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quiz::axis::{Axis, AxisTriple, BodyType, ColorSeason, StylePreference};
use crate::result::profiles::{is_hex_color, season_palette, PALETTE_SIZE};

pub const PLACEHOLDER_DESCRIPTION: &str = "診断結果の説明を入力してください";
pub const PLACEHOLDER_TIPS: &str = "スタイリングのコツを入力してください";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTemplate {
    pub id: String,
    #[serde(flatten)]
    pub triple: AxisTriple,
    pub title: String,
    pub description: String,
    pub styling_tips: String,
    pub recommended_products: Vec<u32>,
    pub icon: String,
    pub colors: Vec<String>,
}

/// Admin payload for creating or replacing a template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTemplateInput {
    #[serde(flatten)]
    pub triple: AxisTriple,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub styling_tips: String,
    #[serde(default)]
    pub recommended_products: Vec<u32>,
    #[serde(default)]
    pub colors: Vec<String>,
}

impl ResultTemplateInput {
    /// Colors may be omitted (the season palette is used) but never malformed.
    pub fn validate(&self) -> Result<(), String> {
        if !self.colors.is_empty() && self.colors.len() != PALETTE_SIZE {
            return Err(format!(
                "a palette needs exactly {PALETTE_SIZE} colors, got {}",
                self.colors.len()
            ));
        }
        if let Some(bad) = self.colors.iter().find(|c| !is_hex_color(c)) {
            return Err(format!("'{bad}' is not a #RRGGBB color"));
        }
        Ok(())
    }

    pub fn into_template(self, id: String) -> ResultTemplate {
        let colors = if self.colors.is_empty() {
            palette_strings(self.triple.color_season)
        } else {
            self.colors
        };
        ResultTemplate {
            id,
            icon: self.triple.body_type.id().to_string(),
            triple: self.triple,
            title: self.title,
            description: self.description,
            styling_tips: self.styling_tips,
            recommended_products: self.recommended_products,
            colors,
        }
    }
}

/// Combination overview row for the admin matrix.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationStatus {
    #[serde(flatten)]
    pub triple: AxisTriple,
    pub configured: bool,
    pub template_id: Option<String>,
}

pub fn palette_strings(season: ColorSeason) -> Vec<String> {
    season_palette(season).iter().map(|c| c.to_string()).collect()
}

/// Builds the placeholder template used both for table back-fill and for
/// resolving a triple the table does not know.
pub fn synthesize(triple: AxisTriple, id: String) -> ResultTemplate {
    ResultTemplate {
        id,
        triple,
        title: triple.joined_labels(),
        description: PLACEHOLDER_DESCRIPTION.to_string(),
        styling_tips: PLACEHOLDER_TIPS.to_string(),
        recommended_products: Vec::new(),
        icon: triple.body_type.id().to_string(),
        colors: palette_strings(triple.color_season),
    }
}

/// Ordered template table. Lookups are by exact triple; if an admin has
/// created duplicates for one triple, the first row wins.
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    rows: Vec<ResultTemplate>,
}

impl TemplateTable {
    pub fn new(rows: Vec<ResultTemplate>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultTemplate] {
        &self.rows
    }

    pub fn find(&self, triple: &AxisTriple) -> Option<&ResultTemplate> {
        self.rows.iter().find(|r| r.triple == *triple)
    }

    pub fn get(&self, id: &str) -> Option<&ResultTemplate> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn insert(&mut self, template: ResultTemplate) {
        self.rows.push(template);
    }

    /// Replaces the row with the same id. Returns false if none exists.
    pub fn replace(&mut self, template: ResultTemplate) -> bool {
        match self.rows.iter_mut().find(|r| r.id == template.id) {
            Some(row) => {
                *row = template;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    pub fn combinations(&self) -> Vec<CombinationStatus> {
        AxisTriple::all()
            .map(|triple| {
                let existing = self.find(&triple);
                CombinationStatus {
                    triple,
                    configured: existing.is_some(),
                    template_id: existing.map(|t| t.id.clone()),
                }
            })
            .collect()
    }

    /// Appends a placeholder row for every triple without one.
    /// Returns how many rows were added; a second call adds none.
    pub fn generate_missing(&mut self) -> usize {
        let missing: Vec<AxisTriple> = AxisTriple::all()
            .filter(|triple| self.find(triple).is_none())
            .collect();
        let added = missing.len();
        for triple in missing {
            self.rows.push(synthesize(triple, Uuid::new_v4().to_string()));
        }
        added
    }
}

pub fn default_templates() -> Vec<ResultTemplate> {
    vec![
        ResultTemplate {
            id: "1".to_string(),
            triple: AxisTriple::new(BodyType::Straight, ColorSeason::Spring, StylePreference::Elegant),
            title: "ストレート × スプリング × エレガント".to_string(),
            description: "あなたは上品で洗練されたスタイルが似合います".to_string(),
            styling_tips: "シンプルでベーシックなアイテムを中心に、明るく温かみのある色でエレガントに仕上げましょう。".to_string(),
            recommended_products: vec![1, 3],
            icon: "straight".to_string(),
            colors: palette_strings(ColorSeason::Spring),
        },
        ResultTemplate {
            id: "2".to_string(),
            triple: AxisTriple::new(BodyType::Wave, ColorSeason::Summer, StylePreference::Casual),
            title: "ウェーブ × サマー × カジュアル".to_string(),
            description: "ナチュラルで親しみやすいスタイルが魅力的です".to_string(),
            styling_tips: "ソフトな素材や装飾のあるアイテムで、涼しげな色合いをカジュアルに楽しみましょう。".to_string(),
            recommended_products: vec![2, 4],
            icon: "wave".to_string(),
            colors: palette_strings(ColorSeason::Summer),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(colors: Vec<&str>) -> ResultTemplateInput {
        ResultTemplateInput {
            triple: AxisTriple::new(BodyType::Natural, ColorSeason::Autumn, StylePreference::Mode),
            title: "t".to_string(),
            description: String::new(),
            styling_tips: String::new(),
            recommended_products: vec![],
            colors: colors.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_generate_missing_fills_to_36_and_is_idempotent() {
        let mut table = TemplateTable::new(default_templates());
        assert_eq!(table.generate_missing(), 34);
        assert_eq!(table.rows().len(), 36);
        assert_eq!(table.generate_missing(), 0);
        assert!(table.combinations().iter().all(|c| c.configured));
    }

    #[test]
    fn test_generate_missing_keeps_authored_rows() {
        let mut table = TemplateTable::new(default_templates());
        table.generate_missing();
        let triple =
            AxisTriple::new(BodyType::Straight, ColorSeason::Spring, StylePreference::Elegant);
        assert_eq!(table.find(&triple).unwrap().id, "1");
    }

    #[test]
    fn test_synthesized_row_uses_placeholders_and_season_palette() {
        let triple = AxisTriple::new(BodyType::Wave, ColorSeason::Winter, StylePreference::Mode);
        let row = synthesize(triple, "x".to_string());
        assert_eq!(row.title, "ウェーブ × ウィンター × モード");
        assert_eq!(row.description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(row.colors, palette_strings(ColorSeason::Winter));
        assert_eq!(row.icon, "wave");
    }

    #[test]
    fn test_combinations_report_unconfigured_triples() {
        let table = TemplateTable::new(default_templates());
        let combos = table.combinations();
        assert_eq!(combos.len(), 36);
        assert_eq!(combos.iter().filter(|c| c.configured).count(), 2);
    }

    #[test]
    fn test_replace_and_remove_by_id() {
        let mut table = TemplateTable::new(default_templates());
        let mut row = table.get("2").unwrap().clone();
        row.title = "updated".to_string();
        assert!(table.replace(row));
        assert_eq!(table.get("2").unwrap().title, "updated");
        assert!(table.remove("2"));
        assert!(!table.remove("2"));
        assert!(!table.replace(synthesize(AxisTriple::all().next().unwrap(), "nope".into())));
    }

    #[test]
    fn test_input_validation() {
        assert!(input(vec![]).validate().is_ok());
        assert!(input(vec!["#000000", "#111111", "#222222", "#333333"]).validate().is_ok());
        assert!(input(vec!["#000000", "#111111", "#222222"]).validate().is_err());
        assert!(input(vec!["#000000", "#111111", "#222222", "red"]).validate().is_err());
    }

    #[test]
    fn test_input_without_colors_gets_season_palette() {
        let template = input(vec![]).into_template("9".to_string());
        assert_eq!(template.colors, palette_strings(ColorSeason::Autumn));
        assert_eq!(template.icon, "natural");
    }

    #[test]
    fn test_template_serializes_flat_camel_case() {
        let json = serde_json::to_value(&default_templates()[0]).unwrap();
        assert_eq!(json["bodyType"], "straight");
        assert!(!json["stylingTips"].as_str().unwrap().is_empty());
        assert_eq!(json["recommendedProducts"][1], 3);
    }
}
