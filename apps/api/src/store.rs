use crate::admin::images::{default_images, ImageAsset};
use crate::config::Config;
use crate::quiz::questions::{default_questions, QuizQuestion};
use crate::result::templates::{default_templates, TemplateTable};
use crate::stylist::rules::{
    default_quick_questions, default_rules, QuickQuestion, ResponseRule, StylistSettings,
};

/// Every admin-editable table. Held behind one `RwLock` in `AppState`:
/// storefront reads take the read half, admin writes the write half.
/// In-memory only; edits are lost on restart.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    pub templates: TemplateTable,
    pub questions: Vec<QuizQuestion>,
    pub rules: Vec<ResponseRule>,
    pub quick_questions: Vec<QuickQuestion>,
    pub settings: StylistSettings,
    pub images: Vec<ImageAsset>,
}

impl ConfigStore {
    /// Seed content the storefront ships with; stylist settings start from `config`.
    pub fn seeded(config: &Config) -> Self {
        ConfigStore {
            templates: TemplateTable::new(default_templates()),
            questions: default_questions(),
            rules: default_rules(),
            quick_questions: default_quick_questions(),
            settings: StylistSettings::from_config(config),
            images: default_images(),
        }
    }
}
