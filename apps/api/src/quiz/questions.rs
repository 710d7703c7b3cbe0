use serde::{Deserialize, Serialize};

use crate::quiz::axis::{Axis, AxisParseError, BodyType, ColorSeason, StylePreference};
use crate::quiz::flow::QuizStep;

/// Which axis a question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Body,
    Color,
    Style,
}

impl QuestionKind {
    pub fn step(self) -> QuizStep {
        match self {
            QuestionKind::Body => QuizStep::BodyType,
            QuestionKind::Color => QuizStep::ColorSeason,
            QuestionKind::Style => QuizStep::StylePreference,
        }
    }

    /// Option ids must name a value of this question's axis.
    pub fn validate_option_id(self, id: &str) -> Result<(), AxisParseError> {
        match self {
            QuestionKind::Body => BodyType::parse_strict(id).map(|_| ()),
            QuestionKind::Color => ColorSeason::parse_strict(id).map(|_| ()),
            QuestionKind::Style => StylePreference::parse_strict(id).map(|_| ()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub order: u32,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("question title cannot be empty".to_string());
        }
        for option in &self.options {
            validate_option(self.kind, option)?;
        }
        let mut ids: Vec<&str> = self.options.iter().map(|o| o.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != self.options.len() {
            return Err("option ids must be unique within a question".to_string());
        }
        Ok(())
    }
}

pub fn validate_option(kind: QuestionKind, option: &QuizOption) -> Result<(), String> {
    if option.name.trim().is_empty() {
        return Err("option name cannot be empty".to_string());
    }
    kind.validate_option_id(&option.id).map_err(|e| e.to_string())
}

fn option(id: &str, name: &str, description: &str) -> QuizOption {
    QuizOption {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: id.to_string(),
    }
}

/// The three questions the storefront ships with.
pub fn default_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "1".to_string(),
            title: "あなたの骨格タイプは？".to_string(),
            description: "ご自身の体つきに最も近いものを選んでください".to_string(),
            kind: QuestionKind::Body,
            order: 1,
            options: vec![
                option("straight", "ストレート", "身体に厚みがあり、メリハリのあるボディライン"),
                option("wave", "ウェーブ", "身体が薄く、曲線的で華奢なボディライン"),
                option("natural", "ナチュラル", "骨格がしっかりしていて、フレーム感のあるボディライン"),
            ],
        },
        QuizQuestion {
            id: "2".to_string(),
            title: "あなたのパーソナルカラーは？".to_string(),
            description: "肌、髪、瞳の色から最も似合うと思うカラータイプを選んでください"
                .to_string(),
            kind: QuestionKind::Color,
            order: 2,
            options: vec![
                option("spring", "スプリング", "明るく温かみのある色が似合う"),
                option("summer", "サマー", "涼しげで上品な色が似合う"),
                option("autumn", "オータム", "深みのある温かい色が似合う"),
                option("winter", "ウィンター", "クリアで鮮やかな色が似合う"),
            ],
        },
        QuizQuestion {
            id: "3".to_string(),
            title: "好みのファッションスタイルは？".to_string(),
            description: "理想とするスタイルや憧れのテイストを選んでください".to_string(),
            kind: QuestionKind::Style,
            order: 3,
            options: vec![
                option("elegant", "エレガント", "上品で洗練された大人の女性らしいスタイル"),
                option("casual", "カジュアル", "リラックスした親しみやすい自然体のスタイル"),
                option("mode", "モード", "トレンド感のある個性的でスタイリッシュなスタイル"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_questions_are_valid_and_ordered() {
        let questions = default_questions();
        assert_eq!(questions.len(), 3);
        for (i, q) in questions.iter().enumerate() {
            assert_eq!(q.order as usize, i + 1);
            assert!(q.validate().is_ok(), "question {} invalid", q.id);
        }
    }

    #[test]
    fn test_option_for_wrong_axis_rejected() {
        let mut question = default_questions().remove(0);
        question.options.push(option("winter", "ウィンター", ""));
        let err = question.validate().unwrap_err();
        assert!(err.contains("winter"));
    }

    #[test]
    fn test_duplicate_option_ids_rejected() {
        let mut question = default_questions().remove(2);
        question.options.push(option("mode", "モード2", ""));
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_kind_maps_to_quiz_step() {
        assert_eq!(QuestionKind::Color.step(), QuizStep::ColorSeason);
    }

    #[test]
    fn test_kind_serializes_as_type_field() {
        let json = serde_json::to_value(&default_questions()[0]).unwrap();
        assert_eq!(json["type"], "body");
    }
}
