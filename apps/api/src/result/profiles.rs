//! Per-axis display profiles shown on the result page, and the fixed season palettes.

use serde::Serialize;

use crate::quiz::axis::{BodyType, ColorSeason, StylePreference};

/// Every season maps to exactly this many palette colors.
pub const PALETTE_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tips: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonProfile {
    #[serde(flatten)]
    pub profile: AxisProfile,
    pub colors: [&'static str; PALETTE_SIZE],
}

pub fn season_palette(season: ColorSeason) -> [&'static str; PALETTE_SIZE] {
    match season {
        ColorSeason::Spring => ["#FFB6C1", "#FFEB9C", "#98FB98", "#87CEEB"],
        ColorSeason::Summer => ["#E6E6FA", "#B0E0E6", "#F0F8FF", "#FFFAF0"],
        ColorSeason::Autumn => ["#D2691E", "#8B4513", "#CD853F", "#DEB887"],
        ColorSeason::Winter => ["#000080", "#DC143C", "#FFFFFF", "#C0C0C0"],
    }
}

pub fn body_profile(body: BodyType) -> AxisProfile {
    match body {
        BodyType::Straight => AxisProfile {
            id: "straight",
            name: "ストレート",
            description: "身体に厚みがあり、メリハリのあるボディライン",
            tips: "シンプルでベーシックなアイテムが得意。ジャストサイズでIラインシルエットを作ると美しく見えます。",
        },
        BodyType::Wave => AxisProfile {
            id: "wave",
            name: "ウェーブ",
            description: "身体が薄く、曲線的で華奢なボディライン",
            tips: "ソフトな素材や装飾のあるアイテムがおすすめ。ウエストマークでXラインを作ると素敵に仕上がります。",
        },
        BodyType::Natural => AxisProfile {
            id: "natural",
            name: "ナチュラル",
            description: "骨格がしっかりしていて、フレーム感のあるボディライン",
            tips: "ラフな質感のアイテムが似合います。ゆったりとしたシルエットでYラインを意識すると格好良く決まります。",
        },
    }
}

pub fn season_profile(season: ColorSeason) -> SeasonProfile {
    let profile = match season {
        ColorSeason::Spring => AxisProfile {
            id: "spring",
            name: "スプリング",
            description: "明るく温かみのある色が似合います",
            tips: "イエローベースの明るい色を選びましょう。コーラルピンク、アイボリー、ライトカーキなどがおすすめです。",
        },
        ColorSeason::Summer => AxisProfile {
            id: "summer",
            name: "サマー",
            description: "涼しげで上品な色が似合います",
            tips: "ブルーベースのソフトな色がお似合いです。パステルカラーやシルバーアクセサリーを取り入れましょう。",
        },
        ColorSeason::Autumn => AxisProfile {
            id: "autumn",
            name: "オータム",
            description: "深みのある温かい色が似合います",
            tips: "イエローベースの深い色がおすすめ。テラコッタ、オリーブグリーン、ゴールドアクセサリーが似合います。",
        },
        ColorSeason::Winter => AxisProfile {
            id: "winter",
            name: "ウィンター",
            description: "クリアで鮮やかな色が似合います",
            tips: "ブルーベースのはっきりした色を選びましょう。黒、白、ロイヤルブルー、シルバーアクセサリーがおすすめです。",
        },
    };
    SeasonProfile {
        profile,
        colors: season_palette(season),
    }
}

/// Style profiles use the long display name ("エレガントスタイル"), unlike the
/// short axis label used in titles and chat placeholders.
pub fn style_profile(style: StylePreference) -> AxisProfile {
    match style {
        StylePreference::Elegant => AxisProfile {
            id: "elegant",
            name: "エレガントスタイル",
            description: "上品で洗練された大人の女性らしいスタイル",
            tips: "質の良い素材や上品なシルエットのアイテムを選び、アクセサリーで品良く仕上げましょう。",
        },
        StylePreference::Casual => AxisProfile {
            id: "casual",
            name: "カジュアルスタイル",
            description: "リラックスした親しみやすい自然体のスタイル",
            tips: "デニムやニット、スニーカーなど着心地の良いアイテムで、親しみやすい印象を作りましょう。",
        },
        StylePreference::Mode => AxisProfile {
            id: "mode",
            name: "モードスタイル",
            description: "トレンド感のある個性的でスタイリッシュなスタイル",
            tips: "個性的なデザインやモノトーンを効かせて、都会的でクールな印象を演出しましょう。",
        },
    }
}

/// `#RRGGBB`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::axis::Axis;

    #[test]
    fn test_every_season_palette_is_valid_hex() {
        for &season in ColorSeason::ALL {
            for color in season_palette(season) {
                assert!(is_hex_color(color), "{season}: {color}");
            }
        }
    }

    #[test]
    fn test_spring_palette_exact() {
        assert_eq!(
            season_palette(ColorSeason::Spring),
            ["#FFB6C1", "#FFEB9C", "#98FB98", "#87CEEB"]
        );
    }

    #[test]
    fn test_profile_ids_match_axis_ids() {
        for &b in BodyType::ALL {
            assert_eq!(body_profile(b).id, b.id());
            assert_eq!(body_profile(b).name, b.label());
        }
        for &s in ColorSeason::ALL {
            assert_eq!(season_profile(s).profile.id, s.id());
        }
        for &p in StylePreference::ALL {
            assert!(style_profile(p).name.starts_with(p.label()));
        }
    }

    #[test]
    fn test_hex_color_validation() {
        assert!(is_hex_color("#abcDEF"));
        assert!(!is_hex_color("abcdef"));
        assert!(!is_hex_color("#abcd"));
        assert!(!is_hex_color("#GGGGGG"));
    }
}
