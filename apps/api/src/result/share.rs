//! Share action: a human-readable summary handed either to the platform's
//! native share sheet or, when that is unavailable, copied to the clipboard
//! together with the page URL.

use serde::{Deserialize, Serialize};

use crate::quiz::axis::{AxisTriple, RawTriple};
use crate::result::profiles::{body_profile, season_profile, style_profile};

pub const SHARE_TITLE: &str = "スタイル診断結果";
pub const CLIPBOARD_NOTICE: &str = "結果をクリップボードにコピーしました！";

pub fn share_text(triple: &AxisTriple) -> String {
    format!(
        "私のスタイル診断結果: {} × {} × {}",
        body_profile(triple.body_type).name,
        season_profile(triple.color_season).profile.name,
        style_profile(triple.style_preference).name
    )
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    #[serde(flatten)]
    pub triple: RawTriple,
    pub url: String,
    /// Whether the caller's platform exposes a native share capability.
    #[serde(default)]
    pub native_share: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ShareOutcome {
    Native {
        title: String,
        text: String,
        url: String,
    },
    Clipboard {
        #[serde(rename = "clipboardText")]
        clipboard_text: String,
        notice: String,
    },
}

pub fn compose_share(triple: &AxisTriple, url: &str, native_share: bool) -> ShareOutcome {
    let text = share_text(triple);
    if native_share {
        ShareOutcome::Native {
            title: SHARE_TITLE.to_string(),
            text,
            url: url.to_string(),
        }
    } else {
        ShareOutcome::Clipboard {
            clipboard_text: format!("{text} {url}"),
            notice: CLIPBOARD_NOTICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::axis::{BodyType, ColorSeason, StylePreference};

    fn triple() -> AxisTriple {
        AxisTriple::new(BodyType::Wave, ColorSeason::Summer, StylePreference::Casual)
    }

    #[test]
    fn test_share_text_uses_display_names() {
        assert_eq!(
            share_text(&triple()),
            "私のスタイル診断結果: ウェーブ × サマー × カジュアルスタイル"
        );
    }

    #[test]
    fn test_native_share_carries_title_and_url() {
        let outcome = compose_share(&triple(), "https://shop.example/result", true);
        match outcome {
            ShareOutcome::Native { title, url, .. } => {
                assert_eq!(title, SHARE_TITLE);
                assert_eq!(url, "https://shop.example/result");
            }
            other => panic!("expected native share, got {other:?}"),
        }
    }

    #[test]
    fn test_clipboard_fallback_appends_url() {
        let outcome = compose_share(&triple(), "https://shop.example/r", false);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["method"], "clipboard");
        assert!(json["clipboardText"]
            .as_str()
            .unwrap()
            .ends_with(" https://shop.example/r"));
    }
}
