//! Image asset catalog. Metadata only: the binary lives wherever `url`
//! points, this table just tracks name, category, size and where it is used.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    Product,
    Icon,
    Background,
    Result,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: String,
    pub name: String,
    pub url: String,
    pub category: ImageCategory,
    pub alt: String,
    /// Bytes.
    pub size: u64,
    pub upload_date: NaiveDate,
    pub usage: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAssetView {
    #[serde(flatten)]
    pub asset: ImageAsset,
    pub display_size: String,
}

impl From<&ImageAsset> for ImageAssetView {
    fn from(asset: &ImageAsset) -> Self {
        ImageAssetView {
            display_size: format_file_size(asset.size),
            asset: asset.clone(),
        }
    }
}

/// Register / update payload. A missing category means `product`, a missing
/// alt text is derived from the file name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAssetInput {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<ImageCategory>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub usage: Vec<String>,
}

impl ImageAssetInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("image name cannot be empty".to_string());
        }
        if self.url.trim().is_empty() {
            return Err("image url cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn into_asset(self, id: String, upload_date: NaiveDate) -> ImageAsset {
        let alt = self
            .alt
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| stem(&self.name).to_string());
        ImageAsset {
            id,
            alt,
            name: self.name,
            url: self.url,
            category: self.category.unwrap_or(ImageCategory::Product),
            size: self.size,
            upload_date,
            usage: self.usage,
        }
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

pub fn filter_by_category(
    images: &[ImageAsset],
    category: Option<ImageCategory>,
) -> Vec<ImageAssetView> {
    images
        .iter()
        .filter(|img| category.map_or(true, |c| img.category == c))
        .map(ImageAssetView::from)
        .collect()
}

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Binary (1024) units, at most two decimals, trailing zeros dropped:
/// 2048 -> "2 KB", 156000 -> "152.34 KB".
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn default_images() -> Vec<ImageAsset> {
    vec![
        ImageAsset {
            id: "1".to_string(),
            name: "blouse-icon.svg".to_string(),
            url: "/images/blouse-icon.svg".to_string(),
            category: ImageCategory::Icon,
            alt: "ブラウスアイコン".to_string(),
            size: 2048,
            upload_date: date(2024, 1, 15),
            usage: vec!["商品カード".to_string(), "診断結果".to_string()],
        },
        ImageAsset {
            id: "2".to_string(),
            name: "skirt-icon.svg".to_string(),
            url: "/images/skirt-icon.svg".to_string(),
            category: ImageCategory::Icon,
            alt: "スカートアイコン".to_string(),
            size: 1856,
            upload_date: date(2024, 1, 15),
            usage: vec!["商品カード".to_string()],
        },
        ImageAsset {
            id: "3".to_string(),
            name: "product-bg.jpg".to_string(),
            url: "/images/product-bg.jpg".to_string(),
            category: ImageCategory::Background,
            alt: "商品背景画像".to_string(),
            size: 156_000,
            upload_date: date(2024, 1, 14),
            usage: vec!["商品詳細ページ".to_string()],
        },
    ]
}
