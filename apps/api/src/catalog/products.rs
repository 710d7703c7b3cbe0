//! Static product catalog. Read-only for storefront users; shared by the
//! result view and the stylist's product attachments.

use serde::{Deserialize, Serialize};

use crate::quiz::axis::StylePreference;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// Formatted for display, e.g. "¥12,800".
    pub price: String,
    pub category: String,
    /// Icon / image key ("blouse", "skirt", ...).
    pub image: String,
    pub description: String,
    pub detailed_description: String,
    pub features: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// Style groupings this item belongs to.
    pub styles: Vec<StylePreference>,
}

/// Card-sized view used in result pages and chat attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        ProductSummary {
            id: p.id,
            name: p.name.clone(),
            price: p.price.clone(),
            image: p.image.clone(),
            description: p.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Route ids arrive as strings; anything that is not a known integer id is absent.
    pub fn get_by_route_id(&self, raw: &str) -> Option<&Product> {
        raw.trim().parse::<u32>().ok().and_then(|id| self.get(id))
    }

    /// The style's hand-authored grouping, in catalog order.
    pub fn for_style(&self, style: StylePreference) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.styles.contains(&style))
            .collect()
    }

    /// Resolves ids in the given order, skipping unknown ones.
    pub fn summaries(&self, ids: &[u32]) -> Vec<ProductSummary> {
        ids.iter()
            .filter_map(|&id| self.get(id))
            .map(ProductSummary::from)
            .collect()
    }

    pub fn unknown_ids(&self, ids: &[u32]) -> Vec<u32> {
        ids.iter().copied().filter(|&id| self.get(id).is_none()).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(default_products())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_products() -> Vec<Product> {
    let sizes = strings(&["S", "M", "L", "XL"]);
    vec![
        Product {
            id: 1,
            name: "エレガントブラウス".to_string(),
            price: "¥12,800".to_string(),
            category: "tops".to_string(),
            image: "blouse".to_string(),
            description: "あなたのスタイルにぴったりの上品なブラウス".to_string(),
            detailed_description: "上質なシルク素材を使用した、エレガントで洗練されたブラウスです。どんなシーンでも上品な印象を与える一着です。".to_string(),
            features: strings(&["100%シルク素材使用", "手洗い可能", "UV加工済み", "シワになりにくい"]),
            sizes: sizes.clone(),
            colors: strings(&["ホワイト", "ベージュ", "ネイビー"]),
            styles: vec![StylePreference::Elegant],
        },
        Product {
            id: 2,
            name: "シルエットスカート".to_string(),
            price: "¥15,600".to_string(),
            category: "bottoms".to_string(),
            image: "skirt".to_string(),
            description: "体型を美しく見せるデザイン".to_string(),
            detailed_description: "あなたの骨格を美しく見せる計算されたシルエット。どんな体型の方でも自信を持って着こなせます。".to_string(),
            features: strings(&["美脚効果抜群", "ストレッチ素材", "家庭洗濯可能", "オールシーズン対応"]),
            sizes: sizes.clone(),
            colors: strings(&["ブラック", "グレー", "ベージュ", "ネイビー"]),
            styles: vec![StylePreference::Elegant, StylePreference::Casual],
        },
        Product {
            id: 3,
            name: "カラーコーディネートジャケット".to_string(),
            price: "¥22,900".to_string(),
            category: "outer".to_string(),
            image: "jacket".to_string(),
            description: "あなたのカラーにマッチするジャケット".to_string(),
            detailed_description: "パーソナルカラーに合わせて選べる豊富なカラーバリエーション。ビジネスからカジュアルまで幅広く活用できます。".to_string(),
            features: strings(&["多彩なカラー展開", "型崩れしにくい", "ポケット付き", "ライニング付き"]),
            sizes: sizes.clone(),
            colors: strings(&["ブラック", "グレー", "ベージュ", "ネイビー", "ブラウン"]),
            styles: vec![StylePreference::Elegant, StylePreference::Mode],
        },
        Product {
            id: 4,
            name: "パーフェクトフィットパンツ".to_string(),
            price: "¥18,400".to_string(),
            category: "bottoms".to_string(),
            image: "pants".to_string(),
            description: "快適さとスタイルを両立".to_string(),
            detailed_description: "履き心地の良さとスタイルの美しさを両立した理想的なパンツ。一日中快適に過ごせます。".to_string(),
            features: strings(&["美脚シルエット", "ストレッチ素材", "ウエスト調整可能", "シワになりにくい"]),
            sizes,
            colors: strings(&["ブラック", "グレー", "ベージュ", "ネイビー"]),
            styles: vec![StylePreference::Casual, StylePreference::Mode],
        },
    ]
}
