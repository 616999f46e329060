//! Product profiling from a free-text product name
//!
//! Category and brand detection are table lookups: the first table entry
//! whose keyword occurs (case-insensitively) in the name wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category used to pick a base price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Headphones,
    Mouse,
    Keyboard,
    Microphone,
    Electronics,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Headphones => "headphones",
            Category::Mouse => "mouse",
            Category::Keyboard => "keyboard",
            Category::Microphone => "microphone",
            Category::Electronics => "electronics",
        };
        f.write_str(label)
    }
}

/// Ordered category keywords. Microphones are checked before headphones so
/// that "headset microphone" prices as a microphone.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Microphone, &["microphone", "condenser mic", "usb mic", "yeti", "podcast"]),
    (
        Category::Headphones,
        &["headphone", "earbud", "earphone", "headset", "airpods", "wh-1000", "quietcomfort"],
    ),
    (Category::Keyboard, &["keyboard", "keychron"]),
    (Category::Mouse, &["mouse", "mice", "mx master"]),
];

struct BrandEntry {
    name: &'static str,
    keyword: &'static str,
    premium: bool,
}

const BRANDS: &[BrandEntry] = &[
    BrandEntry { name: "Sony", keyword: "sony", premium: true },
    BrandEntry { name: "Bose", keyword: "bose", premium: true },
    BrandEntry { name: "Apple", keyword: "apple", premium: true },
    BrandEntry { name: "Apple", keyword: "airpods", premium: true },
    BrandEntry { name: "Sennheiser", keyword: "sennheiser", premium: true },
    BrandEntry { name: "Shure", keyword: "shure", premium: true },
    BrandEntry { name: "Beats", keyword: "beats", premium: true },
    BrandEntry { name: "Audio-Technica", keyword: "audio-technica", premium: false },
    BrandEntry { name: "Logitech", keyword: "logitech", premium: false },
    BrandEntry { name: "Razer", keyword: "razer", premium: false },
    BrandEntry { name: "Corsair", keyword: "corsair", premium: false },
    BrandEntry { name: "SteelSeries", keyword: "steelseries", premium: false },
    BrandEntry { name: "HyperX", keyword: "hyperx", premium: false },
    BrandEntry { name: "Keychron", keyword: "keychron", premium: false },
    BrandEntry { name: "JBL", keyword: "jbl", premium: false },
    BrandEntry { name: "Samsung", keyword: "samsung", premium: false },
    BrandEntry { name: "Anker", keyword: "anker", premium: false },
];

/// Base prices as (category, regular, premium)
const BASE_PRICES: &[(Category, f64, f64)] = &[
    (Category::Headphones, 79.0, 299.0),
    (Category::Mouse, 29.0, 99.0),
    (Category::Keyboard, 59.0, 179.0),
    (Category::Microphone, 69.0, 199.0),
    (Category::Electronics, 99.0, 249.0),
];

/// Classification of a product name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProfile {
    pub name: String,
    pub category: Category,
    /// Display name of the detected brand, if any
    pub brand: Option<String>,
    pub is_premium: bool,
}

impl ProductProfile {
    /// Classify a product by case-insensitive keyword matching
    pub fn classify(name: &str) -> Self {
        let lowered = name.to_lowercase();

        let category = CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Electronics);

        let brand = BRANDS.iter().find(|b| lowered.contains(b.keyword));

        Self {
            name: name.to_string(),
            category,
            brand: brand.map(|b| b.name.to_string()),
            is_premium: brand.is_some_and(|b| b.premium),
        }
    }

    /// Starting price for synthesis, from the category × premium table
    pub fn base_price(&self) -> f64 {
        BASE_PRICES
            .iter()
            .find(|(category, _, _)| *category == self.category)
            .map(|&(_, regular, premium)| if self.is_premium { premium } else { regular })
            .unwrap_or(DEFAULT_BASE_PRICE)
    }
}

/// Anchor price used when nothing better is known
pub const DEFAULT_BASE_PRICE: f64 = 99.99;
