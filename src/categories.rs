//! Categories

use std::fmt;

use serde::Deserialize;

/// Gram gold bars, the category selected by default.
pub const GOLD_BARS: &str = "GRAM KÜLÇE ALTIN";

/// Gram silver bars.
pub const SILVER_BARS: &str = "GRAM KÜLÇE GÜMÜŞ";

/// Traditional gold coins (quarter, half, full).
pub const JEWELLERY_GOLD: &str = "ZİYNET ALTIN";

/// Header navigation categories, in display order.
pub const NAVIGATION: [&str; 6] = [
    GOLD_BARS,
    SILVER_BARS,
    JEWELLERY_GOLD,
    "HESAPLI ALTIN HAVALE",
    "HESAPTAN FIRIR ALTINA",
    "DÜZENLİ BİRİKİM",
];

/// Product category, identified by its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Creates a category from its display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Hero banner shown at the top of the category page.
    pub fn hero(&self) -> CategoryHero {
        CategoryHero::for_category(self)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::new(GOLD_BARS)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Categories shown in the header navigation.
pub fn navigation() -> impl Iterator<Item = Category> {
    NAVIGATION.into_iter().map(Category::from)
}

/// Category page hero banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryHero {
    /// Headline
    pub title: &'static str,

    /// Sub-headline
    pub subtitle: &'static str,

    /// Background image URL
    pub background_image: &'static str,
}

const GOLD_BARS_HERO: CategoryHero = CategoryHero {
    title: "Kaynağından Güvenle Altın.",
    subtitle: "Yüksek güvenlikli, sertifikalı gram altınlar.",
    background_image: "https://images.pexels.com/photos/128867/coins-currency-investment-insurance-128867.jpeg?auto=compress&cs=tinysrgb&w=1200",
};

const SILVER_BARS_HERO: CategoryHero = CategoryHero {
    title: "Premium Gümüş Külçeler.",
    subtitle: "Yatırım amaçlı sertifikalı gümüş külçeler.",
    background_image: "https://images.pexels.com/photos/1454227/pexels-photo-1454227.jpeg?auto=compress&cs=tinysrgb&w=1200",
};

const JEWELLERY_GOLD_HERO: CategoryHero = CategoryHero {
    title: "Geleneksel Ziynet Altınları.",
    subtitle: "Çeyrek, yarım ve tam altın çeşitleri.",
    background_image: "https://images.pexels.com/photos/1602726/pexels-photo-1602726.jpeg?auto=compress&cs=tinysrgb&w=1200",
};

impl CategoryHero {
    /// Hero for the given category. Categories without their own banner use the gold bars one.
    pub fn for_category(category: &Category) -> Self {
        match category.name() {
            SILVER_BARS => SILVER_BARS_HERO,
            JEWELLERY_GOLD => JEWELLERY_GOLD_HERO,
            _ => GOLD_BARS_HERO,
        }
    }
}
