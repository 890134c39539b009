//! Human-facing labels for catalog enums.
//!
//! Presentation lookup only; the filter engine never sees these strings.

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, GameStatus, Genre};

/// Label language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Russian => "ru",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::English),
            "ru" | "russian" => Some(Self::Russian),
            _ => None,
        }
    }
}

/// Anything with a display label per locale.
pub trait Labelled {
    fn label(&self, locale: Locale) -> &'static str;
}

impl Labelled for Genre {
    fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, Genre::Strategy) => "Strategy",
            (Locale::English, Genre::Detective) => "Detective",
            (Locale::English, Genre::Cooperative) => "Cooperative",
            (Locale::English, Genre::Economic) => "Economic",
            (Locale::English, Genre::Card) => "Card",
            (Locale::English, Genre::Family) => "Family",
            (Locale::Russian, Genre::Strategy) => "Стратегия",
            (Locale::Russian, Genre::Detective) => "Детектив",
            (Locale::Russian, Genre::Cooperative) => "Кооперативная",
            (Locale::Russian, Genre::Economic) => "Экономическая",
            (Locale::Russian, Genre::Card) => "Карточная",
            (Locale::Russian, Genre::Family) => "Семейная",
        }
    }
}

impl Labelled for Difficulty {
    fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, Difficulty::Easy) => "Easy",
            (Locale::English, Difficulty::Medium) => "Medium",
            (Locale::English, Difficulty::Hard) => "Hard",
            (Locale::Russian, Difficulty::Easy) => "Простая",
            (Locale::Russian, Difficulty::Medium) => "Средняя",
            (Locale::Russian, Difficulty::Hard) => "Сложная",
        }
    }
}

impl Labelled for GameStatus {
    fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, GameStatus::InCollection) => "In collection",
            (Locale::English, GameStatus::WantToBuy) => "Want to buy",
            (Locale::English, GameStatus::ForSale) => "For sale",
            (Locale::Russian, GameStatus::InCollection) => "В коллекции",
            (Locale::Russian, GameStatus::WantToBuy) => "Хочу купить",
            (Locale::Russian, GameStatus::ForSale) => "Продается",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_labels() {
        assert_eq!(Genre::Strategy.label(Locale::Russian), "Стратегия");
        assert_eq!(GameStatus::WantToBuy.label(Locale::Russian), "Хочу купить");
        assert_eq!(Difficulty::Hard.label(Locale::Russian), "Сложная");
    }

    #[test]
    fn locale_codes() {
        assert_eq!(Locale::from_code("RU"), Some(Locale::Russian));
        assert_eq!(Locale::from_code("de"), None);
        assert_eq!(Locale::default().code(), "en");
    }
}
