//! Interface strings for the supported languages.
//!
//! Switching language swaps these labels only; numeric store state is never
//! touched by a language change.

use chrono::Weekday;

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Turkish (product default)
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "tr" => Some(Language::Tr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// The other language (header toggle)
    pub fn toggled(&self) -> Self {
        match self {
            Language::Tr => Language::En,
            Language::En => Language::Tr,
        }
    }
}

/// Label set for one language
#[derive(Debug, Clone, Copy)]
pub struct Strings {
    pub weather: &'static str,
    pub temperature: &'static str,
    pub precipitation: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
    pub forecast: &'static str,
    pub today: &'static str,
    pub tomorrow: &'static str,
    pub fetch_latest: &'static str,
    pub load_sample: &'static str,
    pub data_updated: &'static str,
    pub loading: &'static str,
    /// Short weekday names, Sunday first
    pub days: [&'static str; 7],
}

pub const TR: Strings = Strings {
    weather: "Hava durumu",
    temperature: "Sıcaklık",
    precipitation: "Yağış",
    humidity: "Nem",
    wind: "Rüzgar",
    forecast: "Tahmin",
    today: "Bugün",
    tomorrow: "Yarın",
    fetch_latest: "En Son Veriyi Çek (S3)",
    load_sample: "Örnek Veri Yükle",
    data_updated: "Veri güncellendi",
    loading: "Yükleniyor...",
    days: ["Paz", "Pzt", "Sal", "Çar", "Per", "Cum", "Cmt"],
};

pub const EN: Strings = Strings {
    weather: "Weather",
    temperature: "Temperature",
    precipitation: "Precipitation",
    humidity: "Humidity",
    wind: "Wind",
    forecast: "Forecast",
    today: "Today",
    tomorrow: "Tomorrow",
    fetch_latest: "Fetch Latest (S3)",
    load_sample: "Load Sample Data",
    data_updated: "Data updated",
    loading: "Loading...",
    days: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
};

/// Label set for a language
pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::Tr => &TR,
        Language::En => &EN,
    }
}

/// Short weekday label in the given language
pub fn weekday_label(language: Language, weekday: Weekday) -> &'static str {
    strings(language).days[weekday.num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_is_turkish() {
        assert_eq!(Language::default(), Language::Tr);
    }

    #[test]
    fn toggle_flips_between_languages() {
        assert_eq!(Language::Tr.toggled(), Language::En);
        assert_eq!(Language::En.toggled(), Language::Tr);
    }

    #[test]
    fn codes_round_trip() {
        assert_eq!(Language::from_code("tr"), Some(Language::Tr));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::En.code(), "en");
    }

    #[test]
    fn labels_differ_between_languages() {
        assert_ne!(strings(Language::Tr).temperature, strings(Language::En).temperature);
        assert_eq!(strings(Language::Tr).temperature, "Sıcaklık");
    }

    #[test]
    fn weekday_labels_are_sunday_first() {
        assert_eq!(weekday_label(Language::En, Weekday::Sun), "Sun");
        assert_eq!(weekday_label(Language::Tr, Weekday::Tue), "Sal");
        assert_eq!(weekday_label(Language::Tr, Weekday::Sat), "Cmt");
    }
}
