//! Weather-text classification.
//!
//! JMA forecast text often combines several conditions ("雨　時々　雷").
//! A single icon is picked by checking keywords in a fixed order, so the more
//! severe or rarer condition wins regardless of where it appears in the text.

/// Sky conditions that have an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sky {
    Thunder,
    Snow,
    Rain,
    Storm,
    Cloudy,
    Sunny,
}

impl Sky {
    /// Highest priority first
    pub const PRIORITY: [Sky; 6] = [
        Sky::Thunder,
        Sky::Snow,
        Sky::Rain,
        Sky::Storm,
        Sky::Cloudy,
        Sky::Sunny,
    ];

    /// Keyword searched for in the forecast text
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Thunder => "雷",
            Self::Snow => "雪",
            Self::Rain => "雨",
            Self::Storm => "暴風",
            Self::Cloudy => "曇り",
            Self::Sunny => "晴れ",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Thunder => "⚡",
            Self::Snow => "❄️",
            Self::Rain => "🌧️",
            Self::Storm => "🌪️",
            Self::Cloudy => "☁️",
            Self::Sunny => "☀️",
        }
    }

    /// Style class used by the renderer
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Thunder => "thunder",
            Self::Snow => "snowy",
            Self::Rain => "rainy",
            Self::Storm => "storm",
            Self::Cloudy => "cloudy",
            Self::Sunny => "sunny",
        }
    }

    /// First condition in priority order whose keyword occurs in `text`
    pub fn classify(text: &str) -> Option<Sky> {
        Self::PRIORITY
            .into_iter()
            .find(|sky| text.contains(sky.keyword()))
    }
}

/// Icon and style class for a card. Both are empty when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherIcon {
    pub icon: &'static str,
    pub class_name: &'static str,
}

impl WeatherIcon {
    pub const NONE: WeatherIcon = WeatherIcon {
        icon: "",
        class_name: "",
    };

    pub fn is_none(&self) -> bool {
        self.icon.is_empty()
    }
}

impl From<Sky> for WeatherIcon {
    fn from(sky: Sky) -> Self {
        Self {
            icon: sky.icon(),
            class_name: sky.class_name(),
        }
    }
}

/// Map free weather text to exactly one icon.
pub fn weather_icon(text: &str) -> WeatherIcon {
    Sky::classify(text).map(WeatherIcon::from).unwrap_or(WeatherIcon::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_conditions() {
        assert_eq!(Sky::classify("晴れ"), Some(Sky::Sunny));
        assert_eq!(Sky::classify("曇り"), Some(Sky::Cloudy));
        assert_eq!(Sky::classify("雨"), Some(Sky::Rain));
        assert_eq!(Sky::classify("雪"), Some(Sky::Snow));
        assert_eq!(Sky::classify("雷"), Some(Sky::Thunder));
        assert_eq!(Sky::classify("暴風"), Some(Sky::Storm));
    }

    #[test]
    fn test_priority_beats_text_position() {
        // rain appears first in the text but thunder has priority
        assert_eq!(Sky::classify("雨　時々　雷"), Some(Sky::Thunder));
        assert_eq!(Sky::classify("晴れ　後　曇り"), Some(Sky::Cloudy));
        assert_eq!(Sky::classify("曇り　時々　雨"), Some(Sky::Rain));
        assert_eq!(Sky::classify("雨　後　雪"), Some(Sky::Snow));
        assert_eq!(Sky::classify("暴風雨"), Some(Sky::Rain));
        assert_eq!(Sky::classify("暴風　後　曇り"), Some(Sky::Storm));
    }

    #[test]
    fn test_every_pair_resolves_to_higher_priority() {
        for (i, high) in Sky::PRIORITY.iter().enumerate() {
            for low in &Sky::PRIORITY[i + 1..] {
                let text = format!("{}　のち　{}", low.keyword(), high.keyword());
                assert_eq!(Sky::classify(&text), Some(*high), "{text}");
            }
        }
    }

    #[test]
    fn test_no_match_is_empty() {
        assert_eq!(weather_icon(""), WeatherIcon::NONE);
        assert_eq!(weather_icon("-"), WeatherIcon::NONE);
        // hiragana spelling is not a keyword
        assert_eq!(weather_icon("くもり"), WeatherIcon::NONE);
        assert!(weather_icon("霧").is_none());
    }

    #[test]
    fn test_icon_and_class() {
        let icon = weather_icon("晴れ");
        assert_eq!(icon.icon, "☀️");
        assert_eq!(icon.class_name, "sunny");

        let icon = weather_icon("雪　所により　雷");
        assert_eq!(icon.icon, "⚡");
        assert_eq!(icon.class_name, "thunder");
    }
}
