//! Carousel timing and gesture settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings shared by every carousel on the site.
///
/// Durations are written in milliseconds:
///
/// ```toml
/// auto_advance_ms = 4000
/// settle_delay_ms = 500
/// min_swipe_distance = 50.0
/// max_swipe_duration_ms = 1000
/// auto_play = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Interval between automatic advances.
    #[serde(rename = "auto_advance_ms", with = "millis")]
    pub auto_advance: Duration,
    /// How long a transition blocks further navigation.
    #[serde(rename = "settle_delay_ms", with = "millis")]
    pub settle_delay: Duration,
    /// Minimum horizontal travel, in pixels, for a swipe.
    pub min_swipe_distance: f64,
    /// Gestures slower than this are taps.
    #[serde(rename = "max_swipe_duration_ms", with = "millis")]
    pub max_swipe_duration: Duration,
    /// Advance automatically.
    pub auto_play: bool,
}

impl CarouselConfig {
    /// Whether the timer should tick. A zero interval disables it.
    pub fn auto_advances(&self) -> bool {
        self.auto_play && !self.auto_advance.is_zero()
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance: Duration::from_millis(4000),
            settle_delay: Duration::from_millis(500),
            min_swipe_distance: 50.0,
            max_swipe_duration: Duration::from_millis(1000),
            auto_play: true,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.auto_advance, Duration::from_millis(4000));
        assert_eq!(config.settle_delay, Duration::from_millis(500));
        assert_eq!(config.min_swipe_distance, 50.0);
        assert!(config.auto_play);
    }

    #[test]
    fn test_zero_interval_disables_auto_advance() {
        let config: CarouselConfig = toml::from_str("auto_advance_ms = 0").unwrap();
        assert!(config.auto_play);
        assert!(!config.auto_advances());
        assert!(CarouselConfig::default().auto_advances());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CarouselConfig = toml::from_str(
            r#"
            auto_advance_ms = 2500
            auto_play = false
            "#,
        )
        .unwrap();

        assert_eq!(config.auto_advance, Duration::from_millis(2500));
        assert_eq!(config.settle_delay, Duration::from_millis(500));
        assert!(!config.auto_play);
    }

    #[test]
    fn test_serializes_millis() {
        let text = toml::to_string(&CarouselConfig::default()).unwrap();
        assert!(text.contains("auto_advance_ms = 4000"));
        assert!(text.contains("max_swipe_duration_ms = 1000"));
    }
}
