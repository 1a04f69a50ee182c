//! Runtime configuration for the page enhancements.
use serde::{Deserialize, Serialize};

use crate::error::{NavsyncError, Result};

const DEFAULT_CONFIG_DATA: &str = include_str!("../../navsync-web/static/navsync.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Id of the navigation container whose anchors are regenerated.
    pub nav_id: String,
    /// Selector for navigable content blocks, in document order.
    pub block_selector: String,
    /// Selector for the heading that labels a block.
    pub heading_selector: String,
    pub active_class: String,
    pub click_anim_class: String,
    pub slug: SlugConfig,
    pub theme: ThemeConfig,
    pub back_to_top: BackToTopConfig,
    pub menu: MenuConfig,
    pub observer: ObserverConfig,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    pub max_len: usize,
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub toggle_selector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackToTopConfig {
    pub selector: String,
    pub show_at: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub toggle_selector: String,
    pub open_class: String,
    /// Outside clicks close the menu only at or below this viewport width.
    pub breakpoint: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub root_margin: String,
    pub thresholds: Vec<f64>,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            nav_id: String::from("primary-nav"),
            block_selector: String::from("main section, main article"),
            heading_selector: String::from("h2, h3, h1"),
            active_class: String::from("is-active"),
            click_anim_class: String::from("click-anim"),
            slug: SlugConfig::default(),
            theme: ThemeConfig::default(),
            back_to_top: BackToTopConfig::default(),
            menu: MenuConfig::default(),
            observer: ObserverConfig::default(),
            log_level: String::from("info"),
        }
    }
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            max_len: 64,
            fallback: String::from("section"),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: String::from("theme-pref"),
            toggle_selector: String::from(".theme-toggle"),
        }
    }
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            selector: String::from(".to-top"),
            show_at: 400.0,
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            toggle_selector: String::from(".menu-toggle"),
            open_class: String::from("is-open"),
            breakpoint: 760.0,
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            root_margin: String::from("-30% 0px -60% 0px"),
            thresholds: vec![0.0, 0.25, 0.5, 0.75, 1.0],
        }
    }
}

impl EnhanceConfig {
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CONFIG_DATA).unwrap_or_default()
    }

    /// Parse a configuration document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(NavsyncError::Config)
    }

    #[must_use]
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_config_matches_defaults() {
        assert_eq!(EnhanceConfig::load_from_static(), EnhanceConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = EnhanceConfig::from_json(r#"{"nav_id":"site-nav","slug":{"max_len":12}}"#)
            .expect("valid config");
        assert_eq!(cfg.nav_id, "site-nav");
        assert_eq!(cfg.slug.max_len, 12);
        assert_eq!(cfg.slug.fallback, "section");
        assert_eq!(cfg.theme.storage_key, "theme-pref");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let err = EnhanceConfig::from_json(r#"{"nav_id": 3}"#).expect_err("wrong type");
        assert!(format!("{err}").contains("config parsing error"));
    }

    #[test]
    fn log_level_falls_back_to_info() {
        let mut cfg = EnhanceConfig::default();
        cfg.log_level = String::from("debug");
        assert_eq!(cfg.log_level(), log::LevelFilter::Debug);
        cfg.log_level = String::from("chatty");
        assert_eq!(cfg.log_level(), log::LevelFilter::Info);
    }
}
