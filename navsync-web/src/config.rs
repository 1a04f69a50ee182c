//! Page-level configuration overrides.
use log::warn;
use navsync_core::EnhanceConfig;
use web_sys::Document;

/// Id of an optional `<script type="application/json">` holding config overrides.
pub const CONFIG_ELEMENT_ID: &str = "navsync-config";

/// Embedded defaults, overridden by the page's config element when present.
#[must_use]
pub fn load_config(doc: &Document) -> EnhanceConfig {
    let Some(text) = doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return EnhanceConfig::load_from_static();
    };
    EnhanceConfig::from_json(&text).unwrap_or_else(|err| {
        warn!("ignoring page config: {err}");
        EnhanceConfig::load_from_static()
    })
}
