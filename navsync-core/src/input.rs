#![allow(clippy::struct_excessive_bools)]
//! Keyboard and scroll decisions for the back-to-top affordances.

/// Snapshot of a `keydown` event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub default_prevented: bool,
}

impl KeyPress {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Smooth,
    Instant,
}

impl ScrollMode {
    #[must_use]
    pub const fn for_reduced_motion(reduced: bool) -> Self {
        if reduced { Self::Instant } else { Self::Smooth }
    }
}

// Focus in a form control or editable region means the user is typing
#[must_use]
pub fn is_typing_target(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || matches!(
            tag_name.to_ascii_uppercase().as_str(),
            "INPUT" | "TEXTAREA" | "SELECT"
        )
}

/// `t` / `T` scrolls to top unless something else already owns the key.
#[must_use]
pub fn is_scroll_top_shortcut(press: &KeyPress, typing: bool) -> bool {
    if press.default_prevented || typing || press.has_modifier() {
        return false;
    }
    matches!(press.key.as_str(), "t" | "T")
}

#[must_use]
pub fn is_escape(key: &str) -> bool {
    key == "Escape"
}

#[must_use]
pub fn back_to_top_hidden(scroll_y: f64, show_at: f64) -> bool {
    scroll_y < show_at
}

/// Target id of an in-page link, if `href` is a non-empty fragment.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
