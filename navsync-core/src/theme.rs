//! Light/dark theme preference with a single persisted value.
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::error::{NavsyncError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Next theme after a toggle: dark goes light, anything else goes dark.
    #[must_use]
    pub const fn toggled(current: Option<Self>) -> Self {
        match current {
            Some(Self::Dark) => Self::Light,
            _ => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = NavsyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(NavsyncError::InvalidTheme(other.to_string())),
        }
    }
}

/// Key-value storage for the persisted preference.
/// The browser implementation is backed by `localStorage`.
pub trait PreferenceStore {
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, useful for tests and for hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What the host should reflect after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeView {
    /// Theme to write to `data-theme`; `None` leaves the system theme in charge.
    pub applied: Option<Theme>,
    /// Toggle's `aria-checked` state.
    pub checked: bool,
}

#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    key: String,
    current: Option<Theme>,
}

impl<S: PreferenceStore> ThemeController<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            current: None,
        }
    }

    /// Stored preference, ignoring values that are not a known theme.
    #[must_use]
    pub fn saved(&self) -> Option<Theme> {
        match self.store.get(&self.key) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(err) => {
                warn!("theme preference unreadable: {err}");
                None
            }
        }
    }

    /// Resolve the initial view from the saved value, or the system preference.
    pub fn init(&mut self, system_prefers_dark: bool) -> ThemeView {
        self.current = self.saved();
        let view = match self.current {
            Some(theme) => ThemeView {
                applied: Some(theme),
                checked: theme.is_dark(),
            },
            None => ThemeView {
                applied: None,
                checked: system_prefers_dark,
            },
        };
        debug!("theme init: {view:?}");
        view
    }

    #[must_use]
    pub const fn current(&self) -> Option<Theme> {
        self.current
    }

    /// Flip the theme and persist it. A failed write is logged; the switch still happens.
    pub fn toggle(&mut self) -> Theme {
        let next = Theme::toggled(self.current);
        self.current = Some(next);
        if let Err(err) = self.store.set(&self.key, next.as_str()) {
            warn!("theme preference not saved: {err}");
        }
        next
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnly;

    impl PreferenceStore for ReadOnly {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(NavsyncError::Storage(String::from("denied")))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(NavsyncError::Storage(String::from("denied")))
        }
    }

    #[test]
    fn parses_only_known_values() {
        assert_eq!("dark".parse::<Theme>().ok(), Some(Theme::Dark));
        assert_eq!("light".parse::<Theme>().ok(), Some(Theme::Light));
        assert!("Dark".parse::<Theme>().is_err());
    }

    #[test]
    fn saved_value_wins_over_system() {
        let store = MemoryStore::default();
        store.set("theme-pref", "light").unwrap();
        let mut ctl = ThemeController::new(store, "theme-pref");
        let view = ctl.init(true);
        assert_eq!(view.applied, Some(Theme::Light));
        assert!(!view.checked);
    }

    #[test]
    fn invalid_saved_value_defers_to_system() {
        let store = MemoryStore::default();
        store.set("theme-pref", "sepia").unwrap();
        let mut ctl = ThemeController::new(store, "theme-pref");
        assert_eq!(
            ctl.init(true),
            ThemeView {
                applied: None,
                checked: true
            }
        );
    }

    #[test]
    fn toggle_persists_and_alternates() {
        let mut ctl = ThemeController::new(MemoryStore::default(), "theme-pref");
        ctl.init(false);
        assert_eq!(ctl.toggle(), Theme::Dark);
        assert_eq!(ctl.store().get("theme-pref").unwrap().as_deref(), Some("dark"));
        assert_eq!(ctl.toggle(), Theme::Light);
        assert_eq!(ctl.saved(), Some(Theme::Light));
    }

    #[test]
    fn storage_failures_are_not_fatal() {
        let mut ctl = ThemeController::new(ReadOnly, "theme-pref");
        assert_eq!(ctl.init(false).applied, None);
        assert_eq!(ctl.toggle(), Theme::Dark);
        assert_eq!(ctl.current(), Some(Theme::Dark));
    }
}
