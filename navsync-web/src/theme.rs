//! Theme switch: applies the saved preference and persists toggles.
use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use navsync_core::{EnhanceConfig, Theme, ThemeController};
use web_sys::{Document, Element};

use crate::dom::{self, Listener};
use crate::error::DomError;
use crate::storage::LocalStore;

pub struct ThemeToggle {
    root: Element,
    button: Option<Element>,
    controller: ThemeController<LocalStore>,
    _click: Option<Listener>,
}

impl ThemeToggle {
    /// Apply the saved theme and wire the toggle button if the page has one.
    ///
    /// # Errors
    /// Returns an error if the toggle selector is invalid or the listener cannot be attached.
    pub fn install(
        doc: &Document,
        config: &EnhanceConfig,
    ) -> Result<Option<Rc<RefCell<Self>>>, DomError> {
        let Some(root) = doc.document_element() else {
            return Ok(None);
        };
        let button = doc.query_selector(&config.theme.toggle_selector)?;
        let mut controller = ThemeController::new(LocalStore, config.theme.storage_key.clone());
        let view = controller.init(dom::media_matches("(prefers-color-scheme: dark)"));
        if let Some(theme) = view.applied {
            root.set_attribute("data-theme", theme.as_str())?;
        }
        if let Some(button) = &button {
            button.set_attribute("aria-checked", bool_str(view.checked))?;
        }

        let toggle = Rc::new(RefCell::new(Self {
            root,
            button: button.clone(),
            controller,
            _click: None,
        }));
        if let Some(button) = button {
            let weak = Rc::downgrade(&toggle);
            let click = dom::listen(&button, "click", move |_event| {
                if let Some(toggle) = weak.upgrade() {
                    toggle.borrow_mut().toggle();
                }
            })?;
            toggle.borrow_mut()._click = Some(click);
        }
        Ok(Some(toggle))
    }

    #[must_use]
    pub fn current(&self) -> Option<Theme> {
        self.controller.current()
    }

    /// Switch theme, persist it, and reflect it on the page.
    pub fn toggle(&mut self) -> Theme {
        let next = self.controller.toggle();
        let _ = self.root.set_attribute("data-theme", next.as_str());
        if let Some(button) = &self.button {
            let _ = button.set_attribute("aria-checked", bool_str(next.is_dark()));
        }
        info!("theme switched to {next}");
        next
    }
}

const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
