//! Hamburger toggle for the primary navigation.
use std::cell::RefCell;
use std::rc::Rc;

use navsync_core::{EnhanceConfig, MenuInput, MenuState};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, Node};

use crate::dom::{self, Listener};
use crate::error::DomError;

pub struct MenuToggle {
    button: Element,
    nav: Element,
    state: MenuState,
    open_class: String,
    breakpoint: f64,
    listeners: Vec<Listener>,
}

impl MenuToggle {
    /// Wire the menu button. Pages without the button or the nav get `None`.
    ///
    /// # Errors
    /// Returns an error if the selector is invalid or a listener cannot be attached.
    pub fn install(
        doc: &Document,
        config: &EnhanceConfig,
    ) -> Result<Option<Rc<RefCell<Self>>>, DomError> {
        let Some(button) = doc.query_selector(&config.menu.toggle_selector)? else {
            return Ok(None);
        };
        let Some(nav) = doc.get_element_by_id(&config.nav_id) else {
            return Ok(None);
        };
        let open = button.get_attribute("aria-expanded").as_deref() == Some("true");
        let menu = Rc::new(RefCell::new(Self {
            button: button.clone(),
            nav,
            state: MenuState::new(open),
            open_class: config.menu.open_class.clone(),
            breakpoint: config.menu.breakpoint,
            listeners: Vec::new(),
        }));

        let weak = Rc::downgrade(&menu);
        let on_button = dom::listen(&button, "click", move |_event| {
            if let Some(menu) = weak.upgrade() {
                menu.borrow_mut().apply(MenuInput::ToggleClicked);
            }
        })?;

        let weak = Rc::downgrade(&menu);
        let on_document = dom::listen(doc, "click", move |event| {
            let Some(menu) = weak.upgrade() else {
                return;
            };
            let mut menu = menu.borrow_mut();
            if menu.is_outside(&event) {
                let viewport_width = dom::window()
                    .and_then(|win| win.inner_width().ok())
                    .and_then(|w| w.as_f64())
                    .unwrap_or(f64::MAX);
                menu.apply(MenuInput::OutsideClick { viewport_width });
            }
        })?;

        let weak = Rc::downgrade(&menu);
        let on_key = dom::listen(doc, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| navsync_core::input::is_escape(&key.key()));
            if let (true, Some(menu)) = (is_escape, weak.upgrade()) {
                menu.borrow_mut().apply(MenuInput::Escape);
            }
        })?;

        menu.borrow_mut()
            .listeners
            .extend([on_button, on_document, on_key]);
        Ok(Some(menu))
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn apply(&mut self, input: MenuInput) {
        let open = self.state.apply(input, self.breakpoint);
        let classes = self.nav.class_list();
        let _ = if open {
            classes.add_1(&self.open_class)
        } else {
            classes.remove_1(&self.open_class)
        };
        let _ = self
            .button
            .set_attribute("aria-expanded", self.state.aria_expanded());
    }

    fn is_outside(&self, event: &Event) -> bool {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return false;
        };
        let button: &Node = &self.button;
        !self.nav.contains(Some(&target)) && !button.contains(Some(&target))
    }
}
