//! Back-to-top button, the `t` shortcut, and smooth in-page link scrolling.
use log::{debug, warn};
use navsync_core::input::{self, KeyPress, ScrollMode};
use navsync_core::EnhanceConfig;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions,
};

use crate::dom::{self, Listener};
use crate::error::DomError;

#[derive(Default)]
pub struct ScrollHelpers {
    listeners: Vec<Listener>,
}

impl ScrollHelpers {
    /// # Errors
    /// Returns an error if a selector is invalid or a listener cannot be attached.
    pub fn install(doc: &Document, config: &EnhanceConfig) -> Result<Self, DomError> {
        let mut helpers = Self::default();
        if let Some(button) = doc.query_selector(&config.back_to_top.selector)? {
            helpers.install_back_to_top(&button, config.back_to_top.show_at)?;
        }
        helpers.install_shortcut(doc)?;
        helpers.install_smooth_anchors(doc)?;
        Ok(helpers)
    }

    fn install_back_to_top(&mut self, button: &Element, show_at: f64) -> Result<(), DomError> {
        let Some(window) = dom::window() else {
            return Ok(());
        };
        let Some(html) = dom::as_html(button).cloned() else {
            return Err(DomError::NotHtmlElement(button.tag_name()));
        };
        let sync_visibility = move || {
            let scroll_y = dom::window()
                .and_then(|win| win.scroll_y().ok())
                .unwrap_or_default();
            html.set_hidden(input::back_to_top_hidden(scroll_y, show_at));
        };
        sync_visibility();
        self.listeners
            .push(dom::listen_passive(&window, "scroll", move |_event| sync_visibility())?);
        self.listeners
            .push(dom::listen(button, "click", |_event| scroll_to_top())?);
        Ok(())
    }

    fn install_shortcut(&mut self, doc: &Document) -> Result<(), DomError> {
        let owner = doc.clone();
        let on_key = dom::listen(doc, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let press = KeyPress {
                key: key.key(),
                ctrl: key.ctrl_key(),
                meta: key.meta_key(),
                alt: key.alt_key(),
                default_prevented: key.default_prevented(),
            };
            if input::is_scroll_top_shortcut(&press, is_typing(&owner)) {
                event.prevent_default();
                scroll_to_top();
            }
        })?;
        self.listeners.push(on_key);
        Ok(())
    }

    /// Delegated on `document` so regenerated nav anchors are covered too.
    fn install_smooth_anchors(&mut self, doc: &Document) -> Result<(), DomError> {
        let owner = doc.clone();
        let on_click = dom::listen(doc, "click", move |event| {
            let Some(anchor) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("a[href^='#']").ok().flatten())
            else {
                return;
            };
            let href = anchor.get_attribute("href").unwrap_or_default();
            let Some(target) = input::fragment_target(&href).and_then(|id| owner.get_element_by_id(id))
            else {
                return;
            };
            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
            // The default navigation was cancelled, so record the fragment ourselves.
            let pushed = dom::window()
                .ok_or_else(|| JsValue::from_str("no window"))
                .and_then(|win| win.history())
                .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(href.as_str())));
            if let Err(err) = pushed {
                warn!("could not update location hash: {}", dom::js_error_message(&err));
            }
        })?;
        self.listeners.push(on_click);
        Ok(())
    }
}

fn is_typing(doc: &Document) -> bool {
    doc.active_element().is_some_and(|el| {
        let editable = el
            .dyn_ref::<HtmlElement>()
            .is_some_and(HtmlElement::is_content_editable);
        input::is_typing_target(&el.tag_name(), editable)
    })
}

/// Scroll the window to the top, smoothly unless reduced motion is requested.
pub fn scroll_to_top() {
    let Some(window) = dom::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    if ScrollMode::for_reduced_motion(dom::prefers_reduced_motion()) == ScrollMode::Smooth {
        options.set_behavior(ScrollBehavior::Smooth);
    }
    debug!("scrolling to top");
    window.scroll_to_with_scroll_to_options(&options);
}
