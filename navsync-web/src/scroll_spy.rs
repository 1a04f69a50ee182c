//! Drives [`ScrollSpy`] from an `IntersectionObserver` and mirrors its
//! selection onto the nav anchors.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Array;
use log::{debug, warn};
use navsync_core::{ActiveChange, EnhanceConfig, NavListener, NavModel, ScrollSpy, VisibilityEntry};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::dom::{self, Listener};
use crate::error::DomError;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct SpyBinding {
    doc: Document,
    nav: Element,
    config: Rc<EnhanceConfig>,
    spy: ScrollSpy,
    /// Internal anchors in nav order; index matches [`ActiveChange::link_index`].
    links: Vec<Element>,
    observer: Option<IntersectionObserver>,
    _callback: Option<ObserverCallback>,
    click_handlers: Vec<Listener>,
    this: Weak<RefCell<Self>>,
}

impl SpyBinding {
    /// Create the binding and its observer. Nothing is observed until the nav
    /// announces its links.
    ///
    /// # Errors
    /// Returns an error if the browser rejects the observer options.
    pub fn install(
        doc: &Document,
        nav: &Element,
        config: Rc<EnhanceConfig>,
    ) -> Result<Rc<RefCell<Self>>, DomError> {
        let observer_cfg = config.observer.clone();
        let binding = Rc::new(RefCell::new(Self {
            doc: doc.clone(),
            nav: nav.clone(),
            config,
            spy: ScrollSpy::new(),
            links: Vec::new(),
            observer: None,
            _callback: None,
            click_handlers: Vec::new(),
            this: Weak::new(),
        }));
        let weak = Rc::downgrade(&binding);

        let handler = weak.clone();
        let callback = Closure::wrap(Box::new(move |entries: Array, _obs: IntersectionObserver| {
            let Some(binding) = handler.upgrade() else {
                return;
            };
            let entries: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| VisibilityEntry {
                    id: entry.target().id(),
                    ratio: entry.intersection_ratio(),
                    intersecting: entry.is_intersecting(),
                })
                .collect();
            binding.borrow_mut().apply_visibility(&entries);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&observer_cfg.root_margin);
        let thresholds: Array = observer_cfg
            .thresholds
            .iter()
            .copied()
            .map(JsValue::from_f64)
            .collect();
        options.set_threshold(&thresholds);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        {
            let mut state = binding.borrow_mut();
            state.observer = Some(observer);
            state._callback = Some(callback);
            state.this = weak;
        }
        Ok(binding)
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.spy.active()
    }

    #[must_use]
    pub fn links(&self) -> &[Element] {
        &self.links
    }

    /// Feed one observer batch through the spy and update the anchors.
    pub fn apply_visibility(&mut self, entries: &[VisibilityEntry]) {
        if let Some(change) = self.spy.update(entries) {
            self.mark_active(&change);
        }
    }

    /// Mark the link for `id` active, as when it is clicked.
    pub fn activate(&mut self, id: &str) {
        if let Some(change) = self.spy.activate(id) {
            self.mark_active(&change);
        }
    }

    fn mark_active(&self, change: &ActiveChange) {
        let class = &self.config.active_class;
        for link in &self.links {
            let _ = link.class_list().remove_1(class);
            let _ = link.remove_attribute("aria-current");
        }
        if let Some(link) = self.links.get(change.link_index) {
            let _ = link.class_list().add_1(class);
            let _ = link.set_attribute("aria-current", "page");
        }
        debug!("scroll-spy active: {}", change.current);
    }

    fn reobserve(&mut self) -> Result<(), DomError> {
        if let Some(observer) = &self.observer {
            observer.disconnect();
            for id in self.spy.observed_ids() {
                if let Some(block) = self.doc.get_element_by_id(id) {
                    observer.observe(&block);
                }
            }
        }

        self.links = dom::query_all(&self.nav, "a[href^='#']")?
            .into_iter()
            .filter(|a| {
                a.get_attribute("href")
                    .is_some_and(|href| href.len() > 1)
            })
            .collect();
        self.bind_clicks()
    }

    fn bind_clicks(&mut self) -> Result<(), DomError> {
        self.click_handlers.clear();
        let anim = self.config.click_anim_class.clone();
        for link in &self.links {
            let target = link.get_attribute("href").unwrap_or_default();
            let id = target.trim_start_matches('#').to_string();
            let weak = self.this.clone();
            let anchor = link.clone();
            let anim = anim.clone();
            let handler = dom::listen(link, "click", move |_event| {
                restart_animation(&anchor, &anim);
                if let Some(binding) = weak.upgrade() {
                    binding.borrow_mut().activate(&id);
                }
            })?;
            self.click_handlers.push(handler);
        }
        Ok(())
    }
}

fn restart_animation(anchor: &Element, class: &str) {
    let _ = anchor.class_list().remove_1(class);
    // Reading layout forces a reflow so the animation replays on rapid clicks.
    if let Some(html) = dom::as_html(anchor) {
        let _ = html.offset_width();
    }
    let _ = anchor.class_list().add_1(class);
}

impl NavListener for SpyBinding {
    fn links_changed(&mut self, model: &NavModel) {
        self.spy.links_changed(model);
        if let Err(err) = self.reobserve() {
            warn!("scroll-spy could not re-observe sections: {err}");
        }
        // Anchors were re-rendered without their active marker.
        if let Some(selection) = self.spy.selection() {
            self.mark_active(&selection);
        }
    }
}

impl Drop for SpyBinding {
    fn drop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}
