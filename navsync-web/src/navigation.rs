//! Auto-ID assignment and navigation regeneration against the live DOM.
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use navsync_core::{
    Anchor, ContentBlock, EnhanceConfig, IdAssigner, NavBuilder, NavEntry, NavListener, NavModel,
    SubscriptionId,
};
use web_sys::{CustomEvent, Document, Element};

use crate::dom;
use crate::error::DomError;

/// Event dispatched on `document` after the nav has been regenerated.
pub const NAV_REGENERATED_EVENT: &str = "nav-regenerated";

const SEPARATOR_ATTR: &str = "data-navsync-separator";

/// Owns the navigation container and the builder that regenerates it.
pub struct NavController {
    doc: Document,
    nav: Element,
    config: Rc<EnhanceConfig>,
    builder: NavBuilder,
}

impl NavController {
    /// Locate the navigation container. A page without one gets `None`.
    #[must_use]
    pub fn new(doc: &Document, config: Rc<EnhanceConfig>) -> Option<Self> {
        let nav = doc.get_element_by_id(&config.nav_id)?;
        Some(Self {
            doc: doc.clone(),
            nav,
            config,
            builder: NavBuilder::new(),
        })
    }

    #[must_use]
    pub fn nav(&self) -> &Element {
        &self.nav
    }

    #[must_use]
    pub fn model(&self) -> Option<&NavModel> {
        self.builder.current()
    }

    pub fn subscribe<L>(&mut self, listener: &Rc<RefCell<L>>) -> SubscriptionId
    where
        L: NavListener + 'static,
    {
        self.builder.subscribe(listener)
    }

    /// Assign missing ids, rebuild the nav, then announce the new link set.
    ///
    /// # Errors
    /// Returns an error if a selector is invalid or the DOM rejects a mutation.
    pub fn refresh(&mut self) -> Result<(), DomError> {
        let elements = dom::query_document(&self.doc, &self.config.block_selector)?;
        assign_ids(&self.doc, &self.config, &elements)?;
        let blocks = read_blocks(&elements, &self.config.heading_selector);

        let anchor_elements = dom::query_all(&self.nav, "a")?;
        let anchors: Vec<Anchor> = anchor_elements.iter().map(read_anchor).collect();

        let model = self.builder.stage(&blocks, &anchors).clone();
        let external: Vec<Element> = anchor_elements
            .into_iter()
            .zip(&anchors)
            .filter(|(_, anchor)| !anchor.is_internal())
            .map(|(el, _)| el)
            .collect();
        render(&self.doc, &self.nav, &model, &external)?;
        info!(
            "nav regenerated with {} section link(s)",
            model.internal.len()
        );

        self.builder.publish();
        let event = CustomEvent::new(NAV_REGENERATED_EVENT)?;
        self.doc.dispatch_event(&event)?;
        Ok(())
    }
}

/// Give every block lacking an id a unique one derived from its heading.
///
/// # Errors
/// Returns an error if the document-wide id query fails.
pub fn assign_ids(
    doc: &Document,
    config: &EnhanceConfig,
    elements: &[Element],
) -> Result<usize, DomError> {
    let existing: Vec<String> = dom::query_document(doc, "[id]")?
        .iter()
        .map(Element::id)
        .collect();
    let mut assigner = IdAssigner::new(existing, config.slug.clone());
    let mut blocks = read_blocks(elements, &config.heading_selector);
    let assigned = assigner.assign(&mut blocks);
    for (element, block) in elements.iter().zip(&blocks) {
        if let Some(id) = block.id()
            && element.id() != id
        {
            element.set_id(id);
        }
    }
    debug!("assigned {assigned} section id(s)");
    Ok(assigned)
}

fn read_blocks(elements: &[Element], heading_selector: &str) -> Vec<ContentBlock> {
    elements
        .iter()
        .map(|el| {
            let id = el.id();
            let heading = dom::first_text(el, heading_selector);
            ContentBlock::new(Some(id.as_str()), heading.as_deref())
        })
        .collect()
}

fn read_anchor(el: &Element) -> Anchor {
    Anchor::new(
        el.get_attribute("href").as_deref(),
        el.text_content().unwrap_or_default().trim(),
    )
}

fn render(
    doc: &Document,
    nav: &Element,
    model: &NavModel,
    external: &[Element],
) -> Result<(), DomError> {
    for anchor in dom::query_all(nav, "a")? {
        anchor.remove();
    }
    for separator in dom::query_all(nav, &format!("[{SEPARATOR_ATTR}]"))? {
        separator.remove();
    }

    let mut external = external.iter();
    for entry in model.entries() {
        match entry {
            NavEntry::Internal(link) => {
                let a = doc.create_element("a")?;
                a.set_attribute("href", &link.href())?;
                a.set_text_content(Some(&link.label));
                nav.append_child(&a)?;
            }
            NavEntry::Separator => {
                let sep = doc.create_element("span")?;
                sep.set_attribute("aria-hidden", "true")?;
                sep.set_attribute(SEPARATOR_ATTR, "")?;
                // Forces a line break on wrapped (small screen) layouts.
                sep.set_attribute("style", "flex-basis:100%;height:0")?;
                nav.append_child(&sep)?;
            }
            NavEntry::External(_) => {
                if let Some(anchor) = external.next() {
                    nav.append_child(anchor)?;
                }
            }
        }
    }
    Ok(())
}
