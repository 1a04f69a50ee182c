//! Navigation rebuilding from content blocks.
use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::block::ContentBlock;
use crate::events::{NavListener, SubscriptionId, Subscribers};

/// Link to a content block on the same page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalLink {
    pub id: String,
    pub label: String,
}

impl InternalLink {
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

/// An anchor found in the navigation container before a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: Option<String>,
    pub label: String,
}

impl Anchor {
    #[must_use]
    pub fn new(href: Option<&str>, label: &str) -> Self {
        Self {
            href: href.map(str::to_string),
            label: label.to_string(),
        }
    }

    /// Internal anchors point at a fragment on this page and are regenerated.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.href.as_deref().is_some_and(|href| href.starts_with('#'))
    }
}

/// One rendered entry of the navigation, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEntry<'a> {
    Internal(&'a InternalLink),
    Separator,
    External(&'a Anchor),
}

/// The navigation as it should be rendered.
///
/// `external` holds the non-internal anchors in their original relative order,
/// which is the order the host must re-append its existing nodes in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavModel {
    pub internal: Vec<InternalLink>,
    pub external: Vec<Anchor>,
}

impl NavModel {
    /// Derive the navigation from blocks in document order and the anchors
    /// currently in the container. Blocks without an identifier are skipped.
    #[must_use]
    pub fn build(blocks: &[ContentBlock], existing: &[Anchor]) -> Self {
        let internal = blocks
            .iter()
            .filter_map(|block| {
                let id = block.id()?;
                Some(InternalLink {
                    id: id.to_string(),
                    label: block.label().unwrap_or_else(|| id.to_string()),
                })
            })
            .collect();
        let external = existing
            .iter()
            .filter(|anchor| !anchor.is_internal())
            .cloned()
            .collect();
        Self { internal, external }
    }

    /// A separator is rendered only between two non-empty groups.
    #[must_use]
    pub fn has_separator(&self) -> bool {
        !self.internal.is_empty() && !self.external.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<NavEntry<'_>> {
        let mut out: Vec<NavEntry<'_>> = self.internal.iter().map(NavEntry::Internal).collect();
        if self.has_separator() {
            out.push(NavEntry::Separator);
        }
        out.extend(self.external.iter().map(NavEntry::External));
        out
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// Rebuilds the navigation and tells subscribers when it changed.
#[derive(Debug, Default)]
pub struct NavBuilder {
    listeners: Subscribers<dyn NavListener>,
    current: Option<NavModel>,
}

impl NavBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<L>(&mut self, listener: &Rc<RefCell<L>>) -> SubscriptionId
    where
        L: NavListener + 'static,
    {
        let listener: Rc<RefCell<dyn NavListener>> = listener.clone();
        self.listeners.subscribe(&listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    #[must_use]
    pub fn current(&self) -> Option<&NavModel> {
        self.current.as_ref()
    }

    /// Build the model, store it, and notify every subscriber.
    pub fn rebuild(&mut self, blocks: &[ContentBlock], existing: &[Anchor]) -> &NavModel {
        self.stage(blocks, existing);
        self.publish();
        self.current.get_or_insert_with(NavModel::default)
    }

    /// Build and store the model without notifying. Hosts that render before
    /// announcing the change call [`Self::publish`] afterwards.
    pub fn stage(&mut self, blocks: &[ContentBlock], existing: &[Anchor]) -> &NavModel {
        let model = NavModel::build(blocks, existing);
        debug!(
            "nav rebuilt: {} internal, {} external",
            model.internal.len(),
            model.external.len()
        );
        self.current.insert(model)
    }

    /// Send the current model to every live subscriber. Returns how many were notified.
    pub fn publish(&mut self) -> usize {
        let Some(model) = &self.current else {
            return 0;
        };
        let notified = self.listeners.notify(|l| l.links_changed(model));
        debug!("links-changed delivered to {notified} listener(s)");
        notified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks() -> Vec<ContentBlock> {
        vec![
            ContentBlock::new(Some("about"), Some("About")),
            ContentBlock::new(Some("work"), Some("  Work ")),
            ContentBlock::new(Some("contact"), None),
            ContentBlock::new(None, Some("Orphan")),
        ]
    }

    #[test]
    fn internal_links_follow_document_order() {
        let model = NavModel::build(&blocks(), &[]);
        let hrefs: Vec<_> = model.internal.iter().map(InternalLink::href).collect();
        assert_eq!(hrefs, ["#about", "#work", "#contact"]);
        assert_eq!(model.internal[1].label, "Work");
        assert_eq!(model.internal[2].label, "contact");
        assert!(!model.has_separator());
    }

    #[test]
    fn external_links_keep_relative_order_after_internal() {
        let existing = [
            Anchor::new(Some("https://github.com/me"), "GitHub"),
            Anchor::new(Some("#stale"), "Stale"),
            Anchor::new(None, "No href"),
            Anchor::new(Some("/resume.pdf"), "Resume"),
        ];
        let model = NavModel::build(&blocks(), &existing);
        let labels: Vec<_> = model.external.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["GitHub", "No href", "Resume"]);
        assert!(model.has_separator());
        let entries = model.entries();
        assert_eq!(entries.len(), 3 + 1 + 3);
        assert_eq!(entries[3], NavEntry::Separator);
    }

    /// The anchors a host finds in the container after rendering `model`.
    fn rendered_anchors(model: &NavModel) -> Vec<Anchor> {
        model
            .internal
            .iter()
            .map(|link| Anchor::new(Some(link.href().as_str()), &link.label))
            .chain(model.external.iter().cloned())
            .collect()
    }

    #[test]
    fn rebuild_from_rendered_output_is_stable() {
        let existing = [Anchor::new(Some("https://example.com"), "Blog")];
        let first = NavModel::build(&blocks(), &existing);
        let second = NavModel::build(&blocks(), &rendered_anchors(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn no_separator_without_internal_links() {
        let model = NavModel::build(&[], &[Anchor::new(Some("/x"), "X")]);
        assert!(!model.has_separator());
        assert_eq!(model.entries().len(), 1);
    }

    #[test]
    fn builder_stores_current_model() {
        let mut builder = NavBuilder::new();
        assert!(builder.current().is_none());
        assert_eq!(builder.publish(), 0);
        builder.rebuild(&blocks(), &[]);
        assert_eq!(builder.current().map(|m| m.internal.len()), Some(3));
    }

    #[derive(Default)]
    struct Seen(Vec<usize>);

    impl NavListener for Seen {
        fn links_changed(&mut self, model: &NavModel) {
            self.0.push(model.internal.len());
        }
    }

    #[test]
    fn stage_defers_notification_until_publish() {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let mut builder = NavBuilder::new();
        let id = builder.subscribe(&seen);
        builder.stage(&blocks(), &[]);
        assert!(seen.borrow().0.is_empty());
        assert_eq!(builder.publish(), 1);
        assert_eq!(seen.borrow().0, [3]);
        assert!(builder.unsubscribe(id));
        builder.rebuild(&[], &[]);
        assert_eq!(seen.borrow().0, [3]);
    }
}
