//! navsync core
//!
//! Platform-agnostic logic behind the page enhancements: identifier
//! assignment, navigation rebuilding, scroll-spy selection, theme preference,
//! menu state, and project cards. Nothing here touches the DOM; the web crate
//! adapts these types to the browser.

pub mod block;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod input;
pub mod menu;
pub mod nav;
pub mod projects;
pub mod slug;
pub mod spy;
pub mod theme;

// Re-export commonly used types
pub use block::ContentBlock;
pub use config::{
    BackToTopConfig, EnhanceConfig, MenuConfig, ObserverConfig, SlugConfig, ThemeConfig,
};
pub use error::NavsyncError;
pub use events::{NavListener, SubscriptionId, Subscribers};
pub use ids::IdAssigner;
pub use input::{KeyPress, ScrollMode};
pub use menu::{MenuInput, MenuState};
pub use nav::{Anchor, InternalLink, NavBuilder, NavEntry, NavModel};
pub use projects::{ProjectCard, ProjectFeed, ProjectItem};
pub use slug::{slugify, slugify_with};
pub use spy::{ActiveChange, ScrollSpy, VisibilityEntry};
pub use theme::{MemoryStore, PreferenceStore, Theme, ThemeController, ThemeView};

/// Assign missing identifiers and rebuild the navigation for one page snapshot.
///
/// `existing_ids` are all identifiers already in the document, `blocks` the
/// navigable blocks in document order, and `anchors` the current nav anchors.
/// Blocks are updated in place; subscribers of `builder` are notified.
pub fn sync_navigation<'a, I>(
    config: &EnhanceConfig,
    existing_ids: I,
    blocks: &mut [ContentBlock],
    anchors: &[Anchor],
    builder: &'a mut NavBuilder,
) -> &'a NavModel
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut assigner = IdAssigner::new(existing_ids, config.slug.clone());
    let assigned = assigner.assign(blocks);
    log::debug!("sync_navigation: {assigned} id(s) assigned");
    builder.rebuild(blocks, anchors)
}
