//! Unique identifier assignment for content blocks.
use std::collections::HashSet;

use log::debug;

use crate::block::ContentBlock;
use crate::config::SlugConfig;
use crate::slug::slugify_with;

/// Hands out identifiers that are unique against everything already in the document.
#[derive(Debug, Clone, Default)]
pub struct IdAssigner {
    taken: HashSet<String>,
    slug: SlugConfig,
}

impl IdAssigner {
    /// Seed the assigner with every identifier already present in the document.
    pub fn new<I, S>(existing: I, slug: SlugConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let taken = existing
            .into_iter()
            .map(Into::<String>::into)
            .filter(|id| !id.is_empty())
            .collect();
        Self { taken, slug }
    }

    fn reserve(&mut self, id: &str) {
        self.taken.insert(id.to_string());
    }

    /// Return `base` or the first free `base-2`, `base-3`, ... and reserve it.
    pub fn unique_id(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 2_u32;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        self.reserve(&candidate);
        candidate
    }

    /// Derive a unique identifier from optional heading text.
    pub fn id_for_heading(&mut self, heading: Option<&str>) -> String {
        let base = slugify_with(heading.unwrap_or_default(), &self.slug);
        self.unique_id(&base)
    }

    /// Give every block without an identifier a fresh one, in document order.
    ///
    /// Identifiers the blocks already carry are reserved first so a later
    /// block's explicit id is never handed to an earlier one.
    /// Returns the number of blocks that were assigned.
    pub fn assign(&mut self, blocks: &mut [ContentBlock]) -> usize {
        for id in blocks.iter().filter_map(ContentBlock::id) {
            self.reserve(id);
        }
        let mut assigned = 0;
        for block in blocks.iter_mut().filter(|b| b.id().is_none()) {
            let id = self.id_for_heading(block.heading.as_deref());
            debug!("assigned id `{id}` to block {:?}", block.heading);
            block.id = Some(id);
            assigned += 1;
        }
        assigned
    }
}
