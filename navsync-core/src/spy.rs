//! Scroll spy: tracks which content block is most visible and which nav link is active.
//!
//! Each visibility update is merged into per-block state, then the intersecting
//! block with the greatest visible ratio wins. Ties go to the block observed
//! first, which is document order because blocks are observed in that order.
//! An update with nothing intersecting leaves the current selection alone.
use std::collections::HashMap;

use log::debug;

use crate::events::NavListener;
use crate::nav::NavModel;

/// One intersection record delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry {
    pub id: String,
    pub ratio: f64,
    pub intersecting: bool,
}

impl VisibilityEntry {
    #[must_use]
    pub fn new(id: &str, ratio: f64, intersecting: bool) -> Self {
        Self {
            id: id.to_string(),
            ratio,
            intersecting,
        }
    }
}

/// The active link moved; the host clears every link and marks `link_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    pub previous: Option<String>,
    pub current: String,
    /// Position of the newly active link among the internal nav links.
    pub link_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Tracked {
    id: String,
    ratio: f64,
    intersecting: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
    /// Block id -> index of its link in nav order.
    links: HashMap<String, usize>,
    /// Observed blocks in first-observed order.
    observed: Vec<Tracked>,
    active: Option<String>,
}

impl ScrollSpy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spy over existing nav link targets (fragment ids, without `#`).
    /// Empty targets are ignored.
    pub fn with_links<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut spy = Self::new();
        spy.set_links(targets);
        spy
    }

    fn set_links<I, S>(&mut self, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.links.clear();
        for (index, target) in targets
            .into_iter()
            .filter(|t| !t.as_ref().is_empty())
            .enumerate()
        {
            self.links.entry(target.as_ref().to_string()).or_insert(index);
        }
    }

    /// Start observing blocks. Only blocks that have a nav link are tracked;
    /// returns the ids the host should observe, in order.
    pub fn observe<I, S>(&mut self, block_ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut previous: HashMap<String, Tracked> = self
            .observed
            .drain(..)
            .map(|t| (t.id.clone(), t))
            .collect();
        for id in block_ids {
            let id = id.as_ref();
            if !self.links.contains_key(id) || self.observed.iter().any(|t| t.id == id) {
                continue;
            }
            let tracked = previous.remove(id).unwrap_or_else(|| Tracked {
                id: id.to_string(),
                ratio: 0.0,
                intersecting: false,
            });
            self.observed.push(tracked);
        }
        if let Some(active) = &self.active
            && !self.links.contains_key(active)
        {
            debug!("active link `{active}` vanished");
            self.active = None;
        }
        self.observed_ids().map(str::to_string).collect()
    }

    pub fn observed_ids(&self) -> impl Iterator<Item = &str> {
        self.observed.iter().map(|t| t.id.as_str())
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The standing selection against the current link set. Hosts that
    /// re-render their links use this to re-mark the active one.
    #[must_use]
    pub fn selection(&self) -> Option<ActiveChange> {
        let current = self.active.clone()?;
        let link_index = self.link_index(&current)?;
        Some(ActiveChange {
            previous: None,
            current,
            link_index,
        })
    }

    #[must_use]
    pub fn link_index(&self, id: &str) -> Option<usize> {
        self.links.get(id).copied()
    }

    /// Merge a batch of visibility records and reselect the active link.
    ///
    /// Returns `None` when the selection did not change, including when no
    /// tracked block is intersecting.
    pub fn update(&mut self, entries: &[VisibilityEntry]) -> Option<ActiveChange> {
        for entry in entries {
            if let Some(tracked) = self.observed.iter_mut().find(|t| t.id == entry.id) {
                tracked.ratio = if entry.ratio.is_nan() { 0.0 } else { entry.ratio };
                tracked.intersecting = entry.intersecting;
            }
        }
        let best = self.most_visible()?.to_string();
        self.select(best)
    }

    /// Mark a link active directly, as on a nav click.
    pub fn activate(&mut self, id: &str) -> Option<ActiveChange> {
        if !self.links.contains_key(id) {
            return None;
        }
        self.select(id.to_string())
    }

    fn most_visible(&self) -> Option<&str> {
        let mut best: Option<&Tracked> = None;
        for tracked in self.observed.iter().filter(|t| t.intersecting) {
            if best.is_none_or(|b| tracked.ratio > b.ratio) {
                best = Some(tracked);
            }
        }
        best.map(|t| t.id.as_str())
    }

    fn select(&mut self, id: String) -> Option<ActiveChange> {
        if self.active.as_deref() == Some(id.as_str()) {
            return None;
        }
        let link_index = self.link_index(&id)?;
        debug!("active link -> `{id}`");
        let previous = self.active.replace(id.clone());
        Some(ActiveChange {
            previous,
            current: id,
            link_index,
        })
    }
}

impl NavListener for ScrollSpy {
    fn links_changed(&mut self, model: &NavModel) {
        self.set_links(model.internal.iter().map(|link| link.id.as_str()));
        self.observe(model.internal.iter().map(|link| link.id.as_str()));
    }
}
