//! Project cards rendered from JSON embedded in the page.
use serde::{Deserialize, Serialize};

use crate::error::{NavsyncError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectFeed {
    #[serde(default)]
    pub items: Vec<ProjectItem>,
}

/// Display-ready card: missing text becomes empty, blank links are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub title: String,
    pub stack: String,
    pub desc: String,
    pub link: Option<String>,
}

impl ProjectFeed {
    /// Parse the contents of the data element. Empty input is an empty feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid project feed.
    pub fn from_json(text: &str) -> Result<Self> {
        let text = if text.trim().is_empty() { "{}" } else { text };
        serde_json::from_str(text).map_err(NavsyncError::ProjectData)
    }

    #[must_use]
    pub fn cards(&self) -> Vec<ProjectCard> {
        self.items.iter().map(ProjectItem::card).collect()
    }
}

impl ProjectItem {
    #[must_use]
    pub fn card(&self) -> ProjectCard {
        ProjectCard {
            title: self.title.clone().unwrap_or_default(),
            stack: self.stack.clone().unwrap_or_default(),
            desc: self.desc.clone().unwrap_or_default(),
            link: self.link.clone().filter(|link| !link.trim().is_empty()),
        }
    }
}
