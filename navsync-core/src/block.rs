//! Content blocks as seen by the navigation subsystem.
/// A navigable region of the page (a `section` or `article`), in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentBlock {
    pub id: Option<String>,
    pub heading: Option<String>,
}

impl ContentBlock {
    #[must_use]
    pub fn new(id: Option<&str>, heading: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            heading: heading.map(str::to_string),
        }
    }

    #[must_use]
    pub fn with_heading(heading: &str) -> Self {
        Self::new(None, Some(heading))
    }

    #[must_use]
    pub fn with_id(id: &str) -> Self {
        Self::new(Some(id), None)
    }

    /// The block's identifier, treating an empty attribute as absent.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Trimmed heading text, or the identifier when the heading is missing or blank.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.heading
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .or_else(|| self.id())
            .map(str::to_string)
    }
}
