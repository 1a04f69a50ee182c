//! Project cards rendered from the page's embedded JSON feed.
use log::{debug, warn};
use navsync_core::{ProjectCard, ProjectFeed};
use web_sys::{Document, Element};

use crate::error::DomError;

pub const DATA_ELEMENT_ID: &str = "projects-data";
pub const TARGET_ELEMENT_ID: &str = "projects";

/// Append one card per feed item to `#projects`. Returns the number rendered.
///
/// A malformed feed is logged and renders nothing.
///
/// # Errors
/// Returns an error if the DOM rejects element creation.
pub fn render_projects(doc: &Document) -> Result<usize, DomError> {
    let (Some(data), Some(target)) = (
        doc.get_element_by_id(DATA_ELEMENT_ID),
        doc.get_element_by_id(TARGET_ELEMENT_ID),
    ) else {
        return Ok(0);
    };
    let text = data.text_content().unwrap_or_default();
    let feed = match ProjectFeed::from_json(&text) {
        Ok(feed) => feed,
        Err(err) => {
            warn!("Project data parse error: {err}");
            return Ok(0);
        }
    };
    let cards = feed.cards();
    for card in &cards {
        let card_el = card_element(doc, card)?;
        target.append_child(&card_el)?;
    }
    debug!("rendered {} project card(s)", cards.len());
    Ok(cards.len())
}

fn card_element(doc: &Document, card: &ProjectCard) -> Result<Element, DomError> {
    let article = doc.create_element("article")?;
    article.set_class_name("project");
    let title = text_element(doc, "h3", None, &card.title)?;
    let stack = text_element(doc, "div", Some("stack"), &card.stack)?;
    let desc = text_element(doc, "p", Some("desc"), &card.desc)?;
    for child in [&title, &stack, &desc] {
        article.append_child(child)?;
    }
    if let Some(link) = &card.link {
        let actions = doc.create_element("div")?;
        actions.set_class_name("actions");
        let button = text_element(doc, "a", Some("btn"), "View")?;
        button.set_attribute("href", link)?;
        actions.append_child(&button)?;
        article.append_child(&actions)?;
    }
    Ok(article)
}

fn text_element(
    doc: &Document,
    tag: &str,
    class: Option<&str>,
    text: &str,
) -> Result<Element, DomError> {
    let el = doc.create_element(tag)?;
    if let Some(class) = class {
        el.set_class_name(class);
    }
    el.set_text_content(Some(text));
    Ok(el)
}
