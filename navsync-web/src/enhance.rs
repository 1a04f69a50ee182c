//! Installs every enhancement and keeps its state alive.
use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use navsync_core::EnhanceConfig;
use web_sys::Document;

use crate::error::DomError;
use crate::menu::MenuToggle;
use crate::navigation::NavController;
use crate::projects;
use crate::scroll::ScrollHelpers;
use crate::scroll_spy::SpyBinding;
use crate::theme::ThemeToggle;

/// Live state of the installed enhancements. Dropping it detaches the observer
/// and the listeners it owns.
#[derive(Default)]
pub struct Enhancements {
    pub navigation: Option<NavController>,
    pub spy: Option<Rc<RefCell<SpyBinding>>>,
    pub theme: Option<Rc<RefCell<ThemeToggle>>>,
    pub menu: Option<Rc<RefCell<MenuToggle>>>,
    pub scroll: Option<ScrollHelpers>,
    pub projects_rendered: usize,
}

/// Install everything the page supports. Each enhancement fails independently;
/// failures are logged and the rest still install.
#[must_use]
pub fn install(doc: &Document, config: Rc<EnhanceConfig>) -> Enhancements {
    let mut out = Enhancements {
        menu: report("menu", MenuToggle::install(doc, &config)).flatten(),
        theme: report("theme", ThemeToggle::install(doc, &config)).flatten(),
        scroll: report("scroll", ScrollHelpers::install(doc, &config)),
        ..Enhancements::default()
    };

    if let Some((navigation, spy)) =
        install_navigation(doc, &config).and_then(|result| report("navigation", result))
    {
        out.navigation = Some(navigation);
        out.spy = Some(spy);
    }

    out.projects_rendered = report("projects", projects::render_projects(doc)).unwrap_or_default();
    info!(
        "enhancements installed (nav: {}, projects: {})",
        out.navigation.is_some(),
        out.projects_rendered
    );
    out
}

type NavParts = (NavController, Rc<RefCell<SpyBinding>>);

/// `None` when the page has no navigation container.
fn install_navigation(
    doc: &Document,
    config: &Rc<EnhanceConfig>,
) -> Option<Result<NavParts, DomError>> {
    let navigation = NavController::new(doc, Rc::clone(config))?;
    Some(wire_navigation(doc, navigation, config))
}

/// The spy subscribes before the first refresh so it sees the initial link set.
fn wire_navigation(
    doc: &Document,
    mut navigation: NavController,
    config: &Rc<EnhanceConfig>,
) -> Result<NavParts, DomError> {
    let spy = SpyBinding::install(doc, navigation.nav(), Rc::clone(config))?;
    navigation.subscribe(&spy);
    navigation.refresh()?;
    Ok((navigation, spy))
}

fn report<T>(name: &str, result: Result<T, DomError>) -> Option<T> {
    result
        .map_err(|err| warn!("{name} enhancement disabled: {err}"))
        .ok()
}
