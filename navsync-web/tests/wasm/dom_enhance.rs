use std::cell::Cell;
use std::rc::Rc;

use navsync_core::{EnhanceConfig, VisibilityEntry};
use navsync_web::dom;
use navsync_web::menu::MenuToggle;
use navsync_web::navigation::{NAV_REGENERATED_EVENT, NavController};
use navsync_web::projects::render_projects;
use navsync_web::scroll::ScrollHelpers;
use navsync_web::scroll_spy::SpyBinding;
use navsync_web::theme::ThemeToggle;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit};

const PAGE: &str = r##"
<nav id="primary-nav">
  <a href="#stale">Stale</a>
  <a href="https://github.com/example">GitHub</a>
  <a href="/cv.pdf">CV</a>
</nav>
<main>
  <section><h2>About</h2></section>
  <section><h2>About</h2></section>
  <section><p>No heading here</p></section>
  <article id="work"><h3>Selected Work</h3></article>
</main>
"##;

fn fixture(html: &str) -> Document {
    let doc = dom::document().expect("document");
    let root = doc.get_element_by_id("fixture").unwrap_or_else(|| {
        let root = doc.create_element("div").expect("create fixture root");
        root.set_id("fixture");
        doc.body()
            .expect("document body")
            .append_child(&root)
            .expect("append fixture root");
        root
    });
    root.set_inner_html(html);
    doc
}

fn nav_hrefs(doc: &Document) -> Vec<String> {
    let nav = doc.get_element_by_id("primary-nav").expect("nav");
    dom::query_all(&nav, "a")
        .expect("query anchors")
        .iter()
        .filter_map(|a| a.get_attribute("href"))
        .collect()
}

fn section_ids(doc: &Document) -> Vec<String> {
    dom::query_document(doc, "main section, main article")
        .expect("query sections")
        .iter()
        .map(Element::id)
        .collect()
}

fn config() -> Rc<EnhanceConfig> {
    Rc::new(EnhanceConfig::default())
}

#[wasm_bindgen_test]
fn dom_helpers_reach_window_and_document() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[wasm_bindgen_test]
fn refresh_assigns_ids_and_rebuilds_nav() {
    let doc = fixture(PAGE);
    let mut nav = NavController::new(&doc, config()).expect("nav present");
    nav.refresh().expect("refresh");

    assert_eq!(section_ids(&doc), ["about", "about-2", "section", "work"]);
    assert_eq!(
        nav_hrefs(&doc),
        [
            "#about",
            "#about-2",
            "#section",
            "#work",
            "https://github.com/example",
            "/cv.pdf"
        ]
    );
    let labels: Vec<String> = dom::query_all(nav.nav(), "a")
        .unwrap()
        .iter()
        .filter_map(|a| a.text_content())
        .collect();
    assert_eq!(labels[2], "section");
    assert_eq!(labels[3], "Selected Work");
    assert_eq!(
        dom::query_all(nav.nav(), "span[aria-hidden='true']")
            .unwrap()
            .len(),
        1
    );
}

#[wasm_bindgen_test]
fn refreshing_twice_is_stable() {
    let doc = fixture(PAGE);
    let mut nav = NavController::new(&doc, config()).expect("nav present");
    nav.refresh().expect("first refresh");
    let first = nav_hrefs(&doc);
    nav.refresh().expect("second refresh");
    assert_eq!(nav_hrefs(&doc), first);
    assert_eq!(section_ids(&doc), ["about", "about-2", "section", "work"]);
    assert_eq!(
        dom::query_all(nav.nav(), "span[aria-hidden='true']")
            .unwrap()
            .len(),
        1
    );
}

#[wasm_bindgen_test]
fn refresh_announces_regeneration() {
    let doc = fixture(PAGE);
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    let _listener = dom::listen(&doc, NAV_REGENERATED_EVENT, move |_event| {
        counter.set(counter.get() + 1);
    })
    .expect("listen");
    let mut nav = NavController::new(&doc, config()).expect("nav present");
    nav.refresh().expect("refresh");
    assert_eq!(fired.get(), 1);
}

#[wasm_bindgen_test]
fn missing_nav_is_a_no_op() {
    let doc = fixture("<main><section><h2>Solo</h2></section></main>");
    assert!(NavController::new(&doc, config()).is_none());
}

fn wired(doc: &Document) -> (NavController, Rc<std::cell::RefCell<SpyBinding>>) {
    let cfg = config();
    let mut nav = NavController::new(doc, Rc::clone(&cfg)).expect("nav present");
    let spy = SpyBinding::install(doc, nav.nav(), cfg).expect("observer");
    nav.subscribe(&spy);
    nav.refresh().expect("refresh");
    (nav, spy)
}

fn active_hrefs(doc: &Document) -> Vec<String> {
    dom::query_document(doc, "#primary-nav a.is-active[aria-current='page']")
        .unwrap()
        .iter()
        .filter_map(|a| a.get_attribute("href"))
        .collect()
}

#[wasm_bindgen_test]
fn spy_marks_the_single_intersecting_section() {
    let doc = fixture(PAGE);
    let (_nav, spy) = wired(&doc);
    assert_eq!(spy.borrow().links().len(), 4);

    spy.borrow_mut().apply_visibility(&[
        VisibilityEntry::new("about", 0.0, false),
        VisibilityEntry::new("work", 0.5, true),
    ]);
    assert_eq!(active_hrefs(&doc), ["#work"]);

    spy.borrow_mut()
        .apply_visibility(&[VisibilityEntry::new("work", 0.0, false)]);
    assert_eq!(active_hrefs(&doc), ["#work"]);
}

#[wasm_bindgen_test]
fn no_intersection_leaves_links_inactive() {
    let doc = fixture(PAGE);
    let (_nav, spy) = wired(&doc);
    spy.borrow_mut().apply_visibility(&[
        VisibilityEntry::new("about", 0.0, false),
        VisibilityEntry::new("about-2", 0.0, false),
    ]);
    assert!(active_hrefs(&doc).is_empty());
    assert_eq!(spy.borrow().active(), None);
}

#[wasm_bindgen_test]
fn clicking_a_link_activates_it_immediately() {
    let doc = fixture(PAGE);
    let (_nav, spy) = wired(&doc);
    let link = doc
        .query_selector("#primary-nav a[href='#about-2']")
        .unwrap()
        .expect("link")
        .dyn_into::<HtmlElement>()
        .expect("html anchor");
    link.click();
    assert_eq!(active_hrefs(&doc), ["#about-2"]);
    assert!(link.class_list().contains("click-anim"));
    assert_eq!(spy.borrow().active(), Some("about-2"));
}

#[wasm_bindgen_test]
fn active_link_survives_nav_refresh() {
    let doc = fixture(PAGE);
    let (mut nav, spy) = wired(&doc);
    spy.borrow_mut().activate("work");
    assert_eq!(active_hrefs(&doc), ["#work"]);

    nav.refresh().expect("refresh");
    assert_eq!(active_hrefs(&doc), ["#work"]);
    assert_eq!(spy.borrow().active(), Some("work"));
}

#[wasm_bindgen_test]
fn in_page_link_click_updates_location_hash() {
    let doc = fixture(
        r##"<a id="jump" href="#landing">Jump</a><section id="landing"><h2>Landing</h2></section>"##,
    );
    let window = dom::window().expect("window");
    let _helpers = ScrollHelpers::install(&doc, &EnhanceConfig::default()).expect("install");
    doc.get_element_by_id("jump")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
    assert_eq!(window.location().hash().unwrap(), "#landing");
    let path = window.location().pathname().unwrap();
    window
        .history()
        .unwrap()
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path.as_str()))
        .unwrap();
}

#[wasm_bindgen_test]
fn theme_toggle_persists_choice() {
    let doc = fixture(r#"<button class="theme-toggle" role="switch"></button>"#);
    let storage = dom::local_storage().expect("localStorage");
    storage.remove_item("theme-pref").unwrap();
    storage.set_item("theme-pref", "light").unwrap();

    let toggle = ThemeToggle::install(&doc, &EnhanceConfig::default())
        .expect("install")
        .expect("root element");
    let root = doc.document_element().unwrap();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));

    let button = doc
        .query_selector(".theme-toggle")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    button.click();
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(button.get_attribute("aria-checked").as_deref(), Some("true"));
    assert_eq!(storage.get_item("theme-pref").unwrap().as_deref(), Some("dark"));

    toggle.borrow_mut().toggle();
    assert_eq!(storage.get_item("theme-pref").unwrap().as_deref(), Some("light"));
    storage.remove_item("theme-pref").unwrap();
    root.remove_attribute("data-theme").unwrap();
}

#[wasm_bindgen_test]
fn menu_opens_and_escape_closes() {
    let doc = fixture(
        r#"<button class="menu-toggle" aria-expanded="false"></button><nav id="primary-nav"></nav>"#,
    );
    let menu = MenuToggle::install(&doc, &EnhanceConfig::default())
        .expect("install")
        .expect("menu present");
    let button = doc
        .query_selector(".menu-toggle")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    let nav = doc.get_element_by_id("primary-nav").unwrap();

    button.click();
    assert!(menu.borrow().is_open());
    assert!(nav.class_list().contains("is-open"));
    assert_eq!(button.get_attribute("aria-expanded").as_deref(), Some("true"));

    let init = KeyboardEventInit::new();
    init.set_key("Escape");
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    doc.dispatch_event(&event).unwrap();
    assert!(!menu.borrow().is_open());
    assert!(!nav.class_list().contains("is-open"));
}

#[wasm_bindgen_test]
fn project_feed_renders_cards() {
    let doc = fixture(
        r#"<script type="application/json" id="projects-data">
            {"items":[{"title":"<b>navsync</b>","stack":"Rust","desc":"Nav sync","link":"https://example.com"},{"title":"Bare"}]}
        </script><div id="projects"></div>"#,
    );
    assert_eq!(render_projects(&doc).expect("render"), 2);
    let cards = dom::query_document(&doc, "#projects article.project").unwrap();
    assert_eq!(cards.len(), 2);
    let title = cards[0].query_selector("h3").unwrap().unwrap();
    assert_eq!(title.text_content().as_deref(), Some("<b>navsync</b>"));
    assert!(cards[0].query_selector("a.btn[href='https://example.com']").unwrap().is_some());
    assert!(cards[1].query_selector(".actions").unwrap().is_none());
}

#[wasm_bindgen_test]
fn malformed_project_feed_renders_nothing() {
    let doc = fixture(
        r#"<script type="application/json" id="projects-data">{items: oops</script><div id="projects"></div>"#,
    );
    assert_eq!(render_projects(&doc).expect("no DOM failure"), 0);
    assert!(
        dom::query_document(&doc, "#projects article")
            .unwrap()
            .is_empty()
    );
}
