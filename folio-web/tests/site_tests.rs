#![cfg(target_arch = "wasm32")]

use folio_core::{MotionPreference, SiteConfig};
use folio_web::{Site, dom};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Element, HtmlElement, HtmlImageElement, KeyboardEvent, KeyboardEventInit, MouseEvent,
    MouseEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<header>
  <button id="navToggle" aria-expanded="false" aria-controls="primaryNav">Menu</button>
  <nav id="primaryNav" class="primary-nav">
    <a href="#about">About</a>
    <a href="#portfolio">Work</a>
    <a href="#missing">Nowhere</a>
    <a href="/contact">Contact</a>
  </nav>
  <p>&copy; <span id="year"></span></p>
</header>
<section id="hero"><h1 class="hero-title">Studio</h1><p class="hero-lead">Painting and print.</p></section>
<section id="about"><h2>About</h2><p>One.</p><p>Two.</p><figure class="about-media"></figure></section>
<section id="portfolio">
  <div id="gallery">
    <div class="gallery-item" tabindex="0" data-large="/large/harbor.jpg">
      <img src="/thumb/harbor.jpg" alt="Harbor">
      <span class="caption-title">Harbor</span><span class="caption-meta">Oil</span>
    </div>
    <div class="gallery-item" tabindex="0">
      <img src="/thumb/field.jpg" alt="Field">
      <span class="caption-title">Field</span>
    </div>
    <div class="gallery-item" tabindex="0">
      <img src="/thumb/city.jpg" alt="City">
      <span class="caption-title">City</span><span class="caption-meta"></span>
    </div>
  </div>
</section>
<div id="lightbox" aria-hidden="true">
  <button id="lightboxClose">Close</button>
  <button id="lightboxPrev">Prev</button>
  <img id="lightboxImg" src="" alt="">
  <p id="lightboxCaption"></p>
  <button id="lightboxNext">Next</button>
</div>
"##;

fn render(html: &str) {
    let doc = dom::document().expect("document");
    let body = doc.body().expect("document body");
    body.set_inner_html(html);
    let _ = body.style().remove_property("overflow");
}

fn mount(motion: MotionPreference) -> Site {
    render(PAGE);
    Site::mount_with_motion(&SiteConfig::default(), motion)
}

fn by_id<T: JsCast>(id: &str) -> T {
    dom::element_by_id::<T>(id).unwrap_or_else(|| panic!("#{id} present"))
}

fn thumbnails() -> Vec<HtmlElement> {
    let gallery: Element = by_id("gallery");
    dom::query_all_html(&gallery, ".gallery-item")
}

fn press(target: &web_sys::EventTarget, key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
        .expect("keyboard event");
    target.dispatch_event(&event).expect("dispatch keydown");
}

fn press_on_document(key: &str) {
    press(&dom::document().expect("document"), key);
}

/// Parse a serialized CSS time (`180ms` or `0.18s`) into milliseconds.
fn delay_ms(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some(ms) = value.strip_suffix("ms") {
        return ms.parse().ok();
    }
    value
        .strip_suffix('s')
        .and_then(|s| s.parse::<f64>().ok())
        .map(|s| (s * 1000.0).round())
}

fn active_element() -> Option<Element> {
    dom::document().and_then(|doc| doc.active_element())
}

#[wasm_bindgen_test]
fn nav_toggle_round_trips() {
    let site = mount(MotionPreference::Full);
    let toggle: HtmlElement = by_id("navToggle");
    let panel: Element = by_id("primaryNav");

    toggle.click();
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert!(panel.class_list().contains("is-active"));
    assert_eq!(site.snapshot().menu_expanded, Some(true));

    toggle.click();
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
    assert!(!panel.class_list().contains("is-active"));
    assert_eq!(site.snapshot().menu_expanded, Some(false));
}

#[wasm_bindgen_test]
fn year_placeholder_is_filled() {
    let _site = mount(MotionPreference::Full);
    let year: Element = by_id("year");
    let expected = js_sys::Date::new_0().get_full_year().to_string();
    assert_eq!(year.text_content().unwrap_or_default(), expected);
}

#[wasm_bindgen_test]
fn thumbnail_click_opens_populated_overlay() {
    let site = mount(MotionPreference::Full);
    thumbnails()[0].click();

    let overlay: Element = by_id("lightbox");
    let image: HtmlImageElement = by_id("lightboxImg");
    let caption: Element = by_id("lightboxCaption");
    assert_eq!(overlay.get_attribute("aria-hidden").as_deref(), Some("false"));
    assert!(image.src().ends_with("/large/harbor.jpg"));
    assert_eq!(image.alt(), "Harbor");
    assert_eq!(caption.text_content().as_deref(), Some("Harbor — Oil"));
    let body = dom::document().and_then(|d| d.body()).expect("body");
    assert_eq!(body.style().get_property_value("overflow").ok().as_deref(), Some("hidden"));
    assert_eq!(site.lightbox().and_then(|lb| lb.current()), Some(0));
}

#[wasm_bindgen_test]
fn captions_skip_empty_meta() {
    let site = mount(MotionPreference::Full);
    let lightbox = site.lightbox().expect("lightbox mounted");
    let caption: Element = by_id("lightboxCaption");

    assert!(lightbox.open(1));
    assert_eq!(caption.text_content().as_deref(), Some("Field"));
    assert!(lightbox.open(2));
    assert_eq!(caption.text_content().as_deref(), Some("City"));
    let image: HtmlImageElement = by_id("lightboxImg");
    assert!(image.src().ends_with("/thumb/city.jpg"));
    assert!(!lightbox.open(3));
    assert_eq!(lightbox.current(), Some(2));
}

#[wasm_bindgen_test]
fn arrow_keys_cycle_with_wrap() {
    let site = mount(MotionPreference::Full);
    let lightbox = site.lightbox().expect("lightbox mounted");
    lightbox.open(0);

    press_on_document("ArrowRight");
    assert_eq!(lightbox.current(), Some(1));
    press_on_document("ArrowRight");
    assert_eq!(lightbox.current(), Some(2));
    press_on_document("ArrowRight");
    assert_eq!(lightbox.current(), Some(0));
    press_on_document("ArrowLeft");
    assert_eq!(lightbox.current(), Some(2));
}

#[wasm_bindgen_test]
fn overlay_controls_step_and_close() {
    let site = mount(MotionPreference::Full);
    let lightbox = site.lightbox().expect("lightbox mounted");
    lightbox.open(0);

    by_id::<HtmlElement>("lightboxPrev").click();
    assert_eq!(lightbox.current(), Some(2));
    by_id::<HtmlElement>("lightboxNext").click();
    assert_eq!(lightbox.current(), Some(0));
    by_id::<HtmlElement>("lightboxClose").click();
    assert_eq!(lightbox.current(), None);
}

#[wasm_bindgen_test]
fn keys_are_inert_while_closed() {
    let site = mount(MotionPreference::Full);
    press_on_document("ArrowRight");
    press_on_document("Escape");
    assert_eq!(site.lightbox().and_then(|lb| lb.current()), None);
    let overlay: Element = by_id("lightbox");
    assert_eq!(overlay.get_attribute("aria-hidden").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn enter_opens_and_escape_returns_focus() {
    let site = mount(MotionPreference::Full);
    let thumbs = thumbnails();
    thumbs[1].focus().expect("focus thumbnail");
    press(&thumbs[1], "Enter");
    assert_eq!(site.lightbox().and_then(|lb| lb.current()), Some(1));

    press_on_document("Escape");
    let lightbox = site.lightbox().expect("lightbox mounted");
    assert_eq!(lightbox.current(), None);
    let body = dom::document().and_then(|d| d.body()).expect("body");
    assert_eq!(body.style().get_property_value("overflow").ok().as_deref(), Some(""));
    let focused = active_element().expect("something focused");
    let expected: &Element = &thumbs[1];
    assert_eq!(&focused, expected);
}

#[wasm_bindgen_test]
fn space_opens_but_other_keys_do_not() {
    let site = mount(MotionPreference::Full);
    let thumbs = thumbnails();
    press(&thumbs[2], "a");
    assert_eq!(site.lightbox().and_then(|lb| lb.current()), None);
    press(&thumbs[2], " ");
    assert_eq!(site.lightbox().and_then(|lb| lb.current()), Some(2));
}

#[wasm_bindgen_test]
fn only_backdrop_clicks_close() {
    let site = mount(MotionPreference::Full);
    let lightbox = site.lightbox().expect("lightbox mounted");
    lightbox.open(1);

    by_id::<HtmlElement>("lightboxImg").click();
    assert_eq!(lightbox.current(), Some(1));
    by_id::<HtmlElement>("lightbox").click();
    assert_eq!(lightbox.current(), None);
}

#[wasm_bindgen_test]
async fn focus_moves_to_close_control_after_open() {
    let site = mount(MotionPreference::Full);
    site.lightbox().expect("lightbox mounted").open(0);
    TimeoutFuture::new(150).await;
    let close: Element = by_id("lightboxClose");
    assert_eq!(active_element(), Some(close));
}

#[wasm_bindgen_test]
fn reduced_motion_reveals_everything_at_mount() {
    let site = mount(MotionPreference::Reduced);
    let snap = site.snapshot();
    assert!(snap.reduced_motion);
    assert!(snap.reveal_total > 0);
    assert!(snap.all_revealed());

    let root = dom::document()
        .and_then(|d| d.document_element())
        .expect("root");
    let selector = SiteConfig::default().reveal.element_selector;
    for section in dom::query_all(&root, "section") {
        for item in dom::query_all_html(&section, &selector) {
            assert!(item.class_list().contains("reveal--active"));
            assert!(!item.class_list().contains("reveal"));
            assert_eq!(
                item.style().get_property_value("transition-delay").ok().as_deref(),
                Some("")
            );
        }
    }
}

#[wasm_bindgen_test]
fn scroll_path_assigns_staggered_delays() {
    let _site = mount(MotionPreference::Full);
    let about: Element = by_id("about");
    let items = dom::query_all_html(&about, &SiteConfig::default().reveal.element_selector);
    assert!(items.len() >= 3);
    for (index, item) in items.iter().enumerate() {
        let classes = item.class_list();
        assert!(classes.contains("reveal") || classes.contains("reveal--active"));
        if !classes.contains("reveal--active") {
            let delay = item
                .style()
                .get_property_value("transition-delay")
                .ok()
                .and_then(|v| delay_ms(&v));
            assert_eq!(delay, Some(index as f64 * 90.0));
        }
    }
}

#[wasm_bindgen_test]
async fn nav_link_click_reveals_target_and_updates_hash() {
    let site = mount(MotionPreference::Full);
    let nav: Element = by_id("primaryNav");
    let link = dom::query_all_html(&nav, "a[href='#about']")
        .pop()
        .expect("about link");
    link.click();

    let hash = dom::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    assert_eq!(hash, "#about");

    TimeoutFuture::new(900).await;
    let about: Element = by_id("about");
    let reveal = site.reveal().expect("reveal mounted");
    for item in dom::query_all_html(&about, &SiteConfig::default().reveal.element_selector) {
        assert!(item.class_list().contains("reveal--active"));
        assert!(reveal.is_revealed(&item));
    }
}

#[wasm_bindgen_test]
fn links_without_targets_are_left_alone() {
    let _site = mount(MotionPreference::Full);
    let nav: Element = by_id("primaryNav");
    let link = dom::query_all_html(&nav, "a[href='#missing']")
        .pop()
        .expect("missing link");
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).expect("click event");
    let not_cancelled = link.dispatch_event(&event).expect("dispatch click");
    assert!(not_cancelled, "links to unknown ids keep their default action");
}

#[wasm_bindgen_test]
async fn revealed_elements_stay_revealed() {
    let site = mount(MotionPreference::Full);
    let about: Element = by_id("about");
    let reveal = site.reveal().expect("reveal mounted");
    reveal.reveal(&about);
    TimeoutFuture::new(600).await;
    let (revealed_before, _) = reveal.counts();
    reveal.reveal(&about);
    TimeoutFuture::new(100).await;
    let (revealed_after, _) = reveal.counts();
    assert!(revealed_after >= revealed_before);
    for item in dom::query_all_html(&about, &SiteConfig::default().reveal.element_selector) {
        assert!(item.class_list().contains("reveal--active"));
    }
}

fn set_hash(hash: &str) {
    let window = dom::window().expect("window");
    window.location().set_hash(hash).expect("set hash");
}

#[wasm_bindgen_test]
async fn hashchange_reveals_the_target_section() {
    set_hash("");
    TimeoutFuture::new(50).await;
    render(&format!(r#"<div style="height: 4000px"></div>{PAGE}"#));
    if let Some(window) = dom::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
    let site = Site::mount_with_motion(&SiteConfig::default(), MotionPreference::Full);
    let reveal = site.reveal().expect("reveal mounted");
    let about: Element = by_id("about");
    let items = dom::query_all_html(&about, &SiteConfig::default().reveal.element_selector);
    assert!(!items.is_empty());
    assert!(items.iter().all(|item| !reveal.is_revealed(item)));

    set_hash("#about");
    TimeoutFuture::new(700).await;
    for item in &items {
        assert!(item.class_list().contains("reveal--active"));
        assert!(reveal.is_revealed(item));
    }
}

#[wasm_bindgen_test]
async fn nested_targets_do_not_inflate_counts() {
    let site = mount(MotionPreference::Full);
    let reveal = site.reveal().expect("reveal mounted");
    let (_, total_before) = reveal.counts();

    reveal.reveal(&by_id::<Element>("gallery"));
    TimeoutFuture::new(600).await;
    let (revealed, total_after) = reveal.counts();
    assert_eq!(total_after, total_before);
    assert!(revealed <= total_after);

    let gallery: Element = by_id("gallery");
    for img in dom::query_all_html(&gallery, "img") {
        assert!(reveal.is_revealed(&img));
    }
}

#[wasm_bindgen_test]
fn missing_markup_leaves_features_unmounted() {
    render("<main><p>Plain page</p></main>");
    let site = Site::mount_with_motion(&SiteConfig::default(), MotionPreference::Full);
    assert!(site.nav().is_none());
    assert!(site.lightbox().is_none());
    let snap = site.snapshot();
    assert_eq!(snap.menu_expanded, None);
    assert_eq!(snap.gallery_len, 0);
    assert_eq!(snap.lightbox_index, None);
}

#[wasm_bindgen_test]
fn empty_gallery_ignores_navigation() {
    render(
        r#"<div id="gallery"></div>
        <div id="lightbox" aria-hidden="true"><img id="lightboxImg"><p id="lightboxCaption"></p></div>"#,
    );
    let site = Site::mount_with_motion(&SiteConfig::default(), MotionPreference::Full);
    let lightbox = site.lightbox().expect("lightbox mounted without items");
    assert!(lightbox.is_empty());
    assert!(!lightbox.step(1));
    assert!(!lightbox.step(-1));
    assert_eq!(lightbox.current(), None);
}
