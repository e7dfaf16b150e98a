//! Startup DOM lookups and the small helpers every feature uses to listen
//! for events and walk node lists.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, HtmlFormElement,
    Window,
};

use crate::error::{SiteError, SiteResult};

/// Elements looked up once at startup and shared by the feature handlers.
/// Everything except the window and document is optional: sub-pages
/// without a contact form simply skip that feature.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub header: Option<HtmlElement>,
    pub menu_toggle: Option<HtmlElement>,
    pub nav_links: Option<HtmlElement>,
    pub contact_form: Option<HtmlFormElement>,
    pub form_success: Option<HtmlElement>,
}

impl Page {
    pub fn lookup() -> SiteResult<Self> {
        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let document = window.document().ok_or(SiteError::NoDocument)?;

        let page = Page {
            header: html_by_id(&document, "header"),
            menu_toggle: html_by_id(&document, "mobileMenuToggle"),
            nav_links: html_by_id(&document, "navLinks"),
            contact_form: document
                .get_element_by_id("contactForm")
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok()),
            form_success: html_by_id(&document, "formSuccess"),
            window,
            document,
        };

        log::debug!(
            "page lookup: header={} toggle={} nav={} form={} success={}",
            page.header.is_some(),
            page.menu_toggle.is_some(),
            page.nav_links.is_some(),
            page.contact_form.is_some(),
            page.form_success.is_some(),
        );
        Ok(page)
    }

    /// Current header height, or 0 when the page has no header.
    pub fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map(|h| h.offset_height() as f64)
            .unwrap_or(0.0)
    }

    pub fn body(&self) -> SiteResult<HtmlElement> {
        self.document.body().ok_or(SiteError::MissingElement("body"))
    }
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> SiteResult<Vec<Element>> {
    let list = root.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            elements.push(el);
        }
    }
    Ok(elements)
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> SiteResult<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::wrap(Box::new(move |e: web_sys::Event| {
        handler(e.unchecked_into::<E>());
    }) as Box<dyn FnMut(web_sys::Event)>);

    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Same as [`listen`], but marks the listener passive so scrolling is never
/// held up waiting on it.
pub fn listen_passive<F>(target: &EventTarget, event: &str, mut handler: F) -> SiteResult<()>
where
    F: FnMut() + 'static,
{
    let callback = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

/// The element an event was dispatched to, if it is an element at all.
pub fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}
