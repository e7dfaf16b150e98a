//! Mobile navigation panel and in-page anchor scrolling.

use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Event, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::config::SiteConfig;
use crate::dom::{self, Page};
use crate::error::SiteResult;
use crate::scroll;

const ACTIVE_CLASS: &str = "active";
const NAV_LINK_CLASS: &str = "nav-link";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
}

/// What the DOM should look like for a given menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub toggle_active: bool,
    pub panel_active: bool,
    /// Value for `body.style.overflow`; empty restores the stylesheet value.
    pub body_overflow: &'static str,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn view(self) -> MenuView {
        MenuView {
            toggle_active: self.open,
            panel_active: self.open,
            body_overflow: if self.open { "hidden" } else { "" },
        }
    }
}

pub fn is_cancel_key(key: &str) -> bool {
    key == "Escape"
}

/// Owns the menu state and applies it to the toggle, panel and body.
#[derive(Clone)]
pub struct NavController {
    page: Page,
    state: Rc<Cell<MenuState>>,
}

impl NavController {
    pub fn new(page: &Page) -> Self {
        Self {
            page: page.clone(),
            state: Rc::new(Cell::new(MenuState::default())),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.get().open
    }

    pub fn toggle(&self) {
        self.set(self.state.get().toggled());
    }

    pub fn close(&self) {
        self.set(self.state.get().closed());
    }

    fn set(&self, next: MenuState) {
        self.state.set(next);
        let view = next.view();

        set_active(self.page.menu_toggle.as_ref(), view.toggle_active);
        set_active(self.page.nav_links.as_ref(), view.panel_active);
        match self.page.body() {
            Ok(body) => {
                if let Err(e) = body.style().set_property("overflow", view.body_overflow) {
                    log::warn!("failed to set body overflow: {:?}", e);
                }
            }
            Err(e) => log::warn!("{}", e),
        }
    }

    /// True when a click target lies inside neither the panel nor its toggle.
    fn is_outside(&self, target: &Node) -> bool {
        let inside = |el: &Option<HtmlElement>| {
            el.as_ref()
                .map(|el| el.contains(Some(target)))
                .unwrap_or(false)
        };
        !inside(&self.page.nav_links) && !inside(&self.page.menu_toggle)
    }
}

fn set_active(element: Option<&HtmlElement>, active: bool) {
    let Some(element) = element else { return };
    let classes = element.class_list();
    let result = if active {
        classes.add_1(ACTIVE_CLASS)
    } else {
        classes.remove_1(ACTIVE_CLASS)
    };
    if let Err(e) = result {
        log::warn!("failed to toggle .{}: {:?}", ACTIVE_CLASS, e);
    }
}

pub fn install(page: &Page, config: &SiteConfig) -> SiteResult<()> {
    let nav = NavController::new(page);

    if let Some(toggle) = &page.menu_toggle {
        let nav = nav.clone();
        dom::listen(toggle, "click", move |_: MouseEvent| nav.toggle())?;
    }

    // Close mobile menu when clicking nav links
    if let Some(panel) = &page.nav_links {
        let nav = nav.clone();
        dom::listen(panel, "click", move |e: MouseEvent| {
            let on_link = dom::event_element(&e)
                .map(|el| el.class_list().contains(NAV_LINK_CLASS))
                .unwrap_or(false);
            if on_link {
                nav.close();
            }
        })?;
    }

    {
        let nav = nav.clone();
        dom::listen(&page.document, "click", move |e: MouseEvent| {
            if !nav.is_open() {
                return;
            }
            if let Some(target) = dom::event_element(&e) {
                if nav.is_outside(&target) {
                    nav.close();
                }
            }
        })?;
    }

    {
        let nav = nav.clone();
        let document = page.document.clone();
        let page = page.clone();
        let config = config.clone();
        dom::listen(&document, "click", move |e: Event| {
            handle_anchor_click(&nav, &page, &config, &e);
        })?;
    }

    {
        let nav = nav.clone();
        dom::listen(&page.document, "keydown", move |e: KeyboardEvent| {
            if is_cancel_key(&e.key()) {
                nav.close();
            }
        })?;
    }

    Ok(())
}

fn handle_anchor_click(nav: &NavController, page: &Page, config: &SiteConfig, event: &Event) {
    let Some(anchor) =
        dom::event_element(event).and_then(|el| el.closest(ANCHOR_SELECTOR).ok().flatten())
    else {
        return;
    };
    let Some(href) = anchor.get_attribute("href") else { return };
    let Some(target) =
        scroll::anchor_target(&href).and_then(|id| page.document.get_element_by_id(&id))
    else {
        return;
    };

    event.prevent_default();
    scroll::scroll_to_element(page, config, &target);
    nav.close();
}
