use gloo_timers::callback::Timeout;
use web_sys::Event;

use crate::config::SiteConfig;
use crate::dom::{self, Page};
use crate::error::SiteResult;
use crate::scroll;

/// Scrolls to the element named by the URL fragment on load and whenever
/// the fragment changes.
pub fn install(page: &Page, config: &SiteConfig) -> SiteResult<()> {
    navigate_to_hash(page, config);

    let page_clone = page.clone();
    let config = config.clone();
    dom::listen(&page.window, "hashchange", move |_: Event| {
        navigate_to_hash(&page_clone, &config);
    })
}

/// An empty fragment (or a bare `#`) leaves the scroll position alone.
pub fn should_navigate(hash: &str) -> bool {
    scroll::fragment_id(hash).is_some()
}

fn navigate_to_hash(page: &Page, config: &SiteConfig) {
    let hash = match page.window.location().hash() {
        Ok(hash) => hash,
        Err(e) => {
            log::warn!("could not read location hash: {:?}", e);
            return;
        }
    };
    if !should_navigate(&hash) {
        return;
    }

    // Give layout a moment to settle before measuring
    let page = page.clone();
    let config_clone = config.clone();
    Timeout::new(config.hash_settle_ms, move || {
        match scroll::find_target(&page, &hash) {
            Some(target) => scroll::scroll_to_element(&page, &config_clone, &target),
            None => log::debug!("no element for fragment {}", hash),
        }
    })
    .forget();
}
