use std::borrow::Cow;

use web_sys::{Element, ScrollBehavior, ScrollToOptions};

use crate::config::SiteConfig;
use crate::dom::Page;

/// Element id named by a URL fragment such as `#contact`.
///
/// Returns `None` for an empty fragment or the bare `#` anchor. The id is
/// percent-decoded so `#om%20oss` finds `id="om oss"`.
pub fn fragment_id(fragment: &str) -> Option<String> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    if raw.is_empty() {
        return None;
    }
    let id = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
    Some(id.into_owned())
}

/// Fragment id of an in-page link. Anything that is not a `#...` href is
/// left to the browser.
pub fn anchor_target(href: &str) -> Option<String> {
    if !href.starts_with('#') {
        return None;
    }
    fragment_id(href)
}

/// Document-relative scroll position that puts an element just below the
/// fixed header.
pub fn scroll_target_top(element_top: f64, scroll_y: f64, header_height: f64, padding: f64) -> f64 {
    element_top + scroll_y - header_height - padding
}

/// Looks up the element for `fragment` on the page.
pub fn find_target(page: &Page, fragment: &str) -> Option<Element> {
    let id = fragment_id(fragment)?;
    page.document.get_element_by_id(&id)
}

/// Smooth-scrolls the window so `target` sits below the header.
pub fn scroll_to_element(page: &Page, config: &SiteConfig, target: &Element) {
    let element_top = target.get_bounding_client_rect().top();
    let scroll_y = page.window.scroll_y().unwrap_or(0.0);
    let top = scroll_target_top(
        element_top,
        scroll_y,
        page.header_height(),
        config.scroll_padding,
    );

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    page.window.scroll_to_with_scroll_to_options(&options);
    log::debug!("scrolling to #{} at {}", target.id(), top);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_id_strips_hash() {
        assert_eq!(fragment_id("#contact"), Some("contact".to_string()));
        assert_eq!(fragment_id("contact"), Some("contact".to_string()));
    }

    #[test]
    fn test_empty_fragments_are_ignored() {
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("#"), None);
    }

    #[test]
    fn test_fragment_is_percent_decoded() {
        assert_eq!(fragment_id("#om%20oss"), Some("om oss".to_string()));
        assert_eq!(fragment_id("#gr%C3%B8ft"), Some("grøft".to_string()));
    }

    #[test]
    fn test_anchor_target_only_matches_in_page_links() {
        assert_eq!(anchor_target("#services"), Some("services".to_string()));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/tjenester#graving"), None);
        assert_eq!(anchor_target("tel:+4712345678"), None);
    }

    #[test]
    fn test_scroll_target_subtracts_header_and_padding() {
        // #contact sits 900px below the viewport top, page already scrolled 300px
        let top = scroll_target_top(900.0, 300.0, 80.0, 20.0);
        assert_eq!(top, 1100.0);
    }

    #[test]
    fn test_scroll_target_without_header() {
        assert_eq!(scroll_target_top(500.0, 0.0, 0.0, 20.0), 480.0);
    }
}
