use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, MouseEvent};

use crate::dom::{self, Page};
use crate::error::SiteResult;

const PHONE_SELECTOR: &str = "a[href^=\"tel:\"]";

/// Number dialled by a `tel:` link, without the scheme.
pub fn phone_number(href: &str) -> Option<&str> {
    href.strip_prefix("tel:").map(str::trim).filter(|n| !n.is_empty())
}

/// Logs clicks on phone links. This is where an analytics hook would go.
pub fn install(page: &Page) -> SiteResult<()> {
    let links = dom::query_all(&page.document, PHONE_SELECTOR)?;
    for link in links {
        let Ok(link) = link.dyn_into::<HtmlAnchorElement>() else { continue };
        let href = link.href();
        dom::listen(&link, "click", move |_: MouseEvent| {
            log::info!(
                "Phone link clicked: {} ({})",
                href,
                phone_number(&href).unwrap_or("unknown")
            );
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_number_strips_scheme() {
        assert_eq!(phone_number("tel:+4791234567"), Some("+4791234567"));
    }

    #[test]
    fn test_non_phone_links() {
        assert_eq!(phone_number("mailto:post@example.com"), None);
        assert_eq!(phone_number("tel:"), None);
    }
}
