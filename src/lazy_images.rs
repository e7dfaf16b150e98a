use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};

use crate::config::SiteConfig;
use crate::dom::{self, Page};
use crate::error::SiteResult;
use crate::observer::{self, ObserveOptions, ObserverSupport};

const DEFERRED_ATTR: &str = "data-src";
const DEFERRED_SELECTOR: &str = "img[data-src]";

/// The real source to assign, if the image still has one deferred.
pub fn deferred_source(data_src: Option<String>) -> Option<String> {
    data_src.filter(|src| !src.trim().is_empty())
}

/// What to do with a deferred image for one observer report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadAction {
    /// Not near the viewport yet; keep observing.
    Wait,
    Load { remove_marker: bool },
}

impl LoadAction {
    pub fn on_entry(intersecting: bool) -> Self {
        if intersecting {
            LoadAction::Load { remove_marker: true }
        } else {
            LoadAction::Wait
        }
    }

    /// Without an observer every image loads at once and keeps its marker.
    pub fn fallback() -> Self {
        LoadAction::Load {
            remove_marker: false,
        }
    }

    /// Whether the image can be unobserved after this action.
    pub fn is_done(self) -> bool {
        matches!(self, LoadAction::Load { .. })
    }
}

fn load(element: &Element, action: LoadAction) {
    let LoadAction::Load { remove_marker } = action else { return };
    let Some(img) = element.dyn_ref::<HtmlImageElement>() else { return };
    let Some(src) = deferred_source(img.get_attribute(DEFERRED_ATTR)) else { return };

    img.set_src(&src);
    if remove_marker {
        if let Err(e) = img.remove_attribute(DEFERRED_ATTR) {
            log::warn!("failed to clear {} on {}: {:?}", DEFERRED_ATTR, src, e);
        }
    }
}

fn load_all(images: &[Element]) {
    for img in images {
        load(img, LoadAction::fallback());
    }
}

pub fn install(page: &Page, config: &SiteConfig, support: ObserverSupport) -> SiteResult<()> {
    let images = dom::query_all(&page.document, DEFERRED_SELECTOR)?;
    if images.is_empty() {
        return Ok(());
    }

    if support == ObserverSupport::Unavailable {
        load_all(&images);
        return Ok(());
    }

    let options = ObserveOptions {
        threshold: None,
        root_margin: Some(config.lazy_root_margin),
    };
    let observer = match observer::one_shot_observer(&options, |entry| {
        let action = LoadAction::on_entry(entry.is_intersecting());
        load(&entry.target(), action);
        action.is_done()
    }) {
        Ok(observer) => observer,
        Err(e) => {
            load_all(&images);
            return Err(e);
        }
    };
    for img in &images {
        observer.observe(img);
    }
    log::debug!("deferring {} images", images.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_source_present() {
        assert_eq!(
            deferred_source(Some("/img/gravemaskin.jpg".to_string())),
            Some("/img/gravemaskin.jpg".to_string())
        );
    }

    #[test]
    fn test_far_image_waits_and_stays_observed() {
        let action = LoadAction::on_entry(false);
        assert_eq!(action, LoadAction::Wait);
        assert!(!action.is_done());
    }

    #[test]
    fn test_near_image_loads_and_clears_marker() {
        let action = LoadAction::on_entry(true);
        assert_eq!(action, LoadAction::Load { remove_marker: true });
        assert!(action.is_done());
    }

    #[test]
    fn test_fallback_loads_but_keeps_marker() {
        let action = LoadAction::fallback();
        assert_eq!(action, LoadAction::Load { remove_marker: false });
        assert!(action.is_done());
    }

    #[test]
    fn test_missing_or_blank_source_is_skipped() {
        assert_eq!(deferred_source(None), None);
        assert_eq!(deferred_source(Some("  ".to_string())), None);
    }
}
