use crate::config::SiteConfig;
use crate::dom::{self, Page};
use crate::error::SiteResult;

const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    pub scrolled: bool,
}

impl HeaderState {
    pub fn at_offset(scroll_y: f64, threshold: f64) -> Self {
        Self {
            scrolled: scroll_y > threshold,
        }
    }
}

/// Keeps the header's `scrolled` class in sync with the scroll offset.
pub fn install(page: &Page, config: &SiteConfig) -> SiteResult<()> {
    let Some(header) = page.header.clone() else {
        log::debug!("no header on page, skipping scroll watcher");
        return Ok(());
    };
    let window = page.window.clone();
    let threshold = config.scroll_threshold;

    let update = move || {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let state = HeaderState::at_offset(scroll_y, threshold);
        let classes = header.class_list();
        let result = if state.scrolled {
            classes.add_1(SCROLLED_CLASS)
        } else {
            classes.remove_1(SCROLLED_CLASS)
        };
        if let Err(e) = result {
            log::warn!("failed to update header class: {:?}", e);
        }
    };

    // Initial check
    update();
    dom::listen_passive(&page.window, "scroll", update)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_scrolled_up_to_threshold() {
        for offset in [0.0, 1.0, 25.5, 49.9, 50.0] {
            assert!(!HeaderState::at_offset(offset, 50.0).scrolled, "offset {offset}");
        }
    }

    #[test]
    fn test_scrolled_past_threshold() {
        for offset in [50.1, 51.0, 600.0, 10_000.0] {
            assert!(HeaderState::at_offset(offset, 50.0).scrolled, "offset {offset}");
        }
    }

    #[test]
    fn test_threshold_is_monotonic() {
        let mut seen_scrolled = false;
        for offset in 0..200 {
            let scrolled = HeaderState::at_offset(offset as f64, 50.0).scrolled;
            if seen_scrolled {
                assert!(scrolled);
            }
            seen_scrolled |= scrolled;
        }
        assert!(seen_scrolled);
    }
}
