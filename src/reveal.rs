use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::config::SiteConfig;
use crate::dom::{self, Page};
use crate::error::SiteResult;
use crate::observer::{self, ObserveOptions, ObserverSupport};

pub const REVEAL_SELECTOR: &str = ".service-card, .why-us-item, .value-card, .project-card";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Hidden,
    Revealed,
}

/// Inline style properties applied for a reveal phase. `None` leaves the
/// property untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: Option<&'static str>,
    pub transition: Option<&'static str>,
}

impl RevealPhase {
    /// Revealed is final; only a visible element moves out of Hidden.
    pub fn advance(self, intersecting: bool) -> Self {
        match self {
            RevealPhase::Revealed => RevealPhase::Revealed,
            RevealPhase::Hidden if intersecting => RevealPhase::Revealed,
            RevealPhase::Hidden => RevealPhase::Hidden,
        }
    }

    pub fn style(self) -> RevealStyle {
        match self {
            RevealPhase::Hidden => RevealStyle {
                opacity: "0",
                transform: Some("translateY(20px)"),
                transition: Some("opacity 0.5s ease, transform 0.5s ease"),
            },
            RevealPhase::Revealed => RevealStyle {
                opacity: "1",
                transform: Some("translateY(0)"),
                transition: None,
            },
        }
    }
}

/// Style used when the browser cannot observe visibility: show at once.
pub fn fallback_style() -> RevealStyle {
    RevealStyle {
        opacity: "1",
        transform: None,
        transition: None,
    }
}

/// Style applied to every element at startup, depending on whether the
/// observer could be built.
pub fn setup_style(observer_ready: bool) -> RevealStyle {
    if observer_ready {
        RevealPhase::Hidden.style()
    } else {
        fallback_style()
    }
}

fn apply(element: &Element, style: RevealStyle) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else { return };
    let css = element.style();
    let mut result = css.set_property("opacity", style.opacity);
    if let Some(transform) = style.transform {
        result = result.and(css.set_property("transform", transform));
    }
    if let Some(transition) = style.transition {
        result = result.and(css.set_property("transition", transition));
    }
    if let Err(e) = result {
        log::warn!("failed to style reveal element: {:?}", e);
    }
}

pub fn install(page: &Page, config: &SiteConfig, support: ObserverSupport) -> SiteResult<()> {
    let elements = dom::query_all(&page.document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        return Ok(());
    }

    if support == ObserverSupport::Unavailable {
        log::info!("IntersectionObserver unavailable, showing {} elements", elements.len());
        for element in &elements {
            apply(element, fallback_style());
        }
        return Ok(());
    }

    let options = ObserveOptions {
        threshold: Some(config.reveal_threshold),
        root_margin: Some(config.reveal_root_margin),
    };
    let created = observer::one_shot_observer(&options, |entry| {
        let phase = RevealPhase::Hidden.advance(entry.is_intersecting());
        if phase == RevealPhase::Revealed {
            apply(&entry.target(), phase.style());
        }
        phase == RevealPhase::Revealed
    });

    // Elements are only hidden once something is there to reveal them again
    let style = setup_style(created.is_ok());
    for element in &elements {
        apply(element, style);
    }
    let observer = created?;
    for element in &elements {
        observer.observe(element);
    }
    log::debug!("observing {} reveal elements", elements.len());
    Ok(())
}
