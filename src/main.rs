use log::info;
use web_sys::Event;

mod config;
mod dom;
mod error;
mod form;
mod hash;
mod header;
mod lazy_images;
mod nav;
mod observer;
mod phone;
mod reveal;
mod scroll;
mod styles;

use config::SiteConfig;
use dom::Page;
use error::SiteResult;
use observer::ObserverSupport;

/// Logs a feature that failed to attach; the rest of the page keeps working.
fn report(feature: &str, result: SiteResult<()>) {
    if let Err(e) = result {
        log::error!("{} disabled: {}", feature, e);
    }
}

fn init(config: &SiteConfig) {
    let page = match Page::lookup() {
        Ok(page) => page,
        Err(e) => {
            log::error!("cannot start page behaviors: {}", e);
            return;
        }
    };

    report("spinner styles", styles::inject_spinner(&page));
    report("header scroll", header::install(&page, config));
    report("navigation", nav::install(&page, config));
    report("contact form", form::install(&page, config));
    report("hash navigation", hash::install(&page, config));

    let support = ObserverSupport::detect(&page.window);
    info!("intersection observer support: {:?}", support);
    report("reveal animations", reveal::install(&page, config, support));
    report("lazy images", lazy_images::install(&page, config, support));

    report("phone links", phone::install(&page));
    info!("page behaviors ready");
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let config = SiteConfig::default();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("no document, nothing to do");
        return;
    };

    // Run when DOM is ready
    if document.ready_state() == "loading" {
        let result = dom::listen(&document, "DOMContentLoaded", move |_: Event| init(&config));
        report("startup", result);
    } else {
        init(&config);
    }
}
