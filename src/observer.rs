//! Shared plumbing for the one-shot intersection observers used by the
//! reveal animator and the lazy image loader.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::error::SiteResult;

/// Whether the browser can tell us when elements scroll into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverSupport {
    Native,
    Unavailable,
}

impl ObserverSupport {
    pub fn detect(window: &Window) -> Self {
        let present =
            Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        Self::from_presence(present)
    }

    pub fn from_presence(present: bool) -> Self {
        if present {
            ObserverSupport::Native
        } else {
            ObserverSupport::Unavailable
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObserveOptions {
    pub threshold: Option<f64>,
    pub root_margin: Option<&'static str>,
}

/// Builds an observer that calls `on_entry` for each reported entry.
/// When it returns `true` the element is done and is unobserved, so it is
/// never reported again. Nothing is observed yet; callers only touch their
/// elements once the observer exists.
pub fn one_shot_observer<F>(
    options: &ObserveOptions,
    mut on_entry: F,
) -> SiteResult<IntersectionObserver>
where
    F: FnMut(&IntersectionObserverEntry) -> bool + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if on_entry(&entry) {
                observer.unobserve(&entry.target());
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    if let Some(threshold) = options.threshold {
        init.set_threshold(&JsValue::from_f64(threshold));
    }
    if let Some(margin) = options.root_margin {
        init.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_from_presence() {
        assert_eq!(ObserverSupport::from_presence(true), ObserverSupport::Native);
        assert_eq!(ObserverSupport::from_presence(false), ObserverSupport::Unavailable);
    }
}
