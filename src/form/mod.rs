//! Contact form: reading, validating and submitting a request.

mod data;
mod state;
mod transport;
mod view;

use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use crate::config::SiteConfig;
use crate::dom::{self, Page};
use crate::error::SiteResult;

pub use data::FormData;
pub use state::ContactForm;
pub use transport::{SimulatedTransport, SubmissionTransport, SubmitError};
pub use view::{DomFormView, FormView};

/// Problems reported inline in the form. The message is what the visitor
/// sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Vennligst fyll ut alle obligatoriske felt.")]
    MissingRequired,
    #[error("Vennligst oppgi en gyldig e-postadresse.")]
    InvalidEmail,
    #[error("Det oppstod en feil. Vennligst prøv igjen eller ring oss direkte.")]
    Submission(#[from] SubmitError),
}

pub fn install(page: &Page, config: &SiteConfig) -> SiteResult<()> {
    let Some(form) = page.contact_form.clone() else {
        log::debug!("no contact form on page");
        return Ok(());
    };

    let view = DomFormView::new(form.clone(), page.form_success.clone(), config.error_dismiss_ms);
    let transport = SimulatedTransport::new(config.submit_delay_ms);
    let contact = Rc::new(ContactForm::new(transport, view));

    let reader = form.clone();
    dom::listen(&form, "submit", move |e: Event| {
        e.prevent_default();
        let data = view::read_form(&reader);
        let contact = contact.clone();
        spawn_local(async move {
            let state = contact.submit(data).await;
            log::debug!("contact form settled in {:?}", state);
        });
    })
}
