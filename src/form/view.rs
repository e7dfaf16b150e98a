use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use super::FormData;

const ERROR_CLASS: &str = "form-error";
const ERROR_STYLE: &str = "background-color: #FED7D7; color: #C53030; padding: 12px 16px; \
                           border-radius: 4px; margin-bottom: 16px; font-size: 14px;";
const LOADING_LABEL: &str = r#"
    <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" class="spin">
        <circle cx="12" cy="12" r="10"/>
    </svg>
    Sender...
"#;

/// The DOM side effects of the contact form state machine.
pub trait FormView {
    fn show_error(&self, message: &str);
    fn enter_loading(&self);
    fn restore_button(&self);
    fn show_success(&self);
}

pub struct DomFormView {
    form: HtmlFormElement,
    success: Option<HtmlElement>,
    dismiss_ms: u32,
    original_label: RefCell<Option<String>>,
    dismiss_timer: RefCell<Option<Timeout>>,
}

impl DomFormView {
    pub fn new(form: HtmlFormElement, success: Option<HtmlElement>, dismiss_ms: u32) -> Self {
        Self {
            form,
            success,
            dismiss_ms,
            original_label: RefCell::new(None),
            dismiss_timer: RefCell::new(None),
        }
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        self.form
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    }

    fn error_element(&self) -> Option<Element> {
        if let Ok(Some(existing)) = self.form.query_selector(&format!(".{}", ERROR_CLASS)) {
            return Some(existing);
        }
        let document = self.form.owner_document()?;
        let el = document.create_element("div").ok()?;
        el.set_class_name(ERROR_CLASS);
        if let Err(e) = el.set_attribute("style", ERROR_STYLE) {
            log::warn!("failed to style form error: {:?}", e);
        }
        let first = self.form.first_child();
        if let Err(e) = self.form.insert_before(&el, first.as_ref()) {
            log::warn!("failed to insert form error: {:?}", e);
            return None;
        }
        Some(el)
    }
}

fn scroll_into_center(el: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

impl FormView for DomFormView {
    fn show_error(&self, message: &str) {
        let Some(el) = self.error_element() else { return };
        el.set_text_content(Some(message));
        scroll_into_center(&el);

        // A newer error restarts the countdown; dropping the old timer cancels it
        let timer = Timeout::new(self.dismiss_ms, move || el.remove());
        self.dismiss_timer.replace(Some(timer));
    }

    fn enter_loading(&self) {
        let Some(button) = self.submit_button() else { return };
        self.original_label.replace(Some(button.inner_html()));
        button.set_disabled(true);
        button.set_inner_html(LOADING_LABEL);
    }

    fn restore_button(&self) {
        let Some(button) = self.submit_button() else { return };
        button.set_disabled(false);
        if let Some(label) = self.original_label.borrow_mut().take() {
            button.set_inner_html(&label);
        }
    }

    fn show_success(&self) {
        if let Err(e) = self.form.style().set_property("display", "none") {
            log::warn!("failed to hide contact form: {:?}", e);
        }
        let Some(success) = &self.success else {
            log::warn!("contact form sent but page has no #formSuccess");
            return;
        };
        if let Err(e) = success.class_list().add_1("show") {
            log::warn!("failed to show success panel: {:?}", e);
        }
        scroll_into_center(success);
    }
}

/// Text value of the named control, trimmed. Missing controls read as "".
fn field_value(form: &HtmlFormElement, name: &str) -> String {
    let Ok(Some(el)) = form.query_selector(&format!("[name=\"{}\"]", name)) else {
        return String::new();
    };
    let value = if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    };
    value.trim().to_string()
}

fn checkbox_checked(form: &HtmlFormElement, name: &str) -> bool {
    form.query_selector(&format!("input[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false)
}

/// Captures the current form contents.
pub fn read_form(form: &HtmlFormElement) -> FormData {
    let mut data = FormData::new(
        &field_value(form, "name"),
        &field_value(form, "email"),
        &field_value(form, "phone"),
        &field_value(form, "description"),
    );
    data.address = field_value(form, "address");
    data.project_type = field_value(form, "projectType");
    data.timing = field_value(form, "timing");
    data.site_visit = checkbox_checked(form, "siteVisit");
    data
}
