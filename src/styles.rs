use crate::dom::Page;
use crate::error::{SiteError, SiteResult};

pub const SPINNER_CSS: &str = r#"
    @keyframes spin {
        from { transform: rotate(0deg); }
        to { transform: rotate(360deg); }
    }
    .spin {
        animation: spin 1s linear infinite;
    }
"#;

/// Adds the `spin` animation used by the form's loading label.
pub fn inject_spinner(page: &Page) -> SiteResult<()> {
    let head = page.document.head().ok_or(SiteError::MissingElement("head"))?;
    let style = page.document.create_element("style")?;
    style.set_text_content(Some(SPINNER_CSS));
    head.append_child(&style)?;
    Ok(())
}
