/// Copy text to the clipboard, falling back to the legacy copy command

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, HtmlDocument, HtmlTextAreaElement};

use crate::error::DomError;

/// How long the "Copied!" confirmation stays up
pub const TOAST_DURATION_MS: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    ClipboardApi,
    Fallback,
}

/// Copy `text`, trying the async clipboard API first. The caller shows the same
/// confirmation either way.
pub async fn copy_text(text: &str) -> CopyMethod {
    match write_with_clipboard_api(text).await {
        Ok(()) => CopyMethod::ClipboardApi,
        Err(e) => {
            log::warn!("Clipboard API failed, using fallback: {}", e);
            if let Err(e) = copy_with_text_area(text) {
                log::error!("Fallback: unable to copy: {}", e);
            }
            CopyMethod::Fallback
        }
    }
}

async fn write_with_clipboard_api(text: &str) -> Result<(), DomError> {
    let navigator = web_sys::window().ok_or(DomError::NoWindow)?.navigator();

    // Missing on insecure origins and some embedded frames
    let clipboard: Clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?
        .dyn_into()
        .map_err(|_| DomError::Unavailable("navigator.clipboard"))?;

    JsFuture::from(clipboard.write_text(text)).await?;
    Ok(())
}

/// Legacy copy through a temporary textarea. The textarea is removed again
/// whether or not the copy worked.
pub fn copy_with_text_area(text: &str) -> Result<(), DomError> {
    let document = web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::Unavailable("document"))?;
    let body = document.body().ok_or(DomError::NoBody)?;

    let area: HtmlTextAreaElement = document
        .create_element("textarea")?
        .dyn_into()
        .map_err(|_| DomError::Unavailable("textarea"))?;
    area.set_value(text);

    // Pinned in place and invisible so the page does not scroll
    let style = area.style();
    for (property, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "2em"),
        ("height", "2em"),
        ("padding", "0"),
        ("border", "none"),
        ("outline", "none"),
        ("box-shadow", "none"),
        ("background", "transparent"),
    ] {
        style.set_property(property, value)?;
    }

    body.append_child(&area)?;
    let copied = select_and_copy(&document, &area);
    body.remove_child(&area)?;

    match copied? {
        true => {
            log::debug!("Fallback copy was successful");
            Ok(())
        }
        false => Err(DomError::Unavailable("copy command")),
    }
}

fn select_and_copy(
    document: &web_sys::Document,
    area: &HtmlTextAreaElement,
) -> Result<bool, DomError> {
    area.focus()?;
    area.select();
    let document = document
        .dyn_ref::<HtmlDocument>()
        .ok_or(DomError::Unavailable("execCommand"))?;
    Ok(document.exec_command("copy")?)
}

/// Run `f` once after `ms` milliseconds
pub fn after(ms: i32, f: impl FnOnce() + 'static) -> Result<(), DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)?;
    Ok(())
}
