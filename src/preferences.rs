/// Dark-mode preference, persisted in localStorage

use web_sys::Storage;

use crate::error::DomError;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// Only the exact string "true" turns dark mode on
pub fn parse_dark_mode(stored: Option<&str>) -> bool {
    stored == Some("true")
}

pub fn format_dark_mode(enabled: bool) -> &'static str {
    if enabled { "true" } else { "false" }
}

fn local_storage() -> Result<Storage, DomError> {
    web_sys::window()
        .ok_or(DomError::NoWindow)?
        .local_storage()?
        .ok_or(DomError::Unavailable("localStorage"))
}

pub fn load_dark_mode() -> bool {
    match local_storage().and_then(|s| s.get_item(DARK_MODE_KEY).map_err(DomError::from)) {
        Ok(value) => parse_dark_mode(value.as_deref()),
        Err(e) => {
            log::warn!("Could not read dark mode preference: {}", e);
            false
        }
    }
}

pub fn save_dark_mode(enabled: bool) -> Result<(), DomError> {
    local_storage()?.set_item(DARK_MODE_KEY, format_dark_mode(enabled))?;
    Ok(())
}

/// Reflect the preference on <body> so the stylesheet can switch palettes
pub fn apply_dark_mode(enabled: bool) -> Result<(), DomError> {
    let body = web_sys::window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::Unavailable("document"))?
        .body()
        .ok_or(DomError::NoBody)?;

    body.class_list().toggle_with_force(DARK_MODE_CLASS, enabled)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dark_mode() {
        assert!(parse_dark_mode(Some("true")));
        assert!(!parse_dark_mode(Some("false")));
        assert!(!parse_dark_mode(Some("TRUE")));
        assert!(!parse_dark_mode(Some("1")));
        assert!(!parse_dark_mode(None));
    }

    #[test]
    fn test_format_round_trips() {
        assert!(parse_dark_mode(Some(format_dark_mode(true))));
        assert!(!parse_dark_mode(Some(format_dark_mode(false))));
    }
}
