//! Category constants and validation functions.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Color given to categories created without one.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// Maximum length of a category name in characters.
pub const MAX_NAME_LENGTH: u64 = 50;

/// Maximum length of a category icon name in characters.
pub const MAX_ICON_LENGTH: u64 = 50;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a category name is present and at most 50 characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Category name is required".to_string(),
        ));
    }
    if name.chars().count() as u64 > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name must be between 1-{MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a color is in hex format `#RRGGBB`.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !valid {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #RRGGBB hex format"
        )));
    }
    Ok(())
}

/// Validate the length of an icon name.
pub fn validate_icon(icon: &str) -> Result<(), CoreError> {
    if icon.trim().chars().count() as u64 > MAX_ICON_LENGTH {
        return Err(CoreError::Validation(format!(
            "Icon name must be at most {MAX_ICON_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Blank icon names are stored as absent; others are trimmed.
pub fn normalize_icon(icon: Option<&str>) -> Option<String> {
    icon.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
