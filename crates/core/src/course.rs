//! Course catalog constants, validation, and the HTML badge helper.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::error::CoreError;

/// Colour used when none is supplied.
pub const DEFAULT_COLOR: &str = "#007bff";

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Validate that `color` is a `#rrggbb` hex colour.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    if COLOR_RE.is_match(color) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be a hex colour like {DEFAULT_COLOR}"
        )))
    }
}

/// `validator` adapter for [`validate_color`].
pub fn validate_color_field(color: &str) -> Result<(), ValidationError> {
    validate_color(color).map_err(|_| {
        let mut err = ValidationError::new("color");
        err.message = Some("must be a #rrggbb hex colour".into());
        err
    })
}

/// Render the course as an inline badge.
///
/// Both the name and the colour are HTML-escaped.
pub fn html_badge(name: &str, color: &str) -> String {
    format!(
        r#"<span class="badge badge-primary" style="background-color: {}">{}</span>"#,
        escape_html(color),
        escape_html(name)
    )
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}
