//! Small reusable HTML fragments.
//!
//! Everything user-supplied passes through [`text`] or [`attr`] before it is
//! spliced into markup.

use std::borrow::Cow;
use std::fmt::Write;

/// Escape text content.
#[must_use]
pub fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escape a double-quoted attribute value.
#[must_use]
pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Percent-encode one URL path segment.
#[must_use]
pub fn path_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
    Destructive,
    /// Rounded chip used for suggestions and selected ingredients.
    Chip,
}

impl ButtonVariant {
    /// CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Secondary => "btn btn-secondary",
            Self::Ghost => "btn btn-ghost",
            Self::Destructive => "btn btn-danger",
            Self::Chip => "chip",
        }
    }
}

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    #[default]
    Default,
    Warning,
    Outline,
}

impl BadgeVariant {
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "badge",
            Self::Warning => "badge badge-warning",
            Self::Outline => "badge badge-outline",
        }
    }
}

/// A single-button POST form.
///
/// `label` is trusted markup (it may hold an icon); `hidden` values are
/// escaped.
#[must_use]
pub fn action_button(
    action: &str,
    label: &str,
    variant: ButtonVariant,
    hidden: &[(&str, &str)],
) -> String {
    let mut fields = String::new();
    for (name, value) in hidden {
        let _ = write!(
            fields,
            r#"<input type="hidden" name="{}" value="{}">"#,
            attr(name),
            attr(value)
        );
    }

    format!(
        r#"<form method="post" action="{action}" class="inline-form">{fields}<button type="submit" class="{classes}">{label}</button></form>"#,
        action = attr(action),
        classes = variant.classes(),
    )
}

#[must_use]
pub fn badge(label: &str, variant: BadgeVariant) -> String {
    format!(
        r#"<span class="{}">{}</span>"#,
        variant.classes(),
        text(label)
    )
}

/// Inline error banner; empty when there is no message.
#[must_use]
pub fn error_banner(message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div class="alert alert-error" role="alert">{}</div>"#,
            text(message)
        ),
        None => String::new(),
    }
}

/// Heart icon, filled when `filled`.
#[must_use]
pub fn heart_icon(filled: bool) -> &'static str {
    if filled {
        r#"<svg class="icon icon-heart filled" viewBox="0 0 24 24" aria-hidden="true"><path d="M12 21s-7-4.35-9.5-9A5.5 5.5 0 0 1 12 6a5.5 5.5 0 0 1 9.5 6c-2.5 4.65-9.5 9-9.5 9z" fill="currentColor"/></svg>"#
    } else {
        r#"<svg class="icon icon-heart" viewBox="0 0 24 24" aria-hidden="true"><path d="M12 21s-7-4.35-9.5-9A5.5 5.5 0 0 1 12 6a5.5 5.5 0 0 1 9.5 6c-2.5 4.65-9.5 9-9.5 9z" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_button_escapes_hidden_values() {
        let html = action_button(
            "/s/abc/ingredients/remove",
            "Remove",
            ButtonVariant::Chip,
            &[("name", r#"Salt & "pepper""#)],
        );
        assert!(html.contains(r#"value="Salt &amp; &quot;pepper&quot;""#));
        assert!(html.contains(r#"class="chip""#));
        assert!(html.starts_with(r#"<form method="post" action="/s/abc/ingredients/remove""#));
    }

    #[test]
    fn test_error_banner() {
        assert!(error_banner(None).is_empty());
        assert!(error_banner(Some("<oops>")).contains("&lt;oops&gt;"));
    }
}
