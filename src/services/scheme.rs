use crate::core::errors::{Error, Result};
use crate::models::color::Color;
use crate::models::theme::ThemeReference;
use regex::bytes::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const LINE_HIGHLIGHT: &str = "lineHighlight";

#[derive(Debug, Deserialize)]
struct SchemeDocument {
    settings: Vec<SchemeRule>,
}

#[derive(Debug, Deserialize)]
struct SchemeRule {
    #[serde(default)]
    settings: BTreeMap<String, plist::Value>,
}

impl SchemeRule {
    fn has_line_highlight(&self) -> bool {
        match self.settings.get(LINE_HIGHLIGHT) {
            Some(plist::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
            None => false,
        }
    }
}

/// Remove `<!-- ... -->` spans. Some schemes put comments where the plist
/// reader chokes on them.
pub fn strip_comments(text: &[u8]) -> Cow<'_, [u8]> {
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    let re = COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));
    re.replace_all(text, &b""[..])
}

/// Pull the background/foreground pair out of the first rule that sets a
/// line highlight.
///
/// `Ok(None)` means the scheme has no such rule, which is common and not an
/// error.
pub fn extract_reference(text: impl AsRef<[u8]>, scheme: &str) -> Result<Option<ThemeReference>> {
    let sanitized = strip_comments(text.as_ref());
    let document: SchemeDocument = plist::from_bytes(&sanitized)
        .map_err(|e| Error::Parse(format!("{scheme}: {e}")))?;

    let Some(settings) = document
        .settings
        .iter()
        .find(|rule| rule.has_line_highlight())
        .map(|rule| &rule.settings)
    else {
        tracing::debug!(%scheme, "no line highlight rule");
        return Ok(None);
    };
    if settings.is_empty() {
        return Ok(None);
    }

    Ok(Some(ThemeReference {
        background: color_setting(settings, "background", Color::WHITE)?,
        foreground: color_setting(settings, "foreground", Color::BLACK)?,
        scheme: scheme.to_string(),
    }))
}

fn color_setting(
    settings: &BTreeMap<String, plist::Value>,
    key: &str,
    default: Color,
) -> Result<Color> {
    match settings.get(key) {
        None => Ok(default),
        Some(plist::Value::String(text)) => Color::parse(text),
        Some(other) => Err(Error::InvalidColorFormat(format!("{key}: {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(rules: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>name</key>
    <string>Test</string>
    <key>settings</key>
    <array>
{rules}
    </array>
</dict>
</plist>"#
        )
    }

    fn rule(pairs: &[(&str, &str)]) -> String {
        let body: String = pairs
            .iter()
            .map(|(k, v)| format!("<key>{k}</key><string>{v}</string>"))
            .collect();
        format!("<dict><key>settings</key><dict>{body}</dict></dict>")
    }

    #[test]
    fn picks_first_rule_with_line_highlight() {
        let text = scheme(&format!(
            "{}{}",
            rule(&[("foreground", "#111111")]),
            rule(&[("lineHighlight", "#222222"), ("background", "#ABCDEF")]),
        ));
        let reference = extract_reference(&text, "Test.tmTheme").unwrap().unwrap();
        assert_eq!(reference.background, Color::rgb(0xAB, 0xCD, 0xEF));
        assert_eq!(reference.foreground, Color::BLACK);
        assert_eq!(reference.scheme, "Test.tmTheme");
    }

    #[test]
    fn later_highlight_rules_are_ignored() {
        let text = scheme(&format!(
            "{}{}",
            rule(&[("lineHighlight", "#222222"), ("background", "#101010")]),
            rule(&[("lineHighlight", "#333333"), ("background", "#EEEEEE")]),
        ));
        let reference = extract_reference(&text, "x").unwrap().unwrap();
        assert_eq!(reference.background, Color::rgb(0x10, 0x10, 0x10));
    }

    #[test]
    fn missing_colors_use_defaults() {
        let text = scheme(&rule(&[("lineHighlight", "#222222")]));
        let reference = extract_reference(&text, "x").unwrap().unwrap();
        assert_eq!(reference.background, Color::WHITE);
        assert_eq!(reference.foreground, Color::BLACK);
    }

    #[test]
    fn no_highlight_rule_is_not_an_error() {
        let text = scheme(&rule(&[("background", "#000000")]));
        assert_eq!(extract_reference(&text, "x").unwrap(), None);
    }

    #[test]
    fn empty_highlight_value_is_not_a_candidate() {
        let text = scheme(&rule(&[("lineHighlight", ""), ("background", "#000000")]));
        assert_eq!(extract_reference(&text, "x").unwrap(), None);
    }

    #[test]
    fn comments_are_stripped_before_parsing() {
        let text = scheme(&format!(
            "<!-- a comment\n spanning <dict> lines -->{}",
            rule(&[("lineHighlight", "#222222"), ("background", "#303030")]),
        ));
        let reference = extract_reference(&text, "x").unwrap().unwrap();
        assert_eq!(reference.background, Color::rgb(0x30, 0x30, 0x30));
    }

    #[test]
    fn alpha_colors_are_accepted() {
        let text = scheme(&rule(&[("lineHighlight", "#222222"), ("background", "#303030FF")]));
        let reference = extract_reference(&text, "x").unwrap().unwrap();
        assert_eq!(reference.background, Color::rgb(0x30, 0x30, 0x30));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let result = extract_reference("<plist><dict><key>settings", "broken");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn bad_color_is_reported() {
        let text = scheme(&rule(&[("lineHighlight", "#222222"), ("background", "#12")]));
        let result = extract_reference(&text, "x");
        assert!(matches!(result, Err(Error::InvalidColorFormat(_))));
    }

    #[test]
    fn signed_color_group_is_reported() {
        let text = scheme(&rule(&[("lineHighlight", "#222222"), ("background", "#+f0000")]));
        let result = extract_reference(&text, "x");
        assert!(matches!(result, Err(Error::InvalidColorFormat(_))));
    }

    #[test]
    fn strip_comments_removes_every_span() {
        assert_eq!(&*strip_comments(b"a<!-- x -->b<!--\ny-->c"), b"abc");
    }
}
