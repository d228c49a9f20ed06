//! Placeholder replacement in raw configuration text
//!
//! Only the exported configuration literal is searched. Imports, helper
//! statements and anything after the literal are copied through untouched.

use crate::edit::{Edit, EditKind};
use crate::locate::locate_config_literal;
use crate::options::EditOptions;

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether `placeholder` is made only of identifier characters.
///
/// Identifier-like placeholders only match where they are not part of a
/// longer identifier, so `$APP` does not match inside `$APP_NAME`.
pub fn is_identifier_like(placeholder: &str) -> bool {
    !placeholder.is_empty() && placeholder.chars().all(is_identifier_char)
}

/// Replace matches of `placeholder` in `region`, returning the new text and
/// how many occurrences were replaced.
fn replace_scoped(region: &str, placeholder: &str, replacement: &str) -> (String, usize) {
    let check_boundaries = is_identifier_like(placeholder);
    let mut out = String::with_capacity(region.len());
    let mut copied = 0;
    let mut search = 0;
    let mut count = 0;

    while let Some(found) = region[search..].find(placeholder) {
        let index = search + found;
        let end = index + placeholder.len();

        if check_boundaries {
            // The character before may come from an earlier replacement.
            let before = region[copied..index]
                .chars()
                .next_back()
                .or_else(|| out.chars().next_back());
            let after = region[end..].chars().next();
            if before.is_some_and(is_identifier_char) || after.is_some_and(is_identifier_char) {
                search = index + region[index..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
        }

        out.push_str(&region[copied..index]);
        out.push_str(replacement);
        copied = end;
        search = end;
        count += 1;
    }

    out.push_str(&region[copied..]);
    (out, count)
}

/// Plan replacing `placeholder` inside the configuration literal.
///
/// Returns `None` when there is no configuration literal or nothing matches.
pub fn plan_replace(
    source: &str,
    placeholder: &str,
    replacement: &str,
    options: &EditOptions,
) -> Option<Edit> {
    if placeholder.is_empty() {
        return None;
    }
    let literal = match locate_config_literal(source, options) {
        Ok(literal) => literal,
        Err(e) => {
            tracing::debug!(error = %e, "No configuration literal to replace in");
            return None;
        }
    };

    let region = literal.span.text(source);
    let (replaced, count) = replace_scoped(region, placeholder, replacement);
    if count == 0 {
        return None;
    }

    tracing::debug!(placeholder, count, "Replaced placeholder");
    Some(Edit::replace(
        placeholder,
        count,
        literal.span.range(),
        region,
        replaced,
    ))
}

/// Replace `placeholder` with `replacement` inside the configuration literal.
///
/// Never fails: text without a configuration literal or without a match is
/// returned unchanged.
///
/// ```
/// use config_edit::replace::replace_in_text;
///
/// let source = r#"export default { name: "$APP", alias: "$APP_X" }"#;
/// let replaced = replace_in_text(source, "$APP", "my-app");
/// assert_eq!(replaced, r#"export default { name: "my-app", alias: "$APP_X" }"#);
/// ```
pub fn replace_in_text(source: &str, placeholder: &str, replacement: &str) -> String {
    replace_in_text_with(source, placeholder, replacement, &EditOptions::default())
}

pub fn replace_in_text_with(
    source: &str,
    placeholder: &str,
    replacement: &str,
    options: &EditOptions,
) -> String {
    match plan_replace(source, placeholder, replacement, options) {
        Some(edit) => edit.apply(source),
        None => source.to_string(),
    }
}

/// Number of occurrences [`replace_in_text`] would replace.
pub fn count_in_text(source: &str, placeholder: &str, options: &EditOptions) -> usize {
    match plan_replace(source, placeholder, placeholder, options).map(|edit| edit.kind) {
        Some(EditKind::Replace { occurrences, .. }) => occurrences,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identifier_like() {
        assert!(is_identifier_like("$APP_NAME"));
        assert!(is_identifier_like("2082382372873"));
        assert!(!is_identifier_like("{{name}}"));
        assert!(!is_identifier_like(""));
    }

    #[test]
    fn test_scoped_to_literal() {
        let source = "const name = '$APP'\nexport default { name: '$APP' }\n// $APP";
        let replaced = replace_in_text(source, "$APP", "web");
        assert_eq!(
            replaced,
            "const name = '$APP'\nexport default { name: 'web' }\n// $APP"
        );
    }

    #[test]
    fn test_adjacent_identifier_chars_skip() {
        let (out, count) = replace_scoped("x$APP $APPy $APP", "$APP", "z");
        assert_eq!(out, "x$APP $APPy z");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_non_identifier_placeholder_matches_anywhere() {
        let (out, count) = replace_scoped("a{{name}}b", "{{name}}", "n");
        assert_eq!(out, "anb");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let (out, count) = replace_scoped("'$A' '$A'", "$A", "$A$A");
        assert_eq!(out, "'$A$A' '$A$A'");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_no_literal_is_unchanged() {
        let source = "const config = { name: '$APP' }";
        assert_eq!(replace_in_text(source, "$APP", "web"), source);
    }

    #[test]
    fn test_count() {
        let source = "export default { a: '$X', b: ['$X', '$XY'] }";
        assert_eq!(count_in_text(source, "$X", &EditOptions::default()), 2);
        assert_eq!(count_in_text(source, "$Z", &EditOptions::default()), 0);
    }
}
