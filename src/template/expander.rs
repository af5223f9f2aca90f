// Token rendering: substitution, elision, and path cleanup.

use super::ast::{PlaceholderToken, ScannedTemplate, Token};
use super::scanner::Scanner;
use crate::encoding::{encode_query, encode_segment};
use crate::error::ExpandError;
use crate::params::{ParamValue, Params};

/// Expand `template`, substituting placeholders that have a value and
/// eliding the ones that do not.
pub fn expand(template: &str, params: &Params) -> Result<String, ExpandError> {
    let scanned = Scanner::scan(template)?;

    let mut out = String::new();
    for token in &scanned.tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder(occurrence) => match params.get(&occurrence.name) {
                Some(value) if !value.is_null() => {
                    substitute(&mut out, &scanned, occurrence, value)
                }
                _ => elide(&mut out, occurrence),
            },
        }
    }

    // Trailing slashes come off the path only; the host prefix goes back on
    // verbatim afterwards.
    let trimmed = out.trim_end_matches('/');
    let mut path = if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    };

    // Escaped-dot artifact: a surviving `\.` right after a slash reads as a
    // plain dot segment.
    if let Some(at) = path.find("/\\.") {
        path.replace_range(at..at + 3, "/.");
    }

    if scanned.prefix.is_empty() {
        Ok(path)
    } else {
        Ok(format!("{}{}", scanned.prefix, path))
    }
}

fn substitute(
    out: &mut String,
    scanned: &ScannedTemplate,
    occurrence: &PlaceholderToken,
    value: &ParamValue,
) {
    let raw = value.render();
    let is_query_param_value = scanned
        .placeholder(&occurrence.name)
        .map(|info| info.is_query_param_value)
        .unwrap_or(false);
    let encoded = if is_query_param_value {
        encode_query(&raw, true)
    } else {
        encode_segment(&raw)
    };

    out.push_str(&encoded);
    if let Some(terminator) = occurrence.trailing {
        out.push(terminator);
    }
}

/// Drop the placeholder together with its own separator. A separator-slash
/// terminator merges with a slash already at the end of the rendered output
/// (the segment's leading slash), so eliding a whole segment never leaves a
/// doubled slash; any other terminator survives as-is.
fn elide(out: &mut String, occurrence: &PlaceholderToken) {
    match occurrence.trailing {
        Some('/') => {
            if !out.ends_with('/') {
                out.push('/');
            }
        }
        Some(terminator) => out.push(terminator),
        None => {}
    }
}
