// Single-pass template scanner.
//
// Placeholder occurrences are matched explicitly while walking the template
// once, instead of building one dynamic pattern per placeholder name and
// rewriting the whole string repeatedly. The expander renders the resulting
// token list without ever re-scanning substituted values.

use super::ast::{PlaceholderInfo, PlaceholderToken, ScannedTemplate, Token};
use crate::error::ExpandError;

/// Rejected as a placeholder name to guard against prototype-pollution-style
/// collisions in the dictionary types client code feeds into templates.
const RESERVED_NAME: &str = "hasOwnProperty";

pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    /// Scan `template` into a prefix, token list, and placeholder set.
    ///
    /// Fails only when the reserved name appears as a word token of the
    /// template; any other input tokenizes successfully.
    pub fn scan(template: &str) -> Result<ScannedTemplate, ExpandError> {
        let (prefix, rest) = split_prefix(template);
        let raw: Vec<char> = rest.chars().collect();

        // Discovery and classification look at the raw text, where `\:` still
        // marks an escaped colon.
        let placeholders = discover_placeholders(&raw)?;

        // Tokenization happens after escape normalization: a colon produced
        // from `\:` takes part in occurrences exactly like any other, so an
        // escaped `\:id` is still substituted when `id` is also used
        // unescaped elsewhere in the template.
        let mut scanner = Scanner {
            chars: normalize_escapes(&raw),
            pos: 0,
        };
        let tokens = scanner.tokenize(&placeholders);

        Ok(ScannedTemplate {
            prefix: prefix.to_string(),
            tokens,
            placeholders,
        })
    }

    fn tokenize(&mut self, placeholders: &[PlaceholderInfo]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            if let Some(occurrence) = self.try_placeholder(placeholders, c) {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder(occurrence));
            } else {
                literal.push(c);
                self.pos += 1;
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        tokens
    }

    /// Match a placeholder occurrence at the cursor: a colon, a discovered
    /// name, and a non-word terminator (or end of input). On a match the
    /// cursor moves past the terminator - the occurrence owns it, so e.g. in
    /// `:a:a` the second colon is consumed as the first occurrence's
    /// terminator and the second `:a` stays literal.
    fn try_placeholder(
        &mut self,
        placeholders: &[PlaceholderInfo],
        c: char,
    ) -> Option<PlaceholderToken> {
        if c != ':' {
            return None;
        }
        let colon_at = self.pos;

        let mut end = colon_at + 1;
        while end < self.chars.len() && is_word(self.chars[end]) {
            end += 1;
        }
        if end == colon_at + 1 {
            return None;
        }
        let name: String = self.chars[colon_at + 1..end].iter().collect();
        if !placeholders.iter().any(|p| p.name == name) {
            return None;
        }

        let trailing = self.chars.get(end).copied();
        self.pos = if trailing.is_some() { end + 1 } else { end };
        Some(PlaceholderToken { name, trailing })
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }
}

/// Word characters are ASCII alphanumerics and `_`; everything else splits
/// candidate names and terminates occurrences.
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split off a verbatim `http://` / `https://` prefix covering an optional
/// bracketed IPv6 literal plus everything up to the first path slash (port
/// included). Without the split, the colons inside `[2001:db8::1]:8080`
/// would read as placeholder markers.
fn split_prefix(template: &str) -> (&str, &str) {
    let rest = template
        .strip_prefix("http://")
        .or_else(|| template.strip_prefix("https://"));
    let Some(rest) = rest else {
        return ("", template);
    };

    let mut end = template.len() - rest.len();
    let bytes = template.as_bytes();
    if bytes.get(end) == Some(&b'[') {
        // The literal may contain slashes; it runs to the closing bracket.
        // An unterminated bracket falls through to the plain-host scan.
        if let Some(close) = template[end..].find(']') {
            end += close + 1;
        }
    }
    while end < bytes.len() && bytes[end] != b'/' {
        end += 1;
    }
    (&template[..end], &template[end..])
}

/// Walk the word runs of the template: the reserved name fails fast wherever
/// it appears, purely numeric runs are skipped, and every remaining candidate
/// that is actually used as a `:name` placeholder is recorded once, in
/// first-discovery order.
fn discover_placeholders(raw: &[char]) -> Result<Vec<PlaceholderInfo>, ExpandError> {
    let mut found: Vec<PlaceholderInfo> = Vec::new();
    let mut i = 0;

    while i < raw.len() {
        if !is_word(raw[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < raw.len() && is_word(raw[i]) {
            i += 1;
        }
        let candidate: String = raw[start..i].iter().collect();

        if candidate == RESERVED_NAME {
            return Err(ExpandError::InvalidParameterName(candidate));
        }
        if candidate.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if found.iter().any(|p| p.name == candidate) {
            continue;
        }
        if has_placeholder_use(raw, &candidate) {
            let is_query_param_value = is_query_param_value(raw, &candidate);
            found.push(PlaceholderInfo {
                name: candidate,
                is_query_param_value,
            });
        }
    }

    Ok(found)
}

/// True when `:name` appears somewhere with an unescaped colon and a
/// non-word (or end-of-string) terminator.
fn has_placeholder_use(raw: &[char], name: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    for (i, &c) in raw.iter().enumerate() {
        if c != ':' {
            continue;
        }
        if i > 0 && raw[i - 1] == '\\' {
            continue;
        }
        if matches_name_at(raw, i + 1, &name) {
            return true;
        }
    }
    false
}

/// True when the template contains a `?` followed anywhere later by `=:name`
/// with a non-word terminator, i.e. the placeholder sits in query-value
/// position. A property of the template text only, independent of the
/// supplied params, and per name rather than per occurrence.
fn is_query_param_value(raw: &[char], name: &str) -> bool {
    let Some(question) = raw.iter().position(|&c| c == '?') else {
        return false;
    };
    let name: Vec<char> = name.chars().collect();
    let mut i = question + 1;
    while i + 1 < raw.len() {
        if raw[i] == '=' && raw[i + 1] == ':' && matches_name_at(raw, i + 2, &name) {
            return true;
        }
        i += 1;
    }
    false
}

fn matches_name_at(raw: &[char], at: usize, name: &[char]) -> bool {
    if raw.len() < at + name.len() || raw[at..at + name.len()] != *name {
        return false;
    }
    match raw.get(at + name.len()) {
        Some(&c) => !is_word(c),
        None => true,
    }
}

/// Resolve `\:` escapes to literal colons. Scanning is left to right, so
/// `\\:` keeps its first backslash and still resolves the trailing pair.
fn normalize_escapes(raw: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == '\\' && raw.get(i + 1) == Some(&':') {
            out.push(':');
            i += 2;
        } else {
            out.push(raw[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_split_prefix_plain_path() {
        assert_eq!(split_prefix("/path/:id"), ("", "/path/:id"));
    }

    #[test]
    fn test_split_prefix_host() {
        assert_eq!(
            split_prefix("https://example.com/path/:id"),
            ("https://example.com", "/path/:id")
        );
    }

    #[test]
    fn test_split_prefix_ipv6_with_port() {
        assert_eq!(
            split_prefix("http://[2001:db8:1f70::999:de8:7648:6e8]:100/path/:id"),
            ("http://[2001:db8:1f70::999:de8:7648:6e8]:100", "/path/:id")
        );
    }

    #[test]
    fn test_split_prefix_unterminated_bracket_stops_at_slash() {
        assert_eq!(
            split_prefix("http://[broken/path"),
            ("http://[broken", "/path")
        );
    }

    #[test]
    fn test_discover_records_first_discovery_order() {
        let found = discover_placeholders(&chars("/foo/:bar/x/:foo")).unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "bar"]);
    }

    #[test]
    fn test_discover_skips_numeric_and_unused_candidates() {
        let found = discover_placeholders(&chars("/path/:123/to/:id")).unwrap();
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        // "path" and "to" are word runs but never used as placeholders;
        // "123" is numeric.
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_discover_ignores_escaped_colon() {
        let found = discover_placeholders(&chars("/path/\\:literal")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_discover_rejects_reserved_name_even_without_colon() {
        let err = discover_placeholders(&chars("/path/hasOwnProperty")).unwrap_err();
        assert_eq!(err.code(), "badname");
    }

    #[test]
    fn test_classification_requires_question_mark_and_equals() {
        let found = discover_placeholders(&chars("/path?id=:id&p/:seg")).unwrap();
        assert!(found.iter().any(|p| p.name == "id" && p.is_query_param_value));
        assert!(found.iter().any(|p| p.name == "seg" && !p.is_query_param_value));
    }

    #[test]
    fn test_classification_is_per_name() {
        // "id" appears both as a segment and as a query value; one query use
        // classifies every occurrence of the name.
        let found = discover_placeholders(&chars("/path/:id?x=:id")).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_query_param_value);
    }

    #[test]
    fn test_tokenize_consumes_terminator() {
        let scanned = Scanner::scan("/path/:id/end").unwrap();
        assert_eq!(
            scanned.tokens,
            vec![
                Token::Literal("/path/".to_string()),
                Token::Placeholder(PlaceholderToken {
                    name: "id".to_string(),
                    trailing: Some('/'),
                }),
                Token::Literal("end".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_occurrence_at_end_has_no_terminator() {
        let scanned = Scanner::scan("/path/:id").unwrap();
        match scanned.tokens.last().unwrap() {
            Token::Placeholder(p) => {
                assert_eq!(p.name, "id");
                assert_eq!(p.trailing, None);
            }
            other => panic!("expected placeholder, found {:?}", other),
        }
    }

    #[test]
    fn test_tokenize_consumed_terminator_blocks_next_occurrence() {
        // The colon after the first `:a` is that occurrence's terminator, so
        // the second `:a` never forms an occurrence of its own.
        let scanned = Scanner::scan(":a:a").unwrap();
        assert_eq!(
            scanned.tokens,
            vec![
                Token::Placeholder(PlaceholderToken {
                    name: "a".to_string(),
                    trailing: Some(':'),
                }),
                Token::Literal("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_normalized_escape_joins_occurrences() {
        // `id` is discovered through its unescaped use, after which the
        // normalized `\:id` reads as a second occurrence.
        let scanned = Scanner::scan("/a/:id/b/\\:id").unwrap();
        let occurrences = scanned
            .tokens
            .iter()
            .filter(|t| matches!(t, Token::Placeholder(_)))
            .count();
        assert_eq!(occurrences, 2);
    }

    #[test]
    fn test_tokenize_escaped_only_name_stays_literal() {
        let scanned = Scanner::scan("/a/\\:literal").unwrap();
        assert_eq!(
            scanned.tokens,
            vec![Token::Literal("/a/:literal".to_string())]
        );
    }
}
