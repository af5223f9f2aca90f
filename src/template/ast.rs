// Token types produced by the template scanner.

/// A template split into a verbatim prefix, token list, and the distinct
/// placeholders discovered in it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedTemplate {
    /// Leading `http://` / `https://` host prefix, kept verbatim and excluded
    /// from expansion and path cleanup.
    pub prefix: String,
    pub tokens: Vec<Token>,
    /// Distinct placeholders in first-discovery order.
    pub placeholders: Vec<PlaceholderInfo>,
}

impl ScannedTemplate {
    pub fn placeholder(&self, name: &str) -> Option<&PlaceholderInfo> {
        self.placeholders.iter().find(|p| p.name == name)
    }
}

/// A template consists of literal runs and placeholder occurrences.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(String),
    Placeholder(PlaceholderToken),
}

/// One `:name` occurrence, together with the non-word character that
/// terminates it (if the occurrence does not end the template). The
/// terminator belongs to the occurrence: it is consumed during scanning and
/// re-emitted by the expander, which is what lets elision drop a segment
/// without leaving a doubled slash behind.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderToken {
    pub name: String,
    pub trailing: Option<char>,
}

/// Per-name facts about a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderInfo {
    pub name: String,
    /// True when the template uses the placeholder as the value side of a
    /// `key=:name` pair after a `?`. Such values get query-component encoding
    /// instead of path-segment encoding.
    pub is_query_param_value: bool,
}
