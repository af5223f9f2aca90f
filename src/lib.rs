//! Expand URL templates containing `:name` placeholders into concrete
//! request paths.
//!
//! A template is a path (optionally carrying an `http://` / `https://` host
//! prefix and a query string) in which `:name` marks a position to fill from
//! a parameter map:
//!
//! ```
//! use resource_path::{resource, Params};
//!
//! let mut params = Params::new();
//! params.insert("id".to_string(), 123.into());
//!
//! let url = resource("/posts/:id/comments", &params)?;
//! assert_eq!(url, "/posts/123/comments");
//! # Ok::<(), resource_path::ExpandError>(())
//! ```
//!
//! Placeholders with no supplied value are elided together with their
//! separator slash, so optional trailing identifiers need no special
//! handling:
//!
//! ```
//! use resource_path::{resource, Params};
//!
//! let url = resource("/posts/:id/comments", &Params::new())?;
//! assert_eq!(url, "/posts/comments");
//! # Ok::<(), resource_path::ExpandError>(())
//! ```
//!
//! Values are percent-encoded for the position they land in: path segments
//! keep the sub-delimiters RFC 3986 allows there (`& = +` among them), while
//! query values (`?key=:name`) get stricter query-component encoding. A
//! literal colon is written `\:`. Expansion is a pure, stateless
//! transformation - no I/O, nothing cached between calls.

mod encoding;
mod error;
mod params;
mod template;

pub use encoding::{encode_query, encode_segment};
pub use error::ExpandError;
pub use params::{ParamValue, Params};

/// Expand the URL template `uri` against `params`.
///
/// The only failure mode is [`ExpandError::InvalidParameterName`], raised
/// when the template contains the reserved word `hasOwnProperty`; every
/// other input expands, with unmatched placeholders elided rather than
/// rejected.
pub fn resource(uri: &str, params: &Params) -> Result<String, ExpandError> {
    template::expand(uri, params)
}
