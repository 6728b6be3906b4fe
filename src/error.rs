//! Error types shared by the override table, the request views and the
//! merged sequences.

use std::num::ParseIntError;

/// Errors produced while building or reading simulated pre-authentication data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Header name and header value group counts disagree.
    #[error(
        "Length of 'preauth.headerNames' ({names}) and 'preauth.headerValues' ({values}) does not match"
    )]
    Configuration { names: usize, values: usize },

    /// An overridden header value is not a base-10 integer.
    #[error("header '{name}' value '{value}' is not an integer: {source}")]
    NumberFormat {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// `next_element` was called on a merged sequence with nothing left.
    #[error("merged sequence has no more elements")]
    Exhausted,
}

pub type Result<T> = std::result::Result<T, Error>;
