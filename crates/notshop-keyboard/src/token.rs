//! Stateless action token encoding and decoding.
//!
//! A token is `pg:<kind>:<page>` and rides in a button's `callback_data`,
//! which Telegram caps at 64 bytes.

use std::str::FromStr;

use notshop_core::error::NotshopError;

const TOKEN_PREFIX: &str = "pg";
const SEPARATOR: char = ':';

/// Upper bound on an encoded token, in bytes.
pub const MAX_TOKEN_LEN: usize = 64;

/// Reserved kind for buttons that must do nothing when pressed.
pub const INERT_KIND: &str = "noop";

/// Fixed payload used when an inert token cannot be encoded. Never decodes.
pub const INERT_PLACEHOLDER: &str = "pg-noop";

/// Parsed action token data from a button payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionToken {
    /// Handler namespace (e.g. `menu`).
    pub kind: String,
    /// Target page number, 1-based.
    pub page: usize,
}

impl ActionToken {
    pub fn new(kind: impl Into<String>, page: usize) -> Self {
        Self {
            kind: kind.into(),
            page,
        }
    }

    /// Encode this token into its wire form.
    pub fn encode(&self) -> Result<String, NotshopError> {
        encode(&self.kind, self.page)
    }

    /// Whether this token targets the reserved no-op kind.
    pub fn is_inert(&self) -> bool {
        self.kind == INERT_KIND
    }
}

impl FromStr for ActionToken {
    type Err = NotshopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Check that `kind` can be embedded in a token.
pub fn validate_kind(kind: &str) -> Result<(), NotshopError> {
    if kind.is_empty() {
        return Err(NotshopError::Validation("action kind is empty".into()));
    }
    if kind.contains(SEPARATOR) {
        return Err(NotshopError::Validation(format!(
            "action kind '{kind}' contains the reserved separator '{SEPARATOR}'"
        )));
    }
    Ok(())
}

/// Build a compact payload carrying `(kind, page)`.
pub fn encode(kind: &str, page: usize) -> Result<String, NotshopError> {
    validate_kind(kind)?;
    if page == 0 {
        return Err(NotshopError::Validation("page must be >= 1".into()));
    }

    let token = format!("{TOKEN_PREFIX}{SEPARATOR}{kind}{SEPARATOR}{page}");
    if token.len() > MAX_TOKEN_LEN {
        return Err(NotshopError::Validation(format!(
            "token for kind '{kind}' is {} bytes, limit is {MAX_TOKEN_LEN}",
            token.len()
        )));
    }
    Ok(token)
}

/// Parse a payload produced by [`encode`].
///
/// Only the canonical form is accepted: plain decimal page without sign or
/// leading zeros, so that decoding and re-encoding yields the same string.
pub fn decode(token: &str) -> Result<ActionToken, NotshopError> {
    let mut parts = token.split(SEPARATOR);

    let prefix = parts.next().unwrap_or_default();
    if prefix != TOKEN_PREFIX {
        return Err(NotshopError::Decode(format!("foreign token '{token}'")));
    }

    let (Some(kind), Some(raw_page), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(NotshopError::Decode(format!("malformed token '{token}'")));
    };

    if kind.is_empty() {
        return Err(NotshopError::Decode(format!("token '{token}' has no kind")));
    }

    let canonical = !raw_page.is_empty()
        && raw_page.bytes().all(|b| b.is_ascii_digit())
        && !(raw_page.len() > 1 && raw_page.starts_with('0'));
    if !canonical {
        return Err(NotshopError::Decode(format!(
            "token '{token}' has a non-numeric page"
        )));
    }

    let page = raw_page
        .parse::<usize>()
        .map_err(|e| NotshopError::Decode(format!("token '{token}' page: {e}")))?;
    if page == 0 {
        return Err(NotshopError::Decode(format!(
            "token '{token}' page is out of range"
        )));
    }

    Ok(ActionToken {
        kind: kind.to_owned(),
        page,
    })
}
