//! SQL identifier handling.
//!
//! - [`underscore_name`] turns a Rust-side name (`FirstName`) into the column
//!   style used by default (`first_name`).
//! - [`write_quoted`] renders an identifier inside the dialect's quote
//!   character, doubling any embedded quote.
//!
//! # Example
//! ```
//! use bindorm::ident::underscore_name;
//!
//! assert_eq!(underscore_name("UserName"), "user_name");
//! assert_eq!(underscore_name("ID"), "i_d");
//! ```

use crate::error::{OrmError, OrmResult};

/// Convert an identifier to lowercase, underscore-separated form.
///
/// Every uppercase character after the first is preceded by `_`. The rule is
/// per character, so consecutive capitals are split apart (`"ID"` becomes
/// `"i_d"`). Map such fields explicitly with `#[orm(column = "...")]`.
pub fn underscore_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Append `name` to `out` wrapped in `quote`, escaping `quote` as a doubled quote.
pub fn write_quoted(out: &mut String, name: &str, quote: char) {
    out.push(quote);
    for ch in name.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
}

/// Reject names that can never be rendered as an identifier.
pub(crate) fn validate_name(type_name: &str, what: &str, name: &str) -> OrmResult<()> {
    if name.is_empty() {
        return Err(OrmError::invalid_model(
            type_name,
            format!("{what} name cannot be empty"),
        ));
    }
    if name.contains('\0') {
        return Err(OrmError::invalid_model(
            type_name,
            format!("{what} name '{}' cannot contain NUL character", name.escape_debug()),
        ));
    }
    Ok(())
}
