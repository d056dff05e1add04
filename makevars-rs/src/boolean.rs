//! Boolean values as written in build configuration files.

use crate::error::{MakeError, Result};

/// Parse `"true"` or `"false"`.  Anything else, including other spellings
/// or surrounding whitespace, is [`MakeError::InvalidBoolean`].
pub fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(MakeError::InvalidBoolean { text: text.to_owned() }),
    }
}
