//! Small helpers shared by the builtins.

use crate::error::ShellError;
use std::path::Path;

/// Expands a leading `~` or `~/` to `home`.
///
/// Any other path, including `~user`, is returned unchanged. Fails only when
/// expansion is needed and no home directory is known.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> Result<String, ShellError> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return Ok(path.to_string()),
    };
    let home = home.ok_or(ShellError::HomeNotSet)?;
    let home = home.to_string_lossy();
    if rest.is_empty() {
        return Ok(home.into_owned());
    }
    Ok(format!("{}{}", home.trim_end_matches('/'), rest))
}
