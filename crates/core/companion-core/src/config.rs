//! `.env` loading and typed `COMPANION_*` lookups

use crate::{CompanionError, Result};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Load environment variables from a .env file
///
/// Looks in the current directory and its parents. A missing file is not an
/// error; a malformed one is.
///
/// # Example
///
/// ```no_run
/// use companion_core::{get_env_parsed, load_env};
///
/// load_env().ok();
/// let margin: f32 = get_env_parsed("COMPANION_BLEND_MARGIN", 0.25);
/// ```
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Loaded companion settings");
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(CompanionError::config(format!(
            "malformed .env: '{}' at position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::debug!("No .env file; reading COMPANION_* from the process environment");
            Ok(())
        }
        Err(e) => Err(CompanionError::config(format!("cannot load .env: {}", e))),
    }
}

/// Load environment variables from an explicit file. Unlike [`load_env`],
/// a missing file is an error.
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    dotenvy::from_path(path).map_err(|e| {
        CompanionError::config(format!("cannot load {}: {}", path.display(), e))
    })?;
    tracing::info!(path = %path.display(), "Loaded companion settings");
    Ok(())
}

/// Read `key` and parse it as `T`
///
/// Unset variables yield `default` silently. A value that does not parse
/// also yields `default`, with a warning naming the variable.
pub fn get_env_parsed<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Unparsable setting; using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_int_and_float() {
        env::set_var("COMPANION_TEST_CAPACITY", " 12 ");
        env::set_var("COMPANION_TEST_MARGIN", "0.35");
        assert_eq!(get_env_parsed("COMPANION_TEST_CAPACITY", 0usize), 12);
        assert_eq!(get_env_parsed("COMPANION_TEST_MARGIN", 0.0f32), 0.35);
        env::remove_var("COMPANION_TEST_CAPACITY");
        env::remove_var("COMPANION_TEST_MARGIN");
    }

    #[test]
    fn test_unset_and_unparsable_fall_back() {
        assert_eq!(get_env_parsed("COMPANION_TEST_NEVER_SET", 99usize), 99);

        env::set_var("COMPANION_TEST_GARBAGE", "wide");
        assert_eq!(get_env_parsed("COMPANION_TEST_GARBAGE", 1.5f32), 1.5);
        env::remove_var("COMPANION_TEST_GARBAGE");
    }

    #[test]
    fn test_missing_explicit_file_is_fatal() {
        let err = load_env_from_path("/nonexistent/companion.env").unwrap_err();
        assert!(err.is_fatal());
    }
}
