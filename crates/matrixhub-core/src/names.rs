//! Unique resource names for tests.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of [`random_name`] suffixes.
pub const DEFAULT_RANDOM_NAME_LEN: usize = 8;

/// Build a project name that is unique per invocation.
///
/// The format is `{prefix}-test-{unix_nanos}`.
#[must_use]
pub fn generate_test_project_name(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("{prefix}-test-{nanos}")
}

/// Random lowercase alphanumeric string of `len` characters.
#[must_use]
pub fn random_string(len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        for byte in Uuid::new_v4().as_bytes() {
            if out.len() == len {
                break;
            }
            out.push(char::from(NAME_CHARSET[usize::from(*byte) % NAME_CHARSET.len()]));
        }
    }
    out
}

/// Random name of the default length.
#[must_use]
pub fn random_name() -> String {
    random_string(DEFAULT_RANDOM_NAME_LEN)
}
