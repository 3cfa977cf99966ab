// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest name we keep, in bytes. Longer wire names are truncated.
pub const MAX_NAME_LEN: usize = 64;

/// Owned output/monitor name.
///
/// Built once from an explicit-length byte slice; the wire data is never
/// assumed to be NUL-terminated or valid UTF-8.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BoundedName(String);

impl BoundedName {
    pub fn from_wire(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        Self(truncate_on_char_boundary(&text, MAX_NAME_LEN).to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for BoundedName {
    fn from(s: &str) -> Self {
        Self::from_wire(s.as_bytes())
    }
}

impl fmt::Display for BoundedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
