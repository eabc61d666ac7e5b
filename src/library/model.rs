use std::fmt;

use serde::{Deserialize, Serialize};

/// A previously generated audio track as listed by the library service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioItem {
    /// Playback source, relative to the service base URL (e.g. `static/<id>.wav`).
    pub url: String,
    pub title: String,
}

impl AudioItem {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Stable identity of this item; two items with the same url share it.
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.url.clone())
    }
}

/// Identifier used for every identity comparison (active item, duration cache).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The media path this key points at.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
