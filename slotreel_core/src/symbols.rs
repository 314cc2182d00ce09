use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Icon names in strip order. Index `i` sits `i * icon_height` pixels down the strip.
const CLASSIC_ICONS: [&str; 12] = [
    "banana",
    "seven",
    "bar",
    "purple",
    "barbar",
    "cherry",
    "plum",
    "orange",
    "bell",
    "barbarbar",
    "lemon",
    "melon",
];

pub const RESULT_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconCatalog(Vec<String>);

impl IconCatalog {
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self(names))
    }

    /// The 12-icon strip the default reel artwork is drawn with.
    pub fn classic() -> Self {
        Self(CLASSIC_ICONS.iter().map(|s| s.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the icon at `index`, wrapping around the strip.
    pub fn name(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Human-readable line for a set of reel stops, e.g. `banana - seven - bar - bar`.
    pub fn describe(&self, indices: &[usize]) -> String {
        indices
            .iter()
            .map(|&i| self.name(i))
            .collect::<Vec<_>>()
            .join(RESULT_SEPARATOR)
    }
}

impl Default for IconCatalog {
    fn default() -> Self {
        Self::classic()
    }
}
