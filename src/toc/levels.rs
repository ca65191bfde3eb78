use std::fmt;
use std::str::FromStr;

use crate::utils::error::TocError;

/// Heading levels a table of contents includes, in ascending order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedLevels(Vec<u8>);

impl RequestedLevels {
    /// Parse a comma-separated level list such as `1,2,3` or `H1,H2`
    pub fn parse(input: &str) -> Result<Self, TocError> {
        let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.is_empty() {
            return Err(TocError::InvalidLevels("no levels given".to_string()));
        }

        let mut levels = Vec::new();
        for part in cleaned.split(',') {
            let digits = part
                .strip_prefix('H')
                .or_else(|| part.strip_prefix('h'))
                .unwrap_or(part);

            let level: u8 = digits
                .parse()
                .map_err(|_| TocError::InvalidLevels(format!("'{}' is not a heading level", part)))?;

            if !(1..=6).contains(&level) {
                return Err(TocError::InvalidLevels(format!(
                    "level {} is outside 1..=6",
                    level
                )));
            }

            if let Some(&previous) = levels.last() {
                if level <= previous {
                    return Err(TocError::InvalidLevels(format!(
                        "levels must be strictly ascending ({} follows {})",
                        level, previous
                    )));
                }
            }

            levels.push(level);
        }

        Ok(Self(levels))
    }

    /// The baseline level the root list starts at
    pub fn first(&self) -> u8 {
        // Parsing guarantees at least one level
        self.0.first().copied().unwrap_or(1)
    }

    pub fn contains(&self, level: u8) -> bool {
        self.0.contains(&level)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Default for RequestedLevels {
    fn default() -> Self {
        Self(vec![1, 2])
    }
}

impl FromStr for RequestedLevels {
    type Err = TocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RequestedLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|l| l.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
