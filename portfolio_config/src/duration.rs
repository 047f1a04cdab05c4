use std::{fmt, ops::Deref, str::FromStr};

use serde::Deserialize;

/// A duration written as whitespace separated `<number><unit>` parts, e.g.
/// `1d 2h 3m 4s`. Supported units are `d`, `h`, `m` and `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDuration(String);

impl fmt::Display for InvalidDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid duration part {:?}", self.0)
    }
}

impl std::error::Error for InvalidDuration {}

impl FromStr for Duration {
    type Err = InvalidDuration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(0u64, |total, part| {
                let invalid = || InvalidDuration(part.into());
                let (split, _) = part.char_indices().last().ok_or_else(invalid)?;
                let (value, unit) = part.split_at(split);
                let factor = match unit {
                    "s" => 1,
                    "m" => 60,
                    "h" => 60 * 60,
                    "d" => 24 * 60 * 60,
                    _ => return Err(invalid()),
                };
                if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                value
                    .parse::<u64>()
                    .ok()
                    .and_then(|value| value.checked_mul(factor))
                    .and_then(|secs| total.checked_add(secs))
                    .ok_or_else(invalid)
            })
            .map(|secs| Self(std::time::Duration::from_secs(secs)))
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
