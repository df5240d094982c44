use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

use crate::constants::MAX_NAME_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameErrorKind {
    Empty,
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameError {
    field: &'static str,
    kind: NameErrorKind,
}

impl NameError {
    const fn new(field: &'static str, kind: NameErrorKind) -> Self {
        Self { field, kind }
    }

    #[must_use]
    pub const fn kind(&self) -> NameErrorKind {
        self.kind
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NameErrorKind::Empty => write!(f, "{} name is required", self.field),
            NameErrorKind::TooLong => write!(
                f,
                "{} name must be at most {} characters",
                self.field, MAX_NAME_LEN
            ),
        }
    }
}

impl Error for NameError {}

/// Trims surrounding whitespace and checks the remaining text is usable as a name.
fn normalize_name(field: &'static str, value: &str) -> Result<String, NameError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NameError::new(field, NameErrorKind::Empty));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(NameError::new(field, NameErrorKind::TooLong));
    }
    Ok(trimmed.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerName(String);

impl CustomerName {
    /// # Errors
    /// Returns [`NameError`] when the trimmed value is empty or too long.
    pub fn new(value: &str) -> Result<Self, NameError> {
        normalize_name("Customer", value).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CustomerName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CustomerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        CustomerName::new(&value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentName(String);

impl AgentName {
    /// # Errors
    /// Returns [`NameError`] when the trimmed value is empty or too long.
    pub fn new(value: &str) -> Result<Self, NameError> {
        normalize_name("Agent", value).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for AgentName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AgentName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        AgentName::new(&value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChatId(pub u64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
