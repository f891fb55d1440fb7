use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Characters that never appear in an environment name because they would
/// make the name ambiguous with a filesystem path or a path list.
const RESERVED_CHARACTERS: &[char] = &['/', '\\', ':', ';', ','];

/// A valid bare environment name, as opposed to a filesystem path.
///
/// Parse one with [`str::parse`]. Turning a name into a prefix directory
/// is the job of [`crate::resolver::PathResolver`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    /// Wraps a string without validating it.
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        EnvironmentName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EnvironmentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EnvironmentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<EnvironmentName> for String {
    fn from(name: EnvironmentName) -> String {
        name.0
    }
}

#[derive(Debug, Error)]
pub enum ParseEnvironmentNameError {
    #[error("environment name cannot be empty")]
    Empty,

    #[error("'{0}' cannot be used as an environment name")]
    ReservedName(String),

    #[error("invalid character in environment name: '{0}'")]
    InvalidCharacter(char),
}

impl FromStr for EnvironmentName {
    type Err = ParseEnvironmentNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseEnvironmentNameError::Empty);
        }
        if s == "." || s == ".." {
            return Err(ParseEnvironmentNameError::ReservedName(s.to_owned()));
        }
        if let Some(invalid) = s
            .chars()
            .find(|c| RESERVED_CHARACTERS.contains(c) || c.is_whitespace())
        {
            return Err(ParseEnvironmentNameError::InvalidCharacter(invalid));
        }

        Ok(EnvironmentName(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("gascon")]
    #[case("py312")]
    #[case("data-science_v2")]
    fn valid_names(#[case] name: &str) {
        assert_eq!(name.parse::<EnvironmentName>().unwrap().as_str(), name);
    }

    #[rstest]
    #[case("./blarg")]
    #[case("some/where")]
    #[case(r"some\where")]
    #[case("with space")]
    #[case("a:b")]
    #[case(".")]
    #[case("..")]
    #[case("")]
    fn invalid_names(#[case] name: &str) {
        assert!(name.parse::<EnvironmentName>().is_err());
    }
}
