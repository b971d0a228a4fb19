//! Username validation for character registration

/// Username validation errors with helpful messages
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("Username is too short (minimum {min} characters)")]
    TooShort { min: usize },

    #[error("Username is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Username contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },
}

/// Username validation rules
#[derive(Debug, Clone)]
pub struct UsernameRules {
    pub min_length: usize,
    pub max_length: usize,
}

impl UsernameRules {
    /// Rules for in-game character names
    pub fn player() -> Self {
        UsernameRules {
            min_length: 2,
            max_length: 20,
        }
    }
}

impl Default for UsernameRules {
    fn default() -> Self {
        Self::player()
    }
}

/// Validate a username against `rules`, returning the accepted name.
///
/// Only ASCII letters, digits, `_` and `-` are accepted; the name must
/// arrive already trimmed since it is taken from a single command token.
pub fn validate_username(username: &str, rules: &UsernameRules) -> Result<String, UsernameError> {
    let len = username.chars().count();
    if len < rules.min_length {
        return Err(UsernameError::TooShort { min: rules.min_length });
    }
    if len > rules.max_length {
        return Err(UsernameError::TooLong { max: rules.max_length });
    }

    let mut invalid: Vec<char> = username
        .chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        .collect();
    if !invalid.is_empty() {
        invalid.dedup();
        let chars = invalid
            .iter()
            .map(|c| {
                if c.is_control() {
                    format!("\\u{{{:04x}}}", *c as u32)
                } else {
                    c.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        return Err(UsernameError::InvalidCharacters { chars });
    }

    Ok(username.to_string())
}

/// Validate a character name with the default player rules
pub fn validate_player_name(name: &str) -> Result<String, UsernameError> {
    validate_username(name, &UsernameRules::player())
}
