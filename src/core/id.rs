use crate::error::{DeskError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const PREFIX: &str = "R-";
const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^R-[A-Z0-9]{6}$").unwrap_or_else(|e| panic!("invalid ticket id pattern: {e}"))
});

/// Identifier of a ticket, `R-` followed by six base-36 characters
///
/// Uniqueness relies on the random suffix only; collisions are possible
/// but not guarded against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(String);

impl TicketId {
    /// Generate a fresh random identifier
    #[must_use]
    pub fn generate() -> Self {
        let mut entropy = Uuid::new_v4().as_u128();
        let mut id = String::with_capacity(PREFIX.len() + SUFFIX_LEN);
        id.push_str(PREFIX);
        for _ in 0..SUFFIX_LEN {
            id.push(char::from(ALPHABET[(entropy % 36) as usize]));
            entropy /= 36;
        }
        Self(id)
    }

    /// Parse a user-supplied identifier, accepting lowercase input
    pub fn parse_str(s: &str) -> Result<Self> {
        let candidate = s.trim().to_ascii_uppercase();
        if Self::is_well_formed(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(DeskError::InvalidInput(format!(
                "'{s}' is not a ticket ID (expected R- followed by 6 letters or digits)"
            )))
        }
    }

    /// Whether `s` has the exact `R-XXXXXX` shape
    pub fn is_well_formed(s: &str) -> bool {
        ID_PATTERN.is_match(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TicketId {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
