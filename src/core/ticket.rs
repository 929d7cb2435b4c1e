use super::Status;
use chrono::{SecondsFormat, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Well-known field names
pub mod fields {
    pub const ID: &str = "id";
    pub const STATUS: &str = "status";
    pub const CREATED_AT: &str = "created_at";
    pub const UPDATED_AT: &str = "updated_at";
    pub const CLOSED_AT: &str = "closed_at";
    pub const CATEGORY: &str = "category";
    pub const SUBCATEGORY: &str = "subcategory";
    pub const UNIT_CODE: &str = "unit_code";
    pub const DESCRIPTION: &str = "description";
    pub const CONTACT_NAME: &str = "contact_name";
    pub const CONTACT_PHONE: &str = "contact_phone";
    pub const PRIORITY: &str = "priority";
}

/// Current UTC time as an ISO-8601 string with millisecond precision
///
/// Strings produced here sort lexicographically in chronological order.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A maintenance ticket
///
/// Tickets are open field bags: any submitted field is kept as a string.
/// Field order is insertion order, and re-assigning an existing field keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ticket {
    fields: Vec<(String, String)>,
}

impl Ticket {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a field, or the empty string
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Assign a field, overwriting in place if it already exists
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == name)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn id(&self) -> Option<&str> {
        self.get(fields::ID)
    }

    /// Parsed status; `None` when missing or not a known status
    pub fn status(&self) -> Option<Status> {
        self.get(fields::STATUS).and_then(|s| s.parse().ok())
    }

    /// Creation timestamp, empty when missing
    pub fn created_at(&self) -> &str {
        self.get_or_empty(fields::CREATED_AT)
    }

    /// Mark the ticket closed at `at`, leaving every other field untouched
    pub fn close(&mut self, at: impl Into<String>) {
        self.set(fields::STATUS, Status::Closed.as_str());
        self.set(fields::CLOSED_AT, at);
    }
}

impl<K, V> FromIterator<(K, V)> for Ticket
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ticket = Self::new();
        for (key, value) in iter {
            ticket.set(key, value);
        }
        ticket
    }
}

impl Serialize for Ticket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ticket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TicketVisitor)
    }
}

struct TicketVisitor;

impl<'de> Visitor<'de> for TicketVisitor {
    type Value = Ticket;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of ticket fields")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Ticket, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut ticket = Ticket::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            ticket.set(key, coerce_to_string(value));
        }
        Ok(ticket)
    }
}

// Non-string values written by other tools are kept in textual form.
fn coerce_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
