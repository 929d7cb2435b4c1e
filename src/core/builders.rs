use super::{Status, Ticket, TicketId, fields, timestamp_now};

/// Builder for new ticket submissions
///
/// System fields (`id`, `status`, `created_at`, `updated_at`) are written
/// first and submitted fields are applied on top of them, so a submitted
/// field with a system name replaces the generated value.
#[derive(Debug, Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    now: Option<String>,
    submitted: Vec<(String, String)>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed ID instead of a generated one
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Use a fixed creation time instead of the current time
    #[must_use]
    pub fn created_at(mut self, timestamp: impl Into<String>) -> Self {
        self.now = Some(timestamp.into());
        self
    }

    /// Add a submitted field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.submitted.push((name.into(), value.into()));
        self
    }

    /// Add several submitted fields, in order
    #[must_use]
    pub fn fields<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.submitted
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the category
    #[must_use]
    pub fn category(self, category: impl Into<String>) -> Self {
        self.field(fields::CATEGORY, category)
    }

    /// Set the unit code
    #[must_use]
    pub fn unit_code(self, unit_code: impl Into<String>) -> Self {
        self.field(fields::UNIT_CODE, unit_code)
    }

    /// Set the description
    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        self.field(fields::DESCRIPTION, description)
    }

    /// Set the priority
    #[must_use]
    pub fn priority(self, priority: impl Into<String>) -> Self {
        self.field(fields::PRIORITY, priority)
    }

    /// Whether a field with this name has been submitted
    pub fn has_field(&self, name: &str) -> bool {
        self.submitted.iter().any(|(key, _)| key == name)
    }

    /// Submitted value of a field, if any (last one wins)
    pub fn submitted(&self, name: &str) -> Option<&str> {
        self.submitted
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        let now = self.now.unwrap_or_else(timestamp_now);
        let mut ticket = Ticket::new();
        ticket.set(fields::ID, self.id.unwrap_or_default().to_string());
        ticket.set(fields::STATUS, Status::Open.as_str());
        ticket.set(fields::CREATED_AT, now.clone());
        ticket.set(fields::UPDATED_AT, now);
        for (name, value) in self.submitted {
            ticket.set(name, value);
        }
        ticket
    }
}
