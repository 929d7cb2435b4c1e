//! Core domain types: tickets, their identifiers and lifecycle status

mod builders;
mod id;
mod status;
mod ticket;

pub use builders::TicketBuilder;
pub use id::TicketId;
pub use status::Status;
pub use ticket::{Ticket, fields, timestamp_now};
