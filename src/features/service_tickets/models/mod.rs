mod assignment;
mod service_ticket;

pub use assignment::{AssignedMechanic, Assignment, AssignmentOutcome};
pub use service_ticket::{CreateServiceTicket, ServiceTicket, TicketStatus};
