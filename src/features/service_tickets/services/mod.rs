mod assignment_service;
mod service_ticket_service;

pub use assignment_service::AssignmentService;
pub use service_ticket_service::ServiceTicketService;
