mod service_ticket_handler;

pub use service_ticket_handler::*;
