pub mod mechanics;
pub mod service_tickets;
