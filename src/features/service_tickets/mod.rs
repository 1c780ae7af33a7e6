//! Service tickets feature: units of repair work and the mechanics assigned to them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/service-tickets/` | Open a ticket |
//! | GET | `/service-tickets/` | List tickets with mechanics |
//! | GET | `/service-tickets/{ticket_id}` | Get a ticket |
//! | PUT | `/service-tickets/{ticket_id}/assign-mechanic/{mechanic_id}` | Assign a mechanic |
//! | PUT | `/service-tickets/{ticket_id}/remove-mechanic/{mechanic_id}` | Remove a mechanic |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{AssignmentService, ServiceTicketService};
