//! Mechanics feature: the shop employees who work service tickets.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/mechanics/` | Register a mechanic |
//! | GET | `/mechanics/` | List mechanics |
//! | GET | `/mechanics/{id}` | Get a mechanic |
//! | PUT | `/mechanics/{id}` | Partially update a mechanic |
//! | DELETE | `/mechanics/{id}` | Delete a mechanic and its assignments |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::MechanicService;
