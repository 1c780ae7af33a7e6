mod mechanic_handler;

pub use mechanic_handler::*;
