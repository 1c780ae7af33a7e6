mod mechanic_service;

pub use mechanic_service::MechanicService;
