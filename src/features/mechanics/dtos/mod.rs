mod mechanic_dto;

pub use mechanic_dto::{CreateMechanicDto, MechanicResponseDto, UpdateMechanicDto};
