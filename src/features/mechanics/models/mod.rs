mod mechanic;

pub use mechanic::{Mechanic, UpdateMechanic, CreateMechanic};
