/// Message returned when an update body carries no fields
pub const EMPTY_UPDATE_MESSAGE: &str = "At least one field must be provided";
