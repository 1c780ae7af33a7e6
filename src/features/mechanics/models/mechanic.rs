use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for mechanic
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Mechanic {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new mechanic
#[derive(Debug, Clone)]
pub struct CreateMechanic {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Partial update, `None` leaves the column untouched.
/// `phone: Some(None)` clears the stored number.
#[derive(Debug, Clone, Default)]
pub struct UpdateMechanic {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
}

impl UpdateMechanic {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    pub fn apply_to(self, mechanic: &mut Mechanic) {
        if let Some(name) = self.name {
            mechanic.name = name;
        }
        if let Some(email) = self.email {
            mechanic.email = email;
        }
        if let Some(phone) = self.phone {
            mechanic.phone = phone;
        }
    }
}
