#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use fake::{faker::name::en::Name, Fake};

#[cfg(test)]
use crate::core::app::{api_routes, AppServices};
#[cfg(test)]
use crate::features::mechanics::dtos::CreateMechanicDto;
#[cfg(test)]
use crate::features::service_tickets::dtos::CreateServiceTicketDto;
#[cfg(test)]
use crate::modules::persistence::{MemoryStore, ShopStore};

#[cfg(test)]
pub fn test_store() -> Arc<dyn ShopStore> {
    Arc::new(MemoryStore::new())
}

/// HTTP server over the full route table, backed by a fresh in-memory store
#[cfg(test)]
pub fn test_server() -> TestServer {
    let services = AppServices::new(test_store());
    TestServer::new(api_routes(&services)).expect("failed to start test server")
}

#[cfg(test)]
pub fn mechanic_dto(name: &str, email: &str) -> CreateMechanicDto {
    CreateMechanicDto {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
    }
}

/// Mechanic with a generated name; `n` keeps the email unique
#[cfg(test)]
pub fn fake_mechanic_dto(n: usize) -> CreateMechanicDto {
    let name: String = Name().fake();
    mechanic_dto(&name, &format!("mechanic{}@shop.test", n))
}

#[cfg(test)]
pub fn ticket_dto(description: &str) -> CreateServiceTicketDto {
    CreateServiceTicketDto {
        description: description.to_string(),
        status: None,
        service_date: None,
    }
}
