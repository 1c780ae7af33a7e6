use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::core::error::{AppError, Result};
use crate::features::mechanics::models::{CreateMechanic, Mechanic, UpdateMechanic};
use crate::features::service_tickets::models::{
    AssignedMechanic, Assignment, AssignmentOutcome, CreateServiceTicket, ServiceTicket,
};
use crate::modules::persistence::traits::{AssignmentStore, MechanicStore, ServiceTicketStore};

const MECHANIC_COLUMNS: &str = "id, name, email, phone, created_at, updated_at";
const TICKET_COLUMNS: &str = "id, description, status, service_date, created_at, updated_at";

/// PostgreSQL backend; schema lives in `./migrations`
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Locks both rows for the rest of the transaction so a concurrent delete
    /// cannot slip between the existence check and the join-table write.
    async fn lock_pair(
        tx: &mut Transaction<'static, Postgres>,
        ticket_id: i64,
        mechanic_id: i64,
    ) -> Result<Option<AssignmentOutcome>> {
        let ticket: Option<i64> =
            sqlx::query_scalar("SELECT id FROM service_tickets WHERE id = $1 FOR SHARE")
                .bind(ticket_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to lock service ticket {}: {:?}", ticket_id, e);
                    AppError::Database(e)
                })?;
        if ticket.is_none() {
            return Ok(Some(AssignmentOutcome::TicketMissing));
        }

        let mechanic: Option<i64> =
            sqlx::query_scalar("SELECT id FROM mechanics WHERE id = $1 FOR SHARE")
                .bind(mechanic_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to lock mechanic {}: {:?}", mechanic_id, e);
                    AppError::Database(e)
                })?;
        if mechanic.is_none() {
            return Ok(Some(AssignmentOutcome::MechanicMissing));
        }

        Ok(None)
    }
}

/// Turns a unique-email violation into a conflict, everything else into a database error
fn mechanic_write_error(e: sqlx::Error, action: &str, email: Option<&str>) -> AppError {
    let unique_violation = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if unique_violation {
        let email = email.unwrap_or_default();
        return AppError::Conflict(format!("Email '{}' is already registered", email));
    }

    tracing::error!("Failed to {}: {:?}", action, e);
    AppError::Database(e)
}

#[async_trait]
impl MechanicStore for PostgresStore {
    async fn create_mechanic(&self, data: CreateMechanic) -> Result<Mechanic> {
        let sql = format!(
            "INSERT INTO mechanics (name, email, phone) VALUES ($1, $2, $3) RETURNING {}",
            MECHANIC_COLUMNS
        );
        sqlx::query_as::<_, Mechanic>(&sql)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| mechanic_write_error(e, "create mechanic", Some(&data.email)))
    }

    async fn list_mechanics(&self) -> Result<Vec<Mechanic>> {
        let sql = format!("SELECT {} FROM mechanics ORDER BY id", MECHANIC_COLUMNS);
        sqlx::query_as::<_, Mechanic>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list mechanics: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_mechanic(&self, id: i64) -> Result<Option<Mechanic>> {
        let sql = format!("SELECT {} FROM mechanics WHERE id = $1", MECHANIC_COLUMNS);
        sqlx::query_as::<_, Mechanic>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get mechanic {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn update_mechanic(&self, id: i64, changes: UpdateMechanic) -> Result<Option<Mechanic>> {
        let sql = format!(
            r#"
            UPDATE mechanics
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = CASE WHEN $5 THEN $4 ELSE phone END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            MECHANIC_COLUMNS
        );
        sqlx::query_as::<_, Mechanic>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(changes.phone.clone().flatten())
            .bind(changes.phone.is_some())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| mechanic_write_error(e, "update mechanic", changes.email.as_deref()))
    }

    async fn delete_mechanic(&self, id: i64) -> Result<bool> {
        // ticket_mechanic rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM mechanics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete mechanic {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ServiceTicketStore for PostgresStore {
    async fn create_ticket(&self, data: CreateServiceTicket) -> Result<ServiceTicket> {
        let sql = format!(
            "INSERT INTO service_tickets (description, status, service_date) VALUES ($1, $2, $3) RETURNING {}",
            TICKET_COLUMNS
        );
        sqlx::query_as::<_, ServiceTicket>(&sql)
            .bind(&data.description)
            .bind(data.status)
            .bind(data.service_date)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create service ticket: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_tickets(&self) -> Result<Vec<ServiceTicket>> {
        let sql = format!("SELECT {} FROM service_tickets ORDER BY id", TICKET_COLUMNS);
        sqlx::query_as::<_, ServiceTicket>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list service tickets: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<ServiceTicket>> {
        let sql = format!("SELECT {} FROM service_tickets WHERE id = $1", TICKET_COLUMNS);
        sqlx::query_as::<_, ServiceTicket>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get service ticket {}: {:?}", id, e);
                AppError::Database(e)
            })
    }
}

#[async_trait]
impl AssignmentStore for PostgresStore {
    async fn assign_mechanic(
        &self,
        ticket_id: i64,
        mechanic_id: i64,
    ) -> Result<AssignmentOutcome> {
        let mut tx = self.begin().await?;

        if let Some(missing) = Self::lock_pair(&mut tx, ticket_id, mechanic_id).await? {
            return Ok(missing);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO ticket_mechanic (ticket_id, mechanic_id)
            VALUES ($1, $2)
            ON CONFLICT (ticket_id, mechanic_id) DO NOTHING
            "#,
        )
        .bind(ticket_id)
        .bind(mechanic_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to assign mechanic {} to ticket {}: {:?}",
                mechanic_id,
                ticket_id,
                e
            );
            AppError::Database(e)
        })?;

        tx.commit().await?;

        Ok(if result.rows_affected() > 0 {
            AssignmentOutcome::Applied
        } else {
            AssignmentOutcome::Unchanged
        })
    }

    async fn remove_mechanic(
        &self,
        ticket_id: i64,
        mechanic_id: i64,
    ) -> Result<AssignmentOutcome> {
        let mut tx = self.begin().await?;

        if let Some(missing) = Self::lock_pair(&mut tx, ticket_id, mechanic_id).await? {
            return Ok(missing);
        }

        let result =
            sqlx::query("DELETE FROM ticket_mechanic WHERE ticket_id = $1 AND mechanic_id = $2")
                .bind(ticket_id)
                .bind(mechanic_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to remove mechanic {} from ticket {}: {:?}",
                        mechanic_id,
                        ticket_id,
                        e
                    );
                    AppError::Database(e)
                })?;

        tx.commit().await?;

        Ok(if result.rows_affected() > 0 {
            AssignmentOutcome::Applied
        } else {
            AssignmentOutcome::Unchanged
        })
    }

    async fn mechanics_for_tickets(&self, ticket_ids: &[i64]) -> Result<Vec<AssignedMechanic>> {
        if ticket_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, AssignedMechanic>(
            r#"
            SELECT tm.ticket_id, tm.assigned_at, m.id, m.name, m.email, m.phone, m.created_at, m.updated_at
            FROM ticket_mechanic tm
            JOIN mechanics m ON m.id = tm.mechanic_id
            WHERE tm.ticket_id = ANY($1)
            ORDER BY tm.ticket_id, m.id
            "#,
        )
        .bind(ticket_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load mechanics for tickets: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn assignments_for_mechanics(&self, mechanic_ids: &[i64]) -> Result<Vec<Assignment>> {
        if mechanic_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Assignment>(
            r#"
            SELECT ticket_id, mechanic_id
            FROM ticket_mechanic
            WHERE mechanic_id = ANY($1)
            ORDER BY mechanic_id, ticket_id
            "#,
        )
        .bind(mechanic_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load assignments for mechanics: {:?}", e);
            AppError::Database(e)
        })
    }
}

/// Runs against the database in `DATABASE_URL`:
/// `cargo test -- --ignored postgres`
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::run_migrations;
    use crate::features::service_tickets::models::TicketStatus;

    async fn store() -> PostgresStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&url).await.expect("failed to connect");
        run_migrations(&pool).await.expect("failed to run migrations");
        PostgresStore::new(pool)
    }

    /// Tests share one database, so every mechanic gets its own email
    fn create_mechanic(phone: Option<&str>) -> CreateMechanic {
        CreateMechanic {
            name: "Sam".to_string(),
            email: format!("{}@shop.test", uuid::Uuid::now_v7()),
            phone: phone.map(str::to_string),
        }
    }

    fn create_ticket() -> CreateServiceTicket {
        CreateServiceTicket {
            description: "brake pads".to_string(),
            status: TicketStatus::default(),
            service_date: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database in DATABASE_URL"]
    async fn test_postgres_duplicate_email_conflicts() {
        let store = store().await;
        let first = store.create_mechanic(create_mechanic(None)).await.unwrap();
        let second = store.create_mechanic(create_mechanic(None)).await.unwrap();

        let duplicate = CreateMechanic {
            email: first.email.clone(),
            ..create_mechanic(None)
        };
        let err = store.create_mechanic(duplicate).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let steal = UpdateMechanic {
            email: Some(first.email.clone()),
            ..Default::default()
        };
        let err = store.update_mechanic(second.id, steal).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database in DATABASE_URL"]
    async fn test_postgres_partial_update_and_phone_clear() {
        let store = store().await;
        let mechanic = store
            .create_mechanic(create_mechanic(Some("555-0100")))
            .await
            .unwrap();

        let renamed = store
            .update_mechanic(
                mechanic.id,
                UpdateMechanic {
                    name: Some("Alex".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Alex");
        assert_eq!(renamed.phone.as_deref(), Some("555-0100"));

        let cleared = store
            .update_mechanic(
                mechanic.id,
                UpdateMechanic {
                    phone: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.phone, None);
        assert_eq!(cleared.name, "Alex");
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database in DATABASE_URL"]
    async fn test_postgres_assign_remove_and_cascade() {
        let store = store().await;
        let ticket = store.create_ticket(create_ticket()).await.unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        let mechanic = store.create_mechanic(create_mechanic(None)).await.unwrap();

        assert_eq!(
            store.assign_mechanic(ticket.id, mechanic.id).await.unwrap(),
            AssignmentOutcome::Applied
        );
        assert_eq!(
            store.assign_mechanic(ticket.id, mechanic.id).await.unwrap(),
            AssignmentOutcome::Unchanged
        );

        let rows = store.mechanics_for_tickets(&[ticket.id]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticket_id, ticket.id);
        assert_eq!(rows[0].mechanic, mechanic);

        let assignments = store.assignments_for_mechanics(&[mechanic.id]).await.unwrap();
        assert_eq!(
            assignments,
            vec![Assignment {
                ticket_id: ticket.id,
                mechanic_id: mechanic.id
            }]
        );

        assert_eq!(
            store.remove_mechanic(ticket.id, mechanic.id).await.unwrap(),
            AssignmentOutcome::Applied
        );
        assert_eq!(
            store.remove_mechanic(ticket.id, mechanic.id).await.unwrap(),
            AssignmentOutcome::Unchanged
        );

        store.assign_mechanic(ticket.id, mechanic.id).await.unwrap();
        assert!(store.delete_mechanic(mechanic.id).await.unwrap());
        assert!(store
            .mechanics_for_tickets(&[ticket.id])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database in DATABASE_URL"]
    async fn test_postgres_missing_side_reported() {
        let store = store().await;
        let ticket = store.create_ticket(create_ticket()).await.unwrap();
        let mechanic = store.create_mechanic(create_mechanic(None)).await.unwrap();

        assert_eq!(
            store.assign_mechanic(-1, mechanic.id).await.unwrap(),
            AssignmentOutcome::TicketMissing
        );
        assert_eq!(
            store.remove_mechanic(ticket.id, -1).await.unwrap(),
            AssignmentOutcome::MechanicMissing
        );
    }
}
