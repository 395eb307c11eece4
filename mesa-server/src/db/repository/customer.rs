//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use sqlx::{Sqlite, SqlitePool};

const CUSTOMER_SELECT: &str =
    "SELECT id, name, email, phone, notes, registered_at FROM customer";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY name COLLATE NOCASE, id");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(
    conn: impl sqlx::Executor<'_, Database = Sqlite>,
    id: i64,
) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE email = ? COLLATE NOCASE LIMIT 1");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// `LIKE` wildcards in user input match themselves
fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Case-insensitive substring match over name, email and phone
pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Customer>> {
    let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
    let sql = format!(
        "{CUSTOMER_SELECT} WHERE LOWER(name) LIKE ?1 ESCAPE '\\' OR LOWER(email) LIKE ?1 ESCAPE '\\' OR phone LIKE ?1 ESCAPE '\\' ORDER BY name COLLATE NOCASE, id"
    );
    let rows = sqlx::query_as::<_, Customer>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO customer (name, email, phone, notes, registered_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.notes)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CustomerUpdate) -> RepoResult<Customer> {
    let rows = sqlx::query(
        "UPDATE customer SET name = COALESCE(?1, name), email = COALESCE(?2, email), phone = COALESCE(?3, phone), notes = COALESCE(?4, notes) WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.notes)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

/// Delete a customer unless it still holds an active reservation.
///
/// Returns `false` when nothing was deleted (missing, or still active).
pub async fn delete_if_idle(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM customer WHERE id = ?1 AND NOT EXISTS (SELECT 1 FROM reservation WHERE customer_id = ?1 AND status IN ('pendiente', 'confirmada'))",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::*;

    fn payload(name: &str, email: &str) -> CustomerCreate {
        CustomerCreate {
            name: name.into(),
            email: email.into(),
            phone: "612345678".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create(&pool, payload("Lucía Gómez", "lucia@example.com"))
            .await
            .unwrap();
        assert!(created.registered_at > 0);

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.email, "lucia@example.com");
        assert!(find_by_id(&pool, created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_case_insensitively() {
        let pool = test_pool().await;
        create(&pool, payload("Pedro", "pedro@example.com"))
            .await
            .unwrap();
        let err = create(&pool, payload("Otro Pedro", "PEDRO@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        assert!(
            find_by_email(&pool, "Pedro@Example.com")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_search_matches_name_email_and_phone() {
        let pool = test_pool().await;
        create(&pool, payload("María López", "maria@example.com"))
            .await
            .unwrap();
        create(&pool, payload("Juan Pérez", "jp@correo.es"))
            .await
            .unwrap();

        assert_eq!(search(&pool, "maría").await.unwrap().len(), 1);
        assert_eq!(search(&pool, "CORREO").await.unwrap().len(), 1);
        assert_eq!(search(&pool, "612345").await.unwrap().len(), 2);
        assert!(search(&pool, "nadie").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let pool = test_pool().await;
        create(&pool, payload("María López", "maria@example.com"))
            .await
            .unwrap();
        create(&pool, payload("Juan Pérez", "juan_perez@example.com"))
            .await
            .unwrap();

        assert!(search(&pool, "%").await.unwrap().is_empty());
        assert!(search(&pool, "\\").await.unwrap().is_empty());
        let hits = search(&pool, "n_p").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].email, "juan_perez@example.com");
        assert!(search(&pool, "a_l").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_partial_and_missing() {
        let pool = test_pool().await;
        let c = create(&pool, payload("Ana Ruiz", "ana@example.com"))
            .await
            .unwrap();
        let updated = update(
            &pool,
            c.id,
            CustomerUpdate {
                phone: Some("699999999".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.phone, "699999999");
        assert_eq!(updated.name, "Ana Ruiz");

        let err = update(&pool, 999, CustomerUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_respects_active_reservations() {
        let pool = test_pool().await;
        let customer = insert_customer(&pool, "Carlos", "carlos@example.com").await;
        let table = insert_table(&pool, 1, 4).await;
        let r = insert_reservation(&pool, customer, table, 1_000_000, 2, "pendiente").await;

        assert!(!delete_if_idle(&pool, customer).await.unwrap());

        sqlx::query("UPDATE reservation SET status = 'completada' WHERE id = ?")
            .bind(r)
            .execute(&pool)
            .await
            .unwrap();
        assert!(delete_if_idle(&pool, customer).await.unwrap());
        assert!(find_by_id(&pool, customer).await.unwrap().is_none());

        // history survives the customer
        let kept: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservation")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(kept, 1);
    }
}
