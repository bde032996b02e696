use models::db::connect;
use models::product;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema, Set};
use tokio::sync::OnceCell;

// Ensure the table exists only once across the entire test process
static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// Fresh connection for the current test's runtime; creates `products` on first use.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect().await?;

    SCHEMA
        .get_or_try_init(|| async {
            let backend = db.get_database_backend();
            let mut stmt = Schema::new(backend).create_table_from_entity(product::Entity);
            stmt.if_not_exists();
            db.execute(backend.build(&stmt)).await.map(|_| ())
        })
        .await?;
    Ok(db)
}

pub async fn seed(db: &DatabaseConnection, rows: Vec<product::Model>) -> Result<(), anyhow::Error> {
    let ams = rows.into_iter().map(|m| product::ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        price: Set(m.price),
        discount: Set(m.discount),
        store: Set(m.store),
    });
    product::Entity::insert_many(ams).exec_without_returning(db).await?;
    // Explicit ids bypass the sequence; move it past the seeded rows.
    db.execute_unprepared(
        "SELECT setval(pg_get_serial_sequence('products', 'id'), COALESCE(MAX(id), 0) + 1, false) FROM products",
    )
    .await?;
    Ok(())
}

pub async fn truncate(db: &DatabaseConnection) -> Result<(), anyhow::Error> {
    db.execute_unprepared("TRUNCATE TABLE products RESTART IDENTITY").await?;
    Ok(())
}
