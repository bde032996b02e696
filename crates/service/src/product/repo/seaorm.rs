use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{error, info, warn};

use models::product::{self, Entity as ProductEntity};

use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product};
use crate::product::repository::ProductRepository;

/// Postgres-backed repository over the `products` table.
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Hand the pool back, e.g. to inspect a mock connection's statement log.
    pub fn into_inner(self) -> DatabaseConnection { self.db }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn get_all_products(&self) -> Vec<Product> {
        match ProductEntity::find().all(&self.db).await {
            Ok(rows) => rows.into_iter().map(Product::from).collect(),
            Err(e) => {
                error!(error = %e, "error while getting all products");
                Vec::new()
            }
        }
    }

    async fn get_all_products_by_store(&self, store: &str) -> Vec<Product> {
        let res = ProductEntity::find()
            .filter(product::Column::Store.eq(store))
            .all(&self.db)
            .await;
        match res {
            Ok(rows) => rows.into_iter().map(Product::from).collect(),
            Err(e) => {
                error!(error = %e, store, "error while getting products by store");
                Vec::new()
            }
        }
    }

    async fn add_product(&self, p: NewProduct) -> Result<(), ServiceError> {
        let am = product::ActiveModel {
            id: NotSet,
            name: Set(p.name),
            price: Set(p.price),
            discount: Set(p.discount),
            store: Set(p.store),
        };
        let rows = ProductEntity::insert(am)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to add new product");
                ServiceError::from(e)
            })?;
        info!(rows_affected = rows, "product added");
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, ServiceError> {
        let found = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, id, "error while getting product by id");
                ServiceError::from(e)
            })?;
        found.map(Product::from).ok_or_else(|| ServiceError::not_found("product"))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        // Existence check and delete are separate round trips.
        self.get_by_id(id).await?;
        ProductEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, id, "error while deleting product");
                ServiceError::from(e)
            })?;
        info!(id, "product deleted");
        Ok(())
    }

    async fn update_price(&self, id: i64, new_price: f64) -> Result<(), ServiceError> {
        let res = ProductEntity::update_many()
            .col_expr(product::Column::Price, Expr::value(new_price))
            .filter(product::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, id, "error while updating product price");
                ServiceError::from(e)
            })?;
        if res.rows_affected == 0 {
            warn!(id, "update_price matched no product");
        } else {
            info!(id, new_price, "product price updated");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Transaction};

    fn row(id: i64, name: &str, price: f64, discount: f64, store: &str) -> product::Model {
        product::Model { id, name: name.into(), price, discount, store: store.into() }
    }

    fn fixtures() -> Vec<product::Model> {
        vec![
            row(1, "AirFryer", 3000.0, 22.0, "ABC TECH"),
            row(2, "Ütü", 1500.0, 10.0, "ABC TECH"),
            row(3, "Çamaşır Makinesi", 10000.0, 15.0, "ABC TECH"),
            row(4, "Lambader", 2000.0, 0.0, "Dekorasyon Sarayı"),
        ]
    }

    fn mock() -> MockDatabase { MockDatabase::new(DatabaseBackend::Postgres) }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult { last_insert_id: 0, rows_affected }
    }

    #[tokio::test]
    async fn get_all_maps_every_row() {
        let db = mock().append_query_results([fixtures()]).into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let all = repo.get_all_products().await;
        assert_eq!(all.len(), 4);
        assert_eq!(all[3], Product { id: 4, name: "Lambader".into(), price: 2000.0, discount: 0.0, store: "Dekorasyon Sarayı".into() });
    }

    #[tokio::test]
    async fn list_query_failure_yields_empty() {
        let db = mock()
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        assert!(repo.get_all_products().await.is_empty());
        assert!(repo.get_all_products_by_store("ABC TECH").await.is_empty());
    }

    #[tokio::test]
    async fn get_by_store_returns_filtered_rows() {
        let abc: Vec<_> = fixtures().into_iter().filter(|m| m.store == "ABC TECH").collect();
        let db = mock().append_query_results([abc]).into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let found = repo.get_all_products_by_store("ABC TECH").await;
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|p| p.store == "ABC TECH"));

        let log = repo.into_inner().into_transaction_log();
        assert_eq!(
            log,
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "products"."id", "products"."name", "products"."price", "products"."discount", "products"."store" FROM "products" WHERE "products"."store" = $1"#,
                ["ABC TECH".into()],
            )]
        );
    }

    #[tokio::test]
    async fn get_by_id_found_and_missing() {
        let db = mock()
            .append_query_results([vec![fixtures().remove(0)]])
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let p = repo.get_by_id(1).await.unwrap();
        assert_eq!(p.name, "AirFryer");
        assert_eq!(p.price, 3000.0);

        let err = repo.get_by_id(5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_by_id_query_error_is_persistence() {
        let db = mock().append_query_errors([DbErr::Custom("scan failed".into())]).into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let err = repo.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Persistence(_)));
    }

    #[tokio::test]
    async fn add_product_inserts_and_reports_failure() {
        let db = mock()
            .append_exec_results([exec(1)])
            .append_exec_errors([DbErr::Custom("insert rejected".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);
        let kupa = NewProduct { name: "Kupa".into(), price: 100.0, discount: 0.0, store: "Kırtasiye Merkezi".into() };

        repo.add_product(kupa.clone()).await.unwrap();
        let err = repo.add_product(kupa).await.unwrap_err();
        assert!(matches!(err, ServiceError::Persistence(ref m) if m.contains("insert rejected")));
    }

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let db = mock()
            .append_query_results([vec![fixtures().remove(0)]])
            .append_exec_results([exec(1)])
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        repo.delete_by_id(1).await.unwrap();
        let err = repo.delete_by_id(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_statement_failure_is_persistence() {
        let db = mock()
            .append_query_results([vec![fixtures().remove(0)]])
            .append_exec_errors([DbErr::Custom("lock timeout".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        let err = repo.delete_by_id(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Persistence(_)));
    }

    #[tokio::test]
    async fn update_price_succeeds_even_without_match() {
        let db = mock()
            .append_exec_results([exec(1), exec(0)])
            .append_exec_errors([DbErr::Custom("update failed".into())])
            .into_connection();
        let repo = SeaOrmProductRepository::new(db);

        repo.update_price(1, 4000.0).await.unwrap();
        repo.update_price(999, 4000.0).await.unwrap();
        let err = repo.update_price(1, 4000.0).await.unwrap_err();
        assert!(matches!(err, ServiceError::Persistence(_)));

        // Only the price column is written, whether or not the id exists.
        let update = |id: i64| {
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"UPDATE "products" SET "price" = $1 WHERE "products"."id" = $2"#,
                [4000.0f64.into(), id.into()],
            )
        };
        let log = repo.into_inner().into_transaction_log();
        assert_eq!(log, [update(1), update(999), update(1)]);
    }

    /// Runs against a live Postgres; skipped without `DATABASE_URL` or with `SKIP_DB_TESTS`.
    #[tokio::test]
    async fn live_postgres_crud() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
            return Ok(());
        }
        let db = crate::test_support::get_db().await?;
        crate::test_support::truncate(&db).await?;
        crate::test_support::seed(&db, fixtures()).await?;
        let repo = SeaOrmProductRepository::new(crate::test_support::get_db().await?);

        let mut all = repo.get_all_products().await;
        all.sort_by_key(|p| p.id);
        let expected: Vec<Product> = fixtures().into_iter().map(Product::from).collect();
        assert_eq!(all, expected);

        let mut abc = repo.get_all_products_by_store("ABC TECH").await;
        abc.sort_by_key(|p| p.id);
        assert_eq!(abc, expected[..3].to_vec());

        assert_eq!(repo.get_by_id(1).await?, expected[0]);
        assert!(matches!(repo.get_by_id(5).await, Err(ServiceError::NotFound(_))));

        repo.update_price(1, 4000.0).await?;
        let updated = repo.get_by_id(1).await?;
        assert_eq!(updated.price, 4000.0);
        assert_eq!(updated.discount, 22.0);
        assert_eq!(updated.store, "ABC TECH");
        repo.update_price(999, 1.0).await?;
        assert_eq!(repo.get_all_products().await.len(), 4);

        repo.delete_by_id(1).await?;
        assert!(matches!(repo.get_by_id(1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.delete_by_id(1).await, Err(ServiceError::NotFound(_))));

        crate::test_support::truncate(&db).await?;
        repo.add_product(NewProduct { name: "Kupa".into(), price: 100.0, discount: 0.0, store: "Kırtasiye Merkezi".into() }).await?;
        let after = repo.get_all_products().await;
        assert_eq!(after, vec![Product { id: 1, name: "Kupa".into(), price: 100.0, discount: 0.0, store: "Kırtasiye Merkezi".into() }]);

        crate::test_support::truncate(&db).await?;
        Ok(())
    }
}
