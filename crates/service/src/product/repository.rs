use async_trait::async_trait;

use super::domain::{NewProduct, Product};
use crate::errors::ServiceError;

/// Repository abstraction for product persistence.
///
/// List operations never fail: a store error is logged and reported as an
/// empty list. Point lookups and mutations return a classified `ServiceError`.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all_products(&self) -> Vec<Product>;
    async fn get_all_products_by_store(&self, store: &str) -> Vec<Product>;
    /// Inserts a row; the assigned id is not returned.
    async fn add_product(&self, product: NewProduct) -> Result<(), ServiceError>;
    async fn get_by_id(&self, id: i64) -> Result<Product, ServiceError>;
    /// Fails with `NotFound` when the id is absent.
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
    /// Unconditional: an unknown id affects zero rows and still succeeds.
    async fn update_price(&self, id: i64, new_price: f64) -> Result<(), ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Ordered in-memory table. Ids are assigned as `len + 1` on insert.
    #[derive(Default)]
    pub struct MockProductRepository {
        products: Mutex<Vec<Product>>,
    }

    impl MockProductRepository {
        pub fn with_products(initial: Vec<Product>) -> Self {
            Self { products: Mutex::new(initial) }
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn get_all_products(&self) -> Vec<Product> {
            self.products.lock().unwrap().clone()
        }

        async fn get_all_products_by_store(&self, store: &str) -> Vec<Product> {
            let products = self.products.lock().unwrap();
            products.iter().filter(|p| p.store == store).cloned().collect()
        }

        async fn add_product(&self, product: NewProduct) -> Result<(), ServiceError> {
            let mut products = self.products.lock().unwrap();
            let id = products.len() as i64 + 1;
            products.push(Product {
                id,
                name: product.name,
                price: product.price,
                discount: product.discount,
                store: product.store,
            });
            Ok(())
        }

        async fn get_by_id(&self, id: i64) -> Result<Product, ServiceError> {
            let products = self.products.lock().unwrap();
            products
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("product"))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            let mut products = self.products.lock().unwrap();
            let idx = products
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| ServiceError::not_found("product"))?;
            products.remove(idx);
            Ok(())
        }

        async fn update_price(&self, id: i64, new_price: f64) -> Result<(), ServiceError> {
            let mut products = self.products.lock().unwrap();
            if let Some(p) = products.iter_mut().find(|p| p.id == id) {
                p.price = new_price;
            }
            Ok(())
        }
    }
}
