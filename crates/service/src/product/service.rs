use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{NewProduct, Product, ProductCreate};
use super::repository::ProductRepository;
use crate::errors::ServiceError;

pub const MIN_DISCOUNT: f64 = 0.0;
pub const MAX_DISCOUNT: f64 = 70.0;

/// Product business service independent of web framework
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_all_products(&self) -> Vec<Product> {
        self.repo.get_all_products().await
    }

    pub async fn get_all_products_by_store(&self, store: &str) -> Vec<Product> {
        self.repo.get_all_products_by_store(store).await
    }

    /// Validate the discount and persist a new product.
    ///
    /// # Examples
    /// ```
    /// use service::product::{ProductService, repository::mock::MockProductRepository};
    /// use service::product::domain::ProductCreate;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(MockProductRepository::default()));
    /// let input = ProductCreate { name: "Kupa".into(), price: 100.0, discount: 0.0, store: "Kırtasiye Merkezi".into() };
    /// tokio_test::block_on(svc.add(input)).unwrap();
    /// assert_eq!(tokio_test::block_on(svc.get_all_products())[0].id, 1);
    /// ```
    #[instrument(skip(self, create), fields(name = %create.name, store = %create.store))]
    pub async fn add(&self, create: ProductCreate) -> Result<(), ServiceError> {
        if !(MIN_DISCOUNT..=MAX_DISCOUNT).contains(&create.discount) {
            debug!(discount = create.discount, "discount out of range");
            return Err(ServiceError::Validation("invalid discount".into()));
        }
        self.repo.add_product(NewProduct::from(create)).await?;
        info!("product_created");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, ServiceError> { self.repo.get_by_id(id).await }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> { self.repo.delete_by_id(id).await }

    #[instrument(skip(self))]
    pub async fn update_price(&self, id: i64, new_price: f64) -> Result<(), ServiceError> {
        self.repo.update_price(id, new_price).await
    }
}
