use std::sync::Arc;

use models::product::PRICE_SCALE;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use super::{repository::ProductRepository, NewProduct, Product};

pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than zero.";
pub const STOCK_NEGATIVE: &str = "Stock Quantity cannot be negative.";

/// Application service enforcing the product rules that must hold no matter
/// which entry point the data came through.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError> {
        let all = self.repo.get_all().await?;
        debug!(count = all.len(), "products_listed");
        Ok(all)
    }

    /// `Ok(None)` when no product has this id.
    pub async fn get_product_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        self.repo.get_by_id(id).await
    }

    /// Persist a new product; the returned value carries the assigned id.
    ///
    /// The price must be positive and representable in cents.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use rust_decimal::Decimal;
    /// use service::product::{NewProduct, ProductService, repository::memory::InMemoryProductRepository};
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::new()));
    /// let input = NewProduct { name: "Widget".into(), category: "Tools".into(), description: None, price: Decimal::new(999, 2), stock_quantity: 5 };
    /// let created = tokio_test::block_on(svc.add_product(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// ```
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: NewProduct) -> Result<Product, ServiceError> {
        if product.price <= Decimal::ZERO || product.price.normalize().scale() > PRICE_SCALE {
            return Err(ServiceError::Validation(PRICE_NOT_POSITIVE.into()));
        }
        let created = self.repo.add(product).await?;
        info!(id = created.id, "product_created");
        Ok(created)
    }

    /// Full replacement of the product with `product.id`. Existence is the caller's concern.
    #[instrument(skip(self, product), fields(id = product.id))]
    pub async fn update_product(&self, product: Product) -> Result<Product, ServiceError> {
        if product.stock_quantity < 0 {
            return Err(ServiceError::Validation(STOCK_NEGATIVE.into()));
        }
        let updated = self.repo.update(product).await?;
        info!(id = updated.id, "product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(id, "product_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repository::memory::InMemoryProductRepository;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts write calls and forwards to an in-memory store.
    #[derive(Default)]
    struct RecordingRepository {
        inner: InMemoryProductRepository,
        adds: AtomicUsize,
        updates: AtomicUsize,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl ProductRepository for RecordingRepository {
        async fn get_all(&self) -> Result<Vec<Product>, ServiceError> { self.inner.get_all().await }
        async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> { self.inner.get_by_id(id).await }
        async fn add(&self, product: NewProduct) -> Result<Product, ServiceError> {
            self.adds.fetch_add(1, Ordering::SeqCst);
            self.inner.add(product).await
        }
        async fn update(&self, product: Product) -> Result<Product, ServiceError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update(product).await
        }
        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(id).await
        }
    }

    struct BrokenRepository;

    #[async_trait]
    impl ProductRepository for BrokenRepository {
        async fn get_all(&self) -> Result<Vec<Product>, ServiceError> { Err(ServiceError::Db("Server error".into())) }
        async fn get_by_id(&self, _id: i32) -> Result<Option<Product>, ServiceError> { Err(ServiceError::Db("Server error".into())) }
        async fn add(&self, _product: NewProduct) -> Result<Product, ServiceError> { Err(ServiceError::Db("Server error".into())) }
        async fn update(&self, _product: Product) -> Result<Product, ServiceError> { Err(ServiceError::Db("Server error".into())) }
        async fn delete(&self, _id: i32) -> Result<(), ServiceError> { Err(ServiceError::Db("Server error".into())) }
    }

    fn widget(price: Decimal, stock_quantity: i32) -> NewProduct {
        NewProduct {
            name: "Widget".into(),
            category: "Tools".into(),
            description: Some("A widget".into()),
            price,
            stock_quantity,
        }
    }

    fn setup() -> (Arc<RecordingRepository>, ProductService<RecordingRepository>) {
        let repo = Arc::new(RecordingRepository::default());
        (repo.clone(), ProductService::new(repo))
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() {
        let (_, svc) = setup();
        assert!(svc.get_all_products().await.unwrap().is_empty());
        assert!(svc.get_product_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_then_get_round_trips() {
        let (_, svc) = setup();
        let input = widget(Decimal::new(999, 2), 5);
        let created = svc.add_product(input.clone()).await.unwrap();
        let found = svc.get_product_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, input.with_id(created.id));
    }

    #[tokio::test]
    async fn non_positive_price_never_reaches_repository() {
        let (repo, svc) = setup();
        for price in [Decimal::ZERO, Decimal::NEGATIVE_ONE] {
            let err = svc.add_product(widget(price, 1)).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(ref m) if m == PRICE_NOT_POSITIVE));
        }
        assert_eq!(repo.adds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sub_cent_price_never_reaches_repository() {
        let (repo, svc) = setup();
        for price in [Decimal::new(1, 3), Decimal::new(9999, 3)] {
            let err = svc.add_product(widget(price, 1)).await.unwrap_err();
            assert_eq!(err.message(), PRICE_NOT_POSITIVE);
        }
        assert_eq!(repo.adds.load(Ordering::SeqCst), 0);

        let created = svc.add_product(widget(Decimal::new(10500, 3), 1)).await.unwrap();
        assert_eq!(created.price, Decimal::new(1050, 2));
    }

    #[tokio::test]
    async fn negative_stock_never_reaches_repository() {
        let (repo, svc) = setup();
        let mut p = svc.add_product(widget(Decimal::ONE, 1)).await.unwrap();
        p.stock_quantity = -1;
        let err = svc.update_product(p).await.unwrap_err();
        assert_eq!(err.message(), STOCK_NEGATIVE);
        assert_eq!(repo.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_is_not_price_checked() {
        let (_, svc) = setup();
        let mut p = svc.add_product(widget(Decimal::ONE, 1)).await.unwrap();
        p.price = Decimal::ZERO;
        let updated = svc.update_product(p.clone()).await.unwrap();
        assert_eq!(updated, p);
    }

    #[tokio::test]
    async fn delete_forwards_even_for_unknown_ids() {
        let (repo, svc) = setup();
        svc.delete_product(404).await.unwrap();
        assert_eq!(repo.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn infrastructure_faults_propagate_unchanged() {
        let svc = ProductService::new(Arc::new(BrokenRepository));
        let err = svc.get_all_products().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(ref m) if m == "Server error"));
        assert!(svc.get_product_by_id(1).await.is_err());
        assert!(svc.add_product(widget(Decimal::ONE, 1)).await.is_err());
        assert!(svc.delete_product(1).await.is_err());
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() {
        let repo: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
        let svc: ProductService<dyn ProductRepository> = ProductService::new(repo);
        let created = svc.add_product(widget(Decimal::ONE, 0)).await.unwrap();
        assert_eq!(created.id, 1);
    }
}
