use async_trait::async_trait;

use crate::errors::ServiceError;
use super::{NewProduct, Product};

/// Storage capability for products. Failures surface as [`ServiceError::Db`].
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    /// Persist and return the product with its assigned id.
    async fn add(&self, product: NewProduct) -> Result<Product, ServiceError>;
    /// Replace the stored row with the same id.
    async fn update(&self, product: Product) -> Result<Product, ServiceError>;
    /// Unknown ids are not an error.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    struct Table {
        rows: BTreeMap<i32, Product>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        table: RwLock<Table>,
    }

    impl InMemoryProductRepository {
        pub fn new() -> Self { Self::default() }

        pub async fn len(&self) -> usize {
            self.table.read().await.rows.len()
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
            Ok(self.table.read().await.rows.values().cloned().collect())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
            Ok(self.table.read().await.rows.get(&id).cloned())
        }

        async fn add(&self, product: NewProduct) -> Result<Product, ServiceError> {
            let mut table = self.table.write().await;
            table.last_id += 1;
            let created = product.with_id(table.last_id);
            table.rows.insert(created.id, created.clone());
            Ok(created)
        }

        async fn update(&self, product: Product) -> Result<Product, ServiceError> {
            let mut table = self.table.write().await;
            match table.rows.get_mut(&product.id) {
                Some(row) => {
                    *row = product.clone();
                    Ok(product)
                }
                None => Err(ServiceError::Db(format!("product {} does not exist", product.id))),
            }
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.table.write().await.rows.remove(&id);
            Ok(())
        }
    }

}
