use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::product::{repository::ProductRepository, NewProduct, Product};

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(models::product::list(&self.db).await?)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        Ok(models::product::find(&self.db, id).await?)
    }

    async fn add(&self, product: NewProduct) -> Result<Product, ServiceError> {
        Ok(models::product::insert(&self.db, product).await?)
    }

    async fn update(&self, product: Product) -> Result<Product, ServiceError> {
        Ok(models::product::replace(&self.db, product).await?)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        models::product::delete(&self.db, id).await?;
        Ok(())
    }
}
