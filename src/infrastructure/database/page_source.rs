//! `PageSource` over a SeaORM select

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, Select};

use super::db_err;
use crate::shared::errors::DomainError;
use crate::shared::PageSource;

/// An already filtered and ordered `Select<E>`, counted and sliced in the
/// database, with each row mapped into a domain value.
pub struct SelectPageSource<'a, E, T>
where
    E: EntityTrait,
{
    db: &'a DatabaseConnection,
    select: Select<E>,
    map: fn(E::Model) -> T,
}

impl<'a, E, T> SelectPageSource<'a, E, T>
where
    E: EntityTrait,
{
    pub fn new(db: &'a DatabaseConnection, select: Select<E>, map: fn(E::Model) -> T) -> Self {
        Self { db, select, map }
    }
}

#[async_trait]
impl<E, T> PageSource for SelectPageSource<'_, E, T>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    T: Send,
{
    type Item = T;

    async fn count(&self) -> Result<u64, DomainError> {
        self.select.clone().count(self.db).await.map_err(db_err)
    }

    async fn fetch_range(&self, skip: u64, take: u64) -> Result<Vec<T>, DomainError> {
        let models = self
            .select
            .clone()
            .offset(skip)
            .limit(take)
            .all(self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(self.map).collect())
    }
}
