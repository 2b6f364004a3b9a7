//! Generic repository shared by every entity type.

use std::fmt;
use std::marker::PhantomData;

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, error, warn};
use uuid::Uuid;

use bookshelf_core::error::{Fault, RepositoryError};
use bookshelf_core::result::RepoResult;
use bookshelf_core::types::{BulkUpdate, Criteria, PageRequest, Patch};
use bookshelf_entity::{Entity, EntityMeta};

use super::sql::{self, QueryError};

/// Operation names carried by [`RepositoryError`].
mod op {
    pub const FIND: &str = "find";
    pub const FIND_COLLECTION: &str = "find collection of";
    pub const COUNT: &str = "count";
    pub const CREATE: &str = "create";
    pub const CREATE_MANY: &str = "create multiple";
    pub const UPDATE: &str = "update";
    pub const UPDATE_MANY: &str = "update multiple";
    pub const DELETE: &str = "delete";
    pub const DELETE_MANY: &str = "delete multiple";
}

/// CRUD, search and bulk operations over one entity type.
///
/// Reads and deletes fail as server faults; writes fail as client faults.
/// Criteria or patches naming unknown columns are always client faults.
/// Absence is never an error.
pub struct Repository<E: Entity> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<E: Entity> fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &E::NAME)
            .field("table", &E::TABLE)
            .finish()
    }
}

impl<E: Entity> Repository<E> {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// The first record matching `criteria`.
    pub async fn find_one(&self, criteria: &Criteria) -> RepoResult<Option<E>> {
        debug!(entity = E::NAME, operation = op::FIND, "Repository call");
        self.select_one(criteria)
            .await
            .map_err(|e| self.fail(Fault::Server, op::FIND, e))
    }

    /// One page of records matching `criteria` plus the total match count.
    ///
    /// Without a page request every matching record is returned unsorted.
    pub async fn find(
        &self,
        criteria: &Criteria,
        page: Option<&PageRequest>,
    ) -> RepoResult<(Vec<E>, u64)> {
        debug!(
            entity = E::NAME,
            operation = op::FIND_COLLECTION,
            page = page.and_then(|p| p.page),
            limit = page.and_then(|p| p.limit),
            "Repository call"
        );
        let result = async {
            let items = self.select(criteria, page).await?;
            let total = self.select_count(criteria).await?;
            Ok::<_, QueryError>((items, total))
        }
        .await;
        result.map_err(|e| self.fail(Fault::Server, op::FIND_COLLECTION, e))
    }

    /// Every record matching `criteria`, or every record when `None`.
    pub async fn find_without_pagination(&self, criteria: Option<&Criteria>) -> RepoResult<Vec<E>> {
        debug!(entity = E::NAME, operation = op::FIND_COLLECTION, "Repository call");
        let all = Criteria::all();
        self.select(criteria.unwrap_or(&all), None)
            .await
            .map_err(|e| self.fail(Fault::Server, op::FIND_COLLECTION, e))
    }

    /// Number of records matching `criteria`, or of all records when `None`.
    pub async fn count(&self, criteria: Option<&Criteria>) -> RepoResult<u64> {
        debug!(entity = E::NAME, operation = op::COUNT, "Repository call");
        let all = Criteria::all();
        self.select_count(criteria.unwrap_or(&all))
            .await
            .map_err(|e| self.fail(Fault::Server, op::COUNT, e))
    }

    /// Insert a new record with a fresh id and `createdAt == updatedAt == now`.
    pub async fn create(&self, draft: E::Draft) -> RepoResult<E> {
        debug!(entity = E::NAME, operation = op::CREATE, "Repository call");
        let entity = E::from_draft(EntityMeta::new(Uuid::new_v4(), Utc::now()), draft);

        let mut builder = self.insert_prefix();
        sql::push_row::<E>(&mut builder, &entity.values());
        builder.push(" RETURNING *");

        builder
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| self.fail(Fault::Client, op::CREATE, e.into()))
    }

    /// Insert every draft inside one transaction. Returns the number of rows
    /// inserted.
    ///
    /// Rows are written in multi-row statements of at most
    /// [`sql::rows_per_insert`] rows each. If any statement fails, nothing is
    /// inserted.
    pub async fn create_many(&self, drafts: Vec<E::Draft>) -> RepoResult<u64> {
        if drafts.is_empty() {
            return Ok(0);
        }
        debug!(
            entity = E::NAME,
            operation = op::CREATE_MANY,
            rows = drafts.len(),
            "Repository call"
        );

        let now = Utc::now();
        let entities: Vec<E> = drafts
            .into_iter()
            .map(|draft| E::from_draft(EntityMeta::new(Uuid::new_v4(), now), draft))
            .collect();

        let result = async {
            let mut tx = self.pool.begin().await?;
            let mut inserted = 0;
            for chunk in entities.chunks(sql::rows_per_insert::<E>()) {
                let mut builder = self.insert_prefix();
                for (i, entity) in chunk.iter().enumerate() {
                    if i > 0 {
                        builder.push(", ");
                    }
                    sql::push_row::<E>(&mut builder, &entity.values());
                }
                inserted += builder.build().execute(&mut *tx).await?.rows_affected();
            }
            tx.commit().await?;
            Ok::<_, QueryError>(inserted)
        }
        .await;
        result.map_err(|e| self.fail(Fault::Client, op::CREATE_MANY, e))
    }

    /// Apply `patch` to the record matching `criteria`.
    ///
    /// Returns `None` without writing when nothing matches.
    pub async fn update(&self, criteria: &Criteria, patch: &Patch) -> RepoResult<Option<E>> {
        debug!(
            entity = E::NAME,
            operation = op::UPDATE,
            fields = patch.entries().len(),
            "Repository call"
        );
        let result = async {
            let Some(existing) = self.select_one(criteria).await? else {
                return Ok(None);
            };
            let meta = existing.meta();
            let updated_at = Utc::now().max(meta.created_at);

            let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {}", E::TABLE));
            sql::push_set::<E>(&mut builder, patch, updated_at)?;
            builder.push(" WHERE id = ").push_bind(meta.id);
            builder.push(" RETURNING *");

            let row = builder.build_query_as::<E>().fetch_optional(&self.pool).await?;
            Ok::<_, QueryError>(row)
        }
        .await;
        result.map_err(|e| self.fail(Fault::Client, op::UPDATE, e))
    }

    /// Apply every `(criteria, patch)` pair inside one transaction.
    ///
    /// Returns the total number of affected rows. If any pair fails the whole
    /// batch is rolled back.
    pub async fn update_many(&self, updates: Vec<BulkUpdate>) -> RepoResult<u64> {
        if updates.is_empty() {
            return Ok(0);
        }
        debug!(
            entity = E::NAME,
            operation = op::UPDATE_MANY,
            pairs = updates.len(),
            "Repository call"
        );
        let result = async {
            let now = Utc::now();
            let mut tx = self.pool.begin().await?;
            let mut affected = 0;
            for update in &updates {
                let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {}", E::TABLE));
                sql::push_set::<E>(&mut builder, &update.patch, now)?;
                sql::push_where::<E>(&mut builder, &update.criteria)?;
                affected += builder.build().execute(&mut *tx).await?.rows_affected();
            }
            // Dropping `tx` on any early return above rolls the batch back.
            tx.commit().await?;
            Ok::<_, QueryError>(affected)
        }
        .await;
        result.map_err(|e| self.fail(Fault::Client, op::UPDATE_MANY, e))
    }

    /// Remove the record matching `criteria`, returning what was removed.
    pub async fn delete(&self, criteria: &Criteria) -> RepoResult<Option<E>> {
        debug!(entity = E::NAME, operation = op::DELETE, "Repository call");
        let result = async {
            let Some(existing) = self.select_one(criteria).await? else {
                return Ok(None);
            };
            sqlx::query(&format!("DELETE FROM {} WHERE id = ?", E::TABLE))
                .bind(existing.meta().id)
                .execute(&self.pool)
                .await?;
            Ok::<_, QueryError>(Some(existing))
        }
        .await;
        result.map_err(|e| self.fail(Fault::Server, op::DELETE, e))
    }

    /// Remove every record matching `criteria`. Returns whether any row was removed.
    pub async fn delete_many(&self, criteria: &Criteria) -> RepoResult<bool> {
        debug!(entity = E::NAME, operation = op::DELETE_MANY, "Repository call");
        let result = async {
            let mut builder = QueryBuilder::<Sqlite>::new(format!("DELETE FROM {}", E::TABLE));
            sql::push_where::<E>(&mut builder, criteria)?;
            let done = builder.build().execute(&self.pool).await?;
            Ok::<_, QueryError>(done.rows_affected() > 0)
        }
        .await;
        result.map_err(|e| self.fail(Fault::Server, op::DELETE_MANY, e))
    }

    async fn select_one(&self, criteria: &Criteria) -> Result<Option<E>, QueryError> {
        let mut builder = self.select_prefix();
        sql::push_where::<E>(&mut builder, criteria)?;
        builder.push(" LIMIT 1");
        Ok(builder.build_query_as::<E>().fetch_optional(&self.pool).await?)
    }

    async fn select(
        &self,
        criteria: &Criteria,
        page: Option<&PageRequest>,
    ) -> Result<Vec<E>, QueryError> {
        let mut builder = self.select_prefix();
        sql::push_where::<E>(&mut builder, criteria)?;

        if let Some(page) = page {
            let sort = page.sort_by.as_deref().and_then(E::column);
            if let Some(def) = sort {
                builder
                    .push(" ORDER BY ")
                    .push(def.column)
                    .push(" ")
                    .push(page.order.as_sql());
            }
            if let Some(limit) = page.limit {
                builder.push(" LIMIT ").push_bind(to_i64(limit));
                let skip = page.skip();
                if skip > 0 {
                    builder.push(" OFFSET ").push_bind(to_i64(skip));
                }
            }
        }

        Ok(builder.build_query_as::<E>().fetch_all(&self.pool).await?)
    }

    async fn select_count(&self, criteria: &Criteria) -> Result<u64, QueryError> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        sql::push_where::<E>(&mut builder, criteria)?;
        let total: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    fn select_prefix(&self) -> QueryBuilder<'static, Sqlite> {
        QueryBuilder::new(format!("SELECT * FROM {}", E::TABLE))
    }

    fn insert_prefix(&self) -> QueryBuilder<'static, Sqlite> {
        QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES ",
            E::TABLE,
            sql::column_list::<E>()
        ))
    }

    fn fail(&self, fault: Fault, operation: &'static str, err: QueryError) -> RepositoryError {
        let fault = if err.is_rejected_input() {
            Fault::Client
        } else {
            fault
        };
        match fault {
            Fault::Client => {
                warn!(entity = E::NAME, operation, error = %err, "Repository operation rejected");
                RepositoryError::client(E::NAME, operation, err)
            }
            Fault::Server => {
                error!(entity = E::NAME, operation, error = %err, "Repository operation failed");
                RepositoryError::server(E::NAME, operation, err)
            }
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
