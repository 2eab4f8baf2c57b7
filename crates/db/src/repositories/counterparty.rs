//! Client and supplier repository.

use chrono::Utc;
use fidu_shared::types::{CounterpartyId, PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{counterparties, documents, sea_orm_active_enums::CounterpartyKind};

/// Error types for counterparty operations.
#[derive(Debug, thiserror::Error)]
pub enum CounterpartyError {
    /// Counterparty not found.
    #[error("Counterparty not found: {0}")]
    NotFound(Uuid),

    /// Name is blank.
    #[error("Counterparty name cannot be empty")]
    EmptyName,

    /// Documents still reference the counterparty.
    #[error("Counterparty {id} has {documents} document(s) and cannot be deleted")]
    InUse {
        /// Counterparty ID.
        id: Uuid,
        /// Number of referencing documents.
        documents: u64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a client or supplier.
#[derive(Debug, Clone)]
pub struct CreateCounterpartyInput {
    /// Client or supplier.
    pub kind: CounterpartyKind,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Input for updating a counterparty. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCounterpartyInput {
    /// New name.
    pub name: Option<String>,
    /// New email; `Some(None)` clears it.
    pub email: Option<Option<String>>,
    /// New address; `Some(None)` clears it.
    pub address: Option<Option<String>>,
    /// New notes; `Some(None)` clears them.
    pub notes: Option<Option<String>>,
}

/// Counterparty repository.
#[derive(Debug, Clone)]
pub struct CounterpartyRepository {
    db: DatabaseConnection,
}

impl CounterpartyRepository {
    /// Creates a new counterparty repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a client or supplier.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the insert fails.
    pub async fn create(
        &self,
        input: CreateCounterpartyInput,
    ) -> Result<counterparties::Model, CounterpartyError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(CounterpartyError::EmptyName);
        }

        let now = Utc::now().into();
        let model = counterparties::ActiveModel {
            id: Set(CounterpartyId::new().into_inner()),
            kind: Set(input.kind),
            name: Set(name),
            email: Set(input.email),
            address: Set(input.address),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(counterparty_id = %model.id, kind = ?model.kind, "counterparty created");
        Ok(model)
    }

    /// Finds a counterparty by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such counterparty exists.
    pub async fn find_by_id(&self, id: Uuid) -> Result<counterparties::Model, CounterpartyError> {
        counterparties::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CounterpartyError::NotFound(id))
    }

    /// Lists counterparties of one kind, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        kind: CounterpartyKind,
        page: &PageRequest,
    ) -> Result<PageResponse<counterparties::Model>, CounterpartyError> {
        let page = page.clamped();
        let query = counterparties::Entity::find().filter(counterparties::Column::Kind.eq(kind));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_asc(counterparties::Column::Name)
            .order_by_asc(counterparties::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Updates contact details.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `EmptyName`, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCounterpartyInput,
    ) -> Result<counterparties::Model, CounterpartyError> {
        let existing = self.find_by_id(id).await?;
        let mut active: counterparties::ActiveModel = existing.into();

        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CounterpartyError::EmptyName);
            }
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a counterparty that no document references.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InUse`, or a database error.
    pub async fn delete(&self, id: Uuid) -> Result<(), CounterpartyError> {
        let existing = self.find_by_id(id).await?;

        let document_count = documents::Entity::find()
            .filter(documents::Column::CounterpartyId.eq(id))
            .count(&self.db)
            .await?;
        if document_count > 0 {
            return Err(CounterpartyError::InUse {
                id,
                documents: document_count,
            });
        }

        counterparties::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;

        info!(counterparty_id = %id, "counterparty deleted");
        Ok(())
    }
}
