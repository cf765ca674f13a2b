use crate::{
    db_types::{Gig, GigUpdate, NewGig},
    order_objects::GigQueryFilter,
    GigApiError,
};

/// Catalog storage behaviour for gig records.
#[allow(async_fn_in_trait)]
pub trait GigManagement {
    /// Persists a new gig and returns the stored record.
    async fn insert_gig(&self, gig: NewGig) -> Result<Gig, GigApiError>;

    async fn fetch_gig(&self, id: i64) -> Result<Option<Gig>, GigApiError>;

    /// Fetches gigs matching the filter, ordered per the filter's sort column.
    async fn search_gigs(&self, query: GigQueryFilter) -> Result<Vec<Gig>, GigApiError>;

    /// Applies a partial update. Returns the updated record, or `None` if the gig is gone.
    async fn update_gig(&self, id: i64, update: GigUpdate) -> Result<Option<Gig>, GigApiError>;

    /// Deletes the gig. Orders referencing it are untouched; they carry their own snapshot of
    /// the fields a buyer cares about. Returns whether a row was removed.
    async fn delete_gig(&self, id: i64) -> Result<bool, GigApiError>;
}
