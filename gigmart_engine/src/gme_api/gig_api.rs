use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Gig, GigUpdate, NewGig},
    gme_api::{errors::GigApiError, order_objects::GigQueryFilter},
    traits::GigManagement,
};

/// Catalog API: publishing, browsing and maintaining gigs. Ownership rules live here; the
/// backend only stores.
pub struct GigApi<B> {
    db: B,
}

impl<B> Debug for GigApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GigApi")
    }
}

impl<B> GigApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> GigApi<B>
where B: GigManagement
{
    /// Publishes a new gig. Only seller accounts may publish.
    pub async fn create_gig(&self, is_seller: bool, gig: NewGig) -> Result<Gig, GigApiError> {
        if !is_seller {
            return Err(GigApiError::OnlySellers);
        }
        let gig = self.db.insert_gig(gig).await?;
        debug!("🛍️ Gig [{}] \"{}\" published by seller #{}", gig.id, gig.title, gig.seller_id);
        Ok(gig)
    }

    pub async fn fetch_gig(&self, id: i64) -> Result<Gig, GigApiError> {
        self.db.fetch_gig(id).await?.ok_or(GigApiError::GigNotFound(id))
    }

    pub async fn search(&self, filter: GigQueryFilter) -> Result<Vec<Gig>, GigApiError> {
        self.db.search_gigs(filter).await
    }

    /// Applies a partial update. Only the owning seller may modify a gig.
    pub async fn update_gig(&self, requester_id: i64, id: i64, update: GigUpdate) -> Result<Gig, GigApiError> {
        let gig = self.fetch_gig(id).await?;
        if gig.seller_id != requester_id {
            return Err(GigApiError::NotOwner);
        }
        if update.is_empty() {
            return Ok(gig);
        }
        let updated = self.db.update_gig(id, update).await?.ok_or(GigApiError::GigNotFound(id))?;
        debug!("🛍️ Gig [{id}] updated by seller #{requester_id}");
        Ok(updated)
    }

    /// Removes a gig. Only the owning seller may delete it. Existing orders are unaffected;
    /// they carry their own snapshot of the purchased listing.
    pub async fn delete_gig(&self, requester_id: i64, id: i64) -> Result<(), GigApiError> {
        let gig = self.fetch_gig(id).await?;
        if gig.seller_id != requester_id {
            return Err(GigApiError::NotOwner);
        }
        self.db.delete_gig(id).await?;
        info!("🛍️ Gig [{id}] deleted by seller #{requester_id}");
        Ok(())
    }
}
