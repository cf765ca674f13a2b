use gm_common::Rupee;
use serde::{Deserialize, Serialize};

/// What a buyer needs to complete payment client-side: the gateway order id plus the cached
/// amount and title. Returned identically for fresh checkouts and for idempotent retries of an
/// existing pending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutIntent {
    pub order_id: String,
    /// In minor currency units (paisa).
    pub amount: Rupee,
    pub currency: String,
    pub title: String,
}

/// The signed payment result the gateway hands back after a buyer completes checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// The gateway order id (our payment intent).
    pub order_id: String,
    pub payment_id: String,
    /// Hex-encoded HMAC-SHA256 over `"{order_id}|{payment_id}"`.
    pub signature: String,
}

//--------------------------------------   GigQueryFilter   ----------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GigSort {
    Sales,
    Price,
    #[default]
    CreatedAt,
}

/// Catalog search criteria. Empty filters match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GigQueryFilter {
    pub seller_id: Option<i64>,
    pub category: Option<String>,
    pub min_price: Option<Rupee>,
    pub max_price: Option<Rupee>,
    /// Case-insensitive title substring match.
    pub search: Option<String>,
    pub sort: Option<GigSort>,
}

impl GigQueryFilter {
    pub fn with_seller_id(mut self, seller_id: i64) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_min_price(mut self, min: Rupee) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn with_max_price(mut self, max: Rupee) -> Self {
        self.max_price = Some(max);
        self
    }

    pub fn with_search(mut self, search: String) -> Self {
        self.search = Some(search);
        self
    }

    pub fn sorted_by(mut self, sort: GigSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.seller_id.is_none() &&
            self.category.is_none() &&
            self.min_price.is_none() &&
            self.max_price.is_none() &&
            self.search.is_none()
    }
}
