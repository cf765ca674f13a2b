use crate::traits::{GigManagement, OrderManagement};

/// The combined behaviour the order reconciliation flow needs: reading the gig catalog and
/// writing the order ledger. Any backend implementing both parts qualifies.
pub trait MarketplaceDatabase: GigManagement + OrderManagement {}

impl<T: GigManagement + OrderManagement> MarketplaceDatabase for T {}
