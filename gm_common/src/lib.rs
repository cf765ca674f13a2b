pub mod op;
mod rupee;
mod secret;

pub use rupee::{Rupee, RupeeConversionError, INR_CURRENCY_CODE, INR_CURRENCY_CODE_LOWER};
pub use secret::Secret;
