use serde::{Deserialize, Serialize};

/// A cart line as sent to `POST /users/cart` and `PATCH /users/cart`.
///
/// `quantity` is signed so a non-positive amount can be rejected before any
/// request is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CartItem {
    pub product: String,
    pub quantity: i64,
}

impl CartItem {
    pub fn new(product: impl Into<String>, quantity: i64) -> Self {
        Self {
            product: product.into(),
            quantity,
        }
    }
}
