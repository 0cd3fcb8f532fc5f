use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable catalog service.
///
/// `price` is kept exactly as the catalog ships it (a comma-grouped string such
/// as `"150,000"`); it is parsed on demand by the pricing module so that a
/// malformed value surfaces as an error tied to the line that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    /// Fraction of the list price taken off, in `[0, 1)`.
    ///
    /// Older catalog files spell this key `discout`.
    #[serde(alias = "discout")]
    pub discount: Decimal,
}
