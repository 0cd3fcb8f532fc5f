use serde::{Deserialize, Serialize};

use super::Service;

/// A cart entry referencing a catalog service by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: u32,
    #[serde(rename = "serviceId", alias = "service_id")]
    pub service_id: u32,
}

/// A cart line joined with the service it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineView {
    pub id: u32,
    pub service: Service,
}

impl CartLineView {
    pub fn service_id(&self) -> u32 {
        self.service.id
    }
}

/// A cart line synthesized for a one-shot checkout.
///
/// `description` carries free-form lines shown under the service title on
/// the purchase screen (chosen subject, dream, target universities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub id: u32,
    pub service: Service,
    #[serde(default)]
    pub description: Vec<String>,
}

impl From<CartLineView> for CheckoutLine {
    fn from(view: CartLineView) -> Self {
        Self {
            id: view.id,
            service: view.service,
            description: Vec::new(),
        }
    }
}
