//! Page navigation boundary.
//!
//! Navigation is fire-and-forget: the caller hands over a [`Route`] and the
//! destination consumes any carried state once. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::models::CheckoutLine;

/// Transient state handed to the purchase screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseState {
    #[serde(rename = "selectedCartItems")]
    pub selected_cart_items: Vec<CheckoutLine>,
}

impl PurchaseState {
    pub fn single(line: CheckoutLine) -> Self {
        Self {
            selected_cart_items: vec![line],
        }
    }
}

/// Screens reachable from the views in this workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Landing page; where the guided flow exits to.
    Home,
    /// Checkout page carrying the lines to pay for.
    Purchase(PurchaseState),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Purchase(_) => "/purchase",
        }
    }
}

/// Something that can move the user to another screen.
pub trait Navigator {
    fn navigate(
        &mut self,
        route: Route,
    );
}
