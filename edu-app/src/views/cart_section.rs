//! The "장바구니" (cart) section of the my-page.

use edu_core::navigation::PurchaseState;
use edu_core::pricing::cart::{line_discounted_price, line_price};
use edu_core::pricing::common::format_won;
use edu_core::{CartAggregator, CartLine, CartSummary, CheckoutLine, DataError, Service};
use edu_data::Catalog;
use tracing::{info, warn};

use crate::state::TOTAL_UNAVAILABLE;

/// Placeholder for a price cell that cannot be computed.
const PRICE_UNAVAILABLE: &str = "-";

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: u32,
    pub title: String,
    pub price: String,
    pub discounted_price: String,
    pub selected: bool,
}

/// Totals under the cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartTotals {
    Computed(CartSummary),
    /// A selected line could not be priced; no number is shown.
    Unavailable {
        item_count: usize,
        message: &'static str,
    },
}

impl CartTotals {
    pub fn item_count(&self) -> usize {
        match self {
            CartTotals::Computed(summary) => summary.item_count,
            CartTotals::Unavailable { item_count, .. } => *item_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSectionView {
    pub rows: Vec<CartRow>,
    pub totals: CartTotals,
}

#[derive(Debug, Clone)]
pub struct CartSection {
    cart: CartAggregator,
}

impl CartSection {
    pub fn load(
        lines: &[CartLine],
        services: &[Service],
    ) -> Result<Self, DataError> {
        Ok(Self {
            cart: CartAggregator::load(lines, services)?,
        })
    }

    /// The demo cart of `catalog`.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, DataError> {
        Self::load(&catalog.cart_items, &catalog.services)
    }

    pub fn cart(&self) -> &CartAggregator {
        &self.cart
    }

    pub fn toggle(
        &mut self,
        id: u32,
    ) -> bool {
        self.cart.toggle_select(id)
    }

    pub fn select_all(&mut self) {
        self.cart.select_all();
    }

    pub fn clear_selection(&mut self) {
        self.cart.clear_selection();
    }

    pub fn render(&self) -> CartSectionView {
        let rows = self
            .cart
            .lines()
            .iter()
            .map(|line| CartRow {
                id: line.id,
                title: line.service.title.clone(),
                price: line_price(line)
                    .map(format_won)
                    .unwrap_or_else(|_| PRICE_UNAVAILABLE.to_string()),
                discounted_price: line_discounted_price(line)
                    .map(format_won)
                    .unwrap_or_else(|_| PRICE_UNAVAILABLE.to_string()),
                selected: self.cart.is_selected(line.id),
            })
            .collect();

        let totals = match self.cart.summary(self.cart.selection()) {
            Ok(summary) => CartTotals::Computed(summary),
            Err(e) => {
                warn!(error = %e, "cart totals unavailable");
                CartTotals::Unavailable {
                    item_count: self.cart.selection().len(),
                    message: TOTAL_UNAVAILABLE,
                }
            }
        };

        CartSectionView { rows, totals }
    }

    /// "선택 결제하기": the ticked lines, or `None` when nothing is ticked.
    ///
    /// # Errors
    ///
    /// Returns the [`DataError`] of the first selected line that cannot be
    /// priced; nothing is handed to checkout in that case.
    pub fn checkout_selected(&self) -> Result<Option<PurchaseState>, DataError> {
        let selection = self.cart.selection();
        if selection.is_empty() {
            return Ok(None);
        }
        let summary = self.cart.summary(selection)?;

        let lines: Vec<CheckoutLine> = self
            .cart
            .selected_lines(selection)
            .cloned()
            .map(CheckoutLine::from)
            .collect();

        info!(
            items = summary.item_count,
            total = %summary.discounted_total,
            "cart checkout"
        );
        Ok(Some(PurchaseState {
            selected_cart_items: lines,
        }))
    }

    /// "전체 결제하기": selects every line, then checks out.
    pub fn checkout_all(&mut self) -> Result<Option<PurchaseState>, DataError> {
        self.cart.select_all();
        self.checkout_selected()
    }
}
