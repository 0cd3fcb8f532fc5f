//! Cart aggregation and totals.
//!
//! The aggregator joins cart lines with catalog services, keeps the set of
//! lines the user has ticked, and derives two totals for that selection:
//!
//! | Total | Definition |
//! |-------|------------|
//! | `total` | Sum of list prices of the selected lines |
//! | `discounted_total` | Sum of per-line discounted prices, each rounded to a whole won **before** summing |
//!
//! Rounding per line and then summing is not the same as rounding the sum;
//! the cart always does the former.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use edu_core::{CartLine, Service};
//! use edu_core::pricing::CartAggregator;
//!
//! let services = vec![Service {
//!     id: 1,
//!     title: "학종 컨설팅".to_string(),
//!     description: String::new(),
//!     price: "10,000".to_string(),
//!     discount: dec!(0.2),
//! }];
//! let lines = vec![
//!     CartLine { id: 1, service_id: 1 },
//!     CartLine { id: 2, service_id: 1 },
//! ];
//!
//! let mut cart = CartAggregator::load(&lines, &services).unwrap();
//! cart.toggle_select(1);
//! cart.toggle_select(2);
//!
//! assert_eq!(cart.total(cart.selection()).unwrap(), dec!(20000));
//! assert_eq!(cart.discounted_total(cart.selection()).unwrap(), dec!(16000));
//! ```

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::common::{ParsePriceError, discounted_price, is_valid_discount, parse_price};
use crate::error::ErrorClass;
use crate::models::{CartLine, CartLineView, Service};

/// Errors raised while joining or pricing cart data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A cart line references a service id the catalog does not contain.
    #[error("cart line {line_id} references unknown service {service_id}")]
    UnknownService { line_id: u32, service_id: u32 },

    /// The price string of the line's service is malformed.
    #[error("cart line {line_id} has an unreadable price: {source}")]
    InvalidPrice {
        line_id: u32,
        #[source]
        source: ParsePriceError,
    },

    /// The discount of the line's service is outside `[0, 1]`.
    #[error("cart line {line_id} has discount {discount} outside 0..=1")]
    InvalidDiscount { line_id: u32, discount: Decimal },

    /// Adding the line's price pushed the running total past `Decimal::MAX`.
    #[error("cart total overflows at line {line_id}")]
    TotalOverflow { line_id: u32 },
}

impl DataError {
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Data
    }

    /// Id of the cart line the error is about.
    pub fn line_id(&self) -> u32 {
        match self {
            DataError::UnknownService { line_id, .. }
            | DataError::InvalidPrice { line_id, .. }
            | DataError::InvalidDiscount { line_id, .. }
            | DataError::TotalOverflow { line_id } => *line_id,
        }
    }
}

/// Ids of the cart lines currently ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet(BTreeSet<u32>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns `true` if `id` is now selected.
    pub fn toggle(
        &mut self,
        id: u32,
    ) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn contains(
        &self,
        id: u32,
    ) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<u32> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Totals for a selection, as shown under the cart table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: usize,
    pub total: Decimal,
    pub discounted_total: Decimal,
}

impl CartSummary {
    /// Amount taken off by discounts.
    pub fn savings(&self) -> Decimal {
        self.total - self.discounted_total
    }
}

/// Cart lines joined with their services, plus the user's selection.
#[derive(Debug, Clone, Default)]
pub struct CartAggregator {
    lines: Vec<CartLineView>,
    selection: SelectionSet,
}

impl CartAggregator {
    /// Joins every cart line with the first service carrying its `service_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownService`] for the first line whose service
    /// is missing from `services`. No partial cart is produced.
    pub fn load(
        lines: &[CartLine],
        services: &[Service],
    ) -> Result<Self, DataError> {
        let views = lines
            .iter()
            .map(|line| {
                services
                    .iter()
                    .find(|s| s.id == line.service_id)
                    .map(|service| CartLineView {
                        id: line.id,
                        service: service.clone(),
                    })
                    .ok_or(DataError::UnknownService {
                        line_id: line.id,
                        service_id: line.service_id,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(lines = views.len(), "cart loaded");

        Ok(Self {
            lines: views,
            selection: SelectionSet::new(),
        })
    }

    pub fn lines(&self) -> &[CartLineView] {
        &self.lines
    }

    pub fn line(
        &self,
        id: u32,
    ) -> Option<&CartLineView> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(
        &self,
        id: u32,
    ) -> bool {
        self.selection.contains(id)
    }

    /// Flips selection of the line `id`.
    ///
    /// Ids that are not loaded are ignored so the selection never refers to a
    /// line outside the cart. Returns `true` if the line is now selected.
    pub fn toggle_select(
        &mut self,
        id: u32,
    ) -> bool {
        if self.line(id).is_none() {
            warn!(line_id = id, "ignoring selection of unknown cart line");
            return false;
        }
        self.selection.toggle(id)
    }

    /// Selects every loaded line.
    pub fn select_all(&mut self) {
        self.selection = self.lines.iter().map(|l| l.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Lines whose id is in `selection`, in cart order.
    pub fn selected_lines<'a>(
        &'a self,
        selection: &'a SelectionSet,
    ) -> impl Iterator<Item = &'a CartLineView> + 'a {
        self.lines.iter().filter(move |l| selection.contains(l.id))
    }

    /// Sum of list prices of the selected lines.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidPrice`] naming the first selected line
    /// whose price does not parse, or [`DataError::TotalOverflow`] if the
    /// sum leaves the decimal range.
    pub fn total(
        &self,
        selection: &SelectionSet,
    ) -> Result<Decimal, DataError> {
        self.selected_lines(selection)
            .try_fold(Decimal::ZERO, |acc, line| {
                checked_sum(acc, line_price(line)?, line.id)
            })
    }

    /// Sum of per-line discounted prices, each rounded to a whole won.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidPrice`], [`DataError::InvalidDiscount`] or
    /// [`DataError::TotalOverflow`] naming the offending line.
    pub fn discounted_total(
        &self,
        selection: &SelectionSet,
    ) -> Result<Decimal, DataError> {
        self.selected_lines(selection)
            .try_fold(Decimal::ZERO, |acc, line| {
                checked_sum(acc, line_discounted_price(line)?, line.id)
            })
    }

    /// Item count and both totals for `selection`.
    pub fn summary(
        &self,
        selection: &SelectionSet,
    ) -> Result<CartSummary, DataError> {
        Ok(CartSummary {
            item_count: self.selected_lines(selection).count(),
            total: self.total(selection)?,
            discounted_total: self.discounted_total(selection)?,
        })
    }
}

fn checked_sum(
    acc: Decimal,
    price: Decimal,
    line_id: u32,
) -> Result<Decimal, DataError> {
    acc.checked_add(price).ok_or_else(|| {
        warn!(line_id, "cart total overflowed");
        DataError::TotalOverflow { line_id }
    })
}

/// List price of a single line.
pub fn line_price(line: &CartLineView) -> Result<Decimal, DataError> {
    parse_price(&line.service.price).map_err(|source| DataError::InvalidPrice {
        line_id: line.id,
        source,
    })
}

/// Discounted price of a single line, rounded to a whole won.
pub fn line_discounted_price(line: &CartLineView) -> Result<Decimal, DataError> {
    let price = line_price(line)?;
    let discount = line.service.discount;
    if !is_valid_discount(discount) {
        return Err(DataError::InvalidDiscount {
            line_id: line.id,
            discount,
        });
    }
    Ok(discounted_price(price, discount))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn service(
        id: u32,
        price: &str,
        discount: Decimal,
    ) -> Service {
        Service {
            id,
            title: format!("service {id}"),
            description: String::new(),
            price: price.to_string(),
            discount,
        }
    }

    fn standard_cart() -> CartAggregator {
        let services = vec![
            service(1, "10,000", dec!(0.2)),
            service(2, "99,000", dec!(0.15)),
            service(3, "4,999", dec!(0.5)),
        ];
        let lines = vec![
            CartLine { id: 10, service_id: 1 },
            CartLine { id: 11, service_id: 1 },
            CartLine { id: 12, service_id: 2 },
            CartLine { id: 13, service_id: 3 },
        ];
        CartAggregator::load(&lines, &services).unwrap()
    }

    // =========================================================================
    // load tests
    // =========================================================================

    #[test]
    fn load_joins_lines_in_cart_order() {
        let cart = standard_cart();

        let ids: Vec<_> = cart.lines().iter().map(|l| (l.id, l.service_id())).collect();

        assert_eq!(ids, vec![(10, 1), (11, 1), (12, 2), (13, 3)]);
    }

    #[test]
    fn load_uses_first_service_with_matching_id() {
        let services = vec![service(1, "1,000", dec!(0)), service(1, "2,000", dec!(0))];
        let lines = vec![CartLine { id: 1, service_id: 1 }];

        let cart = CartAggregator::load(&lines, &services).unwrap();

        assert_eq!(cart.lines()[0].service.price, "1,000");
    }

    #[test]
    fn load_fails_on_unknown_service() {
        let services = vec![service(1, "1,000", dec!(0))];
        let lines = vec![
            CartLine { id: 1, service_id: 1 },
            CartLine { id: 2, service_id: 42 },
        ];

        let err = CartAggregator::load(&lines, &services).unwrap_err();

        assert_eq!(
            err,
            DataError::UnknownService {
                line_id: 2,
                service_id: 42
            }
        );
        assert_eq!(err.class(), ErrorClass::Data);
    }

    #[test]
    fn load_of_empty_cart_is_empty() {
        let cart = CartAggregator::load(&[], &[]).unwrap();

        assert!(cart.lines().is_empty());
        assert_eq!(cart.total(cart.selection()).unwrap(), Decimal::ZERO);
    }

    // =========================================================================
    // selection tests
    // =========================================================================

    #[test]
    fn toggle_twice_restores_selection() {
        let mut cart = standard_cart();
        cart.toggle_select(12);
        let before = cart.selection().clone();

        assert!(cart.toggle_select(10));
        assert!(!cart.toggle_select(10));

        assert_eq!(cart.selection(), &before);
    }

    #[test]
    fn toggle_of_unknown_line_is_ignored() {
        let mut cart = standard_cart();

        assert!(!cart.toggle_select(999));
        assert!(cart.selection().is_empty());
    }

    #[test]
    fn select_all_then_clear() {
        let mut cart = standard_cart();
        cart.select_all();
        assert_eq!(cart.selection().len(), 4);

        cart.clear_selection();
        assert!(cart.selection().is_empty());
    }

    // =========================================================================
    // totals tests
    // =========================================================================

    #[test]
    fn two_discounted_lines_total() {
        let mut cart = standard_cart();
        cart.toggle_select(10);
        cart.toggle_select(11);

        let summary = cart.summary(cart.selection()).unwrap();

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total, dec!(20000));
        assert_eq!(summary.discounted_total, dec!(16000));
        assert_eq!(summary.savings(), dec!(4000));
    }

    #[test]
    fn unselected_lines_are_not_counted() {
        let mut cart = standard_cart();
        cart.toggle_select(12);

        assert_eq!(cart.total(cart.selection()).unwrap(), dec!(99000));
        assert_eq!(cart.discounted_total(cart.selection()).unwrap(), dec!(84150));
    }

    #[test]
    fn discounted_total_rounds_each_line_before_summing() {
        // 4,999 × 0.5 = 2,499.5 → 2,500 per line; two lines → 5,000.
        // Rounding the sum instead would give round(4,999) = 4,999.
        let services = vec![service(3, "4,999", dec!(0.5))];
        let lines = vec![
            CartLine { id: 1, service_id: 3 },
            CartLine { id: 2, service_id: 3 },
        ];
        let mut cart = CartAggregator::load(&lines, &services).unwrap();
        cart.select_all();

        assert_eq!(cart.discounted_total(cart.selection()).unwrap(), dec!(5000));
    }

    #[test]
    fn totals_accept_external_selection() {
        let cart = standard_cart();
        let selection: SelectionSet = [10, 13].into_iter().collect();

        assert_eq!(cart.total(&selection).unwrap(), dec!(14999));
        assert_eq!(cart.discounted_total(&selection).unwrap(), dec!(10500));
    }

    #[test]
    fn malformed_price_names_line() {
        let services = vec![service(1, "1,000", dec!(0)), service(2, "N/A", dec!(0))];
        let lines = vec![
            CartLine { id: 1, service_id: 1 },
            CartLine { id: 2, service_id: 2 },
        ];
        let mut cart = CartAggregator::load(&lines, &services).unwrap();
        cart.select_all();

        let err = cart.total(cart.selection()).unwrap_err();

        assert_eq!(err.line_id(), 2);
        assert!(matches!(err, DataError::InvalidPrice { .. }));
    }

    #[test]
    fn total_past_decimal_range_names_line() {
        let max = "79,228,162,514,264,337,593,543,950,335";
        let services = vec![service(1, max, dec!(0)), service(2, max, dec!(0))];
        let lines = vec![
            CartLine { id: 1, service_id: 1 },
            CartLine { id: 2, service_id: 2 },
        ];
        let mut cart = CartAggregator::load(&lines, &services).unwrap();
        cart.select_all();

        let expected = Err(DataError::TotalOverflow { line_id: 2 });
        assert_eq!(cart.total(cart.selection()), expected);
        assert_eq!(cart.discounted_total(cart.selection()), expected);
        let err = cart.summary(cart.selection()).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Data);
    }

    #[test]
    fn malformed_price_on_unselected_line_is_harmless() {
        let services = vec![service(1, "1,000", dec!(0)), service(2, "N/A", dec!(0))];
        let lines = vec![
            CartLine { id: 1, service_id: 1 },
            CartLine { id: 2, service_id: 2 },
        ];
        let mut cart = CartAggregator::load(&lines, &services).unwrap();
        cart.toggle_select(1);

        assert_eq!(cart.total(cart.selection()).unwrap(), dec!(1000));
    }

    #[test]
    fn out_of_range_discount_is_reported() {
        let services = vec![service(1, "1,000", dec!(1.5))];
        let lines = vec![CartLine { id: 7, service_id: 1 }];
        let mut cart = CartAggregator::load(&lines, &services).unwrap();
        cart.select_all();

        assert_eq!(
            cart.discounted_total(cart.selection()),
            Err(DataError::InvalidDiscount {
                line_id: 7,
                discount: dec!(1.5)
            })
        );
    }
}
