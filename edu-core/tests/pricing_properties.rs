//! Property-based tests for cart pricing.
//!
//! These verify:
//! - the discounted total never exceeds the list total
//! - toggling a line twice leaves the selection unchanged
//! - the discounted total is the sum of rounded per-line prices

use edu_core::pricing::cart::line_discounted_price;
use edu_core::pricing::common::format_won;
use edu_core::{CartAggregator, CartLine, SelectionSet, Service};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Writes a whole-won amount the way the catalog does (`"12,345"`).
fn catalog_price(amount: u32) -> String {
    format_won(Decimal::from(amount))
        .trim_end_matches('원')
        .to_string()
}

/// Strategy for a catalog of services with discounts in `[0, 1)`.
fn services_strategy() -> impl Strategy<Value = Vec<Service>> {
    prop::collection::vec((0u32..5_000_000, 0i64..10_000), 1..8).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (price, basis_points))| Service {
                id: i as u32 + 1,
                title: format!("service {}", i + 1),
                description: String::new(),
                price: catalog_price(price),
                discount: Decimal::new(basis_points, 4),
            })
            .collect()
    })
}

/// Strategy for a cart over `services` plus a selection mask.
fn cart_strategy() -> impl Strategy<Value = (CartAggregator, SelectionSet)> {
    services_strategy().prop_flat_map(|services| {
        let count = services.len() as u32;
        prop::collection::vec((1..=count, any::<bool>()), 0..12).prop_map(move |picks| {
            let lines: Vec<CartLine> = picks
                .iter()
                .enumerate()
                .map(|(i, (service_id, _))| CartLine {
                    id: i as u32 + 100,
                    service_id: *service_id,
                })
                .collect();
            let selection: SelectionSet = picks
                .iter()
                .enumerate()
                .filter(|(_, (_, selected))| *selected)
                .map(|(i, _)| i as u32 + 100)
                .collect();
            let cart = CartAggregator::load(&lines, &services).expect("every line has a service");
            (cart, selection)
        })
    })
}

proptest! {
    /// discounted_total ≤ total whenever every discount is in [0, 1)
    #[test]
    fn discounted_total_never_exceeds_total((cart, selection) in cart_strategy()) {
        let total = cart.total(&selection).unwrap();
        let discounted = cart.discounted_total(&selection).unwrap();
        prop_assert!(discounted <= total, "{} > {}", discounted, total);
    }

    /// discounted_total is the sum of per-line rounded prices
    #[test]
    fn discounted_total_is_sum_of_rounded_lines((cart, selection) in cart_strategy()) {
        let expected: Decimal = cart
            .selected_lines(&selection)
            .map(|line| line_discounted_price(line).unwrap())
            .sum();
        prop_assert_eq!(cart.discounted_total(&selection).unwrap(), expected);
    }

    /// Every per-line discounted price is a whole won
    #[test]
    fn per_line_prices_are_whole_won((cart, _selection) in cart_strategy()) {
        for line in cart.lines() {
            let price = line_discounted_price(line).unwrap();
            prop_assert_eq!(price.fract(), Decimal::ZERO);
        }
    }

    /// Toggling the same line twice restores the selection
    #[test]
    fn toggle_twice_is_identity(
        (mut cart, selection) in cart_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        for id in selection.iter() {
            cart.toggle_select(id);
        }
        let before = cart.selection().clone();
        if !cart.lines().is_empty() {
            let id = cart.lines()[pick.index(cart.lines().len())].id;
            cart.toggle_select(id);
            cart.toggle_select(id);
        }
        prop_assert_eq!(cart.selection(), &before);
    }
}
