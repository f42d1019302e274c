//! End-to-end allocation scenarios and invariants over the public API.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use stockalloc_allocation::{
    AllocationError, Inventory, Line, SelectionOrder, Sku, Stock, StockId,
};

fn setup() {
    stockalloc_observability::init();
}

fn sku() -> Sku {
    Sku::new("RED-CHAIR").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stock(capacity: u64, on: NaiveDate) -> Stock {
    Stock::new(sku(), capacity, on)
}

fn line(quantity: u64) -> Line {
    Line::new(sku(), quantity).unwrap()
}

#[test]
fn allocating_one_unit_leaves_the_rest_available() {
    setup();
    let mut inventory = Inventory::new([stock(3, date(2015, 11, 1))]).unwrap();

    inventory.allocate(&mut line(1)).unwrap();

    assert_eq!(inventory.total_available(), 2);
}

#[test]
fn empty_stock_refuses_allocation() {
    setup();
    let mut inventory = Inventory::new([stock(0, date(2015, 11, 1))]).unwrap();

    let err = inventory.allocate(&mut line(1)).unwrap_err();

    assert!(matches!(err, AllocationError::InsufficientStock { requested: 1, .. }));
    assert_eq!(inventory.total_available(), 0);
}

#[test]
fn earlier_stock_wins_over_later_stock() {
    setup();
    let december = stock(2, date(2015, 12, 1));
    let november = stock(2, date(2015, 11, 1));
    let (december_id, november_id) = (december.id_typed(), november.id_typed());
    let mut inventory = Inventory::new([december, november]).unwrap();

    inventory.allocate(&mut line(2)).unwrap();

    assert_eq!(inventory.stock(november_id).unwrap().residual_quantity(), 0);
    assert_eq!(inventory.stock(december_id).unwrap().residual_quantity(), 2);
}

#[test]
fn allocating_the_same_line_twice_counts_once() {
    setup();
    let on = date(2015, 11, 1);
    let mut inventory = Inventory::new([stock(3, on), stock(1, on)]).unwrap();
    let mut line = line(1);

    inventory.allocate(&mut line).unwrap();
    inventory.allocate(&mut line).unwrap();

    assert_eq!(inventory.total_available(), 3);
}

#[test]
fn cancelling_restores_availability() {
    setup();
    let mut inventory = Inventory::new([stock(3, date(2015, 11, 1))]).unwrap();
    let mut line = line(1);

    inventory.allocate(&mut line).unwrap();
    inventory.cancel(&mut line).unwrap();

    assert_eq!(line.allocated_stock(), None);
    assert_eq!(inventory.total_available(), 3);
}

#[test]
fn expected_stock_becomes_available() {
    setup();
    let mut inventory = Inventory::default();

    inventory.expect(stock(1, date(2015, 11, 1))).unwrap();

    assert_eq!(inventory.total_available(), 1);
}

#[test]
fn expected_earlier_stock_is_preferred_over_existing_stock() {
    setup();
    let mut inventory = Inventory::new([stock(5, date(2015, 12, 1))]).unwrap();
    let arriving = stock(5, date(2015, 11, 1));
    let arriving_id = arriving.id_typed();

    inventory.expect(arriving).unwrap();

    assert_eq!(inventory.allocate(&mut line(2)).unwrap(), arriving_id);
}

#[test]
fn pooled_stock_uses_first_member_with_enough_quantity() {
    setup();
    let on = date(2015, 11, 1);
    let members = [stock(2, on), stock(3, on), stock(3, on)];
    let ids: Vec<StockId> = members.iter().map(Stock::id_typed).collect();
    let mut pool = Inventory::with_order(members, SelectionOrder::InsertionOrder).unwrap();
    let mut line = line(3);

    pool.allocate(&mut line).unwrap();

    assert!(!line.is_allocated_to(ids[0]));
    assert!(line.is_allocated_to(ids[1]));
    assert!(!line.is_allocated_to(ids[2]));
}

#[derive(Debug, Clone)]
enum Op {
    Allocate(usize),
    Cancel(usize),
    Expect(u64, u32),
}

fn op_strategy(lines: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..lines).prop_map(Op::Allocate),
        2 => (0..lines).prop_map(Op::Cancel),
        1 => (0u64..10, 1u32..28).prop_map(|(cap, day)| Op::Expect(cap, day)),
    ]
}

fn assert_invariants(inventory: &Inventory, lines: &[Line]) -> Result<(), TestCaseError> {
    for s in inventory.stocks() {
        prop_assert!(s.allocated_quantity() <= s.capacity());
    }

    for l in lines {
        let holders: Vec<_> = inventory.stocks().iter().filter(|s| s.is_allocated(l)).collect();
        match l.allocated_stock() {
            Some(stock_id) => {
                prop_assert_eq!(holders.len(), 1);
                prop_assert_eq!(holders[0].id_typed(), stock_id);
            }
            None => prop_assert!(holders.is_empty()),
        }
    }

    let capacity: u64 = inventory.stocks().iter().map(Stock::capacity).sum();
    let demand: u64 = lines
        .iter()
        .filter(|l| l.is_allocated())
        .map(Line::quantity)
        .sum();
    prop_assert_eq!(inventory.total_available(), capacity - demand);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: residual quantity stays non-negative and every allocated line
    /// is held by exactly one stock, whatever the sequence of operations.
    #[test]
    fn invariants_hold_for_any_operation_sequence(
        capacities in prop::collection::vec((0u64..10, 1u32..28), 0..5),
        quantities in prop::collection::vec(1u64..6, 1..8),
        ops in prop::collection::vec(op_strategy(8), 0..40),
    ) {
        let mut inventory = Inventory::new(
            capacities.iter().map(|(cap, day)| stock(*cap, date(2015, 11, *day))),
        )
        .unwrap();
        let mut lines: Vec<Line> = quantities.iter().map(|q| line(*q)).collect();

        for op in ops {
            let before = inventory.total_available();
            match op {
                Op::Allocate(i) => {
                    let Some(l) = lines.get_mut(i) else { continue };
                    let was_allocated = l.is_allocated();
                    let result = inventory.allocate(l);
                    if was_allocated || result.is_err() {
                        prop_assert_eq!(inventory.total_available(), before);
                    } else {
                        prop_assert_eq!(inventory.total_available(), before - l.quantity());
                    }
                }
                Op::Cancel(i) => {
                    let Some(l) = lines.get_mut(i) else { continue };
                    let was_allocated = l.is_allocated();
                    let result = inventory.cancel(l);
                    prop_assert_eq!(result.is_ok(), was_allocated);
                    if was_allocated {
                        prop_assert_eq!(inventory.total_available(), before + l.quantity());
                    } else {
                        prop_assert_eq!(inventory.total_available(), before);
                    }
                }
                Op::Expect(cap, day) => {
                    inventory.expect(stock(cap, date(2015, 11, day))).unwrap();
                    prop_assert_eq!(inventory.total_available(), before + cap);
                }
            }
            assert_invariants(&inventory, &lines)?;
        }
    }

    /// Property: the earliest-dated stock able to satisfy the line is chosen,
    /// whatever order the stocks were supplied in.
    #[test]
    fn earliest_capable_stock_is_chosen(
        days in prop::sample::subsequence((1u32..=28).collect::<Vec<_>>(), 1..8)
            .prop_shuffle(),
        capacities in prop::collection::vec(0u64..6, 8),
        quantity in 1u64..6,
    ) {
        let stocks: Vec<Stock> = days
            .iter()
            .zip(&capacities)
            .map(|(day, cap)| stock(*cap, date(2015, 11, *day)))
            .collect();
        let expected = stocks
            .iter()
            .filter(|s| s.capacity() >= quantity)
            .min_by_key(|s| s.availability_date())
            .map(Stock::id_typed);

        let mut inventory = Inventory::new(stocks).unwrap();
        let mut l = line(quantity);
        let chosen = inventory.allocate(&mut l).ok();

        prop_assert_eq!(chosen, expected);
        let mut sorted = days.clone();
        sorted.sort_unstable();
        let arranged: Vec<u32> = inventory.stocks().iter().map(|s| s.availability_date().day()).collect();
        prop_assert_eq!(arranged, sorted);
    }

    /// Property: allocate followed by cancel restores every residual quantity.
    #[test]
    fn allocate_then_cancel_round_trips(
        capacities in prop::collection::vec(0u64..10, 1..6),
        quantity in 1u64..10,
    ) {
        let mut inventory = Inventory::new(
            capacities.iter().enumerate().map(|(i, cap)| stock(*cap, date(2015, 11, i as u32 + 1))),
        )
        .unwrap();
        let residuals: Vec<u64> = inventory.stocks().iter().map(Stock::residual_quantity).collect();
        let total = inventory.total_available();
        let mut l = line(quantity);

        if inventory.allocate(&mut l).is_ok() {
            inventory.cancel(&mut l).unwrap();
        }

        let after: Vec<u64> = inventory.stocks().iter().map(Stock::residual_quantity).collect();
        prop_assert_eq!(after, residuals);
        prop_assert_eq!(inventory.total_available(), total);
        prop_assert!(!l.is_allocated());
    }
}
