use grocerylist_core::{calculate_total_cost, Item, NewItem, DEFAULT_TAX_RATE};

fn item(cost: f64, amount: u32) -> Item {
    Item::with_id(
        1,
        NewItem {
            name: "item".to_string(),
            store: String::new(),
            cost,
            amount,
            priority: 1,
            buy: true,
        },
    )
    .unwrap()
}

#[test]
fn zero_tax_yields_the_exact_pre_tax_subtotal() {
    let items = vec![item(10.0, 1)];
    // The tax step is skipped entirely, so no floating error can creep in.
    assert_eq!(calculate_total_cost(&items, false, 0.0), 10.0);
}

#[test]
fn default_tax_is_added_to_the_subtotal() {
    let items = vec![item(10.0, 1)];
    let total = calculate_total_cost(&items, false, DEFAULT_TAX_RATE);
    assert!((total - 10.825).abs() < 1e-9, "got {total}");
}

#[test]
fn rounding_happens_before_tax_is_applied() {
    let items = vec![item(10.4, 1)];
    // 10.4 rounds down to 10 before the (zero) tax step.
    assert_eq!(calculate_total_cost(&items, true, 0.0), 10.0);

    let taxed = calculate_total_cost(&items, true, DEFAULT_TAX_RATE);
    assert!((taxed - 10.825).abs() < 1e-9, "got {taxed}");
}

#[test]
fn amounts_scale_each_line() {
    let items = vec![item(1.25, 4), item(2.5, 2)];
    assert_eq!(calculate_total_cost(&items, false, 0.0), 10.0);
}

#[test]
fn total_is_invariant_to_item_ordering() {
    // Values chosen to be exactly representable, so the sums compare equal.
    let forward = vec![item(1.25, 1), item(2.5, 1), item(3.75, 1)];
    let backward = vec![item(3.75, 1), item(2.5, 1), item(1.25, 1)];

    assert_eq!(
        calculate_total_cost(&forward, false, DEFAULT_TAX_RATE),
        calculate_total_cost(&backward, false, DEFAULT_TAX_RATE)
    );
}

#[test]
fn empty_collection_totals_zero() {
    let items: Vec<Item> = Vec::new();
    assert_eq!(calculate_total_cost(&items, false, DEFAULT_TAX_RATE), 0.0);
}
