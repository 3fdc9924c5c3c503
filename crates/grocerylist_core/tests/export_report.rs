use grocerylist_core::{
    calculate_total_cost, config, export_buy_list, render_buy_list, GroceryRepository, Item,
    JsonStore, NewItem, DEFAULT_TAX_RATE,
};
use tempfile::TempDir;

fn item(name: &str, store: &str, cost: f64, buy: bool) -> Item {
    Item::with_id(
        name.len() as u128,
        NewItem {
            name: name.to_string(),
            store: store.to_string(),
            cost,
            amount: 1,
            priority: 1,
            buy,
        },
    )
    .unwrap()
}

#[test]
fn render_returns_none_when_nothing_is_flagged() {
    let items = vec![item("milk", "H.E.B.", 3.19, false)];
    assert!(render_buy_list(&items).is_none());
}

#[test]
fn render_includes_only_flagged_items_in_order() {
    let items = vec![
        item("milk", "H.E.B.", 3.19, true),
        item("bread", "H.E.B.", 2.50, false),
        item("eggs", "Kroger", 4.53, true),
    ];

    let report = render_buy_list(&items).unwrap();

    assert!(report.starts_with("\n** Grocery List Export ** \n\n"));
    assert!(report.contains(
        "Item 1 | Name: milk | Store: H.E.B. | Cost: 3.19 | Amount: 1 | Priority: 1 | Buy: true"
    ));
    assert!(report.contains(
        "Item 2 | Name: eggs | Store: Kroger | Cost: 4.53 | Amount: 1 | Priority: 1 | Buy: true"
    ));
    assert!(!report.contains("bread"));
}

#[test]
fn render_total_uses_round_before_tax_and_the_default_rate() {
    let items = vec![item("milk", "H.E.B.", 4.0, true)];
    let report = render_buy_list(&items).unwrap();

    // Subtotal 4 stays 4 after rounding; 4 * 1.0825 = 4.33.
    assert!(report.ends_with("\nThe total cost is $4.33\n"), "{report}");
}

#[test]
fn export_writes_the_report_and_returns_its_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export_grocery_list.txt");
    let items = vec![item("milk", "H.E.B.", 3.19, true)];

    let report = export_buy_list(&items, &path).unwrap().unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), report);
}

#[test]
fn export_overwrites_the_previous_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export_grocery_list.txt");

    let first = vec![item("milk", "H.E.B.", 3.19, true)];
    let second = vec![item("eggs", "Kroger", 4.53, true)];
    export_buy_list(&first, &path).unwrap();
    export_buy_list(&second, &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("eggs"));
    assert!(!raw.contains("milk"));
}

#[test]
fn export_with_nothing_flagged_leaves_the_previous_report_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("export_grocery_list.txt");
    std::fs::write(&path, "previous report").unwrap();

    let items = vec![item("milk", "H.E.B.", 3.19, false)];
    let outcome = export_buy_list(&items, &path).unwrap();

    assert!(outcome.is_none());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous report");
}

#[test]
fn end_to_end_add_then_export_produces_the_buy_only_report() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::create(config::list_path(dir.path())).unwrap();
    let mut repo = GroceryRepository::open(store).unwrap();

    repo.add(NewItem {
        name: "milk".to_string(),
        store: "H.E.B.".to_string(),
        cost: 3.19,
        amount: 1,
        priority: 1,
        buy: true,
    })
    .unwrap();
    repo.add(NewItem {
        name: "bread".to_string(),
        store: "H.E.B.".to_string(),
        cost: 2.50,
        amount: 1,
        priority: 2,
        buy: false,
    })
    .unwrap();

    let export_path = config::export_path(dir.path());
    let report = export_buy_list(repo.items(), &export_path).unwrap().unwrap();

    assert!(report.contains("Name: milk"));
    assert!(!report.contains("bread"));

    let flagged: Vec<Item> = repo.items().iter().filter(|i| i.buy).cloned().collect();
    let expected_total = calculate_total_cost(&flagged, true, DEFAULT_TAX_RATE);
    assert!(report.contains(&format!("The total cost is ${expected_total:.2}")));
    assert_eq!(std::fs::read_to_string(&export_path).unwrap(), report);
}
