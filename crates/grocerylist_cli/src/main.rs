//! Interactive CLI entry point.
//!
//! # Responsibility
//! - Collect user input and map raw text to typed values before calling core.
//! - Keep all list semantics inside `grocerylist_core`; this binary is glue.

use grocerylist_core::{
    config, default_log_level, export_buy_list, init_logging, parse_legacy_buy, GroceryRepository,
    Item, ItemId, ItemPatch, JsonStore, NewItem, DEFAULT_NAME, DEFAULT_STORE, PRIORITY_MAX,
    PRIORITY_MIN,
};
use std::io::{self, Write};
use std::path::Path;

fn main() {
    let data_dir = config::resolve_data_dir();

    if let Err(err) = init_logging(default_log_level(), &config::log_dir(&data_dir)) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let store = match JsonStore::create(config::list_path(&data_dir)) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: cannot prepare data directory: {err}");
            std::process::exit(1);
        }
    };
    let mut repo = match GroceryRepository::open(store) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("error: cannot open grocery list: {err}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let exit_code = match args.first().map(String::as_str) {
        None => {
            run_interactive(&mut repo, &data_dir);
            0
        }
        Some("list") => {
            print_items(repo.items());
            0
        }
        Some("export") => run_export(&repo, &data_dir),
        Some("search") => match args.get(1) {
            Some(query) => {
                run_search(&repo, query);
                0
            }
            None => {
                eprintln!("usage: grocerylist_cli search <query>");
                2
            }
        },
        Some(other) => {
            eprintln!("unknown command `{other}`; expected list, export or search");
            2
        }
    };
    std::process::exit(exit_code);
}

fn run_interactive(repo: &mut GroceryRepository<JsonStore>, data_dir: &Path) {
    println!();
    println!("{}", line_delimiter());
    println!("Welcome to the Grocery List app! Let's make shopping easier.");
    println!("{}", line_delimiter());

    loop {
        let Some(command) =
            prompt("\nEnter a command (add, remove, edit, list, export, search, or quit): ")
        else {
            break;
        };

        match command.to_lowercase().as_str() {
            "add" => handle_add(repo),
            "remove" => handle_remove(repo),
            "edit" => handle_edit(repo),
            "list" => print_items(repo.items()),
            "export" => {
                run_export(repo, data_dir);
            }
            "search" => handle_search(repo),
            "quit" => break,
            _ => println!(
                "Unknown command. Please enter add, remove, edit, list, export, search, or quit."
            ),
        }
    }
}

fn handle_add(repo: &mut GroceryRepository<JsonStore>) {
    println!();
    println!("{}", line_delimiter());
    println!("Enter the following information:\n");

    let fields = NewItem {
        name: get_name_input(),
        store: get_store_input(),
        cost: get_cost_input(),
        amount: get_amount_input(),
        priority: get_priority_input(),
        buy: get_buy_input(),
    };

    match repo.add(fields) {
        Ok(_) => println!("\nItem was added to the grocery list."),
        Err(err) => println!("\nCould not add item: {err}"),
    }
}

fn handle_remove(repo: &mut GroceryRepository<JsonStore>) {
    let Some(name) = prompt("\nEnter the item name to remove: ") else {
        return;
    };
    println!();

    let Some(id) = select_match(repo, &name, "remove") else {
        return;
    };

    match repo.remove(id) {
        Ok(true) => println!("That item has been removed."),
        Ok(false) => println!("Could not remove '{name}': ID not found."),
        Err(err) => println!("Could not remove '{name}': {err}"),
    }
}

fn handle_edit(repo: &mut GroceryRepository<JsonStore>) {
    let Some(target) = prompt("\nWhat item would you like to edit: ") else {
        return;
    };
    println!("\nRetrieving your matching items...\n");

    let Some(id) = select_match(repo, &target, "edit") else {
        return;
    };

    let patch = ItemPatch {
        name: get_name_input_edit(),
        store: get_store_input_edit(),
        cost: get_cost_input_edit(),
        amount: get_amount_input_edit(),
        priority: get_priority_input_edit(),
        buy: get_buy_input_edit(),
    };

    match repo.edit(id, &patch) {
        Ok(()) => println!("The item has been updated."),
        Err(err) => println!("Could not edit item: {err}"),
    }
}

fn handle_search(repo: &GroceryRepository<JsonStore>) {
    let Some(query) = prompt("\nWhat is the name of the item you would like to search? ") else {
        return;
    };
    println!();
    run_search(repo, &query);
    println!("{}", line_delimiter());
}

fn run_search(repo: &GroceryRepository<JsonStore>, query: &str) {
    match repo.search_by_name_prefix(query) {
        Ok(matches) if matches.is_empty() => {
            println!("No items match the provided search keyword.");
        }
        Ok(matches) => {
            for (match_num, item) in matches.iter().enumerate() {
                println!("{}", match_line(match_num + 1, item));
            }
        }
        Err(err) => println!("Search failed: {err}"),
    }
}

fn run_export(repo: &GroceryRepository<JsonStore>, data_dir: &Path) -> i32 {
    let export_path = config::export_path(data_dir);
    match export_buy_list(repo.items(), &export_path) {
        Ok(Some(report)) => {
            print!("{report}");
            println!("Grocery list exported to {}", export_path.display());
            0
        }
        Ok(None) => {
            println!("No items to export.");
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

/// Resolves a name prefix to one item id, prompting when several match.
fn select_match(repo: &GroceryRepository<JsonStore>, name: &str, verb: &str) -> Option<ItemId> {
    let matches = match repo.search_by_name_prefix(name) {
        Ok(matches) => matches,
        Err(err) => {
            println!("Search failed: {err}");
            return None;
        }
    };

    if matches.is_empty() {
        println!("I'm sorry, I could not find a match for '{name}'.");
        return None;
    }

    if matches.len() == 1 {
        return Some(matches[0].id);
    }

    for (match_num, item) in matches.iter().enumerate() {
        println!("{}", match_line(match_num + 1, item));
    }

    let choice = prompt(&format!(
        "\nPlease select the number you would like to {verb}: "
    ))?;
    match choice.parse::<usize>() {
        Ok(number) if (1..=matches.len()).contains(&number) => Some(matches[number - 1].id),
        _ => {
            println!("Invalid selection.");
            None
        }
    }
}

fn print_items(items: &[Item]) {
    for (item_num, item) in items.iter().enumerate() {
        println!(
            "{}. Name: {}, Store: {}, Cost: {}, Amount: {}, Priority: {}, Buy: {}",
            item_num + 1,
            item.name,
            item.store,
            item.cost,
            item.amount,
            item.priority,
            item.buy
        );
    }
}

fn match_line(match_num: usize, item: &Item) -> String {
    format!(
        "{}. | name: {} | store: {} | cost: {} | amount: {} | priority: {} | buy: {}",
        match_num, item.name, item.store, item.cost, item.amount, item.priority, item.buy
    )
}

// ----------------------------
// Input helpers (ADD workflow)
// ----------------------------

fn get_name_input() -> String {
    println!("Enter a name for the item. (ex. Ice Cream)");
    let name = prompt_or_blank("Item name: ");
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    }
}

fn get_store_input() -> String {
    println!("Enter the name of the store for the item. (ex. Walmart)");
    let store = prompt_or_blank("Store name (or 'skip' to leave blank): ");
    if store.eq_ignore_ascii_case("skip") {
        return String::new();
    }
    if store.is_empty() {
        DEFAULT_STORE.to_string()
    } else {
        store
    }
}

fn get_cost_input() -> f64 {
    println!("Enter the cost of the item. (ex. 5.25)");
    loop {
        let cost = prompt_or_blank("Item price: ");
        if cost.is_empty() {
            return 0.0;
        }
        match cost.parse::<f64>() {
            Ok(value) if value >= 0.0 => return value,
            _ => println!("Invalid input. Please enter a valid price."),
        }
    }
}

fn get_amount_input() -> u32 {
    println!("Enter the amount you need to get. (ex. 5)");
    loop {
        let amount = prompt_or_blank("Item quantity: ");
        if amount.is_empty() {
            return 1;
        }
        match amount.parse::<u32>() {
            Ok(value) if value > 0 => return value,
            _ => println!("Invalid input. Please enter a valid quantity."),
        }
    }
}

fn get_priority_input() -> u8 {
    println!("Enter the priority for the item between {PRIORITY_MIN}-{PRIORITY_MAX}. (ex. 2)");
    loop {
        let priority = prompt_or_blank("Item priority: ");
        if priority.is_empty() {
            return PRIORITY_MIN;
        }
        match priority.parse::<u8>() {
            Ok(value) if (PRIORITY_MIN..=PRIORITY_MAX).contains(&value) => return value,
            _ => println!(
                "Invalid input. Please enter a number between {PRIORITY_MIN}-{PRIORITY_MAX}."
            ),
        }
    }
}

fn get_buy_input() -> bool {
    println!("Enter if this item should be purchased now. (ex. yes)");
    loop {
        let buy = prompt_or_blank("Buy: ");
        if buy.is_empty() {
            return true;
        }
        match parse_legacy_buy(&buy) {
            Some(value) => return value,
            None => println!("Invalid input. Please enter true|yes OR false|no"),
        }
    }
}

// -----------------------------
// Input helpers (EDIT workflow)
// -----------------------------

fn get_name_input_edit() -> Option<String> {
    println!("Enter a name for the item (press Enter to keep current).");
    let name = prompt_or_blank("Item name: ");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn get_store_input_edit() -> Option<String> {
    println!("Enter the store name (press Enter to keep current).");
    let store = prompt_or_blank("Store name: ");
    if store.is_empty() {
        None
    } else {
        Some(store)
    }
}

fn get_cost_input_edit() -> Option<f64> {
    println!("Enter the cost (press Enter to keep current).");
    loop {
        let cost = prompt_or_blank("Item price: ");
        if cost.is_empty() {
            return None;
        }
        match cost.parse::<f64>() {
            Ok(value) if value >= 0.0 => return Some(value),
            _ => println!("Invalid input. Please enter a valid price."),
        }
    }
}

fn get_amount_input_edit() -> Option<u32> {
    println!("Enter the quantity (press Enter to keep current).");
    loop {
        let amount = prompt_or_blank("Item quantity: ");
        if amount.is_empty() {
            return None;
        }
        match amount.parse::<u32>() {
            Ok(value) if value > 0 => return Some(value),
            _ => println!("Invalid input. Please enter a valid quantity."),
        }
    }
}

fn get_priority_input_edit() -> Option<u8> {
    println!("Enter priority {PRIORITY_MIN}-{PRIORITY_MAX} (press Enter to keep current).");
    loop {
        let priority = prompt_or_blank("Item priority: ");
        if priority.is_empty() {
            return None;
        }
        match priority.parse::<u8>() {
            Ok(value) if (PRIORITY_MIN..=PRIORITY_MAX).contains(&value) => return Some(value),
            _ => println!(
                "Invalid input. Please enter a number between {PRIORITY_MIN}-{PRIORITY_MAX}."
            ),
        }
    }
}

fn get_buy_input_edit() -> Option<bool> {
    println!("Enter buy yes/no (press Enter to keep current).");
    loop {
        let buy = prompt_or_blank("Buy: ");
        if buy.is_empty() {
            return None;
        }
        match parse_legacy_buy(&buy) {
            Some(value) => return Some(value),
            None => println!("Invalid input. Please enter true|yes OR false|no"),
        }
    }
}

// ----------------
// Prompt plumbing
// ----------------

/// Prints the label and reads one trimmed line; `None` on EOF.
fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Like [`prompt`], but EOF behaves as a blank line (defaults apply).
fn prompt_or_blank(label: &str) -> String {
    prompt(label).unwrap_or_default()
}

fn line_delimiter() -> String {
    "-".repeat(69)
}
