use basket_model::{Catalog, Item};
use basket_query::ListPage;
use basket_report::{ReportSnapshot, format_money};
use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use basket_cli::settings::Settings;

pub fn print_page(page: &ListPage, today: NaiveDate, total_items: usize) {
    if page.is_empty() {
        println!("No items match.");
        println!("{total_items} items in total");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Category"),
        header_cell("Subcategory"),
        header_cell("Qty"),
        header_cell("Price"),
        header_cell("Total"),
        header_cell("Date"),
    ]);
    apply_table_style(&mut table);
    for column in [0, 4, 5, 6] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in &page.rows {
        let item = &row.item;
        table.add_row(vec![
            dim_cell(row.index),
            name_cell(item, today),
            Cell::new(item.category()),
            Cell::new(item.subcategory()),
            Cell::new(item.quantity()),
            Cell::new(format_money(item.unit_price())),
            Cell::new(format_money(item.total_price())),
            Cell::new(item.date()),
        ]);
    }
    println!("{table}");
    println!(
        "Showing {} of {} matching items, sorted by {} ({total_items} items in total)",
        page.len(),
        page.filtered_len,
        page.sort
    );
    if page.has_more {
        println!("More items available: pass --pages {} to load another page.", page.page_count + 1);
    }
}

pub fn print_report(report: &ReportSnapshot) {
    let mut cards = Table::new();
    apply_summary_table_style(&mut cards);
    cards.set_header(vec![header_cell("Summary"), header_cell("Value")]);
    align_column(&mut cards, 1, CellAlignment::Right);
    cards.add_row(vec![Cell::new("Items"), Cell::new(report.item_count)]);
    cards.add_row(vec![
        Cell::new("Total Spending"),
        Cell::new(format_money(report.total_spending))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    let highest = &report.highest_cost_item;
    let highest_cell = if highest.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(format!(
            "{} ({} × {})",
            highest.name,
            highest.quantity,
            format_money(highest.unit_price)
        ))
    };
    cards.add_row(vec![Cell::new("Highest Cost Item"), highest_cell]);
    cards.add_row(vec![
        Cell::new("Average Cost"),
        Cell::new(format_money(report.average_cost)),
    ]);
    println!("{cards}");

    if report.rollup.is_empty() {
        return;
    }
    let mut table = Table::new();
    apply_summary_table_style(&mut table);
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Subcategory"),
        header_cell("Total"),
    ]);
    align_column(&mut table, 2, CellAlignment::Right);
    for category in &report.rollup.categories {
        for subcategory in &category.subcategories {
            let label = if subcategory.subcategory.is_empty() {
                dim_cell("(none)")
            } else {
                Cell::new(&subcategory.subcategory)
            };
            table.add_row(vec![
                Cell::new(&category.category),
                label,
                Cell::new(format_money(subcategory.total)),
            ]);
        }
        table.add_row(vec![
            Cell::new(&category.category)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("all"),
            Cell::new(format_money(category.total)).add_attribute(Attribute::Bold),
        ]);
    }
    println!();
    println!("Spending by category:");
    println!("{table}");
}

pub fn print_catalog(catalog: &Catalog) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Subcategories")]);
    apply_table_style(&mut table);
    for entry in catalog.entries() {
        table.add_row(vec![
            Cell::new(&entry.category).add_attribute(Attribute::Bold),
            Cell::new(entry.subcategories.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_settings(settings: &Settings) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    let data_dir = settings
        .data_dir
        .as_ref()
        .map_or_else(|| "(platform default)".to_string(), |dir| dir.display().to_string());
    table.add_row(vec![Cell::new("data_dir"), Cell::new(data_dir)]);
    table.add_row(vec![Cell::new("storage_key"), Cell::new(&settings.storage_key)]);
    table.add_row(vec![Cell::new("page_size"), Cell::new(settings.page_size)]);
    table.add_row(vec![Cell::new("load_delay_ms"), Cell::new(settings.load_delay_ms)]);
    table.add_row(vec![
        Cell::new("export.delimiter"),
        Cell::new(format!("{:?}", settings.export.delimiter)),
    ]);
    println!("{table}");
}

/// One-line description of an item for mutation confirmations.
pub fn describe_item(item: &Item) -> String {
    let mut label = item.category().to_string();
    if !item.subcategory().is_empty() {
        label.push_str(" / ");
        label.push_str(item.subcategory());
    }
    format!(
        "{} [{label}] {} × {} = {} on {}",
        item.name(),
        item.quantity(),
        format_money(item.unit_price()),
        format_money(item.total_price()),
        item.date()
    )
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn name_cell(item: &Item, today: NaiveDate) -> Cell {
    if item.is_dated(today) {
        Cell::new(format!("{} NEW", item.name())).fg(Color::Green)
    } else {
        Cell::new(item.name())
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
