//! Table output for the CLI.
use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};
use zelaina_engine::db_types::{Order, UserSummary};

use crate::{
    cart::CartLine,
    catalog::CATALOG,
    reconcile::{cart_total, line_quantity, line_total, resolve_price},
};

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn markdown_style(table: &mut Table) {
    table.set_format(markdown_format());
}

pub fn format_catalog() -> String {
    let mut table = Table::new();
    markdown_style(&mut table);
    table.set_titles(row!["Product", "Price"]);
    for (name, price) in CATALOG {
        table.add_row(row![name, zsf_common::Price::from(price)]);
    }
    table.to_string()
}

pub fn format_cart(cart: &[CartLine]) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }
    let mut table = Table::new();
    markdown_style(&mut table);
    table.set_titles(row!["Product", "Unit price", "Qty", "Line total"]);
    for line in cart {
        table.add_row(row![line.name, resolve_price(line), line_quantity(line), line_total(line)]);
    }
    format!("{table}Total: {}", cart_total(cart))
}

pub fn format_orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.".to_string();
    }
    let mut table = Table::new();
    markdown_style(&mut table);
    table.set_titles(row!["ID", "Customer", "Phone", "Product", "Qty", "Total", "Status", "Created At"]);
    for order in orders {
        table.add_row(row![
            order.id,
            order.customer_name,
            order.customer_phone,
            order.product_name,
            order.quantity,
            order.total_amount,
            order.status,
            order.created_at
        ]);
    }
    table.to_string()
}

pub fn format_users(users: &[UserSummary]) -> String {
    if users.is_empty() {
        return "No registered users.".to_string();
    }
    let mut table = Table::new();
    markdown_style(&mut table);
    table.set_titles(row!["ID", "Name", "Email", "Registered At"]);
    for user in users {
        table.add_row(row![user.id, user.name, user.email, user.created_at]);
    }
    table.to_string()
}
