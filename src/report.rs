//! Plain-text rendering of the sales report.

use crate::services::sale_service::SaleRow;

const HEADERS: [&str; 4] = ["Book_title", "Shop_name", "Sale_price", "Sale_date"];

/// Renders rows as a bordered fixed-width table, in the order given.
/// Price carries a trailing " $", the date is calendar-only. Zero rows
/// produce a header-only table.
pub fn render(rows: &[SaleRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.book_title.clone(),
                row.shop_name.clone(),
                format!("{} $", row.price),
                row.date_sale.date().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_border(&mut out, &widths);
    push_row(&mut out, &HEADERS.map(str::to_owned), &widths);
    push_border(&mut out, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    push_border(&mut out, &widths);
    out
}

fn push_border(out: &mut String, widths: &[usize; 4]) {
    for width in widths {
        out.push('+');
        out.push_str(&"-".repeat(width + 2));
    }
    out.push_str("+\n");
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!("| {:<width$} ", cell, width = *width));
    }
    out.push_str("|\n");
}
