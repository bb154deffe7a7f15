//! Order spreadsheet export.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::orders::models::CompositionDetail;

/// Build the "Order Details" workbook for a committed order.
///
/// One row per composition line: product title, quantity, unit price, and
/// line total, with money columns formatted as `0.00`.
///
/// # Errors
///
/// Returns an error when the workbook cannot be assembled.
pub fn order_workbook(lines: &[CompositionDetail]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let money = Format::new().set_num_format("0.00");

    let sheet = workbook.add_worksheet().set_name("Order Details")?;

    sheet.write_string(0, 0, "Product")?;
    sheet.write_string(0, 1, "Quantity")?;
    sheet.write_string(0, 2, "Unit Price")?;
    sheet.write_string(0, 3, "Total Price")?;

    for (index, line) in lines.iter().enumerate() {
        let row = index as u32 + 1;
        let total = line.unit_cost * Decimal::from(line.quantity);

        sheet.write_string(row, 0, &line.title)?;
        sheet.write_number(row, 1, f64::from(line.quantity))?;
        sheet.write_number_with_format(
            row,
            2,
            line.unit_cost.to_f64().unwrap_or_default(),
            &money,
        )?;
        sheet.write_number_with_format(row, 3, total.to_f64().unwrap_or_default(), &money)?;
    }

    sheet.autofit();

    workbook.save_to_buffer()
}
