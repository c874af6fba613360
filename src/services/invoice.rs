// src/services/invoice.rs

use rust_decimal::Decimal;

/// One selected line on an invoice: how much of it is being billed.
#[derive(Debug, Clone)]
pub struct InvoiceLine {
    pub billed_quantity: Decimal,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub line_total: Decimal,
    pub after_discount: Decimal,
    pub final_total: Decimal,
}

/// Final billable amount for a set of selected lines.
///
/// The Suframa benefit is a flat discount applied before extra taxes and can
/// never push the intermediate below zero. Sales without catalog items bill
/// an empty line set: the total collapses to the extra tax alone.
pub fn invoice_totals(
    lines: &[InvoiceLine],
    suframa: Decimal,
    extra_tax: Decimal,
) -> InvoiceTotals {
    let line_total: Decimal = lines
        .iter()
        .map(|l| (l.billed_quantity * l.unit_price).round_dp(2))
        .sum();

    let after_discount = (line_total - suframa).max(Decimal::ZERO);
    let final_total = after_discount + extra_tax;

    InvoiceTotals {
        line_total,
        after_discount,
        final_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(billed: Decimal, unit: Decimal) -> InvoiceLine {
        InvoiceLine {
            billed_quantity: billed,
            unit_price: unit,
        }
    }

    #[test]
    fn sums_selected_lines_and_adds_extra_tax() {
        let lines = vec![line(dec!(2), dec!(411.65)), line(dec!(1), dec!(100))];
        let totals = invoice_totals(&lines, Decimal::ZERO, dec!(90.02));
        assert_eq!(totals.line_total, dec!(923.30));
        assert_eq!(totals.final_total, dec!(1013.32));
    }

    #[test]
    fn suframa_discount_never_goes_negative() {
        let lines = vec![line(dec!(1), dec!(500))];
        let totals = invoice_totals(&lines, dec!(700), Decimal::ZERO);
        assert_eq!(totals.after_discount, Decimal::ZERO);
        assert_eq!(totals.final_total, Decimal::ZERO);
    }

    #[test]
    fn suframa_applies_before_extra_tax() {
        let lines = vec![line(dec!(1), dec!(500))];
        let totals = invoice_totals(&lines, dec!(700), dec!(80));
        // The discount exhausts the line total but cannot eat into the tax
        assert_eq!(totals.final_total, dec!(80));
    }

    #[test]
    fn empty_selection_bills_extra_tax_only() {
        let totals = invoice_totals(&[], dec!(50), dec!(90.02));
        assert_eq!(totals.line_total, Decimal::ZERO);
        assert_eq!(totals.after_discount, Decimal::ZERO);
        assert_eq!(totals.final_total, dec!(90.02));
    }

    #[test]
    fn partial_quantities_bill_at_unit_price() {
        let lines = vec![line(dec!(1.5), dec!(10))];
        let totals = invoice_totals(&lines, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(totals.final_total, dec!(15));
    }
}
