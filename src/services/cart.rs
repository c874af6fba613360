// src/services/cart.rs
//
// Line-item and order-total arithmetic for the sale cart. Every mutator
// recomputes the derived amounts synchronously so no field is ever stale.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One cart line with its derived amounts kept consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub ipi_percent: Decimal,
    pub ipi_amount: Decimal,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub commission_percent: Decimal,
    pub commission_amount: Decimal,
}

impl CartLine {
    pub fn new(
        quantity: Decimal,
        unit_price: Decimal,
        ipi_percent: Decimal,
        commission_percent: Decimal,
    ) -> Self {
        let mut line = Self {
            quantity,
            unit_price,
            ipi_percent,
            ipi_amount: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            total: Decimal::ZERO,
            commission_percent,
            commission_amount: Decimal::ZERO,
        };
        line.recompute_amounts();
        line.commission_amount = commission_over(line.total, line.commission_percent);
        line
    }

    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
        self.recompute_amounts();
    }

    pub fn set_unit_price(&mut self, unit_price: Decimal) {
        self.unit_price = unit_price;
        self.recompute_amounts();
    }

    pub fn set_ipi_percent(&mut self, ipi_percent: Decimal) {
        self.ipi_percent = ipi_percent;
        self.recompute_amounts();
    }

    /// Changing the commission percent only re-derives the commission amount;
    /// the price side of the line is untouched.
    pub fn set_commission_percent(&mut self, commission_percent: Decimal) {
        self.commission_percent = commission_percent;
        self.commission_amount = commission_over(self.total, self.commission_percent);
    }

    fn recompute_amounts(&mut self) {
        self.subtotal = (self.quantity * self.unit_price).round_dp(2);
        self.ipi_amount = (self.subtotal * self.ipi_percent / dec!(100)).round_dp(2);
        self.total = self.subtotal + self.ipi_amount;
        if !self.commission_percent.is_zero() {
            self.commission_amount = commission_over(self.total, self.commission_percent);
        }
    }
}

fn commission_over(total: Decimal, percent: Decimal) -> Decimal {
    (total * percent / dec!(100)).round_dp(2)
}

/// Order-level roll-up. Commission is a side payable and stays out of the
/// grand total; it is accumulated separately for the sale record.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub total_ipi: Decimal,
    pub grand_total: Decimal,
    pub total_commission: Decimal,
}

pub fn cart_totals(lines: &[CartLine]) -> CartTotals {
    let subtotal: Decimal = lines
        .iter()
        .map(|l| (l.quantity * l.unit_price).round_dp(2))
        .sum();
    let total_ipi: Decimal = lines.iter().map(|l| l.ipi_amount).sum();
    let total_commission: Decimal = lines.iter().map(|l| l.commission_amount).sum();

    CartTotals {
        subtotal,
        total_ipi,
        grand_total: subtotal + total_ipi,
        total_commission,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_derives_all_amounts() {
        let line = CartLine::new(dec!(2), dec!(50), dec!(10), Decimal::ZERO);
        assert_eq!(line.subtotal, dec!(100));
        assert_eq!(line.ipi_amount, dec!(10));
        assert_eq!(line.total, dec!(110));
        assert_eq!(line.commission_amount, Decimal::ZERO);
    }

    #[test]
    fn mutation_sequence_never_leaves_stale_fields() {
        let mut line = CartLine::new(dec!(1), dec!(10), Decimal::ZERO, dec!(5));

        line.set_quantity(dec!(3));
        line.set_ipi_percent(dec!(10));
        line.set_unit_price(dec!(20));

        assert_eq!(line.subtotal, line.quantity * line.unit_price);
        assert_eq!(line.subtotal, dec!(60));
        assert_eq!(line.ipi_amount, dec!(6));
        assert_eq!(line.total, line.subtotal + line.ipi_amount);
        // Commission follows the refreshed total
        assert_eq!(line.commission_amount, dec!(3.30));
    }

    #[test]
    fn commission_percent_change_only_touches_commission() {
        let mut line = CartLine::new(dec!(2), dec!(50), dec!(10), Decimal::ZERO);
        let before_total = line.total;

        line.set_commission_percent(dec!(7.5));

        assert_eq!(line.total, before_total);
        assert_eq!(line.commission_amount, dec!(8.25));
    }

    #[test]
    fn zero_commission_percent_clears_amount() {
        let mut line = CartLine::new(dec!(2), dec!(50), Decimal::ZERO, dec!(5));
        assert_eq!(line.commission_amount, dec!(5));

        line.set_commission_percent(Decimal::ZERO);
        assert_eq!(line.commission_amount, Decimal::ZERO);
    }

    #[test]
    fn order_totals_exclude_commission() {
        let lines = vec![
            CartLine::new(dec!(2), dec!(50), dec!(10), dec!(5)),
            CartLine::new(dec!(1), dec!(200), dec!(5), dec!(10)),
        ];

        let totals = cart_totals(&lines);
        assert_eq!(totals.subtotal, dec!(300));
        assert_eq!(totals.total_ipi, dec!(20));
        assert_eq!(totals.grand_total, dec!(320));
        // Side payable, accumulated but never added to the order value
        assert_eq!(totals.total_commission, dec!(26.50));
        assert_eq!(totals.grand_total, totals.subtotal + totals.total_ipi);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = cart_totals(&[]);
        assert_eq!(totals.grand_total, Decimal::ZERO);
        assert_eq!(totals.total_commission, Decimal::ZERO);
    }
}
