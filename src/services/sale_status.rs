// src/services/sale_status.rs

use crate::models::SaleStatus;
use chrono::NaiveDate;

/// Delivery lead time in whole days between issue and expected delivery.
pub fn days_difference(issue_date: NaiveDate, expected_delivery: NaiveDate) -> i64 {
    (expected_delivery - issue_date).num_days()
}

/// Derive the draft status from the delivery lead time. Orders with no
/// expected delivery, or due within 15 days, are Approved; anything with a
/// longer horizon is Scheduled. Invoiced terminal states are set by the
/// invoicing flow, never here.
pub fn derive_status(issue_date: NaiveDate, expected_delivery: Option<NaiveDate>) -> SaleStatus {
    match expected_delivery {
        None => SaleStatus::Approved,
        Some(delivery) => {
            if days_difference(issue_date, delivery) <= 15 {
                SaleStatus::Approved
            } else {
                SaleStatus::Scheduled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_delivery_date_is_approved() {
        assert_eq!(
            derive_status(date(2025, 1, 1), None),
            SaleStatus::Approved
        );
    }

    #[test]
    fn fifteen_day_boundary() {
        let issue = date(2025, 1, 1);
        // 2025-01-16 is exactly 15 days out
        assert_eq!(days_difference(issue, date(2025, 1, 16)), 15);
        assert_eq!(
            derive_status(issue, Some(date(2025, 1, 16))),
            SaleStatus::Approved
        );
        // One more day tips the order into Scheduled
        assert_eq!(
            derive_status(issue, Some(date(2025, 1, 17))),
            SaleStatus::Scheduled
        );
    }

    #[test]
    fn same_day_delivery_is_approved() {
        let issue = date(2025, 3, 10);
        assert_eq!(derive_status(issue, Some(issue)), SaleStatus::Approved);
    }

    #[test]
    fn long_lead_time_is_scheduled() {
        assert_eq!(
            derive_status(date(2025, 1, 1), Some(date(2025, 3, 1))),
            SaleStatus::Scheduled
        );
    }
}
