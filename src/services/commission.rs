// src/services/commission.rs

use crate::models::{CalculationBase, CommissionOutcome, CommissionRule};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

pub struct CommissionService;

impl CommissionService {
    /// Find the best-matching commission rule for a representative.
    ///
    /// Three tiers, most specific first:
    /// 1. representative + industry + category (only when a category is given)
    /// 2. representative + industry, rule has no category
    /// 3. representative only, rule has neither industry nor category
    ///
    /// The first tier with a hit wins. Ties inside a tier break on the most
    /// recently updated rule so resolution stays deterministic.
    pub fn find_rule<'a>(
        rules: &'a [CommissionRule],
        representative_id: Uuid,
        industry_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Option<&'a CommissionRule> {
        if let Some(category_id) = category_id {
            let hit = Self::latest(rules.iter().filter(|r| {
                r.representative_id == representative_id
                    && r.industry_id == Some(industry_id)
                    && r.category_id == Some(category_id)
            }));
            if hit.is_some() {
                return hit;
            }
        }

        let hit = Self::latest(rules.iter().filter(|r| {
            r.representative_id == representative_id
                && r.industry_id == Some(industry_id)
                && r.category_id.is_none()
        }));
        if hit.is_some() {
            return hit;
        }

        Self::latest(rules.iter().filter(|r| {
            r.representative_id == representative_id
                && r.industry_id.is_none()
                && r.category_id.is_none()
        }))
    }

    fn latest<'a, I>(candidates: I) -> Option<&'a CommissionRule>
    where
        I: Iterator<Item = &'a CommissionRule>,
    {
        candidates.max_by_key(|r| r.updated_at)
    }

    /// Effective percent for a resolved rule. Pass-through only applies to
    /// non-master representatives; masters always keep the full industry
    /// percent.
    pub fn effective_percent(
        rule: &CommissionRule,
        enable_pass_through: bool,
        is_master: bool,
    ) -> Decimal {
        if enable_pass_through && !is_master {
            rule.pass_through_percent
        } else {
            rule.industry_percent
        }
    }

    /// Resolve the rule and compute the commission over `base_value`.
    /// No matching rule is a valid zero-commission outcome, not an error.
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        rules: &[CommissionRule],
        representative_id: Uuid,
        industry_id: Uuid,
        base_value: Decimal,
        category_id: Option<Uuid>,
        calculation_base: CalculationBase,
        enable_pass_through: bool,
        is_master: bool,
    ) -> CommissionOutcome {
        let Some(rule) = Self::find_rule(rules, representative_id, industry_id, category_id)
        else {
            return CommissionOutcome {
                percent: Decimal::ZERO,
                amount: Decimal::ZERO,
                rule: None,
            };
        };

        // Both calculation bases currently bill over the caller-supplied value
        let base = match calculation_base {
            CalculationBase::Product | CalculationBase::Total => base_value,
        };

        let percent = Self::effective_percent(rule, enable_pass_through, is_master);
        let amount = (base * percent / dec!(100)).round_dp(2);

        CommissionOutcome {
            percent,
            amount,
            rule: Some(rule.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn rule(
        representative_id: Uuid,
        industry_id: Option<Uuid>,
        category_id: Option<Uuid>,
        industry_percent: Decimal,
        pass_through_percent: Decimal,
    ) -> CommissionRule {
        CommissionRule {
            id: Uuid::new_v4(),
            representative_id,
            industry_id,
            category_id,
            industry_percent,
            pass_through_percent,
            calculation_base: CalculationBase::Total,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn category_rule_beats_coarser_tiers() {
        let rep = Uuid::new_v4();
        let industry = Uuid::new_v4();
        let category = Uuid::new_v4();

        let rules = vec![
            rule(rep, None, None, dec!(3), dec!(1.5)),
            rule(rep, Some(industry), None, dec!(5), dec!(2.5)),
            rule(rep, Some(industry), Some(category), dec!(8), dec!(4)),
        ];

        let hit = CommissionService::find_rule(&rules, rep, industry, Some(category)).unwrap();
        assert_eq!(hit.industry_percent, dec!(8));
    }

    #[test]
    fn falls_back_to_industry_then_representative_tier() {
        let rep = Uuid::new_v4();
        let industry = Uuid::new_v4();
        let other_category = Uuid::new_v4();

        let rules = vec![
            rule(rep, None, None, dec!(3), dec!(1.5)),
            rule(rep, Some(industry), None, dec!(5), dec!(2.5)),
        ];

        // Category given, but no category-specific rule exists
        let hit =
            CommissionService::find_rule(&rules, rep, industry, Some(other_category)).unwrap();
        assert_eq!(hit.industry_percent, dec!(5));

        // Different industry entirely: only the representative-wide rule matches
        let hit = CommissionService::find_rule(&rules, rep, Uuid::new_v4(), None).unwrap();
        assert_eq!(hit.industry_percent, dec!(3));
    }

    #[test]
    fn no_rule_yields_zero_commission() {
        let outcome = CommissionService::calculate(
            &[],
            Uuid::new_v4(),
            Uuid::new_v4(),
            dec!(1000),
            None,
            CalculationBase::Total,
            false,
            false,
        );
        assert_eq!(outcome.percent, Decimal::ZERO);
        assert_eq!(outcome.amount, Decimal::ZERO);
        assert!(outcome.rule.is_none());
    }

    #[test]
    fn pass_through_applies_to_non_master() {
        let rep = Uuid::new_v4();
        let industry = Uuid::new_v4();
        let category = Uuid::new_v4();
        let rules = vec![rule(rep, Some(industry), Some(category), dec!(10), dec!(5))];

        let outcome = CommissionService::calculate(
            &rules,
            rep,
            industry,
            dec!(1000),
            Some(category),
            CalculationBase::Total,
            true,
            false,
        );
        assert_eq!(outcome.percent, dec!(5));
        assert_eq!(outcome.amount, dec!(50));
    }

    #[test]
    fn full_percent_when_pass_through_disabled() {
        let rep = Uuid::new_v4();
        let industry = Uuid::new_v4();
        let rules = vec![rule(rep, Some(industry), None, dec!(10), dec!(5))];

        let outcome = CommissionService::calculate(
            &rules,
            rep,
            industry,
            dec!(1000),
            None,
            CalculationBase::Total,
            false,
            false,
        );
        assert_eq!(outcome.percent, dec!(10));
        assert_eq!(outcome.amount, dec!(100));
    }

    #[test]
    fn master_keeps_industry_percent_under_pass_through() {
        let rep = Uuid::new_v4();
        let industry = Uuid::new_v4();
        let rules = vec![rule(rep, Some(industry), None, dec!(10), dec!(5))];

        let outcome = CommissionService::calculate(
            &rules,
            rep,
            industry,
            dec!(1000),
            None,
            CalculationBase::Total,
            true,
            true,
        );
        assert_eq!(outcome.percent, dec!(10));
        assert_eq!(outcome.amount, dec!(100));
    }

    #[test]
    fn same_tier_tie_breaks_on_most_recent_update() {
        let rep = Uuid::new_v4();
        let industry = Uuid::new_v4();

        let mut stale = rule(rep, Some(industry), None, dec!(4), dec!(2));
        stale.updated_at = Utc::now() - Duration::days(30);
        let fresh = rule(rep, Some(industry), None, dec!(6), dec!(3));

        let rules = [stale, fresh];
        let hit = CommissionService::find_rule(&rules, rep, industry, None).unwrap();
        assert_eq!(hit.industry_percent, dec!(6));
    }

    #[test]
    fn product_base_bills_over_supplied_value() {
        let rep = Uuid::new_v4();
        let industry = Uuid::new_v4();
        let rules = vec![rule(rep, Some(industry), None, dec!(10), dec!(5))];

        let outcome = CommissionService::calculate(
            &rules,
            rep,
            industry,
            dec!(200),
            None,
            CalculationBase::Product,
            false,
            false,
        );
        assert_eq!(outcome.amount, dec!(20));
    }
}
