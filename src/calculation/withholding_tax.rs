//! Withholding tax calculation.
//!
//! This module provides the progressive withholding tax applied to taxable
//! income (basic salary less statutory deductions).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// One row of the progressive tax table.
///
/// Tax for an income in this bracket is
/// `base_tax + (income - threshold) * rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of the bracket, `None` for the top bracket.
    pub upper_bound: Option<Decimal>,
    /// Income the marginal rate is measured from.
    pub threshold: Decimal,
    /// Fixed tax owed at the start of the bracket.
    pub base_tax: Decimal,
    /// Marginal rate applied above the threshold.
    pub rate: Decimal,
}

/// The tax table, evaluated top to bottom; the first matching bracket wins.
///
/// The thresholds do not line up with the previous bracket's upper bound
/// everywhere: incomes strictly between 20832 and 20833 produce a small
/// negative tax, and the base amounts jump by 0.50 at 66667 and by 0.33 at
/// 166667. The table is applied literally.
pub static TAX_BRACKETS: [TaxBracket; 6] = [
    TaxBracket {
        upper_bound: Some(dec!(20832)),
        threshold: Decimal::ZERO,
        base_tax: Decimal::ZERO,
        rate: Decimal::ZERO,
    },
    TaxBracket {
        upper_bound: Some(dec!(33333)),
        threshold: dec!(20833),
        base_tax: Decimal::ZERO,
        rate: dec!(0.20),
    },
    TaxBracket {
        upper_bound: Some(dec!(66667)),
        threshold: dec!(33333),
        base_tax: dec!(2500),
        rate: dec!(0.25),
    },
    TaxBracket {
        upper_bound: Some(dec!(166667)),
        threshold: dec!(66667),
        base_tax: dec!(10833),
        rate: dec!(0.30),
    },
    TaxBracket {
        upper_bound: Some(dec!(666667)),
        threshold: dec!(166667),
        base_tax: dec!(40833.33),
        rate: dec!(0.32),
    },
    TaxBracket {
        upper_bound: None,
        threshold: dec!(666667),
        base_tax: dec!(200833.33),
        rate: dec!(0.35),
    },
];

impl TaxBracket {
    fn contains(&self, taxable_income: Decimal) -> bool {
        self.upper_bound.is_none_or(|upper| taxable_income <= upper)
    }

    /// Applies this bracket's formula to an income.
    pub fn tax_for(&self, taxable_income: Decimal) -> Decimal {
        self.base_tax + (taxable_income - self.threshold) * self.rate
    }
}

/// Returns the bracket an income falls into.
///
/// Negative incomes (deductions exceeding salary) fall into the first bracket.
pub fn find_tax_bracket(taxable_income: Decimal) -> &'static TaxBracket {
    TAX_BRACKETS
        .iter()
        .find(|bracket| bracket.contains(taxable_income))
        .unwrap_or(&TAX_BRACKETS[TAX_BRACKETS.len() - 1])
}

/// Calculates withholding tax on taxable income.
///
/// No clamping is applied to the result.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding_tax;
/// use rust_decimal::Decimal;
///
/// assert_eq!(calculate_withholding_tax(Decimal::new(20832, 0)), Decimal::ZERO);
/// assert_eq!(calculate_withholding_tax(Decimal::new(33333, 0)), Decimal::new(2500, 0));
/// ```
pub fn calculate_withholding_tax(taxable_income: Decimal) -> Decimal {
    find_tax_bracket(taxable_income).tax_for(taxable_income)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tax(income: Decimal) -> Decimal {
        calculate_withholding_tax(income)
    }

    /// WT-001: exempt bracket
    #[test]
    fn test_income_up_to_20832_is_exempt() {
        assert_eq!(tax(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(tax(dec!(18400)), Decimal::ZERO);
        assert_eq!(tax(dec!(20832)), Decimal::ZERO);
    }

    /// WT-002: negative taxable income falls into the exempt bracket
    #[test]
    fn test_negative_income_is_exempt() {
        assert_eq!(tax(dec!(-500)), Decimal::ZERO);
    }

    /// WT-003: the gap between 20832 and 20833 yields a negative tax
    #[test]
    fn test_income_inside_first_gap_is_negative() {
        assert_eq!(tax(dec!(20832.5)), dec!(-0.10));
    }

    /// WT-004: 20% bracket
    #[test]
    fn test_twenty_percent_bracket() {
        assert_eq!(tax(dec!(20833)), Decimal::ZERO);
        assert_eq!(tax(dec!(22758.75)), dec!(385.15));
    }

    /// WT-005: continuity at 33333
    #[test]
    fn test_boundary_33333_is_continuous() {
        assert_eq!(tax(dec!(33333)), dec!(2500));
        assert_eq!(tax(dec!(33333.01)), dec!(2500.0025));
    }

    /// WT-006: 25% bracket
    #[test]
    fn test_twenty_five_percent_bracket() {
        assert_eq!(tax(dec!(56775)), dec!(8360.5));
    }

    /// WT-007: 0.50 drop at 66667
    #[test]
    fn test_boundary_66667_drops_by_half() {
        assert_eq!(tax(dec!(66667)), dec!(10833.50));
        assert_eq!(tax(dec!(66667.01)), dec!(10833.003));
    }

    /// WT-008: 30% bracket
    #[test]
    fn test_thirty_percent_bracket() {
        assert_eq!(tax(dec!(86175)), dec!(16685.4));
    }

    /// WT-009: 0.33 jump at 166667
    #[test]
    fn test_boundary_166667_jumps() {
        assert_eq!(tax(dec!(166667)), dec!(40833));
        assert_eq!(tax(dec!(166667.01)), dec!(40833.3332));
    }

    /// WT-010: continuity at 666667
    #[test]
    fn test_boundary_666667_is_continuous() {
        assert_eq!(tax(dec!(666667)), dec!(200833.33));
        assert_eq!(tax(dec!(666668)), dec!(200833.68));
    }

    /// WT-011: top bracket
    #[test]
    fn test_thirty_five_percent_bracket() {
        assert_eq!(tax(dec!(1000000)), dec!(317499.88));
    }

    #[test]
    fn test_find_tax_bracket_selects_first_match() {
        assert_eq!(find_tax_bracket(dec!(33333)).rate, dec!(0.20));
        assert_eq!(find_tax_bracket(dec!(33333.01)).rate, dec!(0.25));
        assert!(find_tax_bracket(dec!(10000000)).upper_bound.is_none());
    }

    #[test]
    fn test_brackets_are_ordered_by_upper_bound() {
        let bounds: Vec<Decimal> = TAX_BRACKETS.iter().filter_map(|b| b.upper_bound).collect();
        assert!(bounds.windows(2).all(|w| w[0] < w[1]));
        assert!(TAX_BRACKETS[TAX_BRACKETS.len() - 1].upper_bound.is_none());
    }
}
