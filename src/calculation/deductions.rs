//! Statutory deduction calculations.
//!
//! This module provides the three mandatory contributions withheld from an
//! employee's basic salary (SSS, PhilHealth and Pag-IBIG) and the ordered
//! schedule that totals them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Salaries below this amount pay the minimum SSS contribution.
pub const SSS_FLOOR_SALARY: Decimal = dec!(3250);

/// Salaries at or above this amount pay the maximum SSS contribution.
pub const SSS_CEILING_SALARY: Decimal = dec!(24750);

const SSS_BRACKET_WIDTH: Decimal = dec!(500);
const SSS_MINIMUM: Decimal = dec!(135.0);
const SSS_MAXIMUM: Decimal = dec!(1125.0);
const SSS_STEP: Decimal = dec!(22.50);

const PHILHEALTH_LOWER_LIMIT: Decimal = dec!(10000);
const PHILHEALTH_UPPER_LIMIT: Decimal = dec!(60000);
const PHILHEALTH_MINIMUM: Decimal = dec!(150.0);
const PHILHEALTH_MAXIMUM: Decimal = dec!(900.0);
const PHILHEALTH_RATE: Decimal = dec!(0.015);

const PAGIBIG_LOWER_LIMIT: Decimal = dec!(1000);
const PAGIBIG_UPPER_LIMIT: Decimal = dec!(1500);
const PAGIBIG_LOW_RATE: Decimal = dec!(0.01);
const PAGIBIG_HIGH_RATE: Decimal = dec!(0.02);

/// A statutory contribution computed from basic salary.
///
/// The set of rules is fixed by regulation, so it is a closed enum rather
/// than an open trait.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::DeductionRule;
/// use rust_decimal::Decimal;
///
/// let sss = DeductionRule::SocialSecurity;
/// assert_eq!(sss.name(), "SSS");
/// assert_eq!(sss.calculate(Decimal::new(3000, 0)), Decimal::new(135, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionRule {
    /// Social Security System contribution.
    SocialSecurity,
    /// PhilHealth health-insurance contribution.
    HealthInsurance,
    /// Pag-IBIG housing-fund contribution.
    HousingFund,
}

/// The standard rules in reporting order.
pub const STANDARD_DEDUCTIONS: [DeductionRule; 3] = [
    DeductionRule::SocialSecurity,
    DeductionRule::HealthInsurance,
    DeductionRule::HousingFund,
];

impl DeductionRule {
    /// Returns the name used when reporting this deduction.
    pub fn name(&self) -> &'static str {
        match self {
            DeductionRule::SocialSecurity => "SSS",
            DeductionRule::HealthInsurance => "PhilHealth",
            DeductionRule::HousingFund => "Pag-IBIG",
        }
    }

    /// Computes this contribution for a monthly basic salary.
    pub fn calculate(&self, basic_salary: Decimal) -> Decimal {
        match self {
            DeductionRule::SocialSecurity => social_security_contribution(basic_salary),
            DeductionRule::HealthInsurance => health_insurance_contribution(basic_salary),
            DeductionRule::HousingFund => housing_fund_contribution(basic_salary),
        }
    }
}

/// Step function over 500-wide salary brackets between the floor and the
/// ceiling. Brackets are half-open; no rounding pass follows.
fn social_security_contribution(basic_salary: Decimal) -> Decimal {
    if basic_salary < SSS_FLOOR_SALARY {
        return SSS_MINIMUM;
    }
    if basic_salary >= SSS_CEILING_SALARY {
        return SSS_MAXIMUM;
    }
    let steps = ((basic_salary - SSS_FLOOR_SALARY) / SSS_BRACKET_WIDTH).floor();
    SSS_MINIMUM + (steps + Decimal::ONE) * SSS_STEP
}

fn health_insurance_contribution(basic_salary: Decimal) -> Decimal {
    if basic_salary <= PHILHEALTH_LOWER_LIMIT {
        PHILHEALTH_MINIMUM
    } else if basic_salary < PHILHEALTH_UPPER_LIMIT {
        basic_salary * PHILHEALTH_RATE
    } else {
        PHILHEALTH_MAXIMUM
    }
}

fn housing_fund_contribution(basic_salary: Decimal) -> Decimal {
    // 1500 itself belongs to the 1% bracket.
    if basic_salary >= PAGIBIG_LOWER_LIMIT && basic_salary <= PAGIBIG_UPPER_LIMIT {
        basic_salary * PAGIBIG_LOW_RATE
    } else if basic_salary > PAGIBIG_UPPER_LIMIT {
        basic_salary * PAGIBIG_HIGH_RATE
    } else {
        Decimal::ZERO
    }
}

/// A single computed contribution, ready for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// The reporting name of the deduction (e.g. "PhilHealth").
    pub name: String,
    /// The rule that produced the amount.
    pub rule: DeductionRule,
    /// The contribution amount.
    pub amount: Decimal,
}

/// An ordered collection of deduction rules.
///
/// Rules are evaluated in insertion order, which is also the order results
/// are reported in.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::DeductionSchedule;
/// use rust_decimal::Decimal;
///
/// let schedule = DeductionSchedule::standard();
/// let items = schedule.calculate(Decimal::new(20000, 0));
///
/// let names: Vec<&str> = items.iter().map(|d| d.name.as_str()).collect();
/// assert_eq!(names, vec!["SSS", "PhilHealth", "Pag-IBIG"]);
/// assert_eq!(schedule.total(Decimal::new(20000, 0)), Decimal::new(1600, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionSchedule {
    rules: Vec<DeductionRule>,
}

impl DeductionSchedule {
    /// Creates a schedule from an explicit rule list.
    pub fn new(rules: Vec<DeductionRule>) -> Self {
        Self { rules }
    }

    /// Returns the schedule of all standard contributions.
    pub fn standard() -> Self {
        Self::new(STANDARD_DEDUCTIONS.to_vec())
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[DeductionRule] {
        &self.rules
    }

    /// Computes every contribution for the given basic salary.
    pub fn calculate(&self, basic_salary: Decimal) -> Vec<DeductionResult> {
        self.rules
            .iter()
            .map(|rule| DeductionResult {
                name: rule.name().to_string(),
                rule: *rule,
                amount: rule.calculate(basic_salary),
            })
            .collect()
    }

    /// Sums every contribution for the given basic salary.
    pub fn total(&self, basic_salary: Decimal) -> Decimal {
        self.rules
            .iter()
            .map(|rule| rule.calculate(basic_salary))
            .sum()
    }
}

impl Default for DeductionSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

/// Sums the standard contributions for a basic salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_total_deductions;
/// use rust_decimal::Decimal;
///
/// // SSS 1125 + PhilHealth 900 + Pag-IBIG 1800
/// assert_eq!(calculate_total_deductions(Decimal::new(90000, 0)), Decimal::new(3825, 0));
/// ```
pub fn calculate_total_deductions(basic_salary: Decimal) -> Decimal {
    DeductionSchedule::standard().total(basic_salary)
}
