//! Planned and actual amount computation
//!
//! Every multiplication and division result is passed through
//! [`normalize_decimal`] before it feeds the next step.

use super::tiers::OVERTIME_SCHEDULE;
use super::{BillingComputation, InvalidBillingConfiguration};
use crate::money::{
    MAX_EXCHANGE_RATE, MAX_PERCENTAGE, MAX_PERIOD_HOURS, MAX_UNIT_PRICE, normalize_decimal,
    to_decimal, to_f64,
};
use rust_decimal::prelude::*;
use shared::contract::{BillingConfig, CalculationMethod, TierBreakdown};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn require_positive(
    value: f64,
    field: &'static str,
    max: f64,
) -> Result<Decimal, InvalidBillingConfiguration> {
    if !value.is_finite() {
        return Err(InvalidBillingConfiguration::new(
            field,
            format!("must be a finite number, got {value}"),
        ));
    }
    if value <= 0.0 {
        return Err(InvalidBillingConfiguration::new(
            field,
            format!("must be positive, got {value}"),
        ));
    }
    if value > max {
        return Err(InvalidBillingConfiguration::new(
            field,
            format!("exceeds maximum allowed value {max}"),
        ));
    }
    let decimal = to_decimal(value);
    if decimal.is_zero() {
        return Err(InvalidBillingConfiguration::new(
            field,
            format!("is too small to compute with, got {value}"),
        ));
    }
    Ok(decimal)
}

fn require_present(
    value: Option<f64>,
    field: &'static str,
    max: f64,
) -> Result<Decimal, InvalidBillingConfiguration> {
    match value {
        Some(v) => require_positive(v, field, max),
        None => Err(InvalidBillingConfiguration::new(field, "is required")),
    }
}

fn out_of_range(field: &'static str) -> InvalidBillingConfiguration {
    InvalidBillingConfiguration::new(field, "produces an amount outside the supported range")
}

/// `normalize(a * b)`, failing instead of overflowing
fn mul(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, InvalidBillingConfiguration> {
    a.checked_mul(b)
        .map(normalize_decimal)
        .ok_or_else(|| out_of_range(field))
}

/// `normalize(a / b)`, failing instead of overflowing
fn div(a: Decimal, b: Decimal, field: &'static str) -> Result<Decimal, InvalidBillingConfiguration> {
    a.checked_div(b)
        .map(normalize_decimal)
        .ok_or_else(|| out_of_range(field))
}

/// Compute the planned amount in local currency
///
/// - Percentage: `normalize(unit_price * exchange_rate) * percentage / 100`
/// - Fixed: `fixed_amount * exchange_rate`, with `unit_price == fixed_amount`
pub fn plan_amount(
    method: CalculationMethod,
    unit_price: f64,
    exchange_rate: f64,
    standard_hours: f64,
    percentage_value: Option<f64>,
    fixed_amount: Option<f64>,
) -> Result<f64, InvalidBillingConfiguration> {
    let unit_price = require_positive(unit_price, "unit_price_foreign_currency", MAX_UNIT_PRICE)?;
    let exchange_rate = require_positive(exchange_rate, "exchange_rate", MAX_EXCHANGE_RATE)?;
    require_positive(standard_hours, "standard_hours", MAX_PERIOD_HOURS)?;

    let planned = match method {
        CalculationMethod::Percentage => {
            let percentage = require_present(percentage_value, "percentage_value", MAX_PERCENTAGE)?;
            let local_price = mul(unit_price, exchange_rate, "exchange_rate")?;
            let ratio = div(percentage, HUNDRED, "percentage_value")?;
            mul(local_price, ratio, "percentage_value")?
        }
        CalculationMethod::Fixed => {
            let fixed = require_present(fixed_amount, "fixed_amount", MAX_UNIT_PRICE)?;
            if fixed != unit_price {
                return Err(InvalidBillingConfiguration::new(
                    "unit_price_foreign_currency",
                    format!("must equal fixed_amount {fixed}, got {unit_price}"),
                ));
            }
            mul(fixed, exchange_rate, "exchange_rate")?
        }
    };

    tracing::debug!(?method, planned = %planned, "planned amount computed");
    Ok(to_f64(planned))
}

/// [`plan_amount`] over a full billing configuration
pub fn plan_amount_for(billing: &BillingConfig) -> Result<f64, InvalidBillingConfiguration> {
    plan_amount(
        billing.calculation_method,
        billing.unit_price_foreign_currency,
        billing.exchange_rate,
        billing.standard_hours,
        billing.percentage_value,
        billing.fixed_amount,
    )
}

/// Compute the actual amount for the hours worked
///
/// Fixed contracts always pay `planned_amount`. Percentage contracts walk
/// the overtime schedule against `base_rate = unit_price / standard_hours`.
pub fn compute_actual(
    method: CalculationMethod,
    unit_price: f64,
    exchange_rate: f64,
    standard_hours: f64,
    actual_hours: f64,
    planned_amount: f64,
) -> Result<BillingComputation, InvalidBillingConfiguration> {
    let unit_price = require_positive(unit_price, "unit_price_foreign_currency", MAX_UNIT_PRICE)?;
    let exchange_rate = require_positive(exchange_rate, "exchange_rate", MAX_EXCHANGE_RATE)?;
    let standard_hours = require_positive(standard_hours, "standard_hours", MAX_PERIOD_HOURS)?;
    if !actual_hours.is_finite() {
        return Err(InvalidBillingConfiguration::new(
            "actual_work_hours",
            format!("must be a finite number, got {actual_hours}"),
        ));
    }
    if actual_hours > MAX_PERIOD_HOURS {
        return Err(InvalidBillingConfiguration::new(
            "actual_work_hours",
            format!("exceeds maximum allowed value {MAX_PERIOD_HOURS}"),
        ));
    }

    let hours = to_decimal(actual_hours);
    let man_month_coefficient = to_f64(div(hours, standard_hours, "standard_hours")?);

    if method == CalculationMethod::Fixed {
        return Ok(BillingComputation {
            actual_amount: Some(planned_amount),
            man_month_coefficient,
            effective_coefficient: None,
            breakdown: Vec::new(),
        });
    }

    if hours <= Decimal::ZERO {
        return Ok(BillingComputation {
            actual_amount: None,
            man_month_coefficient,
            effective_coefficient: None,
            breakdown: Vec::new(),
        });
    }

    let base_rate = div(unit_price, standard_hours, "standard_hours")?;
    let mut remaining = hours;
    let mut sum_foreign = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for tier in OVERTIME_SCHEDULE.iter() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let tier_hours = match tier.width {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let rate = mul(base_rate, tier.multiplier, "unit_price_foreign_currency")?;
        let amount_foreign = tier_hours
            .checked_mul(base_rate)
            .and_then(|a| a.checked_mul(tier.multiplier))
            .map(normalize_decimal)
            .ok_or_else(|| out_of_range("actual_work_hours"))?;
        let amount_local = mul(amount_foreign, exchange_rate, "exchange_rate")?;

        breakdown.push(TierBreakdown {
            label: tier.label.to_string(),
            hours: to_f64(tier_hours),
            rate: to_f64(rate),
            multiplier: to_f64(tier.multiplier),
            amount_foreign: to_f64(amount_foreign),
            amount_local: to_f64(amount_local),
        });

        sum_foreign = sum_foreign
            .checked_add(amount_foreign)
            .ok_or_else(|| out_of_range("actual_work_hours"))?;
        remaining -= tier_hours;
    }

    let actual = mul(sum_foreign, exchange_rate, "exchange_rate")?;
    let effective = div(sum_foreign, unit_price, "unit_price_foreign_currency")?;

    tracing::debug!(
        hours = %hours,
        base_rate = %base_rate,
        tiers = breakdown.len(),
        actual = %actual,
        "tiered amount computed"
    );

    Ok(BillingComputation {
        actual_amount: Some(to_f64(actual)),
        man_month_coefficient,
        effective_coefficient: Some(to_f64(effective)),
        breakdown,
    })
}

/// [`compute_actual`] over a full billing configuration
pub fn compute_actual_for(
    billing: &BillingConfig,
    actual_hours: f64,
    planned_amount: f64,
) -> Result<BillingComputation, InvalidBillingConfiguration> {
    compute_actual(
        billing.calculation_method,
        billing.unit_price_foreign_currency,
        billing.exchange_rate,
        billing.standard_hours,
        actual_hours,
        planned_amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentage(hours: f64) -> BillingComputation {
        compute_actual(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            160.0,
            hours,
            75_000_000.0,
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_a_planned_percentage() {
        let planned = plan_amount(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            160.0,
            Some(100.0),
            None,
        )
        .unwrap();
        assert_eq!(planned, 75_000_000.0);
    }

    #[test]
    fn test_planned_percentage_applies_share() {
        let planned = plan_amount(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            160.0,
            Some(50.0),
            None,
        )
        .unwrap();
        assert_eq!(planned, 37_500_000.0);
    }

    #[test]
    fn test_scenario_b_180_hours_at_par() {
        let result = percentage(180.0);
        assert_eq!(result.actual_amount, Some(84_375_000.0));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].hours, 160.0);
        assert_eq!(result.breakdown[1].hours, 20.0);
        assert!(result.breakdown.iter().all(|t| t.multiplier == 1.0));
        assert_eq!(result.effective_coefficient, Some(1.125));
        assert_eq!(result.man_month_coefficient, 1.125);
    }

    #[test]
    fn test_scenario_c_escalates_above_linear() {
        let b = percentage(180.0).actual_amount.unwrap();
        let c = percentage(200.0);
        let amount = c.actual_amount.unwrap();

        assert_eq!(amount, 96_093_750.0);
        assert!(amount > b / 180.0 * 200.0);
        assert_eq!(c.breakdown.len(), 3);
        assert_eq!(c.breakdown[2].label, "181-200h");
        assert_eq!(c.breakdown[2].hours, 20.0);
        assert_eq!(c.breakdown[2].multiplier, 1.25);
        assert_eq!(c.breakdown[2].amount_foreign, 468.75);
        assert_eq!(c.breakdown[2].amount_local, 11_718_750.0);
    }

    #[test]
    fn test_escalation_starts_at_hour_181() {
        let result = percentage(181.0);
        assert_eq!(result.breakdown.len(), 3);
        assert_eq!(result.breakdown[2].hours, 1.0);
        // 180h at par plus one hour at 1.25
        assert_eq!(result.actual_amount, Some(84_960_937.5));
    }

    #[test]
    fn test_scenario_d_fixed_ignores_hours() {
        let planned = plan_amount(
            CalculationMethod::Fixed,
            2000.0,
            25000.0,
            160.0,
            None,
            Some(2000.0),
        )
        .unwrap();
        assert_eq!(planned, 50_000_000.0);

        for hours in [0.0, 160.0, 300.0] {
            let result = compute_actual(
                CalculationMethod::Fixed,
                2000.0,
                25000.0,
                160.0,
                hours,
                planned,
            )
            .unwrap();
            assert_eq!(result.actual_amount, Some(50_000_000.0));
            assert!(result.breakdown.is_empty());
        }
    }

    #[test]
    fn test_fixed_tracks_coefficient() {
        let result = compute_actual(
            CalculationMethod::Fixed,
            2000.0,
            25000.0,
            160.0,
            200.0,
            50_000_000.0,
        )
        .unwrap();
        assert_eq!(result.man_month_coefficient, 1.25);
        assert!(result.effective_coefficient.is_none());
    }

    #[test]
    fn test_tier_hours_sum_and_contiguity() {
        for hours in [0.5, 37.0, 160.0, 170.5, 199.0, 240.0, 300.0, 744.0] {
            let result = percentage(hours);
            let total: f64 = result.breakdown.iter().map(|t| t.hours).sum();
            assert_eq!(total, hours, "hours lost for {hours}");

            for (tier, schedule) in result.breakdown.iter().zip(OVERTIME_SCHEDULE.iter()) {
                assert_eq!(tier.label, schedule.label);
            }
            // every band before the last one used is completely filled
            let (_, filled) = result.breakdown.split_last().unwrap();
            for (tier, schedule) in filled.iter().zip(OVERTIME_SCHEDULE.iter()) {
                assert_eq!(Some(to_decimal(tier.hours)), schedule.width);
            }
        }
    }

    #[test]
    fn test_overflow_band_unbounded() {
        let result = percentage(300.0);
        assert_eq!(result.breakdown.len(), 7);
        let last = result.breakdown.last().unwrap();
        assert_eq!(last.label, "261h+");
        assert_eq!(last.hours, 40.0);
        assert_eq!(last.multiplier, 2.0);
    }

    #[test]
    fn test_schedule_does_not_scale_with_standard_hours() {
        let result = compute_actual(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            176.0,
            176.0,
            75_000_000.0,
        )
        .unwrap();
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].hours, 160.0);
        assert_eq!(result.breakdown[1].hours, 16.0);
    }

    #[test]
    fn test_non_positive_hours_yield_no_amount() {
        for hours in [0.0, -8.0] {
            let result = percentage(hours);
            assert!(result.actual_amount.is_none());
            assert!(result.breakdown.is_empty());
        }
    }

    #[test]
    fn test_missing_method_field_rejected() {
        let err = plan_amount(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            160.0,
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.field, "percentage_value");

        let err = plan_amount(CalculationMethod::Fixed, 2000.0, 25000.0, 160.0, None, None)
            .unwrap_err();
        assert_eq!(err.field, "fixed_amount");

        let err = plan_amount(
            CalculationMethod::Fixed,
            2000.0,
            25000.0,
            160.0,
            None,
            Some(-1.0),
        )
        .unwrap_err();
        assert_eq!(err.field, "fixed_amount");
    }

    #[test]
    fn test_fixed_unit_price_must_match() {
        let err = plan_amount(
            CalculationMethod::Fixed,
            2500.0,
            25000.0,
            160.0,
            None,
            Some(2000.0),
        )
        .unwrap_err();
        assert_eq!(err.field, "unit_price_foreign_currency");
    }

    #[test]
    fn test_rate_and_hours_must_be_positive() {
        let err = plan_amount(
            CalculationMethod::Percentage,
            3000.0,
            0.0,
            160.0,
            Some(100.0),
            None,
        )
        .unwrap_err();
        assert_eq!(err.field, "exchange_rate");

        let err = compute_actual(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            f64::NAN,
            160.0,
            0.0,
        )
        .unwrap_err();
        assert_eq!(err.field, "standard_hours");
    }

    #[test]
    fn test_percentage_value_is_bounded() {
        let err = plan_amount(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            160.0,
            Some(1e25),
            None,
        )
        .unwrap_err();
        assert_eq!(err.field, "percentage_value");

        // Largest accepted inputs still compute
        let planned = plan_amount(
            CalculationMethod::Percentage,
            MAX_UNIT_PRICE,
            MAX_EXCHANGE_RATE,
            160.0,
            Some(MAX_PERCENTAGE),
            None,
        )
        .unwrap();
        assert_eq!(planned, 1e22);
    }

    #[test]
    fn test_actual_hours_are_bounded() {
        let err = compute_actual(
            CalculationMethod::Percentage,
            MAX_UNIT_PRICE,
            MAX_EXCHANGE_RATE,
            0.01,
            1e6,
            0.0,
        )
        .unwrap_err();
        assert_eq!(err.field, "actual_work_hours");
    }

    #[test]
    fn test_overflowing_amount_is_an_error() {
        let result = compute_actual(
            CalculationMethod::Percentage,
            MAX_UNIT_PRICE,
            MAX_EXCHANGE_RATE,
            1e-9,
            MAX_PERIOD_HOURS,
            0.0,
        );
        assert!(result.is_err());

        // Positive as a float but zero once converted
        let err = compute_actual(
            CalculationMethod::Percentage,
            3000.0,
            25000.0,
            1e-300,
            160.0,
            0.0,
        )
        .unwrap_err();
        assert_eq!(err.field, "standard_hours");
    }
}
