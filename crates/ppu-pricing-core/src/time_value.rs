//! Annuity primitives with the spreadsheet sign convention.
//!
//! Cash paid out is negative and cash received is positive, so a loan of
//! `-1` amortized to a residual of `0.1` yields a positive payment.
//!
//! [`pv`] departs from that convention: it reports a discounted future value
//! as a positive amount, `(fv + pmt * (1 - growth)) / growth`. With a zero
//! payment it is plain discounting; with a non-zero payment it is not the
//! inverse of [`pmt`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::types::{Money, Periods, Rate};
use crate::PricingResult;

/// When payments fall within each period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTiming {
    /// Ordinary annuity, payments at period end (`type = 0`)
    #[default]
    End,
    /// Annuity-due, payments at period start (`type = 1`)
    Begin,
}

/// Payment (PMT)
pub fn pmt(
    rate: Rate,
    periods: Periods,
    present_value: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> PricingResult<Money> {
    validate_periods("PMT", periods)?;

    if rate.is_zero() {
        let total = checked("PMT", present_value.checked_add(future_value))?;
        return checked("PMT", (-total).checked_div(periods));
    }

    let growth = growth_factor("PMT", rate, periods)?;
    let annuity_factor = checked("PMT", growth.checked_sub(Decimal::ONE))?;
    if annuity_factor.is_zero() {
        return Err(degenerate("PMT", "annuity factor (1 + rate)^periods - 1 is zero"));
    }

    let balance = checked(
        "PMT",
        present_value
            .checked_mul(growth)
            .and_then(|v| v.checked_add(future_value)),
    )?;
    let payment = checked(
        "PMT",
        rate.checked_div(annuity_factor)
            .and_then(|f| f.checked_mul(-balance)),
    )?;

    apply_timing("PMT", payment, rate, timing)
}

/// Present Value, positive for a positive future value
pub fn pv(
    rate: Rate,
    periods: Periods,
    payment: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> PricingResult<Money> {
    validate_periods("PV", periods)?;

    if rate.is_zero() {
        return checked(
            "PV",
            payment
                .checked_mul(periods)
                .and_then(|p| future_value.checked_add(p)),
        );
    }

    let growth = growth_factor("PV", rate, periods)?;
    if growth.is_zero() {
        return Err(degenerate("PV", "discount factor (1 + rate)^periods is zero"));
    }

    let value = checked(
        "PV",
        Decimal::ONE
            .checked_sub(growth)
            .and_then(|g| payment.checked_mul(g))
            .and_then(|p| future_value.checked_add(p))
            .and_then(|v| v.checked_div(growth)),
    )?;

    apply_timing("PV", value, rate, timing)
}

fn validate_periods(function: &str, periods: Periods) -> PricingResult<()> {
    if periods <= Decimal::ZERO {
        return Err(degenerate(
            function,
            &format!("number of periods must be > 0, got {periods}"),
        ));
    }
    Ok(())
}

/// `(1 + rate)^periods`, exact for whole periods.
fn growth_factor(function: &str, rate: Rate, periods: Periods) -> PricingResult<Decimal> {
    let one_plus_r = checked(function, Decimal::ONE.checked_add(rate))?;
    let growth = if periods.fract().is_zero() {
        periods.to_i64().and_then(|n| one_plus_r.checked_powi(n))
    } else if one_plus_r > Decimal::ZERO {
        one_plus_r.checked_powd(periods)
    } else {
        return Err(degenerate(
            function,
            "fractional periods require a rate greater than -100%",
        ));
    };
    growth.ok_or_else(|| degenerate(function, "(1 + rate)^periods is not representable"))
}

fn apply_timing(
    function: &str,
    amount: Money,
    rate: Rate,
    timing: PaymentTiming,
) -> PricingResult<Money> {
    match timing {
        PaymentTiming::End => Ok(amount),
        PaymentTiming::Begin => {
            let one_plus_r = checked(function, Decimal::ONE.checked_add(rate))?;
            if one_plus_r.is_zero() {
                return Err(degenerate(function, "annuity-due with a rate of -100%"));
            }
            checked(function, amount.checked_div(one_plus_r))
        }
    }
}

fn checked(function: &str, value: Option<Decimal>) -> PricingResult<Decimal> {
    value.ok_or_else(|| degenerate(function, "arithmetic overflow"))
}

fn degenerate(function: &str, reason: &str) -> PricingError {
    PricingError::DegenerateMath {
        function: function.into(),
        reason: reason.into(),
    }
}
