use pretty_assertions::assert_eq;
use ppu_pricing_core::pricing::{compute, compute_detailed, compute_with, BillingMetric, PricingInputs};
use ppu_pricing_core::time_value::{pmt, pv, PaymentTiming};
use ppu_pricing_core::{CalculationResult, PricingConstants, PricingError};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// Offer the calculator form opens with.
fn reference_offer() -> PricingInputs {
    PricingInputs {
        billing_metric: BillingMetric::Kilograms,
        expected_consumption: dec!(960),
        number_of_assets: 1000,
        geography: String::new(),
        utilization_risk_offloading: dec!(50),
        acquisition_cost_core: dec!(22000000),
        acquisition_cost_accessories: dec!(6000000),
        project_cost: dec!(9000000),
        minimum_usage_term: dec!(60),
        residual_value_core: dec!(10),
        residual_value_accessories: dec!(25),
        maintenance_fee_core: dec!(1100000),
        maintenance_fee_accessories: dec!(300000),
        consumables_cost: dec!(10),
    }
}

// ===========================================================================
// Annuity primitives
// ===========================================================================

#[test]
fn test_pmt_balances_annuity_identity() {
    // pv * (1+r)^n + pmt * ((1+r)^n - 1) / r + fv = 0
    let cases = [
        (dec!(0.048), 5, dec!(-1.075), dec!(0.10)),
        (dec!(0.01), 36, dec!(250000), dec!(-10000)),
        (dec!(0.12), 1, dec!(-1), dec!(0)),
        (dec!(0.048), 60, dec!(-1), dec!(0.25)),
    ];
    for (rate, periods, present_value, future_value) in cases {
        let n = Decimal::from(periods);
        let payment = pmt(rate, n, present_value, future_value, PaymentTiming::End).unwrap();
        let growth = (Decimal::ONE + rate).powi(periods);
        let balance =
            present_value * growth + payment * (growth - Decimal::ONE) / rate + future_value;
        let relative = (balance / present_value).abs();
        assert!(
            relative < dec!(0.000000001),
            "rate {rate}, periods {periods}: residual balance {balance}"
        );
    }
}

#[test]
fn test_pv_discounts_future_value() {
    for (rate, periods) in [(dec!(0.24), 1), (dec!(0.048), 5), (dec!(0.004), 60)] {
        let n = Decimal::from(periods);
        let value = pv(rate, n, Decimal::ZERO, dec!(1000), PaymentTiming::End).unwrap();
        let compounded = value * (Decimal::ONE + rate).powi(periods);
        assert!((compounded - dec!(1000)).abs() < dec!(0.000001), "got {compounded}");
    }
}

#[test]
fn test_zero_rate_degeneracy_is_exact() {
    let payment = pmt(dec!(0), dec!(8), dec!(-1200), dec!(400), PaymentTiming::End).unwrap();
    assert_eq!(payment, dec!(100));
    let value = pv(dec!(0), dec!(8), dec!(100), dec!(400), PaymentTiming::End).unwrap();
    assert_eq!(value, dec!(1200));
}

// ===========================================================================
// Reference scenario
// ===========================================================================

#[test]
fn test_reference_scenario() {
    let result = compute(&reference_offer()).unwrap();
    assert_eq!(
        result,
        CalculationResult {
            total_investment_cost: dec!(37000000),
            pay_per: "kg".into(),
            cost_per_unit: dec!(23.05),
            total_usage_cost_per_asset: dec!(22128),
            additional_cost: dec!(11064),
            monthly_advance_payment_per_asset: dec!(922),
            monthly_advance_payment_total: dec!(922000),
        }
    );
}

#[test]
fn test_reference_breakdown() {
    let detailed = compute_detailed(&reference_offer(), &PricingConstants::default()).unwrap();
    let costs = &detailed.breakdown.costs;
    assert!((costs.core_assets.relative - dec!(0.2287568258525)).abs() < dec!(0.0000000001));
    assert!((costs.subtotal_per_asset - dec!(9864.0125565432)).abs() < dec!(0.0001));
    let price = &detailed.breakdown.usage_price;
    assert!((price.unrounded - dec!(23.0437663496656)).abs() < dec!(0.0000001));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_investment_cost_scales_linearly() {
    let base = compute(&reference_offer()).unwrap();
    for k in [dec!(0.5), dec!(3), dec!(12.25)] {
        let mut offer = reference_offer();
        offer.acquisition_cost_core *= k;
        offer.acquisition_cost_accessories *= k;
        offer.project_cost *= k;
        let scaled = compute(&offer).unwrap();
        assert_eq!(scaled.total_investment_cost, base.total_investment_cost * k);
    }
}

#[test]
fn test_unit_price_independent_of_fleet_size() {
    let mut reference = reference_offer();
    reference.consumables_cost = Decimal::ZERO;
    let base = compute(&reference).unwrap();

    for k in [2u32, 5, 10] {
        let factor = Decimal::from(k);
        let mut offer = reference.clone();
        offer.number_of_assets *= k;
        offer.acquisition_cost_core *= factor;
        offer.acquisition_cost_accessories *= factor;
        offer.project_cost *= factor;
        offer.maintenance_fee_core *= factor;
        offer.maintenance_fee_accessories *= factor;

        let scaled = compute(&offer).unwrap();
        assert_eq!(scaled.cost_per_unit, base.cost_per_unit);
        assert_eq!(
            scaled.monthly_advance_payment_total,
            base.monthly_advance_payment_total * factor
        );
    }
}

#[test]
fn test_unit_price_is_cent_exact_and_never_undercharges() {
    let constants = PricingConstants::default();
    for consumption in [dec!(1), dec!(7), dec!(333), dec!(960), dec!(12345.6)] {
        for offloading in [dec!(0), dec!(12.5), dec!(50), dec!(99), dec!(100)] {
            let mut offer = reference_offer();
            offer.expected_consumption = consumption;
            offer.utilization_risk_offloading = offloading;
            let detailed = compute_detailed(&offer, &constants).unwrap();
            let unit_price = detailed.result.cost_per_unit;
            assert!((unit_price * dec!(100)).fract().is_zero(), "{unit_price} is not cent-exact");
            assert!(unit_price >= detailed.breakdown.usage_price.unrounded);
            assert!(unit_price - detailed.breakdown.usage_price.unrounded < dec!(0.01));
        }
    }
}

#[test]
fn test_offloading_shifts_risk_to_provider() {
    let mut previous: Option<CalculationResult> = None;
    for offloading in [dec!(0), dec!(25), dec!(50), dec!(75), dec!(100)] {
        let mut offer = reference_offer();
        offer.utilization_risk_offloading = offloading;
        let result = compute(&offer).unwrap();
        if let Some(prev) = previous {
            assert!(result.cost_per_unit > prev.cost_per_unit);
            assert!(result.additional_cost < prev.additional_cost);
        }
        previous = Some(result);
    }
}

// ===========================================================================
// Alternative policy and terms
// ===========================================================================

#[test]
fn test_zero_interest_policy() {
    let constants = PricingConstants {
        market_interest_rate: Decimal::ZERO,
        ..PricingConstants::default()
    };
    let mut offer = reference_offer();
    offer.consumables_cost = Decimal::ZERO;
    offer.acquisition_cost_accessories = Decimal::ZERO;
    offer.project_cost = Decimal::ZERO;
    offer.maintenance_fee_core = Decimal::ZERO;
    offer.maintenance_fee_accessories = Decimal::ZERO;
    offer.residual_value_core = Decimal::ZERO;
    offer.utilization_risk_offloading = Decimal::ZERO;
    let result = compute_with(&offer, &constants).unwrap();
    // 22000 per asset * 1.075 / 5 years = 4730 per year, over 960 kg
    assert_eq!(result.cost_per_unit, dec!(4.93));
}

#[test]
fn test_fractional_year_term() {
    let mut offer = reference_offer();
    offer.minimum_usage_term = dec!(18);
    let short = compute(&offer).unwrap();
    let long = compute(&reference_offer()).unwrap();
    // Amortizing over 1.5 years costs more per year than over 5
    assert!(short.cost_per_unit > long.cost_per_unit);
}

#[test]
fn test_custom_billing_metric_is_echoed() {
    let mut offer = reference_offer();
    offer.billing_metric = BillingMetric::from("pallets");
    assert_eq!(compute(&offer).unwrap().pay_per, "pallets");
}

// ===========================================================================
// Rejection
// ===========================================================================

#[test]
fn test_zero_assets_or_consumption_rejected() {
    let mut no_assets = reference_offer();
    no_assets.number_of_assets = 0;
    let mut no_consumption = reference_offer();
    no_consumption.expected_consumption = Decimal::ZERO;

    for offer in [no_assets, no_consumption] {
        match compute(&offer) {
            Err(PricingError::InvalidInput { .. }) => {}
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn test_negative_term_rejected() {
    let mut offer = reference_offer();
    offer.minimum_usage_term = dec!(-12);
    assert!(compute(&offer).unwrap_err().is_validation());
}
