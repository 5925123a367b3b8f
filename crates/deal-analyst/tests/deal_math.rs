use deal_analyst::finance::{
    mortgage_summary, rent_vs_price, MortgageTerms, DEFAULT_EXPENSE_RATIO, DEFAULT_TARGET_CAP_RATE,
};
use deal_analyst::InvalidInput;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 0.01
}

#[test]
fn rental_purchase_with_escrow_and_rent() {
    let terms = MortgageTerms::new(350_000.0, 70_000.0, 6.5, 30)
        .with_escrow(350.0, 120.0, 0.0)
        .with_rent(2_400.0);
    let result = mortgage_summary(&terms).expect("valid terms");

    assert_eq!(result.price, 350_000.0);
    assert_eq!(result.down_payment, 70_000.0);
    assert_eq!(result.loan_amount, 280_000.0);
    assert_eq!(result.ltv_percent, 80.0);
    assert!(close(result.principal_interest, 1_769.79));
    assert!(close(result.monthly_payment, 2_239.79));
    assert!(close(result.cashflow, 160.21));
    assert_eq!(result.inputs.taxes_month, 350.0);
    assert_eq!(result.inputs.insurance_month, 120.0);
}

#[test]
fn zero_rate_payment_is_straight_line_for_any_term() {
    for years in [1, 7, 15, 30, 40] {
        let terms = MortgageTerms::new(250_000.0, 50_000.0, 0.0, years);
        let result = mortgage_summary(&terms).expect("valid terms");
        let expected = 200_000.0 / f64::from(years * 12);
        assert!(close(result.principal_interest, expected), "years = {years}");
    }
}

#[test]
fn ltv_is_bounded_for_valid_inputs() {
    let cases = [
        (100_000.0, 0.0),
        (100_000.0, 100_000.0),
        (275_000.0, 13_750.0),
        (1_250_000.0, 312_500.0),
    ];
    for (price, down) in cases {
        let result = mortgage_summary(&MortgageTerms::new(price, down, 6.875, 30))
            .expect("valid terms");
        assert!(
            (0.0..=100.0).contains(&result.ltv_percent),
            "ltv {} out of range",
            result.ltv_percent
        );
    }
}

#[test]
fn down_payment_above_price_is_rejected() {
    let error = mortgage_summary(&MortgageTerms::new(100.0, 200.0, 6.5, 30))
        .expect_err("down payment exceeds price");
    assert_eq!(
        error,
        InvalidInput::DownPaymentExceedsPrice {
            down_payment: 200.0,
            price: 100.0
        }
    );
}

#[test]
fn rent_based_valuation_at_five_cap() {
    let result = rent_vs_price(2_400.0, DEFAULT_TARGET_CAP_RATE, DEFAULT_EXPENSE_RATIO)
        .expect("valid inputs");
    assert_eq!(result.rent_month, 2_400.0);
    assert_eq!(result.noi, 18_720.0);
    assert_eq!(result.implied_value, 374_400.0);
}

#[test]
fn zero_rent_values_to_zero() {
    let result = rent_vs_price(0.0, 7.25, 0.4).expect("valid inputs");
    assert_eq!(result.noi, 0.0);
    assert_eq!(result.implied_value, 0.0);
}

#[test]
fn results_serialize_with_documented_fields() {
    let terms = MortgageTerms::new(350_000.0, 70_000.0, 6.5, 30).with_rent(2_400.0);
    let json = serde_json::to_value(mortgage_summary(&terms).expect("valid terms"))
        .expect("serializes");
    for field in [
        "price",
        "down_payment",
        "loan_amount",
        "ltv_percent",
        "principal_interest",
        "monthly_payment",
        "cashflow",
    ] {
        assert!(json[field].is_number(), "missing {field}");
    }
    assert_eq!(json["inputs"]["rate_percent"], 6.5);
    assert_eq!(json["inputs"]["years"], 30);
}
