use linechart_rs::core::{
    DataBounds, DecimalValueFormatter, PercentValueFormatter, ValueFormatter,
    format_trimmed_decimal,
};

fn bounds() -> DataBounds {
    DataBounds::new(0.0, -5.0, 10.0, 50.0)
}

#[test]
fn decimal_formatter_rounds_half_to_even() {
    let whole = DecimalValueFormatter::default().with_max_decimals(0);
    assert_eq!(whole.format(12.5, bounds(), 4), "12");
    assert_eq!(whole.format(13.5, bounds(), 4), "14");
}

#[test]
fn decimal_formatter_keeps_sign_and_trims() {
    let formatter = DecimalValueFormatter::default();
    assert_eq!(formatter.format(-3.456, bounds(), 4), "-3.46");
    assert_eq!(formatter.format(40.10, bounds(), 4), "40.1");
    assert_eq!(formatter.format(-0.004, bounds(), 4), "0");
}

#[test]
fn currency_formatters_wrap_the_number() {
    assert_eq!(
        DecimalValueFormatter::currency_suffix("€").format(1250.0, bounds(), 4),
        "1250€"
    );
    assert_eq!(
        DecimalValueFormatter::currency_prefix("$").format(9.99, bounds(), 4),
        "$9.99"
    );
}

#[test]
fn percent_formatter_appends_sign() {
    assert_eq!(PercentValueFormatter.format(12.5, bounds(), 4), "12.5%");
    assert_eq!(PercentValueFormatter.format(-0.25, bounds(), 4), "-0.25%");
}

#[test]
fn non_finite_values_fall_back_to_plain_text() {
    assert_eq!(format_trimmed_decimal(f64::INFINITY, 2), "inf");
    assert_eq!(format_trimmed_decimal(f64::NAN, 2), "NaN");
}
