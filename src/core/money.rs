use rust_decimal::Decimal;

/// Decimal scale for US dollar amounts (cents)
pub const SCALE: u32 = 2;

/// Rounds an amount to cent precision using banker's rounding
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp(SCALE)
}

/// Validates that an amount is non-negative with at most cent precision
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    if amount.scale() > SCALE {
        return Err(format!(
            "USD amounts must have at most {} decimal places, got {}",
            SCALE,
            amount.scale()
        ));
    }

    if amount < Decimal::ZERO {
        return Err("USD amount cannot be negative".to_string());
    }

    Ok(())
}

/// Formats an amount for display with a dollar sign and two decimal places
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
