use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValuationError {
    #[error("cannot compute a break-even value for a price of zero")]
    ZeroPrice,
}

/// Break-even maple-point value for a meso sale price.
///
/// The decimal digits of `price`, read as the fraction `0.<digits>`, give the
/// meso-to-maple-point rate of the listing; `ceil(1145 / rate)` is the
/// redemption value below which a token exchange loses against selling the
/// mesos directly. Rounding up keeps the threshold on the unfavorable side.
pub fn break_even_value(price: u64) -> Result<u64, ValuationError> {
    if price == 0 {
        return Err(ValuationError::ZeroPrice);
    }

    let digits = price.ilog10() + 1;
    let rate = price as f64 / 10f64.powi(digits as i32);

    Ok((1145.0 / rate).ceil() as u64)
}
