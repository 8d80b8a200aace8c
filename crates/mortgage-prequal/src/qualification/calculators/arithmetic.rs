use crate::qualification::domain::SumResult;
use crate::qualification::error::DomainViolation;

pub fn add_numbers(a: i64, b: i64) -> Result<SumResult, DomainViolation> {
    let sum = a
        .checked_add(b)
        .ok_or(DomainViolation::ArithmeticOverflow { a, b })?;
    Ok(SumResult { a, b, sum })
}
