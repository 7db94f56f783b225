//! EAN-13 barcodes.
//!
//! The check digit is computed over the first twelve digits with alternating weights 1
//! and 3 (starting with 1); it is whatever brings the weighted sum up to a multiple of
//! ten.

use rand::Rng;
use thiserror::Error;

pub const BODY_LEN: usize = 12;
pub const CODE_LEN: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    #[error("Expected {expected} digits, got {got}")]
    Length { expected: usize, got: usize },

    #[error("Not a digit: {0:?}")]
    NonDigit(char),
}

fn digits(code: &str, expected: usize) -> Result<Vec<u8>, BarcodeError> {
    let digits = code
        .trim()
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8).ok_or(BarcodeError::NonDigit(c)))
        .collect::<Result<Vec<u8>, _>>()?;
    if digits.len() != expected {
        return Err(BarcodeError::Length {
            expected,
            got: digits.len(),
        });
    }
    Ok(digits)
}

fn check_digit_of(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(*d) * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Check digit of a 12-digit body.
pub fn checksum(body: &str) -> Result<u8, BarcodeError> {
    Ok(check_digit_of(&digits(body, BODY_LEN)?))
}

/// Append the check digit to a 12-digit body.
pub fn complete(body: &str) -> Result<String, BarcodeError> {
    let check = checksum(body)?;
    Ok(format!("{}{check}", body.trim()))
}

/// Whether `code` is 13 digits with a correct check digit.
pub fn is_valid(code: &str) -> bool {
    match digits(code, CODE_LEN) {
        Ok(d) => check_digit_of(&d[..BODY_LEN]) == d[BODY_LEN],
        Err(_) => false,
    }
}

/// A fresh code from twelve random digits.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let body: Vec<u8> = (0..BODY_LEN).map(|_| rng.gen_range(0..10)).collect();
    let check = check_digit_of(&body);
    body.iter()
        .chain(std::iter::once(&check))
        .map(|d| char::from(b'0' + d))
        .collect()
}
