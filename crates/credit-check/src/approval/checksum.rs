//! Luhn (mod 10) digit checksum used to catch mistyped card numbers.

pub const DEFAULT_LUHN_MODULUS: u32 = 10;

/// Input that cannot be checksummed at all, as opposed to a number that fails the check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecksumError {
    #[error("card number is empty")]
    Empty,
    #[error("unexpected character {found:?} at position {position}")]
    NonDigit { position: usize, found: char },
    #[error("checksum modulus must be greater than zero")]
    ZeroModulus,
}

/// Returns `Ok(true)` when the weighted digit sum is a multiple of `modulus`.
pub fn is_valid_checksum(number: &str, modulus: u32) -> Result<bool, ChecksumError> {
    if modulus == 0 {
        return Err(ChecksumError::ZeroModulus);
    }

    Ok(luhn_total(number)? % modulus == 0)
}

/// Sum of the odd-position digits plus the reduced doubles of the even-position digits,
/// counting positions from the rightmost digit.
pub fn luhn_total(number: &str) -> Result<u32, ChecksumError> {
    if number.is_empty() {
        return Err(ChecksumError::Empty);
    }

    let mut digits = Vec::with_capacity(number.len());
    for (index, found) in number.chars().enumerate() {
        let digit = found.to_digit(10).ok_or(ChecksumError::NonDigit {
            position: index + 1,
            found,
        })?;
        digits.push(digit);
    }

    let total = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(offset, &digit)| {
            if offset % 2 == 0 {
                return digit;
            }
            let doubled = digit * 2;
            if doubled >= 10 {
                doubled - 9
            } else {
                doubled
            }
        })
        .sum();

    Ok(total)
}
