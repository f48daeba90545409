//! Check-digit verification for company tax identifiers (CNPJ)
//!
//! A tax identifier is 14 ASCII digits: 12 base digits followed by two
//! check digits. Each check digit is a weighted modulo-11 sum over the
//! digits before it:
//!
//! - first digit: weights `5,4,3,2,9,8,7,6,5,4,3,2` over the 12 base digits
//! - second digit: weights `6,5,4,3,2,9,8,7,6,5,4,3,2` over the base digits
//!   plus the first check digit
//!
//! A remainder of 0 or 1 yields check digit 0, any other remainder `r`
//! yields `11 - r`.
//!
//! All functions here are pure and never panic on malformed input.

/// Number of digits in a tax identifier
pub const TAX_ID_LEN: usize = 14;

const BASE_LEN: usize = 12;

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Returns `true` if `candidate` is a well-formed tax identifier
///
/// The input must already be stripped of punctuation (see [`strip`]).
/// Anything that is not exactly 14 ASCII digits is invalid, and so is a
/// sequence of 14 identical digits even when its arithmetic works out.
///
/// # Examples
///
/// ```
/// use customer_registry::core::tax_id;
///
/// assert!(tax_id::is_valid("11222333000181"));
/// assert!(!tax_id::is_valid("11222333000182"));
/// assert!(!tax_id::is_valid("11111111111111"));
/// ```
pub fn is_valid(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != TAX_ID_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    if bytes.iter().all(|b| *b == bytes[0]) {
        return false;
    }

    let Some([first, second]) = check_digits(&candidate[..BASE_LEN]) else {
        return false;
    };

    bytes[12] - b'0' == first && bytes[13] - b'0' == second
}

/// Computes both check digits for 12 base digits
///
/// Returns `None` if `base` is not exactly 12 ASCII digits.
pub fn check_digits(base: &str) -> Option<[u8; 2]> {
    let bytes = base.as_bytes();
    if bytes.len() != BASE_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let mut digits = [0u32; 13];
    for (slot, byte) in digits.iter_mut().zip(bytes) {
        *slot = u32::from(byte - b'0');
    }

    let first = weighted_check_digit(&digits[..BASE_LEN], &FIRST_WEIGHTS);
    digits[BASE_LEN] = first;
    let second = weighted_check_digit(&digits, &SECOND_WEIGHTS);

    Some([first as u8, second as u8])
}

fn weighted_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}

/// Removes every non-digit character (`11.222.333/0001-81` → `11222333000181`)
pub fn strip(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Renders a 14-digit identifier as `NN.NNN.NNN/NNNN-NN`
///
/// Returns `None` when `tax_id` is not 14 ASCII digits. The check digits
/// are not verified.
pub fn format(tax_id: &str) -> Option<String> {
    let bytes = tax_id.as_bytes();
    if bytes.len() != TAX_ID_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    Some(format!(
        "{}.{}.{}/{}-{}",
        &tax_id[0..2],
        &tax_id[2..5],
        &tax_id[5..8],
        &tax_id[8..12],
        &tax_id[12..14]
    ))
}
