//! ISBN-10 / ISBN-13 normalization and checksum validation

use crate::error::{AppError, AppResult};

/// Validates an ISBN, stripping hyphens, spaces and any other separator
/// first. Returns the normalized string (digits plus a possible trailing
/// `X`) on success.
pub fn validate(isbn: &str) -> AppResult<String> {
    if isbn.trim().is_empty() {
        return Err(AppError::InvalidIsbn("ISBN is required".to_string()));
    }

    let normalized: String = isbn
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    match normalized.len() {
        10 => {
            if !is_valid_isbn10(&normalized) {
                return Err(AppError::InvalidIsbn("Invalid ISBN-10".to_string()));
            }
        }
        13 => {
            if !is_valid_isbn13(&normalized) {
                return Err(AppError::InvalidIsbn("Invalid ISBN-13".to_string()));
            }
        }
        _ => {
            return Err(AppError::InvalidIsbn(
                "ISBN must contain 10 or 13 digits".to_string(),
            ));
        }
    }

    Ok(normalized)
}

/// Weighted sum over positions 0..9 with weights 10 down to 1; the last
/// position may be `X`, standing for the value 10. Valid iff sum % 11 == 0.
fn is_valid_isbn10(isbn: &str) -> bool {
    let mut sum = 0;

    for (i, c) in isbn.chars().enumerate() {
        let value = if i == 9 && c == 'X' {
            10
        } else if let Some(digit) = c.to_digit(10) {
            digit
        } else {
            return false;
        };

        sum += value * (10 - i as u32);
    }

    sum % 11 == 0
}

/// Digits weighted 1 / 3 alternating; valid iff sum % 10 == 0. `X` is not
/// a digit here, so a check letter fails the scan.
fn is_valid_isbn13(isbn: &str) -> bool {
    let mut sum = 0;

    for (i, c) in isbn.chars().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };

        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_isbn10() {
        assert_eq!(validate("0306406152").unwrap(), "0306406152");
    }

    #[test]
    fn accepts_isbn10_with_separators() {
        assert_eq!(validate("0-306-40615-2").unwrap(), "0306406152");
    }

    #[test]
    fn accepts_and_uppercases_check_letter() {
        assert_eq!(validate("097522980x").unwrap(), "097522980X");
    }

    #[test]
    fn rejects_isbn10_with_bad_checksum() {
        assert!(matches!(
            validate("0306406151"),
            Err(AppError::InvalidIsbn(_))
        ));
    }

    #[test]
    fn rejects_every_single_digit_mutation_of_a_valid_isbn10() {
        let valid = "0306406152";
        for (i, original) in valid.char_indices() {
            for digit in '0'..='9' {
                if digit == original {
                    continue;
                }
                let mut mutated: Vec<char> = valid.chars().collect();
                mutated[i] = digit;
                let mutated: String = mutated.into_iter().collect();
                assert!(validate(&mutated).is_err(), "{} should be invalid", mutated);
            }
        }
    }

    #[test]
    fn accepts_valid_isbn13() {
        assert_eq!(validate("978-0-306-40615-7").unwrap(), "9780306406157");
    }

    #[test]
    fn rejects_isbn13_with_bad_checksum() {
        assert!(matches!(
            validate("9780306406158"),
            Err(AppError::InvalidIsbn(_))
        ));
    }

    #[test]
    fn rejects_check_letter_in_isbn13() {
        assert!(matches!(
            validate("978030640615X"),
            Err(AppError::InvalidIsbn(_))
        ));
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(validate(""), Err(AppError::InvalidIsbn(_))));
        assert!(matches!(validate("   "), Err(AppError::InvalidIsbn(_))));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(validate("12345"), Err(AppError::InvalidIsbn(_))));
    }

    #[test]
    fn strips_formatting_before_validating() {
        assert_eq!(validate(" 978 0306 40615 7 ").unwrap(), "9780306406157");
    }
}
