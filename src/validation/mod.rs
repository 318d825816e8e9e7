//! Field validation for submitted vehicles
//!
//! Runs before the store is touched: a rejected submission never consumes
//! an identifier.
//!
//! Rules:
//! - `marca` and `modelo` must contain a non-whitespace character
//! - `ano` must lie in `MIN_YEAR ..= current year + 1`

use chrono::{Datelike, Local};
use thiserror::Error;

use crate::model::NewCarro;

/// Year of the first production automobile.
pub const MIN_YEAR: i32 = 1886;

/// Rejection reasons. Display text is the message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Marca e Modelo são obrigatórios.")]
    MissingBrandOrModel,

    #[error("Ano inválido.")]
    YearOutOfRange { year: i32, max: i32 },
}

/// Validates a submission against the given calendar year.
///
/// Deterministic: the year is a parameter so rules can be tested without
/// depending on the clock.
pub fn validate_carro(carro: &NewCarro, current_year: i32) -> Result<(), ValidationError> {
    if carro.brand.trim().is_empty() || carro.model.trim().is_empty() {
        return Err(ValidationError::MissingBrandOrModel);
    }

    let max = current_year + 1;
    if carro.year < MIN_YEAR || carro.year > max {
        return Err(ValidationError::YearOutOfRange {
            year: carro.year,
            max,
        });
    }

    Ok(())
}

/// Validates a submission against the local calendar year.
pub fn validate_now(carro: &NewCarro) -> Result<(), ValidationError> {
    validate_carro(carro, Local::now().year())
}
