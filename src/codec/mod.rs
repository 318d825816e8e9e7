//! Binary codec for vehicle records
//!
//! Pure and stateless: the store hands records in and gets bytes back, and
//! the reverse on every read. Nothing else in the crate looks inside an
//! encoded entry.
//!
//! # Guarantees
//!
//! - `encode` is total and deterministic
//! - `decode(encode(r)) == r`
//! - Every decode verifies length and checksum before parsing fields

mod checksum;
mod errors;
mod record;

pub use checksum::compute_checksum;
pub use errors::{DecodeError, DecodeResult};
pub use record::{decode, encode, FIELD_COUNT, MIN_ENTRY_SIZE};
