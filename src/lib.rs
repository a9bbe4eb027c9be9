//! ABI-driven elliptic curve arithmetic and pairings over runtime-defined
//! prime fields.
//!
//! A single byte string describes the field modulus, the curve, the
//! extension tower, the points and the operation; [`run`] returns the
//! serialized result or a descriptive error. Covered operations: point
//! addition, scalar multiplication and multi-exponentiation on G1/G2, and
//! optimal ate pairings for the BLS12, BN, MNT4 and MNT6 families. No curve
//! is hard-coded; every parameter is a runtime input subject to the
//! documented validation.
//!
//! The hot path is monomorphized per modulus width: the dispatcher selects
//! a limb count N in 4..=16 and instantiates the whole stack over
//! fixed-size `[u64; N]` arithmetic in Montgomery form.

pub mod api;
pub mod constants;
pub mod errors;
pub mod extensions;
pub mod field;
pub mod fp;
pub mod multiexp;
pub mod pairings;
pub mod repr;
pub mod traits;
pub mod weierstrass;

mod decode;
mod scalar;

pub use crate::api::run;
pub use crate::errors::ApiError;

#[cfg(test)]
mod tests;
