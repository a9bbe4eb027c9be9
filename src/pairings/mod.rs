//! Pairing engines for the four supported families. Each engine exposes
//! `pair(pairs) -> Option<target>`: the Miller-loop product over all pairs
//! followed by the family's final exponentiation.

pub mod b_engine;
pub mod bls12;
pub mod bn;
pub mod mnt;

pub use self::b_engine::TwistType;
pub use self::bls12::Bls12Engine;
pub use self::bn::BnEngine;
pub use self::mnt::MntEngine;
