//! Extension towers over a runtime prime field. Each level stores a
//! reference to its base context plus the derived Frobenius coefficient
//! tables; elements are coordinate tuples carrying the context reference.

pub mod fp2;
pub mod fp3;
pub mod fp4;
pub mod fp6_2;
pub mod fp6_3;
pub mod fp12;
pub mod frobenius;

pub use self::fp2::{Extension2, Fp2};
pub use self::fp3::{Extension3, Fp3};
pub use self::fp4::{Extension2Over2, Fp4};
pub use self::fp6_2::{Extension2Over3, Fp6_2};
pub use self::fp6_3::{Extension3Over2, Fp6_3};
pub use self::fp12::{Extension2Over3Over2, Fp12};
