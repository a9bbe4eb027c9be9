//! ABI enumerants and validation limits.

pub const OPERATION_G1_ADD: u8 = 0x01;
pub const OPERATION_G1_MUL: u8 = 0x02;
pub const OPERATION_G1_MULTIEXP: u8 = 0x03;

pub const OPERATION_G2_ADD: u8 = 0x04;
pub const OPERATION_G2_MUL: u8 = 0x05;
pub const OPERATION_G2_MULTIEXP: u8 = 0x06;

pub const OPERATION_PAIRING: u8 = 0x07;

pub const CURVE_TYPE_BLS12: u8 = 0x01;
pub const CURVE_TYPE_BN: u8 = 0x02;
pub const CURVE_TYPE_MNT4: u8 = 0x03;
pub const CURVE_TYPE_MNT6: u8 = 0x04;

pub const TWIST_TYPE_M: u8 = 0x01;
pub const TWIST_TYPE_D: u8 = 0x02;

pub const SIGN_PLUS: u8 = 0x00;
pub const SIGN_MINUS: u8 = 0x01;

pub const EXTENSION_DEGREE_2: u8 = 0x02;
pub const EXTENSION_DEGREE_3: u8 = 0x03;

/// Largest supported modulus width, in 64-bit limbs.
pub const MAX_MODULUS_LIMBS: usize = 16;

// Sane limits capping the worst-case work a single call can request.

pub const MAX_BLS12_X_BIT_LENGTH: usize = 512;
pub const MAX_BN_U_BIT_LENGTH: usize = 512;

pub const MAX_BLS12_X_HAMMING: u32 = 512;
pub const MAX_BN_SIX_U_PLUS_TWO_HAMMING: u32 = 512;

pub const MAX_ATE_PAIRING_ATE_LOOP_COUNT: usize = 2048;
pub const MAX_ATE_PAIRING_ATE_LOOP_COUNT_HAMMING: u32 = 2048;

pub const MAX_ATE_PAIRING_FINAL_EXP_W0_BIT_LENGTH: usize = 2048;
pub const MAX_ATE_PAIRING_FINAL_EXP_W1_BIT_LENGTH: usize = 2048;
