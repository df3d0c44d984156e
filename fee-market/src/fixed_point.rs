//! Integer-only fixed-point exponential.
//!
//! Inputs and outputs are WAD-scaled (`1e18 == 1.0`). The evaluation is a
//! scaled base-2 exponential:
//!
//! ```text
//! e^x = 2^(x · log2 e) = 2^k · 2^f        k integer, 0 <= f < 1
//! 2^f = Π 2^(2^-i)  over every set bit i of f
//! ```
//!
//! `x · log2 e` is formed in Q127, the 64 most significant fractional bits
//! select multipliers from [`EXP2_FRACTION_BITS`] and the integer part is
//! applied as an exact shift. No floating point is involved, so identical
//! inputs produce identical outputs on every host.

use {crate::error::FeeError, alloy_primitives::U256};

/// `1.0` in WAD fixed point.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Smallest WAD input [`exp`] rejects (≈ 135.306). Just below it the result
/// still fits in a `U256`.
pub const MAX_EXP_INPUT: u128 = 135_305_999_368_893_231_588;

/// Binary point of the intermediate representation.
const Q: usize = 127;

/// `1.0` in Q127.
const ONE_X127: u128 = 1 << Q;

/// `log2(e)` in Q127.
const LOG2_E_X127: u128 = 0xB8AA3B29_5C17F0BB_BE87FED0_691D3E88;

/// `2^(2^-(i+1))` in Q127, indexed by fractional bit (most significant first).
const EXP2_FRACTION_BITS: [u128; 64] = [
    0xB504F333_F9DE6484_597D89B3_754ABE9F, // 2^(2^-1)
    0x9837F051_8DB8A96F_46AD2318_2E42F6F6, // 2^(2^-2)
    0x8B95C1E3_EA8BD6E6_FBE46287_58A53C90, // 2^(2^-3)
    0x85AAC367_CC487B14_C5C95B8C_2154C1B2, // 2^(2^-4)
    0x82CD8698_AC2BA1D7_3E2A475B_46520BFF, // 2^(2^-5)
    0x8164D1F3_BC030773_7BE56527_BD14DEF4, // 2^(2^-6)
    0x80B1ED4F_D999AB6C_25335719_B6E6FD20, // 2^(2^-7)
    0x8058D7D2_D5E5F6B0_94D589F6_08EE4AA2, // 2^(2^-8)
    0x802C6436_D0E04F50_FF8CE94A_6797B3CE, // 2^(2^-9)
    0x8016302F_17467628_3690DFE4_4D11D008, // 2^(2^-10)
    0x800B179C_82028FD0_945E54E2_AE18F2F0, // 2^(2^-11)
    0x80058BAF_7FEE3B5D_1C718B38_E549CB93, // 2^(2^-12)
    0x8002C5D0_0FDCFCB6_B6566A58_C048BE1F, // 2^(2^-13)
    0x800162E6_1BED4A48_E84C2E1A_463473D9, // 2^(2^-14)
    0x8000B172_92F702A3_AA22BEAC_CA949013, // 2^(2^-15)
    0x800058B9_2ABBAE02_030C5FA5_256F41FE, // 2^(2^-16)
    0x80002C5C_8DADE4D7_1776C0F4_DBEA67D6, // 2^(2^-17)
    0x8000162E_44EAF636_526BE456_600BDBE4, // 2^(2^-18)
    0x80000B17_21FA7C18_8307016C_1CD4E8B6, // 2^(2^-19)
    0x8000058B_90DE7E4C_ECFC4875_03488BB1, // 2^(2^-20)
    0x800002C5_C8678F36_CBFCE50A_6DE60B14, // 2^(2^-21)
    0x80000162_E431DB9F_80B2347B_5D62E516, // 2^(2^-22)
    0x800000B1_721872D0_C7B08CF1_E0114152, // 2^(2^-23)
    0x80000058_B90C1AA8_A5C3736C_B77E8DFF, // 2^(2^-24)
    0x8000002C_5C8605A4_635F2EFC_2362D978, // 2^(2^-25)
    0x80000016_2E4300E6_35CF4A10_9E3939BD, // 2^(2^-26)
    0x8000000B_17217FF8_1BEF9C55_1590CF83, // 2^(2^-27)
    0x80000005_8B90BFDD_4E39CD52_C0CFA27C, // 2^(2^-28)
    0x80000002_C5C85FE6_F72D669E_0E76E411, // 2^(2^-29)
    0x80000001_62E42FF1_8F9AD351_86D0DF28, // 2^(2^-30)
    0x80000000_B17217F8_4CCE71AA_0DCFFFE7, // 2^(2^-31)
    0x80000000_58B90BFC_07A77AD5_6ED22AAA, // 2^(2^-32)
    0x80000000_2C5C85FD_FC23CDEA_D40DA8D6, // 2^(2^-33)
    0x80000000_162E42FE_FC25EB15_71853A66, // 2^(2^-34)
    0x80000000_0B17217F_7D97F692_BAACDED5, // 2^(2^-35)
    0x80000000_058B90BF_BEAD3B8B_5DD254D7, // 2^(2^-36)
    0x80000000_02C5C85F_DF4EEDD6_2F084E67, // 2^(2^-37)
    0x80000000_0162E42F_EFA58AEF_378BF586, // 2^(2^-38)
    0x80000000_00B17217_F7D24A78_A3C7EF02, // 2^(2^-39)
    0x80000000_0058B90B_FBE9067C_93E474A6, // 2^(2^-40)
    0x80000000_002C5C85_FDF47B8E_5A72599F, // 2^(2^-41)
    0x80000000_00162E42_FEFA3BDB_315934A2, // 2^(2^-42)
    0x80000000_000B1721_7F7D1D72_99B49C46, // 2^(2^-43)
    0x80000000_00058B90_BFBE8E9A_8D1C4EA0, // 2^(2^-44)
    0x80000000_0002C5C8_5FDF4745_969EA76F, // 2^(2^-45)
    0x80000000_000162E4_2FEFA3A0_DF5373BF, // 2^(2^-46)
    0x80000000_0000B172_17F7D1CF_F4AAC1E1, // 2^(2^-47)
    0x80000000_000058B9_0BFBE8E7_DB95A2F1, // 2^(2^-48)
    0x80000000_00002C5C_85FDF473_E61AE1F8, // 2^(2^-49)
    0x80000000_0000162E_42FEFA39_F121751C, // 2^(2^-50)
    0x80000000_00000B17_217F7D1C_F815BB96, // 2^(2^-51)
    0x80000000_0000058B_90BFBE8E_7BEC1E0D, // 2^(2^-52)
    0x80000000_000002C5_C85FDF47_3DEE5F17, // 2^(2^-53)
    0x80000000_00000162_E42FEFA3_9EF5438F, // 2^(2^-54)
    0x80000000_000000B1_7217F7D1_CF7A26C8, // 2^(2^-55)
    0x80000000_00000058_B90BFBE8_E7BCF4A4, // 2^(2^-56)
    0x80000000_0000002C_5C85FDF4_73DE72A2, // 2^(2^-57)
    0x80000000_00000016_2E42FEFA_39EF3765, // 2^(2^-58)
    0x80000000_0000000B_17217F7D_1CF79B37, // 2^(2^-59)
    0x80000000_00000005_8B90BFBE_8E7BCD7D, // 2^(2^-60)
    0x80000000_00000002_C5C85FDF_473DE6B6, // 2^(2^-61)
    0x80000000_00000001_62E42FEF_A39EF359, // 2^(2^-62)
    0x80000000_00000000_B17217F7_D1CF79AC, // 2^(2^-63)
    0x80000000_00000000_58B90BFB_E8E7BCD6, // 2^(2^-64)
];

/// Evaluate `e^x` for a WAD-scaled `x`.
///
/// Fails with [`FeeError::DomainOverflow`] when `x >= MAX_EXP_INPUT`.
/// Callers that can attribute an oversized input to a higher-level cause
/// are expected to check the bound themselves before calling.
pub fn exp(x: U256) -> Result<U256, FeeError> {
    if x >= U256::from(MAX_EXP_INPUT) {
        return Err(FeeError::DomainOverflow { input: x });
    }

    // x < 2^68 and LOG2_E_X127 < 2^128, so the product cannot overflow.
    let exponent = x * U256::from(LOG2_E_X127) / U256::from(WAD);
    let whole: usize = (exponent >> Q).saturating_to();
    let fraction = (exponent >> (Q - 64)).as_limbs()[0];

    let mut mantissa = U256::from(ONE_X127);
    for (bit, multiplier) in EXP2_FRACTION_BITS.iter().enumerate() {
        if fraction & (1u64 << (63 - bit)) != 0 {
            // Both factors are below 2^128.
            mantissa = (mantissa * U256::from(*multiplier)) >> Q;
        }
    }

    let scaled = mantissa * U256::from(WAD);
    if whole >= Q {
        scaled
            .checked_shl(whole - Q)
            .ok_or(FeeError::DomainOverflow { input: x })
    } else {
        Ok(scaled >> (Q - whole))
    }
}
