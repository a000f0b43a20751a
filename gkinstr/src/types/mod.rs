//! Types module
//!
//! A deliberately small type vocabulary: integer types of arbitrary bit
//! width, the two IEEE binary floating-point widths, and an opaque pointer
//! type. Kernel-entry analysis never inspects value layouts, so no
//! aggregate layer or registry indirection is carried here; instructions
//! and declarations embed a [`Ty`] by value.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumIs;

/// Represents an integer type with a specific bit width.
///
/// Signedness is not represented here; instructions that operate on signed
/// integers interpret the bits accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct IType {
    num_bits: u32,
}

impl IType {
    /// Common integer types.
    pub const I1: Self = Self { num_bits: 1 };
    pub const I8: Self = Self { num_bits: 8 };
    pub const I32: Self = Self { num_bits: 32 };
    pub const I64: Self = Self { num_bits: 64 };

    pub const MIN_BITS: u32 = 1;
    pub const MAX_BITS: u32 = (1 << 23) - 1;

    /// Creates a new integer type with the specified number of bits.
    #[inline]
    pub const fn new(num_bits: u32) -> Option<Self> {
        if num_bits >= Self::MIN_BITS && num_bits <= Self::MAX_BITS {
            Some(Self { num_bits })
        } else {
            None
        }
    }

    /// Returns the number of bits of the integer type.
    #[inline]
    pub const fn num_bits(&self) -> u32 {
        self.num_bits
    }
}

impl std::fmt::Display for IType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "i{}", self.num_bits)
    }
}

/// Floating-point widths supported by the IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FType {
    F32,
    F64,
}

impl std::fmt::Display for FType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FType::F32 => write!(f, "f32"),
            FType::F64 => write!(f, "f64"),
        }
    }
}

/// Any value type that can appear as a parameter, return, or destination type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ty {
    Int(IType),
    Float(FType),
    /// Opaque pointer; pointee types are not tracked.
    Ptr,
}

impl Ty {
    pub const I1: Ty = Ty::Int(IType::I1);
    pub const I32: Ty = Ty::Int(IType::I32);
    pub const I64: Ty = Ty::Int(IType::I64);
}

impl std::fmt::Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ty::Int(ity) => write!(f, "{}", ity),
            Ty::Float(fty) => write!(f, "{}", fty),
            Ty::Ptr => write!(f, "ptr"),
        }
    }
}
