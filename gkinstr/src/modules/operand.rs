//! Shared operand types for instructions.
//!
//! An instruction operand can be a reference to another SSA value (`Reg`),
//! an immediate constant (`Imm`) or a code label (`Lbl`).
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumIs;

/// SSA value identifier used to name the destination or reference another
/// instruction's result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Name(pub u32);

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Represents a code label used as a target for control-flow instructions.
///
/// Labels may not cross function boundaries; they are only valid within the
/// function they are defined in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Label(pub u32);

impl Label {
    pub const NIL: Label = Label(0);

    /// Returns true if this is the "nil" label (i.e., label 0).
    ///
    /// This label is reserved as the function entry label. It should always
    /// be present.
    pub fn is_nil(&self) -> bool {
        self == &Label::NIL
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "label %block_{}", self.0)
        } else {
            write!(f, "%block_{}", self.0)
        }
    }
}

/// Immediate constant value.
///
/// Immediates are 64-bit patterns interpreted according to the instruction
/// consuming them; wider constants are out of scope for this IR.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Imm {
    Int(i64),
    /// Raw bit pattern of a floating-point constant.
    Float(u64),
}

/// Instruction operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operand {
    /// Reference to a previously defined SSA value.
    Reg(Name),
    /// Immediate literal (integer or floating-point).
    Imm(Imm),
    /// Code label (used for control-flow).
    Lbl(Label),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Reg(name) => write!(f, "{}", name),
            Operand::Imm(Imm::Int(value)) => write!(f, "{}", value),
            Operand::Imm(Imm::Float(bits)) => write!(f, "0xf{:016x}", bits),
            Operand::Lbl(label) => write!(f, "{:#}", label),
        }
    }
}
