//! Integer instructions
//!
//! Arithmetic and comparisons over integer values. Each instruction carries
//! its destination [`Name`], its value type and its input operands.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    modules::{
        instructions::{Instruction, InstructionFlags},
        operand::{Name, Operand},
    },
    types::Ty,
};

/// Integer comparison operations.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ICmpVariant {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Unsigned less than
    Ult,
    /// Unsigned greater than
    Ugt,
    /// Signed less than
    Slt,
    /// Signed greater than
    Sgt,
}

impl ICmpVariant {
    /// Creates an [`ICmpVariant`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        ICmpVariant::iter().find(|op| op.to_str() == s)
    }

    /// Returns the string representation of the [`ICmpVariant`].
    pub fn to_str(&self) -> &'static str {
        match self {
            ICmpVariant::Eq => "eq",
            ICmpVariant::Ne => "ne",
            ICmpVariant::Ult => "ult",
            ICmpVariant::Ugt => "ugt",
            ICmpVariant::Slt => "slt",
            ICmpVariant::Sgt => "sgt",
        }
    }
}

macro_rules! define_int_binary {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name {
            /// The destination SSA name for the result.
            pub dest: Name,
            /// The integer type of the operands and result.
            pub ty: Ty,
            /// Left-hand side operand.
            pub lhs: Operand,
            /// Right-hand side operand.
            pub rhs: Operand,
        }

        impl Instruction for $name {
            fn flags(&self) -> InstructionFlags {
                InstructionFlags::SIMPLE
            }

            fn operands(&self) -> impl Iterator<Item = &Operand> {
                [&self.lhs, &self.rhs].into_iter()
            }

            fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
                [&mut self.lhs, &mut self.rhs].into_iter()
            }

            fn destination(&self) -> Option<Name> {
                Some(self.dest)
            }

            fn set_destination(&mut self, name: Name) {
                self.dest = name;
            }
        }
    };
}

define_int_binary! {
    /// Integer addition (wrapping).
    IAdd
}

define_int_binary! {
    /// Integer subtraction (wrapping).
    ISub
}

define_int_binary! {
    /// Integer multiplication (wrapping).
    IMul
}

/// Integer comparison instruction. Produces a boolean (`i1`) result.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ICmp {
    /// The destination SSA name for the boolean result.
    pub dest: Name,
    /// The comparison predicate.
    pub variant: ICmpVariant,
    /// The integer type of the compared operands.
    pub ty: Ty,
    /// Left-hand side operand.
    pub lhs: Operand,
    /// Right-hand side operand.
    pub rhs: Operand,
}

impl Instruction for ICmp {
    fn flags(&self) -> InstructionFlags {
        InstructionFlags::SIMPLE
    }

    fn operands(&self) -> impl Iterator<Item = &Operand> {
        [&self.lhs, &self.rhs].into_iter()
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        [&mut self.lhs, &mut self.rhs].into_iter()
    }

    fn destination(&self) -> Option<Name> {
        Some(self.dest)
    }

    fn set_destination(&mut self, name: Name) {
        self.dest = name;
    }
}
