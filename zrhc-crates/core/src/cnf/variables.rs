use std::fmt::Display;
use std::fmt::Formatter;

use crate::pedigree::IndividualId;

/// The symbolic meaning of a SAT variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PedVar {
    /// The phase of an individual at a locus.
    H {
        individual: IndividualId,
        locus: usize,
    },
    /// Whether a non-genotyped individual is heterozygous at a locus.
    W {
        individual: IndividualId,
        locus: usize,
    },
    /// The strand a parent transmits to a child, shared by every locus.
    S {
        parent: IndividualId,
        child: IndividualId,
    },
    /// The conjunction of two variables, named in the order they were first requested.
    Dummy { first: u32, second: u32 },
}

impl PedVar {
    /// The key under which the variable is stored: a conjunction is the same variable whatever
    /// the order of its operands.
    pub(crate) fn lookup_key(self) -> PedVar {
        match self {
            PedVar::Dummy { first, second } => PedVar::Dummy {
                first: first.min(second),
                second: first.max(second),
            },
            _ => self,
        }
    }
}

impl Display for PedVar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PedVar::H { individual, locus } => write!(f, "h_{individual}_{locus}"),
            PedVar::W { individual, locus } => write!(f, "w_{individual}_{locus}"),
            PedVar::S { parent, child } => write!(f, "s_{parent}_{child}"),
            PedVar::Dummy { first, second } => write!(f, "dummy_{first}_{second}"),
        }
    }
}
