use std::fmt::Display;
use std::fmt::Formatter;

/// A Boolean expression in algebraic normal form over SAT variable indices.
///
/// The builder only produces an equation of the shape `v`, `!v`, `x` or `!x`, where `x` is an
/// [`Expression::Xor`] whose children are variables or [`Expression::And`] terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Variable(u32),
    Not(Box<Expression>),
    Xor(Vec<Expression>),
    And(u32, u32),
}

impl Expression {
    pub fn negate(self) -> Expression {
        Expression::Not(Box::new(self))
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Variable(variable) => write!(f, "x{variable}"),
            Expression::Not(inner) => write!(f, "!{inner}"),
            Expression::Xor(children) => {
                write!(f, "(")?;
                for (position, child) in children.iter().enumerate() {
                    if position > 0 {
                        write!(f, " ^ ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
            Expression::And(first, second) => write!(f, "(x{first} & x{second})"),
        }
    }
}
