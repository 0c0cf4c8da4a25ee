//! Java operator tokens.

/// Binary operator shared by every operand of an infix chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InfixOp {
    // Arithmetic
    Mul,
    Div,
    Rem,
    Add,
    Sub,

    // Shifts
    Shl,
    Shr,
    UShr,

    // Comparison
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,

    // Bitwise (logical on booleans)
    BitXor,
    BitAnd,
    BitOr,

    // Conditional
    And,
    Or,
}

impl InfixOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Parse an operator token.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "+" => Self::Add,
            "-" => Self::Sub,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            ">>>" => Self::UShr,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::LtEq,
            ">=" => Self::GtEq,
            "==" => Self::Eq,
            "!=" => Self::NotEq,
            "^" => Self::BitXor,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "&&" => Self::And,
            "||" => Self::Or,
            _ => return None,
        })
    }

    #[inline]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::Shl | Self::Shr | Self::UShr)
    }

    #[inline]
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Lt | Self::Gt | Self::LtEq | Self::GtEq)
    }
}

/// Prefix unary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    Increment,
    Decrement,
    Plus,
    Minus,
    /// `~`
    Complement,
    /// `!`
    Not,
}

impl PrefixOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Complement => "~",
            Self::Not => "!",
        }
    }
}

/// Postfix unary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl PostfixOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

/// Assignment operator: plain `=` or a compound form such as `+=`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Compound(InfixOp),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for op in [
            InfixOp::Mul,
            InfixOp::UShr,
            InfixOp::LtEq,
            InfixOp::NotEq,
            InfixOp::BitXor,
            InfixOp::Or,
        ] {
            assert_eq!(InfixOp::from_symbol(op.as_symbol()), Some(op));
        }
        assert_eq!(InfixOp::from_symbol("instanceof"), None);
    }

    #[test]
    fn classification() {
        assert!(InfixOp::UShr.is_shift());
        assert!(!InfixOp::Add.is_shift());
        assert!(InfixOp::GtEq.is_relational());
        assert!(!InfixOp::Eq.is_relational());
    }
}
