//! SQL operator catalog

use std::fmt::{self, Display};

/// Comparison operators accepted by every grammar
pub const OPERATORS: &[&str] = &[
    "=", "<", ">", "<=", ">=", "<>", "!=", "<=>",
    "like", "like binary", "not like", "ilike",
    "&", "|", "^", "<<", ">>", "&~",
    "is", "is not",
    "rlike", "not rlike", "regexp", "not regexp",
    "~", "~*", "!~", "!~*", "similar to", "not similar to", "not ilike", "~~*", "!~~*",
];

/// Operators that produce a bitwise where clause
pub const BITWISE_OPERATORS: &[&str] = &["&", "|", "^", "<<", ">>", "&~"];

/// An operator drawn from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operator(&'static str);

impl Operator {
    pub const EQ: Self = Operator("=");
    pub const LT: Self = Operator("<");
    pub const GT: Self = Operator(">");
    pub const LTE: Self = Operator("<=");
    pub const GTE: Self = Operator(">=");
    pub const NEQ: Self = Operator("!=");
    pub const NE: Self = Operator("<>");
    pub const NULL_SAFE_EQ: Self = Operator("<=>");
    pub const LIKE: Self = Operator("like");
    pub const NOT_LIKE: Self = Operator("not like");
    pub const REGEXP: Self = Operator("regexp");
    pub const BIT_AND: Self = Operator("&");
    pub const BIT_OR: Self = Operator("|");
    pub const BIT_XOR: Self = Operator("^");
    pub const SHIFT_LEFT: Self = Operator("<<");
    pub const SHIFT_RIGHT: Self = Operator(">>");
    pub const BIT_AND_NOT: Self = Operator("&~");

    /// Find `candidate` in the shared catalog or in `extra` (dialect
    /// operators). Matching ignores ASCII case and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use mortar_core::Operator;
    ///
    /// assert_eq!(Operator::lookup("LIKE", &[]), Some(Operator::LIKE));
    /// assert_eq!(Operator::lookup("sounds like", &["sounds like"]).unwrap().as_str(), "sounds like");
    /// assert_eq!(Operator::lookup("drop table", &[]), None);
    /// ```
    pub fn lookup(candidate: &str, extra: &[&'static str]) -> Option<Self> {
        let candidate = candidate.trim();
        OPERATORS
            .iter()
            .chain(BITWISE_OPERATORS)
            .chain(extra)
            .find(|known| known.eq_ignore_ascii_case(candidate))
            .map(|known| Operator(*known))
    }

    /// Whether this operator belongs to the bitwise catalog
    pub fn is_bitwise(&self) -> bool {
        BITWISE_OPERATORS.contains(&self.0)
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Lets operator constants sit in the operator slot of a where tuple
impl From<Operator> for crate::Value {
    fn from(operator: Operator) -> Self {
        crate::Value::String(operator.as_str().to_string())
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const EQ: Operator = Operator::EQ;
    pub const LT: Operator = Operator::LT;
    pub const GT: Operator = Operator::GT;
    pub const LTE: Operator = Operator::LTE;
    pub const GTE: Operator = Operator::GTE;
    pub const NEQ: Operator = Operator::NEQ;
    pub const NE: Operator = Operator::NE;
    pub const LIKE: Operator = Operator::LIKE;
    pub const NOT_LIKE: Operator = Operator::NOT_LIKE;
    pub const BIT_AND: Operator = Operator::BIT_AND;
    pub const BIT_OR: Operator = Operator::BIT_OR;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_constants() {
        assert_eq!(Operator::GT.as_str(), ">");
        assert_eq!(Operator::EQ.as_str(), "=");
        assert_eq!(Operator::LIKE.as_str(), "like");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Operator::GTE), ">=");
        assert_eq!(format!("{}", Operator::NOT_LIKE), "not like");
    }

    #[test]
    fn test_lookup_accepts_catalog_members() {
        for candidate in [">", "=", "<>", "like", "LIKE", " not like ", "is not", "&", "&~", "!~~*"] {
            assert!(
                Operator::lookup(candidate, &[]).is_some(),
                "expected {candidate:?} to be accepted"
            );
        }
    }

    #[test]
    fn test_lookup_rejects_non_members() {
        for candidate in ["", "==", "active", "18", "or 1=1", "likes", "sounds like"] {
            assert_eq!(
                Operator::lookup(candidate, &[]),
                None,
                "expected {candidate:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_lookup_returns_catalog_spelling() {
        assert_eq!(Operator::lookup("Not Like", &[]), Some(Operator::NOT_LIKE));
        assert_eq!(Operator::lookup("REGEXP", &[]), Some(Operator::REGEXP));
    }

    #[test]
    fn test_lookup_with_dialect_operators() {
        let found = Operator::lookup("SOUNDS LIKE", &["sounds like"]).unwrap();
        assert_eq!(found.as_str(), "sounds like");
        assert!(!found.is_bitwise());
    }

    #[test]
    fn test_bitwise_detection() {
        for candidate in BITWISE_OPERATORS {
            assert!(Operator::lookup(candidate, &[]).unwrap().is_bitwise());
        }
        assert!(!Operator::GT.is_bitwise());
        assert!(!Operator::LIKE.is_bitwise());
    }
}
