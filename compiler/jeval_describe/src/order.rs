//! Method execution order policies.
//!
//! The textual forms are the ones description metadata uses:
//!
//! | Text | Variant |
//! |------|---------|
//! | `afterCreation` | [`MethodOrder::AfterCreation`] |
//! | `afterAssociation` | [`MethodOrder::AfterAssociation`] |
//! | `beforeAssociation` | [`MethodOrder::BeforeAssociation`] |
//! | `first` | [`MethodOrder::First`] |
//! | `last` | [`MethodOrder::Last`] |
//! | `afterChildren T1 T2` | [`MethodOrder::AfterChildren`] |
//! | `afterParentChildren T1 T2` | [`MethodOrder::AfterParentChildren`] |
//! | `after name(t1,t2)` | [`MethodOrder::After`] |

use std::fmt;
use std::str::FromStr;

use jeval_ir::MemberKey;

/// Where invocations of a method are placed relative to the component's
/// creation and association with its parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum MethodOrder {
    /// Directly after the creation statement.
    #[default]
    AfterCreation,
    /// After the component is associated with its parent.
    AfterAssociation,
    /// Before the component is associated with its parent.
    BeforeAssociation,
    /// Before every other configuration invocation.
    First,
    /// After every other configuration invocation.
    Last,
    /// After children of the listed types (empty list: any child).
    AfterChildren(Vec<String>),
    /// After the children of the parent of the listed types.
    AfterParentChildren(Vec<String>),
    /// After the invocation of the given method.
    After(MemberKey),
}

impl MethodOrder {
    /// True for orders that depend on other components.
    pub fn is_relative(&self) -> bool {
        matches!(
            self,
            MethodOrder::AfterChildren(_)
                | MethodOrder::AfterParentChildren(_)
                | MethodOrder::After(_)
        )
    }
}

/// Unrecognized order text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid method order `{text}`")]
pub struct OrderParseError {
    pub text: String,
}

impl FromStr for MethodOrder {
    type Err = OrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || OrderParseError {
            text: s.to_string(),
        };
        let s = s.trim();
        let (head, rest) = match s.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (s, ""),
        };
        let types = || rest.split_whitespace().map(str::to_string).collect();
        let order = match head {
            "afterCreation" => MethodOrder::AfterCreation,
            "afterAssociation" => MethodOrder::AfterAssociation,
            "beforeAssociation" => MethodOrder::BeforeAssociation,
            "first" => MethodOrder::First,
            "last" => MethodOrder::Last,
            "afterChildren" => return Ok(MethodOrder::AfterChildren(types())),
            "afterParentChildren" => return Ok(MethodOrder::AfterParentChildren(types())),
            "after" => return rest.parse().map(MethodOrder::After).map_err(|_| err()),
            _ => return Err(err()),
        };
        if rest.is_empty() {
            Ok(order)
        } else {
            Err(err())
        }
    }
}

impl fmt::Display for MethodOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, types) = match self {
            MethodOrder::AfterCreation => return f.write_str("afterCreation"),
            MethodOrder::AfterAssociation => return f.write_str("afterAssociation"),
            MethodOrder::BeforeAssociation => return f.write_str("beforeAssociation"),
            MethodOrder::First => return f.write_str("first"),
            MethodOrder::Last => return f.write_str("last"),
            MethodOrder::After(key) => return write!(f, "after {key}"),
            MethodOrder::AfterChildren(types) => ("afterChildren", types),
            MethodOrder::AfterParentChildren(types) => ("afterParentChildren", types),
        };
        f.write_str(head)?;
        for ty in types {
            write!(f, " {ty}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for MethodOrder {
    type Error = OrderParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MethodOrder> for String {
    fn from(order: MethodOrder) -> String {
        order.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_simple_orders() {
        assert_eq!("afterCreation".parse(), Ok(MethodOrder::AfterCreation));
        assert_eq!(" last ".parse(), Ok(MethodOrder::Last));
        assert_eq!("beforeAssociation".parse(), Ok(MethodOrder::BeforeAssociation));
    }

    #[test]
    fn parses_relative_orders() {
        assert_eq!(
            "afterChildren test.Button test.Label".parse(),
            Ok(MethodOrder::AfterChildren(vec![
                "test.Button".to_string(),
                "test.Label".to_string()
            ]))
        );
        assert_eq!("afterChildren".parse(), Ok(MethodOrder::AfterChildren(Vec::new())));
        assert_eq!(
            "after setLayout(test.Layout)".parse(),
            Ok(MethodOrder::After(MemberKey::new("setLayout", ["test.Layout"])))
        );
        assert!(MethodOrder::AfterParentChildren(Vec::new()).is_relative());
        assert!(!MethodOrder::First.is_relative());
    }

    #[test]
    fn rejects_unknown_text() {
        assert_eq!(
            "sometime".parse::<MethodOrder>(),
            Err(OrderParseError {
                text: "sometime".into()
            })
        );
        assert!("first thing".parse::<MethodOrder>().is_err());
        assert!("after nothing".parse::<MethodOrder>().is_err());
    }

    #[test]
    fn display_matches_parse_input() {
        for text in [
            "afterCreation",
            "afterAssociation",
            "first",
            "afterChildren test.A test.B",
            "afterParentChildren test.A",
            "after pack()",
        ] {
            let order: MethodOrder = text.parse().unwrap_or_default();
            assert_eq!(order.to_string(), text);
        }
    }
}
