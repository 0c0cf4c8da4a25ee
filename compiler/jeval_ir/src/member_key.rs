//! Member lookup key for name/parameter-type pairs.
//!
//! Methods and constructors are identified by name plus the erased binary
//! names of their parameter types. The textual form `name(t1,t2)` is used in
//! diagnostics and in description metadata; lookups hash the typed key.

use std::fmt;
use std::str::FromStr;

/// Key for looking up methods and constructors in registries.
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberKey {
    /// Member name; constructors use [`MemberKey::CONSTRUCTOR`].
    pub name: String,
    /// Erased binary parameter type names (`int`, `java.lang.String`, `int[]`).
    pub parameter_types: Vec<String>,
}

impl MemberKey {
    /// Name shared by every constructor key.
    pub const CONSTRUCTOR: &'static str = "<init>";

    pub fn new<S: Into<String>>(name: impl Into<String>, parameter_types: impl IntoIterator<Item = S>) -> Self {
        MemberKey {
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn constructor<S: Into<String>>(parameter_types: impl IntoIterator<Item = S>) -> Self {
        Self::new(Self::CONSTRUCTOR, parameter_types)
    }

    #[inline]
    pub fn is_constructor(&self) -> bool {
        self.name == Self::CONSTRUCTOR
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// The `name(t1,t2)` signature string.
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, ty) in self.parameter_types.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(ty)?;
        }
        f.write_str(")")
    }
}

/// Error parsing a `name(t1,t2)` signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureError {
    pub signature: String,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed member signature `{}`", self.signature)
    }
}

impl std::error::Error for SignatureError {}

impl FromStr for MemberKey {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SignatureError {
            signature: s.to_string(),
        };
        let s = s.trim();
        let open = s.find('(').ok_or_else(err)?;
        let inner = s[open + 1..].strip_suffix(')').ok_or_else(err)?;
        let name = s[..open].trim();
        if name.is_empty() || inner.contains('(') || inner.contains(')') {
            return Err(err());
        }
        let parameter_types = if inner.trim().is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(|p| p.trim().to_string()).collect()
        };
        if parameter_types.iter().any(String::is_empty) {
            return Err(err());
        }
        Ok(MemberKey {
            name: name.to_string(),
            parameter_types,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashMap;

    #[test]
    fn renders_signature() {
        let key = MemberKey::new("setBounds", ["int", "int", "int", "int"]);
        assert_eq!(key.signature(), "setBounds(int,int,int,int)");
        assert_eq!(MemberKey::new("pack", Vec::<String>::new()).signature(), "pack()");
        assert_eq!(
            MemberKey::constructor(["java.lang.String"]).signature(),
            "<init>(java.lang.String)"
        );
    }

    #[test]
    fn parses_signature() {
        let key: MemberKey = "add(java.awt.Component, java.lang.Object)".parse().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(key, MemberKey::new("add", ["java.awt.Component", "java.lang.Object"]));
        let empty: MemberKey = "<init>()".parse().unwrap_or_else(|e| panic!("{e}"));
        assert!(empty.is_constructor());
        assert_eq!(empty.arity(), 0);
    }

    #[test]
    fn rejects_malformed_signature() {
        for bad in ["add", "add(int", "(int)", "add(int,)", "add((int))"] {
            assert!(bad.parse::<MemberKey>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn usable_as_map_key() {
        let mut map = FxHashMap::default();
        map.insert(MemberKey::new("setText", ["java.lang.String"]), 1);
        assert_eq!(map.get(&MemberKey::new("setText", ["java.lang.String"])), Some(&1));
        assert_eq!(map.get(&MemberKey::new("setText", ["java.lang.Object"])), None);
    }
}
