//! Constructor descriptions.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use jeval_ir::MemberKey;

use crate::parameter::{join_parameters, parameters_for, ParameterDescription};

/// Static metadata for one constructor of a component.
///
/// Equality and hashing look at the signature only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorDescription {
    key: MemberKey,
    parameters: Vec<ParameterDescription>,
    tags: BTreeMap<String, String>,
}

impl PartialEq for ConstructorDescription {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ConstructorDescription {}

impl Hash for ConstructorDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl ConstructorDescription {
    pub fn new<S: Into<String>>(parameter_types: impl IntoIterator<Item = S>) -> Self {
        let key = MemberKey::constructor(parameter_types);
        let parameters = parameters_for(&key.parameter_types);
        ConstructorDescription {
            key,
            parameters,
            tags: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDescription) -> Self {
        if let Some(slot) = self.parameters.get_mut(parameter.index) {
            *slot = parameter;
        }
        self
    }

    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    #[inline]
    pub fn key(&self) -> &MemberKey {
        &self.key
    }

    pub fn signature(&self) -> String {
        self.key.signature()
    }

    #[inline]
    pub fn parameters(&self) -> &[ParameterDescription] {
        &self.parameters
    }

    pub fn parameter(&self, index: usize) -> Option<&ParameterDescription> {
        self.parameters.get(index)
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn join(&mut self, other: &ConstructorDescription) {
        debug_assert_eq!(self.key, other.key, "joining descriptions of different constructors");
        for (name, value) in &other.tags {
            self.tags
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        join_parameters(&mut self.parameters, &other.parameters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn constructor_keys_use_init() {
        let ctor = ConstructorDescription::new(["test.Composite", "int"]);
        assert_eq!(ctor.signature(), "<init>(test.Composite,int)");
        assert!(ctor.key().is_constructor());
    }

    #[test]
    fn equality_follows_signature() {
        let plain = ConstructorDescription::new(["test.Composite", "int"]);
        let tagged = ConstructorDescription::new(["test.Composite", "int"])
            .with_parameter(ParameterDescription::new(0, "test.Composite").as_parent())
            .with_tag("style", "SWT.NONE");
        assert_eq!(plain, tagged);
        assert_ne!(plain, ConstructorDescription::new(["test.Composite"]));

        let set: std::collections::HashSet<_> = [plain, tagged].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn join_merges_parameter_roles() {
        let mut ctor = ConstructorDescription::new(["test.Composite", "int"]);
        let other = ConstructorDescription::new(["test.Composite", "int"])
            .with_parameter(ParameterDescription::new(0, "test.Composite").as_parent())
            .with_tag("style", "SWT.NONE");
        ctor.join(&other);
        assert!(ctor.parameter(0).is_some_and(|p| p.parent));
        assert!(!ctor.parameter(1).is_some_and(|p| p.parent));
        assert_eq!(ctor.tag("style"), Some("SWT.NONE"));
    }
}
