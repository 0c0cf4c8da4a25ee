//! Parameter descriptions.

/// Positional metadata for one method or constructor parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterDescription {
    pub index: usize,
    /// Erased binary type name.
    pub type_name: String,
    pub name: Option<String>,
    /// Java source used when a default argument value is needed.
    pub default_source: Option<String>,
    /// Property this parameter is bound to.
    pub property: Option<String>,
    /// The argument is the parent of the component being configured.
    pub parent: bool,
    /// The argument becomes a child of the component being configured.
    pub child: bool,
}

impl ParameterDescription {
    pub fn new(index: usize, type_name: impl Into<String>) -> Self {
        ParameterDescription {
            index,
            type_name: type_name.into(),
            name: None,
            default_source: None,
            property: None,
            parent: false,
            child: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_default_source(mut self, source: impl Into<String>) -> Self {
        self.default_source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[must_use]
    pub fn as_parent(mut self) -> Self {
        self.parent = true;
        self
    }

    #[must_use]
    pub fn as_child(mut self) -> Self {
        self.child = true;
        self
    }

    /// Parent or child role.
    #[inline]
    pub fn is_linking(&self) -> bool {
        self.parent || self.child
    }

    /// Merge another description of the same parameter. Values already set
    /// here win; role flags accumulate.
    pub fn join(&mut self, other: &ParameterDescription) {
        if self.name.is_none() {
            self.name.clone_from(&other.name);
        }
        if self.default_source.is_none() {
            self.default_source.clone_from(&other.default_source);
        }
        if self.property.is_none() {
            self.property.clone_from(&other.property);
        }
        self.parent |= other.parent;
        self.child |= other.child;
    }
}

/// Parameter descriptions for a list of parameter types.
pub(crate) fn parameters_for(parameter_types: &[String]) -> Vec<ParameterDescription> {
    parameter_types
        .iter()
        .enumerate()
        .map(|(index, ty)| ParameterDescription::new(index, ty.clone()))
        .collect()
}

/// Position-wise join of parameter lists describing the same member.
pub(crate) fn join_parameters(target: &mut [ParameterDescription], other: &[ParameterDescription]) {
    for (mine, theirs) in target.iter_mut().zip(other) {
        mine.join(theirs);
    }
}
