//! Method descriptions.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use jeval_ir::MemberKey;

use crate::order::MethodOrder;
use crate::parameter::{join_parameters, parameters_for, ParameterDescription};

/// Static metadata for one method of a component.
///
/// Equality and hashing look at the signature only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodDescription {
    key: MemberKey,
    return_type: String,
    parameters: Vec<ParameterDescription>,
    /// Explicit order; `None` falls back to the component default.
    order: Option<MethodOrder>,
    /// When false the method is never really invoked at design time.
    executable: bool,
    tags: BTreeMap<String, String>,
}

impl PartialEq for MethodDescription {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for MethodDescription {}

impl Hash for MethodDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl MethodDescription {
    pub fn new(key: MemberKey, return_type: impl Into<String>) -> Self {
        let parameters = parameters_for(&key.parameter_types);
        MethodDescription {
            key,
            return_type: return_type.into(),
            parameters,
            order: None,
            executable: true,
            tags: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: MethodOrder) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Replace the description of parameter `index`; out-of-range indices are
    /// ignored.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDescription) -> Self {
        if let Some(slot) = self.parameters.get_mut(parameter.index) {
            *slot = parameter;
        }
        self
    }

    #[inline]
    pub fn key(&self) -> &MemberKey {
        &self.key
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn signature(&self) -> String {
        self.key.signature()
    }

    #[inline]
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    #[inline]
    pub fn parameters(&self) -> &[ParameterDescription] {
        &self.parameters
    }

    pub fn parameter(&self, index: usize) -> Option<&ParameterDescription> {
        self.parameters.get(index)
    }

    #[inline]
    pub fn order(&self) -> Option<&MethodOrder> {
        self.order.as_ref()
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.executable
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn has_true_tag(&self, name: &str) -> bool {
        self.tag(name) == Some("true")
    }

    /// True when some parameter is flagged parent or child.
    pub fn has_linking_parameters(&self) -> bool {
        self.parameters.iter().any(ParameterDescription::is_linking)
    }

    /// Merge another description of the same method. Tags are unioned with
    /// existing values kept, an explicit order is taken only when none is
    /// set here, executability holds only if both agree, and parameters are
    /// joined position by position.
    pub fn join(&mut self, other: &MethodDescription) {
        debug_assert_eq!(self.key, other.key, "joining descriptions of different methods");
        for (name, value) in &other.tags {
            self.tags
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        if self.order.is_none() {
            self.order.clone_from(&other.order);
        }
        self.executable &= other.executable;
        join_parameters(&mut self.parameters, &other.parameters);
    }
}
