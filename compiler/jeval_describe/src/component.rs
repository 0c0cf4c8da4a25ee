//! Component descriptions.

use std::collections::BTreeMap;

use jeval_ir::MemberKey;
use rustc_hash::FxHashMap;

use crate::constructor::ConstructorDescription;
use crate::method::MethodDescription;
use crate::order::MethodOrder;

/// One way of creating a component (palette entry).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreationDescription {
    /// `None` for the default creation.
    pub id: Option<String>,
    pub name: Option<String>,
    /// Java source creating the component.
    pub source: String,
}

impl CreationDescription {
    pub fn new(id: Option<&str>, source: impl Into<String>) -> Self {
        CreationDescription {
            id: id.map(str::to_string),
            name: None,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Static metadata for a component class.
///
/// Methods are indexed by [`MemberKey`] as they are added, so lookups during
/// evaluation never rebuild signature strings.
#[derive(Clone, Debug)]
pub struct ComponentDescription {
    class_name: String,
    description: Option<String>,
    constructors: Vec<ConstructorDescription>,
    methods: Vec<MethodDescription>,
    method_index: FxHashMap<MemberKey, usize>,
    default_method_order: MethodOrder,
    parameters: BTreeMap<String, String>,
    creations: FxHashMap<String, CreationDescription>,
    creation_default: Option<CreationDescription>,
}

impl ComponentDescription {
    pub fn new(class_name: impl Into<String>) -> Self {
        ComponentDescription {
            class_name: class_name.into(),
            description: None,
            constructors: Vec::new(),
            methods: Vec::new(),
            method_index: FxHashMap::default(),
            default_method_order: MethodOrder::default(),
            parameters: BTreeMap::new(),
            creations: FxHashMap::default(),
            creation_default: None,
        }
    }

    /// Binary name of the described class.
    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    // Constructors

    #[inline]
    pub fn constructors(&self) -> &[ConstructorDescription] {
        &self.constructors
    }

    /// Add a constructor, joining it into an existing description of the
    /// same signature.
    pub fn add_constructor(&mut self, constructor: ConstructorDescription) {
        match self.constructors.iter_mut().find(|c| c.key() == constructor.key()) {
            Some(existing) => existing.join(&constructor),
            None => self.constructors.push(constructor),
        }
    }

    pub fn constructor(&self, key: &MemberKey) -> Option<&ConstructorDescription> {
        self.constructors.iter().find(|c| c.key() == key)
    }

    // Methods

    #[inline]
    pub fn methods(&self) -> &[MethodDescription] {
        &self.methods
    }

    /// Add a method, joining it into an existing description of the same
    /// signature.
    pub fn add_method(&mut self, method: MethodDescription) {
        if let Some(&index) = self.method_index.get(method.key()) {
            self.methods[index].join(&method);
            return;
        }
        self.method_index.insert(method.key().clone(), self.methods.len());
        self.methods.push(method);
    }

    pub fn method(&self, key: &MemberKey) -> Option<&MethodDescription> {
        self.method_index.get(key).map(|&i| &self.methods[i])
    }

    /// Lookup by `name(t1,t2)` text; malformed text finds nothing.
    pub fn method_by_signature(&self, signature: &str) -> Option<&MethodDescription> {
        signature.parse::<MemberKey>().ok().and_then(|key| self.method(&key))
    }

    /// False only when the method is described and marked non-executable.
    pub fn is_executable(&self, key: &MemberKey) -> bool {
        self.method(key).map_or(true, MethodDescription::is_executable)
    }

    // Method order

    #[inline]
    pub fn default_method_order(&self) -> &MethodOrder {
        &self.default_method_order
    }

    pub fn set_default_method_order(&mut self, order: MethodOrder) {
        self.default_method_order = order;
    }

    /// Order of the method with `key`: its explicit order, else the default.
    pub fn method_order(&self, key: &MemberKey) -> &MethodOrder {
        self.method(key)
            .and_then(MethodDescription::order)
            .unwrap_or(&self.default_method_order)
    }

    // Parameters

    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn has_true_parameter(&self, name: &str) -> bool {
        self.parameter(name) == Some("true")
    }

    // Creations

    pub fn set_creation_default(&mut self, creation: CreationDescription) {
        self.creation_default = Some(creation);
    }

    /// Add a creation with an id. Creations without id replace the default.
    pub fn add_creation(&mut self, creation: CreationDescription) {
        match creation.id.clone() {
            Some(id) => {
                self.creations.insert(id, creation);
            }
            None => self.creation_default = Some(creation),
        }
    }

    /// Creation with `id`, else the default creation.
    pub fn creation(&self, id: &str) -> Option<&CreationDescription> {
        self.creations.get(id).or(self.creation_default.as_ref())
    }

    /// Every creation, the default last.
    pub fn creations(&self) -> Vec<&CreationDescription> {
        let mut creations: Vec<_> = self.creations.values().collect();
        creations.sort_by(|a, b| a.id.cmp(&b.id));
        creations.extend(self.creation_default.as_ref());
        creations
    }

    pub fn clear_creations(&mut self) {
        self.creations.clear();
    }
}

#[cfg(test)]
mod tests;
