//! Description model for the Java expression evaluator.
//!
//! Descriptions are static per-class metadata loaded before evaluation:
//! which constructors and methods a component has, in which order its
//! methods run, whether they may be executed at design time, and which
//! parameters link a component to its parent or children. The evaluator only
//! reads them.
//!
//! Descriptions from different sources describing the same member are merged
//! with `join` instead of being duplicated; identity is the [`MemberKey`].

mod component;
mod constructor;
mod method;
mod order;
mod parameter;
mod registry;

pub use component::{ComponentDescription, CreationDescription};
pub use constructor::ConstructorDescription;
pub use jeval_ir::MemberKey;
pub use method::MethodDescription;
pub use order::{MethodOrder, OrderParseError};
pub use parameter::ParameterDescription;
pub use registry::DescriptionRegistry;
