//! TypeScript code generation modules.

pub mod interfaces;
pub mod mapper;

pub use interfaces::{InterfaceDef, InterfaceGenerator};
pub use mapper::{TargetMapper, TargetSyntax};
