//! TypeScript interface declarations.

use crate::translate::FieldTranslation;

/// Header written at the top of every generated module.
pub const GENERATED_HEADER: &str = "// Code generated by boilts. DO NOT EDIT.\n";

/// One interface to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDef {
    /// Interface name, taken from the model struct.
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<FieldTranslation>,
}

/// Generator for interface declarations.
pub struct InterfaceGenerator<'a> {
    interfaces: &'a [InterfaceDef],
}

impl<'a> InterfaceGenerator<'a> {
    /// Creates a new interface generator.
    #[must_use]
    pub fn new(interfaces: &'a [InterfaceDef]) -> Self {
        Self { interfaces }
    }

    /// Generates the module source: header, enum aliases, then interfaces.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::from(GENERATED_HEADER);

        let enums = self.enum_names();
        if !enums.is_empty() {
            output.push('\n');
            for name in enums {
                output.push_str(&format!("export type {name} = string;\n"));
            }
        }

        for interface in self.interfaces {
            output.push('\n');
            output.push_str(&Self::generate_interface(interface));
        }

        output
    }

    /// Enum types referenced by members, in order of first use.
    ///
    /// Only enums whose target type is still their own name get an alias.
    fn enum_names(&self) -> Vec<&'a str> {
        let mut names: Vec<&str> = Vec::new();
        for member in self.interfaces.iter().flat_map(|i| &i.members) {
            let d = &member.descriptor;
            let keeps_name = member.target_type == d.original_name;
            if d.is_enum && keeps_name && !names.contains(&d.original_name.as_str()) {
                names.push(&d.original_name);
            }
        }
        names
    }

    fn generate_interface(interface: &InterfaceDef) -> String {
        let mut output = String::new();

        output.push_str(&format!("export interface {} {{\n", interface.name));
        for member in &interface.members {
            output.push_str(&format!(
                "  {}: {};\n",
                property_name(member.member_name()),
                member.target_type
            ));
        }
        output.push_str("}\n");

        output
    }
}

/// Quotes a property name that is not a valid identifier.
fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\\\""))
    }
}
