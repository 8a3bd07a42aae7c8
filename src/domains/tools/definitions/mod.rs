//! Evolution API operation catalog.
//!
//! Each controller's operations are defined in their own file. The
//! [`catalog`] function returns them all in a stable order: the order of
//! [`GROUPS`], then declaration order within each file.

use super::catalog::OperationDescriptor;

pub mod chat;
pub mod group;
pub mod instance;
pub mod message;
pub mod profile;
pub mod settings;
pub mod webhook;

/// Controller groups, in catalog order.
pub const GROUPS: &[&str] = &[
    "instance", "message", "chat", "group", "profile", "webhook", "settings",
];

/// Every operation of the Evolution API catalog.
pub fn catalog() -> Vec<&'static OperationDescriptor> {
    [
        instance::OPERATIONS,
        message::OPERATIONS,
        chat::OPERATIONS,
        group::OPERATIONS,
        profile::OPERATIONS,
        webhook::OPERATIONS,
        settings::OPERATIONS,
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::catalog::ParamLocation;
    use std::collections::HashSet;

    #[test]
    fn test_operation_names_unique() {
        let ops = catalog();
        let names: HashSet<_> = ops.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), ops.len());
    }

    #[test]
    fn test_groups_match_files() {
        for op in catalog() {
            assert!(GROUPS.contains(&op.group), "{} has unknown group {}", op.name, op.group);
        }
        for group in GROUPS {
            assert!(catalog().iter().any(|op| op.group == *group), "{group} is empty");
        }
    }

    #[test]
    fn test_placeholders_are_declared_path_params() {
        for op in catalog() {
            for placeholder in op.placeholders() {
                let param = op
                    .parameter(placeholder)
                    .unwrap_or_else(|| panic!("{}: {{{placeholder}}} undeclared", op.name));
                assert_eq!(param.location, ParamLocation::Path, "{}", op.name);
                assert!(param.required, "{}", op.name);
            }
        }
    }

    #[test]
    fn test_parameter_names_unique_per_operation() {
        for op in catalog() {
            let names: HashSet<_> = op.parameters.iter().map(|p| p.name).collect();
            assert_eq!(names.len(), op.parameters.len(), "{}", op.name);
        }
    }
}
