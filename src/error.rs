//! Error types.
//!
//! Construction-time failures are [`BuildError`] and are returned to the
//! caller. Composition-time failures are [`CompositionError`] and abort the
//! build through a const assertion (see [`crate::compose`]).

use thiserror::Error;

use crate::component::DeviceId;
use crate::primitives::Message;

/// Failure to construct a node, net or record from an initializer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing value for required tag `{tag}`")]
    MissingTag { tag: &'static str },

    #[error("value supplied for tag `{tag}` is not a `{expected}`")]
    TypeMismatch { tag: &'static str, expected: &'static str },

    #[error("node uid {0} is already in use")]
    DuplicateUid(DeviceId),

    #[error("no free node uid left")]
    UidsExhausted,
}

/// Invalid component stack.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionError {
    #[error("duplicate tag `{tag}` declared by components `{first}` and `{second}`")]
    DuplicateTag { tag: &'static str, first: &'static str, second: &'static str },

    #[error("component `{component}` appears more than once in the stack")]
    DuplicateComponent { component: &'static str },

    #[error("option `{option}` passed to component `{component}` is not recognised by any component in the stack")]
    UnknownOption { option: &'static str, component: &'static str },

    #[error("component `{component}` requires component `{requires}` below it in the stack")]
    MissingDependency { component: &'static str, requires: &'static str },

    #[error("component `{component}` reads tag `{tag}` but no component below it stores that tag")]
    MissingStorage { tag: &'static str, component: &'static str },
}

impl CompositionError {
    /// Same text as `Display`, assembled in const context.
    pub const fn message(&self) -> Message {
        match *self {
            CompositionError::DuplicateTag { tag, first, second } => Message::new()
                .push("duplicate tag `")
                .push(tag)
                .push("` declared by components `")
                .push(first)
                .push("` and `")
                .push(second)
                .push("`"),
            CompositionError::DuplicateComponent { component } => Message::new()
                .push("component `")
                .push(component)
                .push("` appears more than once in the stack"),
            CompositionError::UnknownOption { option, component } => Message::new()
                .push("option `")
                .push(option)
                .push("` passed to component `")
                .push(component)
                .push("` is not recognised by any component in the stack"),
            CompositionError::MissingDependency { component, requires } => Message::new()
                .push("component `")
                .push(component)
                .push("` requires component `")
                .push(requires)
                .push("` below it in the stack"),
            CompositionError::MissingStorage { tag, component } => Message::new()
                .push("component `")
                .push(component)
                .push("` reads tag `")
                .push(tag)
                .push("` but no component below it stores that tag"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_message_matches_display() {
        let errors = [
            CompositionError::DuplicateTag { tag: "count", first: "counter", second: "storage" },
            CompositionError::DuplicateComponent { component: "storage" },
            CompositionError::UnknownOption { option: "parallel", component: "storage" },
            CompositionError::MissingDependency { component: "counter", requires: "storage" },
            CompositionError::MissingStorage { tag: "count", component: "counter" },
        ];
        for err in errors {
            assert_eq!(err.message().as_str(), err.to_string());
        }
    }

    #[test]
    fn test_build_error_names_tag() {
        let err = BuildError::MissingTag { tag: "start" };
        assert_eq!(err.to_string(), "missing value for required tag `start`");
    }
}
