use std::fmt;

/// Route registration error
///
/// Returned by [`Mapper::connect`](crate::Mapper::connect) and friends when a
/// template or its requirements cannot be compiled. A route that fails to
/// compile is never appended to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `:` or `*` token with nothing after it
    EmptyName {
        /// The offending template
        template: String,
    },
    /// A segment name containing characters other than ASCII alphanumerics or `_`
    InvalidName {
        /// The offending template
        template: String,
        /// The rejected name
        name: String,
    },
    /// The same name used by two segments of one template
    DuplicateSegment {
        /// The offending template
        template: String,
        /// The repeated name
        name: String,
    },
    /// More than one glob segment in a template
    MultipleGlobs {
        /// The offending template
        template: String,
    },
    /// A glob segment followed by a dynamic segment
    ///
    /// The split point between the two values would be ambiguous.
    GlobBeforeDynamic {
        /// The offending template
        template: String,
        /// Name of the glob segment
        glob: String,
        /// Name of the dynamic segment that follows it
        dynamic: String,
    },
    /// A requirement for a name that is not a dynamic or glob segment
    UnknownRequirement {
        /// The offending template
        template: String,
        /// The name the requirement was declared for
        name: String,
    },
    /// A requirement that does not compile as a regular expression
    InvalidRequirement {
        /// The name the requirement was declared for
        name: String,
        /// The requirement source
        pattern: String,
        /// Message from the regex compiler
        message: String,
    },
    /// A route name registered twice
    DuplicateRouteName {
        /// The repeated route name
        name: String,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::EmptyName { template } => {
                write!(f, "Route template '{}' contains a segment with an empty name", template)
            }
            CompileError::InvalidName { template, name } => {
                write!(
                    f,
                    "Route template '{}' contains invalid segment name '{}'. \
                    Names may only contain ASCII letters, digits and '_'",
                    template, name
                )
            }
            CompileError::DuplicateSegment { template, name } => {
                write!(
                    f,
                    "Route template '{}' uses segment name '{}' more than once",
                    template, name
                )
            }
            CompileError::MultipleGlobs { template } => {
                write!(f, "Route template '{}' contains more than one glob segment", template)
            }
            CompileError::GlobBeforeDynamic {
                template,
                glob,
                dynamic,
            } => {
                write!(
                    f,
                    "Route template '{}' places dynamic segment ':{}' after glob '*{}'",
                    template, dynamic, glob
                )
            }
            CompileError::UnknownRequirement { template, name } => {
                write!(
                    f,
                    "Requirement for '{}' does not match any dynamic or glob segment of '{}'",
                    name, template
                )
            }
            CompileError::InvalidRequirement {
                name,
                pattern,
                message,
            } => {
                write!(
                    f,
                    "Requirement '{}' for '{}' is not a valid regular expression: {}",
                    pattern, name, message
                )
            }
            CompileError::DuplicateRouteName { name } => {
                write!(f, "A route named '{}' is already registered", name)
            }
        }
    }
}

impl std::error::Error for CompileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_requirement() {
        let err = CompileError::UnknownRequirement {
            template: "hello/world".to_string(),
            name: "known".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Requirement for 'known' does not match any dynamic or glob segment of 'hello/world'"
        );
    }

    #[test]
    fn test_display_glob_before_dynamic() {
        let err = CompileError::GlobBeforeDynamic {
            template: "*path/:id".to_string(),
            glob: "path".to_string(),
            dynamic: "id".to_string(),
        };
        assert!(err.to_string().contains("':id' after glob '*path'"));
    }
}
