use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::segment::{Placeholder, Requirement, Segment};
use crate::error::CompileError;
use crate::value::{Params, Requirements, Value};

/// Implicit default for an `action` segment with no declared default.
pub(crate) const IMPLICIT_ACTION: &str = "index";

/// Options that affect how a template is compiled
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Disable the implicit `action`/`id` defaults
    pub explicit: bool,
}

/// One registered rule: a compiled template plus its defaults and requirements
///
/// Routes are immutable once compiled. The [`Mapper`](crate::Mapper) hands
/// them out as `Arc<Route>`.
#[derive(Debug, Clone)]
pub struct Route {
    template: String,
    name: Option<String>,
    order: usize,
    segments: Vec<Segment>,
    defaults: Params,
    requirements: Requirements,
    /// Declared defaults that are not path segments, sorted by name
    filter_keys: Vec<(String, Option<Value>)>,
}

impl Route {
    /// Compile a template into a route.
    ///
    /// # Arguments
    ///
    /// * `template` - Path template such as `archive/:year/:month/:day` or `*file/hi`
    /// * `defaults` - Declared defaults; names that are not segments become filter keys
    /// * `requirements` - Explicit regex constraints for dynamic/glob segments
    /// * `order` - Registration index in the owning table
    /// * `options` - Compile-time switches
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for malformed templates, requirements that
    /// name no segment, and requirements that are not valid regexes.
    pub fn compile(
        template: &str,
        defaults: Params,
        requirements: Requirements,
        order: usize,
        options: CompileOptions,
    ) -> Result<Self, CompileError> {
        let segments = compile_segments(template, &defaults, &requirements, options)?;

        let segment_names: HashSet<&str> = segments.iter().filter_map(Segment::name).collect();
        let mut filter_keys: Vec<(String, Option<Value>)> = defaults
            .iter()
            .filter(|(name, _)| !segment_names.contains(name))
            .map(|(name, value)| (name.to_string(), value.cloned()))
            .collect();
        filter_keys.sort_by(|a, b| a.0.cmp(&b.0));

        debug!(
            template = %template,
            route_order = order,
            segments_count = segments.len(),
            filter_keys = ?filter_keys,
            "Route template compiled"
        );

        Ok(Self {
            template: template.to_string(),
            name: None,
            order,
            segments,
            defaults,
            requirements,
            filter_keys,
        })
    }

    pub(crate) fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The template this route was compiled from
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Route name, for routes registered with `connect_named`
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Registration index
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Compiled segments
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Declared defaults, including filter keys
    #[must_use]
    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// Explicit requirements as declared
    #[must_use]
    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Defaults that do not correspond to any segment
    #[must_use]
    pub fn filter_keys(&self) -> &[(String, Option<Value>)] {
        &self.filter_keys
    }
}

/// Split a template into segments.
///
/// Empty tokens (leading, trailing or doubled `/`) are skipped, so `/hi/:x/`
/// and `hi/:x` compile identically.
fn compile_segments(
    template: &str,
    defaults: &Params,
    requirements: &Requirements,
    options: CompileOptions,
) -> Result<Vec<Segment>, CompileError> {
    let mut segments = Vec::with_capacity(template.matches('/').count() + 1);
    let mut literal_run: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut glob: Option<&str> = None;

    for token in template.split('/').filter(|t| !t.is_empty()) {
        let (name, is_glob) = if let Some(name) = token.strip_prefix(':') {
            (name, false)
        } else if let Some(name) = token.strip_prefix('*') {
            (name, true)
        } else {
            literal_run.push(token);
            continue;
        };

        validate_name(template, name)?;
        if !seen.insert(name) {
            return Err(CompileError::DuplicateSegment {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
        match (glob, is_glob) {
            (Some(_), true) => {
                return Err(CompileError::MultipleGlobs {
                    template: template.to_string(),
                });
            }
            (Some(glob), false) => {
                return Err(CompileError::GlobBeforeDynamic {
                    template: template.to_string(),
                    glob: glob.to_string(),
                    dynamic: name.to_string(),
                });
            }
            (None, true) => glob = Some(name),
            (None, false) => {}
        }

        if !literal_run.is_empty() {
            segments.push(Segment::Literal(literal_run.join("/")));
            literal_run.clear();
        }

        let placeholder = build_placeholder(name, is_glob, defaults, requirements, options)?;
        segments.push(if is_glob {
            Segment::Glob(placeholder)
        } else {
            Segment::Dynamic(placeholder)
        });
    }

    if !literal_run.is_empty() {
        segments.push(Segment::Literal(literal_run.join("/")));
    }

    // Requirements only constrain real path segments; a requirement on a
    // filter key or an unknown name is a registration mistake.
    let mut unknown: Vec<&str> = requirements
        .iter()
        .map(|(name, _)| name)
        .filter(|name| !seen.contains(name))
        .collect();
    unknown.sort_unstable();
    if let Some(name) = unknown.first() {
        return Err(CompileError::UnknownRequirement {
            template: template.to_string(),
            name: (*name).to_string(),
        });
    }

    Ok(segments)
}

fn validate_name(template: &str, name: &str) -> Result<(), CompileError> {
    if name.is_empty() {
        return Err(CompileError::EmptyName {
            template: template.to_string(),
        });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(CompileError::InvalidName {
            template: template.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

fn build_placeholder(
    name: &str,
    is_glob: bool,
    defaults: &Params,
    requirements: &Requirements,
    options: CompileOptions,
) -> Result<Placeholder, CompileError> {
    let requirement = match requirements.get(name) {
        Some(pattern) => Requirement::explicit(name, pattern)?,
        None if is_glob => Requirement::derived_glob(),
        None => Requirement::derived_dynamic(name),
    };

    let (optional, default) = if defaults.declares(name) {
        (true, defaults.get(name).cloned())
    } else if is_glob {
        (true, None)
    } else if options.explicit {
        (false, None)
    } else {
        match name {
            "action" => (true, Some(Value::from(IMPLICIT_ACTION))),
            "id" => (true, None),
            _ => (false, None),
        }
    };

    Ok(Placeholder {
        name: Arc::from(name),
        requirement,
        default,
        optional,
    })
}
