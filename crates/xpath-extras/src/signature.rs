//! Declarative parameter lists for extension functions.
//!
//! A `TypeSpec` is built once when a function is registered. Ordering rules
//! are checked at construction so a malformed signature fails at startup
//! instead of on the first call:
//! - `Optional` parameters only after all `Required` ones,
//! - at most one `Variadic`, and only as the last parameter.
use core::fmt;

use smallvec::SmallVec;

use crate::runtime::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Boolean,
    Number,
    String,
    NodeSet,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamType::Boolean => "boolean",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::NodeSet => "node-set",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Required,
    /// Omitted arguments resolve to `None`, never to a zero value.
    Optional,
    /// Consumes every remaining argument, each converted on its own.
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamSpec {
    pub ty: ParamType,
    pub modality: Modality,
}

impl ParamSpec {
    pub const fn required(ty: ParamType) -> Self {
        Self {
            ty,
            modality: Modality::Required,
        }
    }
    pub const fn optional(ty: ParamType) -> Self {
        Self {
            ty,
            modality: Modality::Optional,
        }
    }
    pub const fn variadic(ty: ParamType) -> Self {
        Self {
            ty,
            modality: Modality::Variadic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    params: SmallVec<[ParamSpec; 4]>,
    optional_context_node: bool,
}

impl TypeSpec {
    pub fn new(params: impl IntoIterator<Item = ParamSpec>) -> Result<Self, Error> {
        let params: SmallVec<[ParamSpec; 4]> = params.into_iter().collect();
        let mut seen_optional = false;
        for (i, p) in params.iter().enumerate() {
            match p.modality {
                Modality::Required if seen_optional => {
                    return Err(Error::conversion(format!(
                        "required parameter {i} follows an optional parameter"
                    )));
                }
                Modality::Required => {}
                Modality::Optional => seen_optional = true,
                Modality::Variadic if i + 1 != params.len() => {
                    return Err(Error::conversion(format!(
                        "variadic parameter {i} must be the last parameter"
                    )));
                }
                Modality::Variadic => {}
            }
        }
        Ok(Self {
            params,
            optional_context_node: false,
        })
    }

    /// Allow callers to pass the subject node-set as an extra leading
    /// argument instead of relying on the evaluator's context node.
    #[must_use]
    pub fn with_optional_context_node(mut self) -> Self {
        self.optional_context_node = true;
        self
    }

    pub fn optional_context_node(&self) -> bool {
        self.optional_context_node
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Parameters with a fixed position (everything but a trailing variadic).
    pub fn fixed(&self) -> &[ParamSpec] {
        match self.variadic() {
            Some(_) => &self.params[..self.params.len() - 1],
            None => &self.params,
        }
    }

    pub fn variadic(&self) -> Option<ParamType> {
        self.params
            .last()
            .filter(|p| p.modality == Modality::Variadic)
            .map(|p| p.ty)
    }

    /// Number of positional arguments that must be present.
    pub fn min_arity(&self) -> usize {
        self.params
            .iter()
            .take_while(|p| p.modality == Modality::Required)
            .count()
    }

    /// `None` when a variadic tail accepts any number of extra arguments.
    pub fn max_arity(&self) -> Option<usize> {
        match self.variadic() {
            Some(_) => None,
            None => Some(self.params.len()),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = self
            .optional_context_node
            .then(|| "[node-set]".to_string());
        let params = self.params.iter().map(|p| match p.modality {
            Modality::Required => p.ty.to_string(),
            Modality::Optional => format!("{}?", p.ty),
            Modality::Variadic => format!("{}*", p.ty),
        });
        let parts: Vec<String> = subject.into_iter().chain(params).collect();
        write!(f, "({})", parts.join(", "))
    }
}
