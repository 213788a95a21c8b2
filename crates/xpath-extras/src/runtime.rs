use std::collections::HashMap;
use std::sync::Arc;

use crate::coerce::{CoercedArgs, coerce_args};
use crate::model::TreeNode;
use crate::signature::TypeSpec;
use crate::value::Value;

/// Discriminant of [`Error`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Arity,
    UnsupportedType,
    UnknownFlag,
    UnsupportedElement,
    Conversion,
    UnknownFunction,
    Regex,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("{function}: expected {} argument(s), got {given}", describe_arity(.min, .max))]
    Arity {
        function: String,
        min: usize,
        max: Option<usize>,
        given: usize,
    },
    #[error("{function}: {message}")]
    UnsupportedType { function: String, message: String },
    #[error("unknown regex flag '{flag}' (expected one of a, i, m, s)")]
    UnknownFlag { flag: char },
    #[error("{function}: unsupported element <{tag}> (expected <table> or <dl>)")]
    UnsupportedElement { function: String, tag: String },
    #[error("malformed signature: {message}")]
    Conversion { message: String },
    #[error("unknown function {name}()")]
    UnknownFunction { name: String },
    #[error("regex error: {message}")]
    Regex {
        message: String,
        #[source]
        source: Option<Arc<fancy_regex::Error>>,
    },
}

fn describe_arity(min: &usize, max: &Option<usize>) -> String {
    match *max {
        None => format!("at least {min}"),
        Some(max) if max == *min => min.to_string(),
        Some(max) => format!("{min} to {max}"),
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Arity { .. } => ErrorKind::Arity,
            Error::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            Error::UnknownFlag { .. } => ErrorKind::UnknownFlag,
            Error::UnsupportedElement { .. } => ErrorKind::UnsupportedElement,
            Error::Conversion { .. } => ErrorKind::Conversion,
            Error::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Error::Regex { .. } => ErrorKind::Regex,
        }
    }

    pub fn arity(function: &str, min: usize, max: Option<usize>, given: usize) -> Self {
        Error::Arity {
            function: function.to_string(),
            min,
            max,
            given,
        }
    }

    pub fn unsupported_type(function: &str, message: impl Into<String>) -> Self {
        Error::UnsupportedType {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Error::Conversion {
            message: message.into(),
        }
    }

    pub fn regex(message: impl Into<String>) -> Self {
        Error::Regex {
            message: message.into(),
            source: None,
        }
    }
}

impl From<fancy_regex::Error> for Error {
    fn from(e: fancy_regex::Error) -> Self {
        Error::Regex {
            message: e.to_string(),
            source: Some(Arc::new(e)),
        }
    }
}

/// Regex backend used by `re-match` and `re-sub`. Flags are already
/// validated letters from `{a, i, m, s}`.
pub trait RegexProvider: Send + Sync {
    fn matches(&self, pattern: &str, flags: &str, text: &str) -> Result<bool, Error>;
    fn replace(
        &self,
        pattern: &str,
        flags: &str,
        text: &str,
        replacement: &str,
    ) -> Result<String, Error>;
}

/// What the evaluator hands every extension function besides its arguments.
pub struct CallCtx<N> {
    pub context_node: Option<N>,
    pub regex: Option<Arc<dyn RegexProvider>>,
}

impl<N> Default for CallCtx<N> {
    fn default() -> Self {
        Self {
            context_node: None,
            regex: None,
        }
    }
}

impl<N: Clone> Clone for CallCtx<N> {
    fn clone(&self) -> Self {
        Self {
            context_node: self.context_node.clone(),
            regex: self.regex.clone(),
        }
    }
}

pub struct CallCtxBuilder<N> {
    ctx: CallCtx<N>,
}

impl<N> Default for CallCtxBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> CallCtxBuilder<N> {
    pub fn new() -> Self {
        Self {
            ctx: CallCtx::default(),
        }
    }

    #[must_use]
    pub fn with_context_node(mut self, node: N) -> Self {
        self.ctx.context_node = Some(node);
        self
    }

    #[must_use]
    pub fn with_regex(mut self, provider: Arc<dyn RegexProvider>) -> Self {
        self.ctx.regex = Some(provider);
        self
    }

    pub fn build(self) -> CallCtx<N> {
        self.ctx
    }
}

pub type FunctionImpl<N> =
    Arc<dyn Fn(&CallCtx<N>, &[Value<N>]) -> Result<Value<N>, Error> + Send + Sync>;

/// Public name → callable. Filled once at startup, read-only afterwards;
/// hosts share it behind an `Arc`.
pub struct FunctionRegistry<N> {
    fns: HashMap<String, FunctionImpl<N>>,
}

impl<N> Default for FunctionRegistry<N> {
    fn default() -> Self {
        Self {
            fns: HashMap::new(),
        }
    }
}

impl<N: TreeNode> FunctionRegistry<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last registration for a name wins. Callers still holding the replaced
    /// implementation (from `resolve`) keep a working handle to it.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: FunctionImpl<N>,
    ) -> Option<FunctionImpl<N>> {
        let name = name.into();
        let previous = self.fns.insert(name.clone(), func);
        if previous.is_some() {
            tracing::debug!(function = %name, "replaced extension function");
        } else {
            tracing::debug!(function = %name, "registered extension function");
        }
        previous
    }

    /// Convenience: register a plain closure.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Option<FunctionImpl<N>>
    where
        F: 'static + Send + Sync + Fn(&CallCtx<N>, &[Value<N>]) -> Result<Value<N>, Error>,
    {
        self.register(name, Arc::new(f))
    }

    /// Register a typed body behind the argument coercer. `name` is the
    /// public name and is what arity/type errors report.
    pub fn register_coerced<F>(
        &mut self,
        name: &str,
        spec: TypeSpec,
        body: F,
    ) -> Option<FunctionImpl<N>>
    where
        F: 'static + Send + Sync + Fn(&CallCtx<N>, CoercedArgs<N>) -> Result<Value<N>, Error>,
    {
        let function = name.to_string();
        self.register_fn(name, move |ctx, raw| {
            let args = coerce_args(&function, ctx.context_node.as_ref(), raw, &spec)?;
            body(ctx, args)
        })
    }

    pub fn resolve(&self, name: &str) -> Option<FunctionImpl<N>> {
        self.fns.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }

    /// Registered public names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn call(&self, name: &str, ctx: &CallCtx<N>, args: &[Value<N>]) -> Result<Value<N>, Error> {
        let func = self
            .fns
            .get(name)
            .ok_or_else(|| Error::UnknownFunction {
                name: name.to_string(),
            })?;
        func(ctx, args)
    }
}
