//! The extension functions and the startup routine that registers them.
//!
//! ```
//! use xpath_extras::functions::initialize_registry;
//! use xpath_extras::runtime::CallCtxBuilder;
//! use xpath_extras::simple_node::{attr, elem, SimpleNode};
//! use xpath_extras::Value;
//!
//! let registry = initialize_registry::<SimpleNode>().unwrap();
//! let a = elem("a").attr(attr("class", "foo bar")).build();
//! let ctx = CallCtxBuilder::new().with_context_node(a).build();
//!
//! let hit = registry.call("has-class", &ctx, &[Value::from("bar")]).unwrap();
//! assert_eq!(hit, Value::Boolean(true));
//! ```
mod classes;
mod regex;
mod tables;

use crate::model::TreeNode;
use crate::runtime::{Error, FunctionRegistry};
use crate::signature::{ParamSpec, ParamType, TypeSpec};

pub use self::regex::{FancyRegexProvider, RegexFlags, parse_flags};

/// Public name for an internal identifier: `has_class` → `has-class`.
pub fn public_name(internal: &str) -> String {
    internal.replace('_', "-")
}

/// Build the registry with every extension function. Signature errors
/// surface here rather than on first call.
pub fn initialize_registry<N: TreeNode>() -> Result<FunctionRegistry<N>, Error> {
    const STRING: ParamType = ParamType::String;

    let mut reg: FunctionRegistry<N> = FunctionRegistry::new();

    reg.register_coerced(
        &public_name("has_class"),
        TypeSpec::new([ParamSpec::variadic(STRING)])?.with_optional_context_node(),
        classes::has_class,
    );
    reg.register_coerced(
        &public_name("re_match"),
        TypeSpec::new([
            ParamSpec::required(STRING),
            ParamSpec::required(STRING),
            ParamSpec::optional(STRING),
        ])?,
        regex::re_match,
    );
    reg.register_coerced(
        &public_name("re_sub"),
        TypeSpec::new([
            ParamSpec::required(STRING),
            ParamSpec::required(STRING),
            ParamSpec::required(STRING),
            ParamSpec::optional(STRING),
        ])?,
        regex::re_sub,
    );
    reg.register_coerced(
        &public_name("table_mapped_keys"),
        TypeSpec::new([])?.with_optional_context_node(),
        tables::table_mapped_keys,
    );
    reg.register_coerced(
        &public_name("table_mapped_value"),
        TypeSpec::new([ParamSpec::required(STRING)])?.with_optional_context_node(),
        tables::table_mapped_value,
    );
    tracing::debug!(functions = ?reg.names(), "extension function registry initialized");
    Ok(reg)
}
