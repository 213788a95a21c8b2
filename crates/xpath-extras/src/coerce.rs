//! Argument coercion: maps the evaluator's untyped argument list onto a
//! [`TypeSpec`].
//!
//! Steps, in order:
//! 1. If the `TypeSpec` allows it and the first argument is a node-set, that set's
//!    first node becomes the context node and the argument is consumed.
//!    Otherwise the evaluator's context node is used.
//! 2. Each fixed parameter takes the argument at its position, converted to
//!    its type. A missing optional becomes `None`; a missing required one is
//!    an arity error.
//! 3. A variadic tail converts every remaining argument.
//! 4. Leftover arguments without a variadic tail are an arity error.
use smallvec::SmallVec;

use crate::convert::convert;
use crate::model::TreeNode;
use crate::runtime::Error;
use crate::signature::{Modality, TypeSpec};
use crate::value::{NodeItem, NodeSet, Value};

/// Typed arguments for a function body. `values` has one slot per fixed
/// parameter followed by one per variadic argument; only omitted optional
/// parameters are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedArgs<N> {
    pub function: String,
    pub context_node: Option<N>,
    pub values: SmallVec<[Option<Value<N>>; 4]>,
}

pub fn coerce_args<N: TreeNode>(
    function: &str,
    context_node: Option<&N>,
    raw: &[Value<N>],
    spec: &TypeSpec,
) -> Result<CoercedArgs<N>, Error> {
    let (context_node, positional, from_args) = match raw.split_first() {
        Some((Value::NodeSet(subject), rest)) if spec.optional_context_node() => {
            (subject.first().and_then(NodeItem::as_node).cloned(), rest, true)
        }
        _ => (context_node.cloned(), raw, false),
    };
    tracing::trace!(
        function,
        given = positional.len(),
        context_from_args = from_args,
        "coercing arguments"
    );

    let fixed = spec.fixed();
    let mut values: SmallVec<[Option<Value<N>>; 4]> = SmallVec::with_capacity(fixed.len());
    for (i, param) in fixed.iter().enumerate() {
        match (positional.get(i), param.modality) {
            (Some(arg), _) => values.push(Some(convert(function, arg, param.ty)?)),
            (None, Modality::Optional) => values.push(None),
            (None, Modality::Required | Modality::Variadic) => {
                return Err(Error::arity(
                    function,
                    spec.min_arity(),
                    spec.max_arity(),
                    positional.len(),
                ));
            }
        }
    }

    let rest = positional.get(fixed.len()..).unwrap_or_default();
    match spec.variadic() {
        Some(ty) => {
            for arg in rest {
                values.push(Some(convert(function, arg, ty)?));
            }
        }
        None if !rest.is_empty() => {
            return Err(Error::arity(
                function,
                spec.min_arity(),
                spec.max_arity(),
                positional.len(),
            ));
        }
        None => {}
    }

    Ok(CoercedArgs {
        function: function.to_string(),
        context_node,
        values,
    })
}

impl<N: TreeNode> CoercedArgs<N> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn slot(&self, index: usize) -> Option<&Value<N>> {
        self.values.get(index).and_then(Option::as_ref)
    }

    fn mismatch(&self, index: usize, expected: &str) -> Error {
        Error::unsupported_type(
            &self.function,
            format!("argument {} is not a {expected}", index + 1),
        )
    }

    pub fn boolean(&self, index: usize) -> Result<bool, Error> {
        self.opt_boolean(index)?
            .ok_or_else(|| self.mismatch(index, "boolean"))
    }

    pub fn opt_boolean(&self, index: usize) -> Result<Option<bool>, Error> {
        match self.slot(index) {
            None => Ok(None),
            Some(Value::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(self.mismatch(index, "boolean")),
        }
    }

    pub fn number(&self, index: usize) -> Result<f64, Error> {
        self.opt_number(index)?
            .ok_or_else(|| self.mismatch(index, "number"))
    }

    pub fn opt_number(&self, index: usize) -> Result<Option<f64>, Error> {
        match self.slot(index) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(Some(*n)),
            Some(_) => Err(self.mismatch(index, "number")),
        }
    }

    pub fn string(&self, index: usize) -> Result<&str, Error> {
        self.opt_string(index)?
            .ok_or_else(|| self.mismatch(index, "string"))
    }

    pub fn opt_string(&self, index: usize) -> Result<Option<&str>, Error> {
        match self.slot(index) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.mismatch(index, "string")),
        }
    }

    pub fn node_set(&self, index: usize) -> Result<&NodeSet<N>, Error> {
        match self.slot(index) {
            Some(Value::NodeSet(set)) => Ok(set),
            _ => Err(self.mismatch(index, "node-set")),
        }
    }

    /// Every string from `start` on, e.g. a variadic tail.
    pub fn strings_from(&self, start: usize) -> Result<Vec<&str>, Error> {
        (start..self.values.len())
            .map(|i| self.string(i))
            .collect()
    }
}
