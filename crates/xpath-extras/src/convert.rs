//! Conversion of one raw evaluator value to a declared parameter type.
//!
//! Node-sets collapse to scalars the way XPath 1.0 does it: `boolean()` is
//! non-emptiness, `string()` is the string value of the first member (empty
//! for an empty set), `number()` parses that string and yields NaN when it is
//! not a number. That parse follows the XPath 1.0 `number()` lexical form,
//! not a general float literal: `"1e3"` and `"+5"` are NaN.
//! Scalar-to-scalar casts are the host's native ones in [`crate::value`].
//! Nothing converts into a node-set.
use crate::model::TreeNode;
use crate::runtime::Error;
use crate::signature::ParamType;
use crate::value::{
    self, NodeSet, Value, boolean_to_number, boolean_to_string, number_to_boolean,
    number_to_string, string_to_boolean, string_to_number,
};

pub fn convert<N: TreeNode>(
    function: &str,
    raw: &Value<N>,
    target: ParamType,
) -> Result<Value<N>, Error> {
    Ok(match (raw, target) {
        (Value::NodeSet(set), ParamType::NodeSet) => Value::NodeSet(set.clone()),
        (Value::NodeSet(set), ParamType::Boolean) => Value::Boolean(!set.is_empty()),
        (Value::NodeSet(set), ParamType::String) => Value::String(first_string(set)),
        (Value::NodeSet(set), ParamType::Number) => {
            Value::Number(string_to_number(&first_string(set)))
        }

        (Value::Boolean(b), ParamType::Boolean) => Value::Boolean(*b),
        (Value::Boolean(b), ParamType::Number) => Value::Number(boolean_to_number(*b)),
        (Value::Boolean(b), ParamType::String) => Value::String(boolean_to_string(*b).into()),

        (Value::Number(n), ParamType::Boolean) => Value::Boolean(number_to_boolean(*n)),
        (Value::Number(n), ParamType::Number) => Value::Number(*n),
        (Value::Number(n), ParamType::String) => Value::String(number_to_string(*n)),

        (Value::String(s), ParamType::Boolean) => Value::Boolean(string_to_boolean(s)),
        (Value::String(s), ParamType::Number) => Value::Number(string_to_number(s)),
        (Value::String(s), ParamType::String) => Value::String(s.clone()),

        (Value::Boolean(_) | Value::Number(_) | Value::String(_), ParamType::NodeSet) => {
            return Err(Error::unsupported_type(
                function,
                format!("cannot convert {} to node-set", raw.param_type()),
            ));
        }
    })
}

fn first_string<N: TreeNode>(set: &NodeSet<N>) -> String {
    set.first()
        .map(value::NodeItem::string_value)
        .unwrap_or_default()
}
