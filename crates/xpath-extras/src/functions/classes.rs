use std::collections::HashSet;

use crate::coerce::CoercedArgs;
use crate::model::TreeNode;
use crate::runtime::{CallCtx, Error};
use crate::value::Value;

/// Space, tab, LF, FF and CR.
fn is_html5_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// `has-class([node-set,] class, ...)`: true when the node's `class`
/// attribute contains every requested class.
pub(super) fn has_class<N: TreeNode>(
    _ctx: &CallCtx<N>,
    args: CoercedArgs<N>,
) -> Result<Value<N>, Error> {
    let wanted = args.strings_from(0)?;
    if wanted.is_empty() {
        return Err(Error::arity(&args.function, 1, None, 0));
    }
    let Some(node) = args.context_node.as_ref() else {
        return Ok(Value::Boolean(false));
    };
    let Some(class_attr) = node.attribute("class") else {
        return Ok(Value::Boolean(false));
    };
    let present: HashSet<&str> = class_attr
        .split(is_html5_whitespace)
        .filter(|c| !c.is_empty())
        .collect();
    Ok(Value::Boolean(wanted.iter().all(|c| present.contains(c))))
}
