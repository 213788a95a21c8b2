pub mod coerce;
pub mod convert;
pub mod functions;
pub mod model;
pub mod runtime;
pub mod signature;
pub mod simple_node;
pub mod value;

pub use coerce::{CoercedArgs, coerce_args};
pub use convert::convert;
pub use functions::{initialize_registry, public_name};
pub use model::{NodeKind, QName, TreeNode};
pub use runtime::{CallCtx, CallCtxBuilder, Error, ErrorKind, FunctionImpl, FunctionRegistry};
pub use signature::{Modality, ParamSpec, ParamType, TypeSpec};
pub use simple_node::{SimpleNode, SimpleNodeBuilder, attr, doc as simple_doc, elem, text};
pub use value::{NodeItem, NodeSet, Value};
