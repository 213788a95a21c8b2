use std::collections::BTreeSet;

use proptest::prelude::*;
use xpath_extras::runtime::CallCtxBuilder;
use xpath_extras::{SimpleNode, Value, attr, elem, initialize_registry};

fn class_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,5}"
}

fn separator() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n', '\x0C', '\r']), 1..3)
        .prop_map(|v| v.into_iter().collect())
}

proptest! {
    #[test]
    fn has_class_is_subset_test(
        present in prop::collection::vec(class_name(), 0..6),
        seps in prop::collection::vec(separator(), 6),
        wanted in prop::collection::vec(class_name(), 1..4),
    ) {
        let mut value = String::new();
        for (i, c) in present.iter().enumerate() {
            value.push_str(&seps[i]);
            value.push_str(c);
        }
        let node = elem("div").attr(attr("class", &value)).build();
        let reg = initialize_registry::<SimpleNode>().unwrap();
        let ctx = CallCtxBuilder::new().with_context_node(node).build();
        let args: Vec<Value<SimpleNode>> = wanted.iter().map(|w| Value::from(w.as_str())).collect();

        let got = reg.call("has-class", &ctx, &args).unwrap();

        let present: BTreeSet<&String> = present.iter().collect();
        let expected = wanted.iter().all(|w| present.contains(w));
        prop_assert_eq!(got, Value::Boolean(expected));
    }
}
