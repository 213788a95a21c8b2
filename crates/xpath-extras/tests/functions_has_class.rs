use rstest::{fixture, rstest};
use xpath_extras::runtime::CallCtxBuilder;
use xpath_extras::{
    ErrorKind, FunctionRegistry, NodeKind, SimpleNode, TreeNode, Value, attr, elem,
    initialize_registry, text,
};

type V = Value<SimpleNode>;

#[fixture]
fn registry() -> FunctionRegistry<SimpleNode> {
    initialize_registry().unwrap()
}

/// <p><a class='foo bar baz'>111</a><b class='foo aaa bbb ccc'>222</b></p>
#[fixture]
fn root() -> SimpleNode {
    elem("p")
        .child(elem("a").attr(attr("class", "foo bar baz")).child(text("111")))
        .child(elem("b").attr(attr("class", "foo aaa bbb ccc")).child(text("222")))
        .build()
}

fn strs(classes: &[&str]) -> Vec<V> {
    classes.iter().map(|c| Value::from(*c)).collect()
}

/// Emulates `//*[has-class(...)]`: tags of elements for which the predicate holds.
fn filter(reg: &FunctionRegistry<SimpleNode>, root: &SimpleNode, classes: &[&str]) -> Vec<String> {
    root.descendants()
        .into_iter()
        .filter(|n| n.kind() == NodeKind::Element)
        .filter(|n| {
            let ctx = CallCtxBuilder::new().with_context_node(n.clone()).build();
            reg.call("has-class", &ctx, &strs(classes)).unwrap() == Value::Boolean(true)
        })
        .filter_map(|n| n.tag_name())
        .collect()
}

#[rstest]
#[case(&["foo"], &["a", "b"])]
#[case(&["foo", "bar"], &["a"])]
#[case(&["foo", "ccc"], &["b"])]
#[case(&["ccc", "foo", "aaa"], &["b"])]
#[case(&["nope"], &[])]
fn predicate_form_uses_context_node(
    registry: FunctionRegistry<SimpleNode>,
    root: SimpleNode,
    #[case] classes: &[&str],
    #[case] expected: &[&str],
) {
    assert_eq!(filter(&registry, &root, classes), expected);
}

#[rstest]
fn explicit_subject_node_set(registry: FunctionRegistry<SimpleNode>, root: SimpleNode) {
    let ctx = CallCtxBuilder::new().with_context_node(root.clone()).build();
    let call = |tag: &str, classes: &[&str]| {
        let mut args = vec![Value::nodes(root.find_all(tag))];
        args.extend(strs(classes));
        registry.call("has-class", &ctx, &args).unwrap()
    };
    assert_eq!(call("a", &["foo", "bar"]), Value::Boolean(true));
    assert_eq!(call("b", &["foo", "bar"]), Value::Boolean(false));
    assert_eq!(call("c", &["foo"]), Value::Boolean(false));
}

#[rstest]
fn missing_class_attribute_is_false(registry: FunctionRegistry<SimpleNode>) {
    let span = elem("span").attr(attr("id", "x")).build();
    let ctx = CallCtxBuilder::new().with_context_node(span).build();
    assert_eq!(registry.call("has-class", &ctx, &strs(&["x"])).unwrap(), Value::Boolean(false));
}

#[rstest]
fn no_context_node_is_false(registry: FunctionRegistry<SimpleNode>) {
    let ctx = CallCtxBuilder::<SimpleNode>::new().build();
    assert_eq!(registry.call("has-class", &ctx, &strs(&["x"])).unwrap(), Value::Boolean(false));
}

#[rstest]
fn html5_whitespace_separates_classes(registry: FunctionRegistry<SimpleNode>) {
    let div = elem("div").attr(attr("class", "\t one\n\x0Ctwo\r\n  three ")).build();
    let ctx = CallCtxBuilder::new().with_context_node(div).build();
    let hit = registry.call("has-class", &ctx, &strs(&["one", "two", "three"])).unwrap();
    assert_eq!(hit, Value::Boolean(true));
    let partial = registry.call("has-class", &ctx, &strs(&["on"])).unwrap();
    assert_eq!(partial, Value::Boolean(false));
}

#[rstest]
fn zero_class_names_is_arity_error(registry: FunctionRegistry<SimpleNode>, root: SimpleNode) {
    let a = root.find_all("a")[0].clone();
    let ctx = CallCtxBuilder::new().with_context_node(a.clone()).build();

    let err = registry.call("has-class", &ctx, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);

    // has-class(//a): the node-set is taken as the subject, leaving no classes.
    let err = registry.call("has-class", &ctx, &[Value::nodes([a])]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arity);
    assert!(err.to_string().starts_with("has-class:"));
}

#[rstest]
fn class_names_are_coerced_to_strings(registry: FunctionRegistry<SimpleNode>) {
    let td = elem("td").attr(attr("class", "1 true")).build();
    let ctx = CallCtxBuilder::new().with_context_node(td).build();
    let out = registry
        .call("has-class", &ctx, &[Value::Number(1.0), Value::Boolean(true)])
        .unwrap();
    assert_eq!(out, Value::Boolean(true));
}
