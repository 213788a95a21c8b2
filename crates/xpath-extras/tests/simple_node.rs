use rstest::rstest;
use xpath_extras::simple_node::{comment, doc};
use xpath_extras::{NodeKind, SimpleNode, TreeNode, attr, elem, text};

#[rstest]
fn string_value_concatenates_descendant_text() {
    let p = elem("p")
        .child(text("a"))
        .child(elem("b").child(text("b")).child(comment("skipped")))
        .child(text("c"))
        .build();
    assert_eq!(p.string_value(), "abc");
}

#[rstest]
fn attribute_lookup_by_local_name() {
    let a = elem("a")
        .attr(attr("class", "x y"))
        .attr(attr("href", "/"))
        .build();
    assert_eq!(a.attribute("href").as_deref(), Some("/"));
    assert_eq!(a.attribute("class").as_deref(), Some("x y"));
    assert!(a.attribute("id").is_none());
}

#[rstest]
fn parent_links_are_set_on_build() {
    let root = doc().child(elem("html").child(elem("body"))).build();
    let html = root.children()[0].clone();
    let body = html.children()[0].clone();
    assert_eq!(body.parent(), Some(html.clone()));
    assert_eq!(html.parent(), Some(root.clone()));
    assert_eq!(root.parent(), None);
    assert_eq!(root.kind(), NodeKind::Document);
}

#[rstest]
fn tag_name_only_for_elements() {
    let e = elem("TD").child(text("x")).build();
    assert_eq!(e.tag_name().as_deref(), Some("TD"));
    assert_eq!(e.children()[0].tag_name(), None);
}

#[rstest]
fn find_all_walks_in_document_order() {
    let root = elem("root")
        .child(elem("a").child(text("1")).child(elem("a").child(text("2"))))
        .child(elem("b"))
        .child(elem("A").child(text("3")))
        .build();
    let found: Vec<String> = root.find_all("a").iter().map(SimpleNode::string_value).collect();
    assert_eq!(found, vec!["12", "2", "3"]);
}

#[rstest]
fn child_elements_skip_text() {
    let ul = elem("ul")
        .child(text("\n  "))
        .child(elem("li"))
        .child(text("\n  "))
        .child(elem("li"))
        .build();
    assert_eq!(ul.children().len(), 4);
    assert_eq!(ul.child_elements().len(), 2);
}

#[rstest]
fn equality_is_identity() {
    let a = elem("x").build();
    let b = elem("x").build();
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}
