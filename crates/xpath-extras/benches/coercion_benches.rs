use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use xpath_extras::runtime::CallCtxBuilder;
use xpath_extras::{
    FunctionRegistry, ParamSpec, ParamType, SimpleNode, TypeSpec, Value, attr, coerce_args, elem,
    initialize_registry, text,
};

fn build_table(rows: usize) -> SimpleNode {
    let mut body = elem("tbody");
    for i in 0..rows {
        body = body.child(
            elem("tr")
                .attr(attr("class", "row striped"))
                .child(elem("th").child(text(&format!("key {i}"))))
                .child(elem("td").child(text(&format!("value {i}"))))
                .child(elem("td").child(text("extra"))),
        );
    }
    elem("table").child(body).build()
}

fn benchmark_coercion(c: &mut Criterion) {
    let node = elem("p").child(text("42")).build();
    let spec = TypeSpec::new([
        ParamSpec::required(ParamType::Number),
        ParamSpec::required(ParamType::String),
        ParamSpec::optional(ParamType::Boolean),
        ParamSpec::variadic(ParamType::String),
    ])
    .expect("valid spec");
    let raw: Vec<Value<SimpleNode>> = vec![
        Value::nodes([node.clone()]),
        Value::Number(1.5),
        Value::Boolean(true),
        Value::from("a"),
        Value::from("b"),
    ];
    c.bench_function("coerce/mixed_args", |b| {
        b.iter(|| {
            let args = coerce_args("bench", Some(&node), black_box(&raw), &spec).expect("coerce");
            black_box(args);
        })
    });
}

fn benchmark_functions(c: &mut Criterion) {
    let reg: FunctionRegistry<SimpleNode> = initialize_registry().expect("registry");
    let ctx = CallCtxBuilder::new().build();
    let mut group = c.benchmark_group("functions");
    for rows in [10usize, 100, 1000] {
        let table = build_table(rows);
        let subject = Value::nodes([table.clone()]);
        group.bench_with_input(BenchmarkId::new("table-mapped-keys", rows), &subject, |b, s| {
            b.iter(|| reg.call("table-mapped-keys", &ctx, std::slice::from_ref(s)).expect("keys"))
        });
        let args = vec![subject.clone(), Value::from(format!("key {}", rows / 2))];
        group.bench_with_input(BenchmarkId::new("table-mapped-value", rows), &args, |b, a| {
            b.iter(|| reg.call("table-mapped-value", &ctx, a).expect("value"))
        });
        let rows_nodes = table.find_all("tr");
        group.bench_with_input(BenchmarkId::new("has-class", rows), &rows_nodes, |b, rs| {
            b.iter(|| {
                for r in rs {
                    let args = [Value::nodes([r.clone()]), Value::from("striped")];
                    black_box(reg.call("has-class", &ctx, &args).expect("has-class"));
                }
            })
        });
    }
    group.finish();

    let heading = Value::from("section introduction");
    c.bench_function("functions/re-sub", |b| {
        b.iter(|| {
            reg.call(
                "re-sub",
                &ctx,
                &[heading.clone(), Value::from(r"^section (\w+)$"), Value::from(r"\g<1>")],
            )
            .expect("re-sub")
        })
    });
}

criterion_group!(benches, benchmark_coercion, benchmark_functions);
criterion_main!(benches);
