use criterion::{black_box, criterion_group, criterion_main, Criterion};
use markup::{ElementArena, HtmlSerializer, NodeId};

fn build_table(arena: &mut ElementArena, rows: usize, cols: usize) -> NodeId {
    let table = arena.create_element("table", true);
    for r in 0..rows {
        let tr = arena.create_element("tr", true);
        arena.get_mut(tr).unwrap().add_class(if r % 2 == 0 { "even" } else { "odd" });
        arena.append_child(table, tr).unwrap();
        for c in 0..cols {
            let td = arena.create_element("td", true);
            let text = arena.create_text(format!("{} & {}", r, c));
            arena.append_child(tr, td).unwrap();
            arena.append_child(td, text).unwrap();
        }
    }
    table
}

fn bench_serialize(c: &mut Criterion) {
    let mut arena = ElementArena::new();
    let table = build_table(&mut arena, 100, 10);
    let serializer = HtmlSerializer::new();

    c.bench_function("serialize_table_100x10", |b| {
        b.iter(|| serializer.serialize(black_box(&arena), table).unwrap())
    });

    c.bench_function("find_all_by_class_odd", |b| {
        b.iter(|| arena.find_all_by_class(black_box(table), "odd").len())
    });
}

criterion_group!(benches, bench_serialize);
criterion_main!(benches);
