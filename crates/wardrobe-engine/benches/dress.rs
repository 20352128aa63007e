use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wardrobe_engine::{enumerate, Catalog, EngineConfig, Wardrobe};

const WARDROBE: &str = r#"{
    "garments": ["Shirt", "Pants", "Shoes", "Hat", "Jacket", "Scarf"],
    "colors": ["Red", "Blue", "Green", "Black", "White"],
    "constraints": [
        {"type": "not", "object": "color", "values": [["Red", "Green"], ["Blue", "Black"]]},
        {"type": "implies", "object": "garment", "values": [["Jacket", "Shirt"], ["Scarf", "Jacket"]]},
        {"type": "not", "object": "garment", "values": [["Hat", "Scarf"]]}
    ]
}"#;

fn inventory() -> String {
    let mut lines = Vec::new();
    for garment in ["Shirt", "Pants", "Shoes", "Hat", "Jacket", "Scarf"] {
        for color in ["Red", "Blue", "Black"] {
            lines.push(format!("{},{}", garment, color));
        }
    }
    lines.join("\n")
}

fn bench_enumerate(c: &mut Criterion) {
    let catalog = Catalog::load("bench", WARDROBE).unwrap();
    let wardrobe = Wardrobe::new(catalog, EngineConfig::default());
    let inventory = wardrobe.inventory(&inventory());

    c.bench_function("enumerate_candidates", |b| {
        b.iter(|| black_box(enumerate(black_box(&inventory)).count()))
    });
}

fn bench_dress(c: &mut Criterion) {
    let text = inventory();

    for (name, parallel) in [("dress_sequential", false), ("dress_parallel", true)] {
        let catalog = Catalog::load("bench", WARDROBE).unwrap();
        let wardrobe = Wardrobe::new(catalog, EngineConfig::default().with_parallel(parallel));
        let inventory = wardrobe.inventory(&text);

        c.bench_function(name, |b| b.iter(|| black_box(wardrobe.dress(black_box(&inventory)))));
    }
}

criterion_group!(benches, bench_enumerate, bench_dress);
criterion_main!(benches);
