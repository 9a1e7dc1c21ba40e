use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailcraft_compiler_html::compile;
use mailcraft_model::{Component, ComponentId, ComponentType, EmailTemplate};

fn compile_small_template(c: &mut Criterion) {
    let mut template = EmailTemplate::default();
    template.components = vec![
        Component::new(ComponentId::from("h"), ComponentType::Header),
        Component::new(ComponentId::from("t"), ComponentType::Text),
        Component::new(ComponentId::from("b"), ComponentType::Button),
    ];

    c.bench_function("compile_small_template", |b| {
        b.iter(|| compile(black_box(&template)))
    });
}

fn compile_large_template(c: &mut Criterion) {
    let mut template = EmailTemplate::default();
    template.components = (0..50)
        .map(|i| {
            let children = ComponentType::ALL
                .iter()
                .filter(|ty| !ty.is_container())
                .enumerate()
                .map(|(j, ty)| Component::new(ComponentId::new(format!("c{}-{}", i, j)), *ty))
                .collect();
            Component::new(ComponentId::new(format!("box{}", i)), ComponentType::Container)
                .with_children(children)
        })
        .collect();

    c.bench_function("compile_large_template", |b| {
        b.iter(|| compile(black_box(&template)))
    });
}

criterion_group!(benches, compile_small_template, compile_large_template);
criterion_main!(benches);
