use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stakeholder_venn::config::Config;
use stakeholder_venn::ir::{Segment, StakeholderCategories};
use stakeholder_venn::layout::compute_layout;
use stakeholder_venn::render::{render_png, render_svg};
use std::hint::black_box;

fn populated_categories(per_segment: usize) -> StakeholderCategories {
    let mut categories = StakeholderCategories::default();
    for segment in Segment::ALL {
        let names = categories.names_mut(segment);
        for i in 0..per_segment {
            names.push(format!("{} stakeholder {}", segment.display_name(), i + 1));
        }
    }
    categories
}

fn bench_layout_svg(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("layout_svg");
    for per_segment in [0usize, 4, 50] {
        let categories = populated_categories(per_segment);
        group.bench_with_input(
            BenchmarkId::from_parameter(per_segment),
            &categories,
            |b, categories| {
                b.iter(|| {
                    let layout = compute_layout(black_box(categories), &config.theme, &config.render);
                    black_box(render_svg(&layout, &config.theme, &config.render))
                })
            },
        );
    }
    group.finish();
}

fn bench_png(c: &mut Criterion) {
    let categories = populated_categories(6);
    let mut group = c.benchmark_group("png");
    group.sample_size(10);
    for dpi in [72.0f32, 300.0] {
        let mut config = Config::default();
        config.render.dpi = dpi;
        let layout = compute_layout(&categories, &config.theme, &config.render);
        let svg = render_svg(&layout, &config.theme, &config.render);
        group.bench_with_input(BenchmarkId::from_parameter(dpi as u32), &svg, |b, svg| {
            b.iter(|| black_box(render_png(black_box(svg), &config.render)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout_svg, bench_png);
criterion_main!(benches);
