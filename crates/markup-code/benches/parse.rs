use criterion::{Criterion, criterion_group, criterion_main};
use markup_code::{MarkupParser, parse};

fn generate_markup(size: usize) -> String {
    let base = "class C{|CS0001: |}{\n    [|void M() {$$ }|]\n    {|outer:int [|x|] = {|inner:0|};|}\n}\n";
    // Only the first copy keeps its cursor marker
    let rest = base.replace("$$", "").repeat(size.saturating_sub(1));
    format!("{base}{rest}")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(10);

    let content = generate_markup(1_000);
    group.bench_function("fresh_parser", |b| {
        b.iter(|| {
            let result = parse(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(result);
        });
    });

    let mut parser = MarkupParser::new();
    group.bench_function("reused_parser", |b| {
        b.iter(|| {
            let result = parser.parse(std::hint::black_box(&content)).unwrap();
            std::hint::black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
