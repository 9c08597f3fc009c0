use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textdistill::{extract, Options};

fn sample_page() -> String {
    let paragraph = "A benchmark paragraph with ordinary prose, commas, and a \
                     realistic sentence length for measuring extraction throughput. ";
    let mut sections = String::new();
    for i in 0..20 {
        sections.push_str(&format!(
            "<h2>Section {i}</h2><p>{}</p><p>{}</p>",
            paragraph.repeat(4),
            paragraph.repeat(3)
        ));
    }
    format!(
        r#"<html><head><title>Benchmark Page - Example</title></head><body>
        <nav><a href="/">Home</a><a href="/about">About</a></nav>
        <div class="sidebar"><a href="/a">one</a><a href="/b">two</a></div>
        <article class="article-body">{sections}</article>
        <footer>Copyright</footer>
        </body></html>"#
    )
}

fn bench_extraction(c: &mut Criterion) {
    let page = sample_page();
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(&page), &Options::default()));
    });

    let fast = Options {
        fast: true,
        ..Options::default()
    };
    c.bench_function("extract_fast", |b| {
        b.iter(|| extract(black_box(&page), &fast));
    });
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
