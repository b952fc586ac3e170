//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package talus-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use talus_lex::Lexer;
use talus_util::Handler;

fn lexer_token_count(source: &str) -> usize {
    let handler = Handler::new();
    let lexer = Lexer::new(source, &handler);
    lexer.count()
}

fn bench_lexer_declarations(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_declarations");

    let source = "f : func (x : int32, y : int32) -> int32 { return x + y }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("variable_decl", |b| {
        b.iter(|| lexer_token_count(black_box("x : int32 = 1")))
    });

    group.bench_function("function_with_body", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = r#"
        use core/io

        Point : struct {
            x : int32;
            y : int32
        }

        Color : variant from int32 {
            Red;
            Green = 5;
            Blue
        }

        distance : func (a : Point, b : Point) -> int32 {
            return (a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y)
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("complex_source", |b| b.iter(|| lexer_token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| b.iter(|| lexer_token_count(black_box(r#"s : string = "hello""#))));

    group.bench_function("string_with_escapes", |b| {
        let source = r#"s : string = "line one\nline two\x41\101""#;
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| b.iter(|| lexer_token_count(black_box("x : int64 = 123456"))));
    group.bench_function("float", |b| b.iter(|| lexer_token_count(black_box("x : float64 = 3.14159"))));
    group.bench_function("hex", |b| b.iter(|| lexer_token_count(black_box("x : int32 = 0xDEADBEEF_u32"))));

    group.finish();
}

fn bench_lexer_use_directive(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_use_directive");

    group.bench_function("use_with_path", |b| b.iter(|| lexer_token_count(black_box("use core/io/net"))));
    group.bench_function("use_without_path", |b| b.iter(|| lexer_token_count(black_box("use core"))));
    group.bench_function("import", |b| b.iter(|| lexer_token_count(black_box("import mymod"))));

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_declarations,
    bench_lexer_complex,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_use_directive,
);
criterion_main!(benches);
