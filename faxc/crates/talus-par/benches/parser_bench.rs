//! Parser benchmarks.
//!
//! Run with: `cargo bench --package talus-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use talus_par::{lex_all, Parser};
use talus_util::Handler;

fn parse_source(source: &str) -> talus_par::ast::Ast {
    let handler = Handler::new();
    let tokens = lex_all(source, &handler);
    let parser = Parser::new(tokens, source, &handler);
    parser.parse_unit()
}

fn bench_parser_variable(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_variable");

    let source = "x : int32 = 42\n";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("variable_decl", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_functions");

    let source = r#"
main : func () -> int32 {
    x := 42
    y := x + 1
    return y
}

fib : func (n : int32) -> int32 {
    if (n <= 1) {
        return n
    }
    return fib(n - 1) + fib(n - 2)
}
"#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("functions", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_structs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_structs");

    let source = r#"
Point : struct {
    x : int32,
    y : int32,
}

Rectangle : struct {
    origin : Point,
    width : int32,
    height : int32,
}
"#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("structs", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_variants");

    let source = r#"
Color : variant {
    Red,
    Green,
    Blue,
    Custom = 100,
}

Option : variant from int32 {
    Some,
    None,
}
"#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("variants", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
process : func (n : int32) -> int32 {
    if (n < 0) {
        return -1
    } else if (n == 0) {
        return 0
    } else {
        match (n) {
            case 1 { return 1 }
            case 2 { return 2 }
            else {
                sum : int32 = 0
                i : int32 = 0
                while (i < n) {
                    sum = sum + i
                    i = i + 1
                }
                return sum
            }
        }
    }
}
"#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("control_flow", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_complex");

    let source = r#"
namespace geometry {
    Point : struct {
        x : int32,
        y : int32,
    }

    Rectangle : struct {
        origin : Point,
        width : int32,
        height : int32,
    }

    make_point : func (x : int32, y : int32) -> Point {
        p : Point
        p.x = x
        p.y = y
        return p
    }

    area : func (r : Rectangle) -> int32 {
        return r.width * r.height
    }
}

main : func () -> int32 {
    using geometry

    p := make_point(x: 10, y: 20)
    r : Rectangle
    r.origin = p
    r.width = 5
    r.height = 7

    defer {
        i : int32 = 0
    }

    return area(r)
}
"#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("complex_source", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_variable,
    bench_parser_functions,
    bench_parser_structs,
    bench_parser_variants,
    bench_parser_control_flow,
    bench_parser_complex
);
criterion_main!(benches);
