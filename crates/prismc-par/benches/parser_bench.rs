//! Parser benchmarks.
//!
//! Run with: `cargo bench --package prismc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use prismc_lex::Lexer;
use prismc_par::{parse, Node};
use prismc_util::Handler;

fn parse_source(source: &str) -> Node {
    let handler = Handler::new();
    let tokens = Lexer::new(source).lex(&handler);
    parse(tokens, &handler)
}

fn bench_parser_decl(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_decl");

    let source = "int x = 42;";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("simple_decl", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_function");

    let source = r#"
        int fib(int n) {
            if (n <= 1) {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("recursive_function", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        int process(int n) {
            int sum = 0;
            for (int i = 0; i < n; i = i + 1) {
                if (i % 2 == 0) {
                    sum = sum + i;
                } else {
                    sum = sum - i;
                }
            }
            while (sum > 100) {
                sum = sum / 2;
            }
            return sum;
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("nested_loops_and_branches", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_io_statements(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_io");

    let source = r#"
        int main() {
            int x, y;
            input("%d", &x, "%d", &y);
            printf("%d\n", x + y);
            return 0;
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("input_output_statements", |b| {
        b.iter(|| parse_source(black_box(source)))
    });

    group.finish();
}

fn bench_parser_error_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_error_recovery");

    // A missing semicolon on every other statement forces panic-mode
    // recovery to run repeatedly across the whole function body.
    let source = r#"
        int f() {
            int a = 1
            int b = 2;
            int c = 3
            int d = 4;
            return a + b + c + d;
        }
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("missing_semicolons", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_decl,
    bench_parser_function,
    bench_parser_control_flow,
    bench_parser_io_statements,
    bench_parser_error_recovery,
);
criterion_main!(benches);
