use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use longpath::create::{CreateOptions, DirectoryTreeBuilder};
use longpath::native::MemoryFileSystem;
use longpath::path::{get_long_path, normalize, to_regular_form, PathFormat};

const BASE: Option<&str> = Some(r"C:\Users\dev\projects");

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("relative_path", |b| {
        b.iter(|| normalize(black_box(r"src\path\mod.rs"), PathFormat::RelativePath, BASE));
    });

    group.bench_function("with_dots", |b| {
        b.iter(|| normalize(black_box(r"C:\a\b\..\c\.\d"), PathFormat::RelativePath, BASE));
    });

    group.bench_function("unc", |b| {
        b.iter(|| normalize(black_box(r"\\server\share\dir\file"), PathFormat::FullPath, None));
    });

    group.bench_function("trusted_long_path", |b| {
        b.iter(|| normalize(black_box(r"\\?\C:\a\b\c\"), PathFormat::LongFullPath, None));
    });

    group.finish();
}

fn bench_prefix_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_operations");

    group.bench_function("get_long_path", |b| {
        b.iter(|| get_long_path(black_box(r"C:\Windows\System32\drivers\etc")));
    });

    group.bench_function("to_regular_form", |b| {
        b.iter(|| to_regular_form(black_box(r"\\?\UNC\server\share\dir\file")));
    });

    group.finish();
}

fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth");

    for depth in [4usize, 32, 128] {
        let path = format!(r"C:\{}", vec!["segment"; depth].join("\\"));

        group.bench_with_input(BenchmarkId::new("normalize", depth), &path, |b, path| {
            b.iter(|| normalize(black_box(path), PathFormat::RelativePath, BASE));
        });

        group.bench_with_input(BenchmarkId::new("create_all", depth), &path, |b, path| {
            b.iter(|| {
                let fs = MemoryFileSystem::new().with_volume('C');
                DirectoryTreeBuilder::new(&fs).create_all(black_box(path), &CreateOptions::new())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_prefix_operations, bench_depth);
criterion_main!(benches);
