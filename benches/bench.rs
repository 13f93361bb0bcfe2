#![allow(unused)]
#![feature(allocator_api)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shortstr::ShortString;

const SHORT: &[u8] = b"short payload";
const LONG: &[u8] = b"a noticeably longer payload that cannot stay in the inline representation of the string";

fn string_new(c: &mut Criterion) {
    c.bench_function("ShortString::new", |b| b.iter(|| {
        ShortString::<u8>::new()
    }));
    c.bench_function("String::new", |b| b.iter(|| {
        String::new()
    }));
}

fn string_from_slice(c: &mut Criterion) {
    c.bench_function("ShortString::from short", |b| b.iter(|| {
        ShortString::<u8>::from(black_box(SHORT))
    }));
    c.bench_function("String::from short", |b| b.iter(|| {
        String::from_utf8_lossy(black_box(SHORT)).into_owned()
    }));

    c.bench_function("ShortString::from long", |b| b.iter(|| {
        ShortString::<u8>::from(black_box(LONG))
    }));
    c.bench_function("String::from long", |b| b.iter(|| {
        String::from_utf8_lossy(black_box(LONG)).into_owned()
    }));
}

fn string_push(c: &mut Criterion) {
    c.bench_function("ShortString::push(100) no reserve", |b| b.iter(|| {
        let mut s = ShortString::<u8>::new();
        for i in 0..100u8 {
            s.push(i);
        }
        s
    }));
    c.bench_function("ShortString::push(100) reserve", |b| b.iter(|| {
        let mut s = ShortString::<u8>::new();
        s.reserve(100);
        for i in 0..100u8 {
            s.push(i);
        }
        s
    }));
    c.bench_function("Vec::push(100) no reserve", |b| b.iter(|| {
        let mut v = Vec::<u8>::new();
        for i in 0..100u8 {
            v.push(i);
        }
        v
    }));
}

fn string_append(c: &mut Criterion) {
    c.bench_function("ShortString::append(16 x 13B)", |b| b.iter(|| {
        let mut s = ShortString::<u8>::new();
        for _ in 0..16 {
            s.append(black_box(SHORT));
        }
        s
    }));
    c.bench_function("String::push_str(16 x 13B)", |b| b.iter(|| {
        let mut s = String::new();
        for _ in 0..16 {
            s.push_str(black_box("short payload"));
        }
        s
    }));
}

criterion_group!(benches, string_new, string_from_slice, string_push, string_append);
criterion_main!(benches);
