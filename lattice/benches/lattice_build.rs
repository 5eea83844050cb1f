//! ラティス構築のベンチマーク
//!
//! 辞書引きを模した全部分文字列の挿入と、デコーダを模した索引の走査にかかる
//! 時間を計測します。同じラティスを再利用する場合と毎回作り直す場合を比較します。

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use henkan_lattice::Lattice;

const KEYS: &[&str] = &[
    "きょうはいいてんきですね",
    "わたしのなまえはなかのです",
    "しんかんせんでとうきょうからおおさかまでいきます",
    "にほんごにゅうりょくのためのらてぃすこうぞう",
];

/// 長さ`max_len`以下のすべての部分文字列をノードとして挿入します。
fn populate(lattice: &mut Lattice, key: &str, max_len: usize) {
    lattice.set_key(key);
    let len = lattice.len();
    for start in 0..len {
        for end in start + 1..=(start + max_len).min(len) {
            let reading = match lattice.key_slice(start, end) {
                Some(s) => s.to_string(),
                None => continue,
            };
            let node = lattice.new_node();
            let n = lattice.node_mut(node);
            n.value = reading.clone();
            n.key = reading;
            n.left_id = (start % 7) as u16;
            n.right_id = (end % 7) as u16;
            n.word_cost = (end - start) as i32 * 100;
            lattice.insert(start, node).unwrap();
        }
    }
}

/// 各位置で終了索引と開始索引を組み合わせて走査します。
fn traverse(lattice: &Lattice) -> i64 {
    let mut acc = 0i64;
    for pos in 0..=lattice.len() {
        for (_, l) in lattice.end_chain(pos) {
            for (_, r) in lattice.begin_chain(pos) {
                acc += i64::from(l.right_id) * i64::from(r.left_id) + i64::from(r.word_cost);
            }
        }
    }
    acc
}

fn bench_build(c: &mut Criterion) {
    let total_chars: usize = KEYS.iter().map(|k| k.chars().count()).sum();

    let mut group = c.benchmark_group("Lattice Build");
    group.throughput(Throughput::Elements(total_chars as u64));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));

    for max_len in [4, 8] {
        group.bench_function(BenchmarkId::new("Reused", max_len), |b| {
            let mut lattice = Lattice::new();
            b.iter(|| {
                for key in KEYS {
                    populate(&mut lattice, key, max_len);
                    black_box(lattice.num_nodes());
                }
            });
        });

        group.bench_function(BenchmarkId::new("Fresh", max_len), |b| {
            b.iter(|| {
                for key in KEYS {
                    let mut lattice = Lattice::new();
                    populate(&mut lattice, key, max_len);
                    black_box(lattice.num_nodes());
                }
            });
        });
    }
    group.finish();
}

fn bench_traverse(c: &mut Criterion) {
    let mut lattices = Vec::with_capacity(KEYS.len());
    for key in KEYS {
        let mut lattice = Lattice::new();
        populate(&mut lattice, key, 8);
        lattices.push(lattice);
    }

    c.bench_function("Lattice Traverse", |b| {
        b.iter(|| {
            let mut acc = 0;
            for lattice in &lattices {
                acc += traverse(lattice);
            }
            black_box(acc)
        });
    });
}

criterion_group!(benches, bench_build, bench_traverse);
criterion_main!(benches);
