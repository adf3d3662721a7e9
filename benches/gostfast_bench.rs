use divan::counter::BytesCount;
use gostfast::{Gost, Strategy};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static KEY: [u32; 8] = [
    0x51F30F11, 0x04246A00, 0x734F10E2, 0x15357B01, 0x946051F3, 0x26468C12, 0xA57162E4, 0x37579D23,
];

const BLOCKS: [usize; 3] = [2usize.pow(10), 2usize.pow(16), 2usize.pow(20)];

fn main() {
    divan::main();
}

fn make_blocks(n: usize) -> Vec<[u32; 2]> {
    (0..n as u32).map(|i| [i, !i]).collect()
}

trait BenchStrategy {
    const STRATEGY: Strategy;
}

struct Reference;
impl BenchStrategy for Reference {
    const STRATEGY: Strategy = Strategy::Reference;
}

struct Table;
impl BenchStrategy for Table {
    const STRATEGY: Strategy = Strategy::Table;
}

struct Bitsliced;
impl BenchStrategy for Bitsliced {
    const STRATEGY: Strategy = Strategy::Bitsliced;
}

#[divan::bench(types = [Reference, Table, Bitsliced], args = BLOCKS)]
fn encrypt_blocks<S: BenchStrategy>(bencher: divan::Bencher, len: usize) {
    let gost = Gost::with_strategy(KEY, S::STRATEGY);

    bencher
        .counter(BytesCount::new(len * 8))
        .with_inputs(|| make_blocks(len))
        .bench_local_values(|mut blocks| {
            gost.encrypt_blocks(&mut blocks);
            divan::black_box(blocks);
        });
}

#[divan::bench(types = [Table, Bitsliced], args = BLOCKS)]
fn encrypt_blocks_par<S: BenchStrategy>(bencher: divan::Bencher, len: usize) {
    let gost = Gost::with_strategy(KEY, S::STRATEGY);

    bencher
        .counter(BytesCount::new(len * 8))
        .with_inputs(|| make_blocks(len))
        .bench_local_values(|mut blocks| {
            gost.encrypt_blocks_par(&mut blocks);
            divan::black_box(blocks);
        });
}

#[divan::bench(args = BLOCKS)]
fn ofb_apply(bencher: divan::Bencher, len: usize) {
    let gost = Gost::new(KEY);

    bencher
        .counter(BytesCount::new(len * 8))
        .with_inputs(|| vec![0u32; len * 2])
        .bench_local_values(|mut data| {
            gost.ofb_apply(&mut data, [0, 1]);
            divan::black_box(data);
        });
}

#[divan::bench(args = BLOCKS)]
fn cfb_encrypt(bencher: divan::Bencher, len: usize) {
    let gost = Gost::new(KEY);

    bencher
        .counter(BytesCount::new(len * 8))
        .with_inputs(|| vec![0u32; len * 2])
        .bench_local_values(|mut data| {
            let mut iv = [0u32, 1];
            gost.cfb_encrypt(&mut data, &mut iv);
            divan::black_box(data);
        });
}

#[divan::bench(args = BLOCKS)]
fn mac(bencher: divan::Bencher, len: usize) {
    let gost = Gost::new(KEY);
    let data = vec![0x5A5A5A5Au32; len * 2];

    bencher
        .counter(BytesCount::new(len * 8))
        .bench_local(|| divan::black_box(gost.mac(&data)));
}
