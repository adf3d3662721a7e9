//! Profile the gostfast execution strategies
//! Usage: cargo run --release --example profile table 1000000
//! Usage: cargo run --release --example profile table_par 1000000
//! Usage: cargo run --release --example profile bitsliced 1000000
use mimalloc::MiMalloc;
use std::env;

use gostfast::{Gost, Strategy};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    let args: Vec<String> = env::args().collect();
    let test = &args[1];
    let block_count = args[2].parse::<usize>().unwrap();

    let key = [
        0x51F30F11u32,
        0x04246A00,
        0x51F30F11,
        0x04246A00,
        0x51F30F11,
        0x04246A00,
        0x51F30F11,
        0x04246A00,
    ];
    let blocks: Vec<[u32; 2]> = (0..block_count as u32).map(|i| [i, !i]).collect();

    match &test[..] {
        "table" => {
            let gost = Gost::with_strategy(key, Strategy::Table);
            let mut data = blocks.clone();
            gost.encrypt_blocks(&mut data);
            gost.decrypt_blocks(&mut data);
            assert_eq!(data, blocks);
        }
        "table_par" => {
            let gost = Gost::with_strategy(key, Strategy::Table);
            let mut data = blocks.clone();
            gost.encrypt_blocks_par(&mut data);
            gost.decrypt_blocks_par(&mut data);
            assert_eq!(data, blocks);
        }
        "bitsliced" => {
            let gost = Gost::with_strategy(key, Strategy::Bitsliced);
            let mut data = blocks.clone();
            gost.encrypt_blocks(&mut data);
            gost.decrypt_blocks(&mut data);
            assert_eq!(data, blocks);
        }
        _ => {
            panic!("Unknown test: {}", test);
        }
    }
}
