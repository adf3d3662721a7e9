use mimalloc::MiMalloc;
use std::env;

use gostfast::{Gost, Strategy};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    let args: Vec<String> = env::args().collect();
    let test = &args[1];
    let block_count = args[2].parse::<usize>().unwrap();

    let key: [u32; 8] = core::array::from_fn(|i| 0x11111111u32.wrapping_mul(i as u32 + 1));
    let blocks: Vec<[u32; 2]> = (0..block_count as u32)
        .map(|i| [0xA5A5A5A5u32.wrapping_add(i), 0x5A5A5A5Au32.wrapping_sub(i)])
        .collect();

    match &test[..] {
        "reference" => {
            let gost = Gost::with_strategy(key, Strategy::Reference);
            let mut data = blocks.clone();
            gost.encrypt_blocks(&mut data);
            gost.decrypt_blocks(&mut data);
            assert_eq!(data, blocks);
        }
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
        "ofb" => {
            let gost = Gost::new(key);
            let mut data: Vec<u32> = blocks.iter().flatten().copied().collect();
            let start = data.clone();
            gost.ofb_apply(&mut data, [0, 1]);
            gost.ofb_apply(&mut data, [0, 1]);
            assert_eq!(data, start);
        }
        "mac" => {
            let gost = Gost::new(key);
            let data: Vec<u32> = blocks.iter().flatten().copied().collect();
            let tag = gost.mac(&data);
            println!("tag = {:08X} {:08X}", tag[0], tag[1]);
        }
        _ => {
            panic!("Unknown test: {}", test);
        }
    }
}
