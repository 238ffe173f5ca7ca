#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::{env, time::Instant};

use anyhow::Context;
use rlecore::{DecodeOptions, decompress_with};

/// `depth` nested groups, each repeating twice with a short tail.
fn nested_input(depth: usize) -> String {
    let mut s = "ab".to_string();
    for _ in 0..depth {
        s = format!("2[{s}]c");
    }
    s
}

/// `count` sibling groups in a row.
fn sibling_input(count: usize) -> String {
    "3[xyz]".repeat(count)
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        anyhow::bail!("this binary takes at most 1 argument: the nesting depth") // the binary itself is also an arg
    }

    let depth = match args.get(1) {
        Some(arg) => arg.parse().context("nesting depth must be a number")?,
        None => 16,
    };
    let opts = DecodeOptions::new().with_max_depth(depth);

    for (name, input) in [
        ("nested", nested_input(depth)),
        ("siblings", sibling_input(1 << depth.min(20))),
    ] {
        let start = Instant::now();
        let out = decompress_with(&input, &opts)?;
        println!("{name}: {} -> {} bytes in {:?}", input.len(), out.len(), start.elapsed());
    }

    Ok(())
}
