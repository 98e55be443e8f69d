// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

//! Show how the command-line options of this program are interpreted.
//!
//! ```bash
//! $ RUST_LOG=debug cargo run --example show-args -- -threads=4 --verbose -nocolor posn -tag=a -tag=b
//! ```

use getarg::{ArgStore, Result};
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let store = ArgStore::from_env();

    tracing::info!(count = store.len(), "parsed options");

    for name in store.names() {
        println!(
            "{}: value: {:?}, all values: {:?}, bool: {}",
            name,
            store.get_str(name, ""),
            store.get_all(name),
            store.get_bool(name),
        );
    }

    println!("threads: {}", store.get_int("-threads", 1));
    println!("color: {}", store.get_bool_or("-color", true));

    if let Some(threads) = store.try_get_int("-threads")? {
        println!("threads explicitly set to {}", threads);
    }

    Ok(())
}
