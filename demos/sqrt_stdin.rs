//! Square-root filter over stdin.
//!
//! Reads a count followed by that many whitespace-separated numbers, takes
//! the square root of each one in place, and prints the results separated
//! by `", "`.
//!
//! ```text
//! $ echo "5 1 4 9 -1 16" | cargo run --example sqrt_stdin
//! 1, 2, 3, NaN, 4
//! ```

use std::io::{self, Read, Write};

use anyhow::{Context, Result, bail};
use vectorize::{X, apply_in_place, sqrt};

fn main() -> Result<()> {
    env_logger::init();

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let mut tokens = input.split_whitespace();

    let count: usize = tokens
        .next()
        .context("missing value count")?
        .parse()
        .context("value count is not a non-negative integer")?;

    let mut values = Vec::with_capacity(count);
    for token in tokens.by_ref().take(count) {
        let value: f32 = token
            .parse()
            .with_context(|| format!("`{token}` is not a number"))?;
        values.push(value);
    }
    if values.len() < count {
        bail!("expected {count} values, got {}", values.len());
    }

    apply_in_place(count, &mut values, sqrt(X))?;

    let line = values
        .iter()
        .map(f32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    Ok(())
}
