//! Line-oriented console input for building a corpus interactively.

use anyhow::{anyhow, bail, Context, Result};
use std::io::BufRead;

/// Next line without its terminator. `None` at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// A line holding a single integer.
pub fn read_line_with_number<R: BufRead>(reader: &mut R) -> Result<i64> {
    let line = read_line(reader)?.ok_or_else(|| anyhow!("expected a number, got end of input"))?;
    line.trim()
        .parse()
        .with_context(|| format!("expected a number, got {line:?}"))
}

/// A ratings line: a count followed by that many integers, e.g. `3 7 2 7`.
pub fn read_ratings<R: BufRead>(reader: &mut R) -> Result<Vec<i32>> {
    let line = read_line(reader)?.ok_or_else(|| anyhow!("expected ratings, got end of input"))?;
    let mut numbers = line.split_whitespace().map(|n| {
        n.parse::<i32>()
            .with_context(|| format!("invalid rating {n:?}"))
    });
    let count = match numbers.next() {
        Some(count) => count?,
        None => return Ok(Vec::new()),
    };
    let ratings = numbers.collect::<Result<Vec<i32>>>()?;
    if usize::try_from(count).ok() != Some(ratings.len()) {
        bail!("ratings line announces {count} values but has {}", ratings.len());
    }
    Ok(ratings)
}
