use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use num_bigint::BigUint;
use tracing::info;

use partita::partition::partitions;
use partita::recover::{self, StrategyKind};
use partita::schema::Schema;

/// Compute p(n) and print it as decimal text.
pub fn cmd_count(n: u64, json: bool) -> Result<()> {
    let value = partitions(n);

    if json {
        let item = serde_json::json!({
            "n": n,
            "partitions": value.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

/// Encode a password under the default schema.
///
/// When no password argument was given, one line is read from stdin after a
/// prompt on stderr, keeping stdout clean for the encoded value.
pub fn cmd_encode(password: Option<&str>, json: bool) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => read_password_line()?,
    };

    let schema = Schema::new();
    let z = schema.encode(&password).context("Failed to encode password")?;

    if json {
        let item = serde_json::json!({
            "length": password.chars().count(),
            "z": z.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("{z}");
    }
    Ok(())
}

fn read_password_line() -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Enter a password (10-32 characters): ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Invert an encoded value back to candidate passwords.
pub fn cmd_recover(
    z: &str,
    strategy: StrategyKind,
    min_len: usize,
    max_len: usize,
    limit: usize,
    json: bool,
) -> Result<()> {
    let z: BigUint = z
        .parse()
        .with_context(|| format!("Invalid encoded value: '{z}'"))?;

    let schema = Schema::new();
    let report = recover::recover(&schema, &z, strategy, min_len, max_len, limit)
        .context("Recovery failed")?;

    info!(
        strategy = %report.strategy,
        combinations = report.combinations_checked,
        elapsed_ms = report.elapsed.as_millis() as u64,
        solutions = report.passwords.len(),
        truncated = report.truncated,
        "search finished"
    );

    if json {
        let item = serde_json::json!({
            "strategy": report.strategy.as_str(),
            "passwords": report.passwords,
            "combinations_checked": report.combinations_checked,
            "elapsed_ms": report.elapsed.as_millis() as u64,
            "truncated": report.truncated,
        });
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        if report.passwords.is_empty() {
            println!("No passwords found");
            return Ok(());
        }
        for password in &report.passwords {
            println!("{password}");
        }
        if report.truncated {
            println!("(stopped after {limit} solutions)");
        }
    }
    Ok(())
}

/// One row of the lookup table dump.
#[derive(Debug, serde::Serialize)]
struct TableEntry {
    character: char,
    weight: String,
}

/// Dump the character-to-weight lookup table.
pub fn cmd_table(json: bool) -> Result<()> {
    let schema = Schema::new();
    let entries: Vec<TableEntry> = schema
        .weights()
        .map(|(c, w)| TableEntry {
            character: c,
            weight: w.to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("character,weight");
        for entry in &entries {
            println!("{},{}", entry.character, entry.weight);
        }
    }
    Ok(())
}
