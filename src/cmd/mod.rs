pub mod batch;
pub mod calc;
pub mod dates;
pub mod land_grade;
pub mod schema;

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::Context;
use yangdo::core::{read_batch_json, read_transaction_json, InputError, TransactionInput};

/// Read one transaction (JSON) from a file, or stdin with "-"
pub fn read_input(path: &Path) -> anyhow::Result<TransactionInput> {
    let bytes = read_bytes(path)?;
    let input = read_transaction_json(bytes.as_slice())
        .with_context(|| format!("reading transaction from {}", path.display()))?;
    Ok(input)
}

/// Read a JSON array of transactions from a file, or stdin with "-"
pub fn read_batch(path: &Path) -> anyhow::Result<Vec<TransactionInput>> {
    let bytes = read_bytes(path)?;
    let inputs = read_batch_json(bytes.as_slice())
        .with_context(|| format!("reading transactions from {}", path.display()))?;
    Ok(inputs)
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        BufReader::new(stdin.lock())
            .read_to_end(&mut buffer)
            .map_err(InputError::from)?;
        if buffer.iter().all(u8::is_ascii_whitespace) {
            return Err(InputError::Empty.into());
        }
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        BufReader::new(file).read_to_end(&mut buffer)?;
    }
    Ok(buffer)
}
