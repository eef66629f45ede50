//! Handlers for the file operations.
//!
//! Each handler checks its argument count, then calls into the registry.
//! Argument errors are reported before any store access.

use filedger_records::{FileRegistry, RecordError, RecordResult};

pub const INIT_FILE: &str = "initFile";
pub const DELETE_FILE: &str = "deletefile";
pub const QUERY_FILE: &str = "queryfile";
pub const READ_FILE: &str = "readfile";
pub const FIND_BY_HASH: &str = "findbyhash";

fn expect_args(args: &[String], expected: usize) -> RecordResult<()> {
    if args.len() != expected {
        return Err(RecordError::InvalidArgument(format!(
            "incorrect number of arguments: expecting {expected}, got {}",
            args.len()
        )));
    }
    Ok(())
}

/// `initFile(name, hash, url)`
pub fn init_file(registry: &FileRegistry, args: &[String]) -> RecordResult<Vec<u8>> {
    expect_args(args, 3)?;
    registry.records().create(&args[0], &args[1], &args[2])?;
    Ok(Vec::new())
}

/// `deletefile(name)`
pub fn delete_file(registry: &FileRegistry, args: &[String]) -> RecordResult<Vec<u8>> {
    expect_args(args, 1)?;
    registry.records().delete(&args[0])?;
    Ok(Vec::new())
}

/// `queryfile(queryExpression)`
pub fn query_file(registry: &FileRegistry, args: &[String]) -> RecordResult<Vec<u8>> {
    expect_args(args, 1)?;
    registry.queries().query(&args[0])
}

/// `readfile(name)`: the stored record JSON.
pub fn read_file(registry: &FileRegistry, args: &[String]) -> RecordResult<Vec<u8>> {
    expect_args(args, 1)?;
    let record = registry.records().read(&args[0])?;
    record.to_json().map_err(|e| RecordError::Serialization {
        name: record.name.clone(),
        reason: e.to_string(),
    })
}

/// `findbyhash(hash)`
pub fn find_by_hash(registry: &FileRegistry, args: &[String]) -> RecordResult<Vec<u8>> {
    expect_args(args, 1)?;
    registry.find_by_hash(&args[0])
}
