pub mod layout;
pub mod measures;

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Serialize;
use ssg_grid::serde::to_canonical_json_pretty;

/// Writes canonical JSON to `out`, or to stdout when no path is given.
pub fn write_output<T: Serialize>(value: &T, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let json = to_canonical_json_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, json)?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
