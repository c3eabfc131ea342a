//! Schema command - Print the JSON Schema of `etch.config.json`

use crate::config::ETCH_CONFIG_SCHEMA;

pub fn run() {
    println!("{ETCH_CONFIG_SCHEMA}");
}
