//! Print the effective logging config (defaults + optional file + env overrides) as JSON.
//!
//! Usage: `print_effective_config [path/to/logging.{json,toml}]`

use logbridge_infra::load_effective_config_json;
use std::collections::BTreeMap;
use std::io;
use std::io::Write;
use std::path::PathBuf;

fn main() -> std::process::ExitCode {
    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::ExitCode::from(1)
        },
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let env: BTreeMap<String, String> = std::env::vars().collect();
    let output = load_effective_config_json(&env, path.as_deref())?;

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
