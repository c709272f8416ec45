//! Prints the OpenAPI document of the smart hub API.
//!
//! Usage:
//!   cargo run --bin generate_openapi > openapi.json
//!   cargo run --bin generate_openapi -- --output openapi.json

use std::{
    env, fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use smart_hub_service::api::handlers::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialise OpenAPI document")?;

    match output_path(env::args().skip(1))? {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("OpenAPI document written to {}", path.display());
        }
        None => io::stdout()
            .write_all(json.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}

fn output_path(mut args: impl Iterator<Item = String>) -> Result<Option<PathBuf>> {
    match args.next().as_deref() {
        None => Ok(None),
        Some("--output") => match args.next() {
            Some(path) => Ok(Some(PathBuf::from(path))),
            None => bail!("--output needs a path"),
        },
        Some(other) => bail!("unexpected argument {other:?}; usage: generate_openapi [--output <path>]"),
    }
}
