//! CRD generator
//!
//! Prints the Machine and MachineGroup CRDs as multi-document YAML on stdout.
//! When `CRD_OUTPUT_DIR` is set, writes one `<crd-name>.yaml` file per CRD
//! into that directory instead.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use machine_crds::{crds, schema, to_yaml};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the manifests, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    schema::check_all().context("schema consistency check failed")?;
    let crds = crds()?;

    let Some(output_dir) = env::var_os("CRD_OUTPUT_DIR").map(PathBuf::from) else {
        print!("{}", to_yaml(&crds)?);
        return Ok(());
    };

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for crd in &crds {
        let name = crd
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| anyhow!("CRD without metadata.name"))?;
        let path = output_dir.join(format!("{name}.yaml"));
        fs::write(&path, to_yaml(std::slice::from_ref(crd))?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
