use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_CRATE: &str = "build_trigger_lambda";
const DEFAULT_ARTIFACT: &str = "infra/build_trigger/dist/build_trigger.zip";
/// Entry name the `provided.al2023` Lambda runtime executes.
const BOOTSTRAP_ENTRY: &str = "bootstrap";

#[derive(Parser)]
#[command(name = "xtask", about = "Developer tasks for the build trigger function")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint and test the workspace
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build the Lambda binary and zip it as a deployable artifact
    Package {
        /// Linux target triple matching the function's architecture
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build the unoptimized binary
        #[arg(long)]
        debug: bool,
        /// Where to write the zip
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        out: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// rustfmt and clippy
    Lint,
    /// Workspace tests
    Test,
    /// Lint, then test
    Check,
}

fn cargo(args: &[&str]) -> Result<()> {
    eprintln!("> cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .context("could not spawn cargo")?;
    if !status.success() {
        bail!("`cargo {}` exited with {status}", args.join(" "));
    }
    Ok(())
}

fn lint() -> Result<()> {
    cargo(&["fmt", "--all", "--check"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])
}

fn test() -> Result<()> {
    cargo(&["test", "--workspace"])
}

fn lambda_binary_path(target: &str, debug: bool) -> PathBuf {
    let profile = if debug { "debug" } else { "release" };
    ["target", target, profile, LAMBDA_CRATE].iter().collect()
}

fn package(target: &str, debug: bool, out: &Path) -> Result<()> {
    let mut args = vec!["build", "-p", LAMBDA_CRATE, "--bin", LAMBDA_CRATE, "--target", target];
    if !debug {
        args.push("--release");
    }
    cargo(&args)?;

    write_bootstrap_zip(&lambda_binary_path(target, debug), out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn write_bootstrap_zip(binary: &Path, out: &Path) -> Result<()> {
    let bytes = fs::read(binary)
        .with_context(|| format!("lambda binary not found at {}", binary.display()))?;

    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        fs::File::create(out).with_context(|| format!("failed to create {}", out.display()))?;

    let mut archive = ZipWriter::new(file);
    archive.start_file(
        BOOTSTRAP_ENTRY,
        FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o755),
    )?;
    archive.write_all(&bytes)?;
    archive.finish()?;
    Ok(())
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Ci { job } => match job {
            CiJob::Lint => lint(),
            CiJob::Test => test(),
            CiJob::Check => lint().and_then(|_| test()),
        },
        Commands::Package { target, debug, out } => package(&target, debug, &out),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    #[test]
    fn binary_path_follows_target_and_profile() {
        assert_eq!(
            lambda_binary_path("aarch64-unknown-linux-gnu", false),
            Path::new("target/aarch64-unknown-linux-gnu/release/build_trigger_lambda")
        );
        assert_eq!(
            lambda_binary_path("x86_64-unknown-linux-gnu", true),
            Path::new("target/x86_64-unknown-linux-gnu/debug/build_trigger_lambda")
        );
    }

    #[test]
    fn zip_holds_executable_bootstrap_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = dir.path().join("build_trigger_lambda");
        fs::write(&binary, b"\x7fELF fake lambda").expect("write binary");
        let out = dir.path().join("dist/nested/build_trigger.zip");

        write_bootstrap_zip(&binary, &out).expect("zip should be written");

        let mut archive =
            ZipArchive::new(fs::File::open(&out).expect("open zip")).expect("read zip");
        assert_eq!(archive.len(), 1);
        let mut entry = archive.by_name("bootstrap").expect("bootstrap entry");
        assert_eq!(entry.unix_mode().map(|mode| mode & 0o777), Some(0o755));
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).expect("read entry");
        assert_eq!(contents, b"\x7fELF fake lambda");
    }

    #[test]
    fn missing_binary_is_reported_with_its_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = dir.path().join("absent");

        let error = write_bootstrap_zip(&binary, &dir.path().join("out.zip"))
            .expect_err("missing binary should fail");

        assert!(error.to_string().contains("lambda binary not found"));
        assert!(error.to_string().contains("absent"));
        assert!(!dir.path().join("out.zip").exists());
    }
}
