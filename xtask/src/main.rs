//! Repository maintenance tasks.
//!
//! `gen object` regenerates the committed protobuf bindings; `check object` fails when the
//! committed file is out of date with its proto source.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

use anyhow::{bail, ensure, Context as _};

/// A proto package compiled into one committed Rust file.
struct Bindings {
    /// Proto files relative to `proto/`.
    sources: &'static [&'static str],
    /// Generated file name, as emitted by prost (`<package>.rs`).
    generated: &'static str,
    /// Destination relative to the repository root.
    committed: &'static str,
}

const OBJECT: Bindings = Bindings {
    sources: &["zitadel/object.proto"],
    generated: "zitadel.v1.rs",
    committed: "src/pb/zitadel.v1.rs",
};

const USAGE: &str = "Usage:
  cargo run -p xtask -- gen object     regenerate src/pb/zitadel.v1.rs
  cargo run -p xtask -- check object   verify src/pb/zitadel.v1.rs is current";

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["gen", "object"] => generate(&OBJECT),
        ["check", "object"] => check(&OBJECT),
        [] | ["-h" | "--help"] => {
            eprintln!("{USAGE}");
            Ok(())
        }
        other => bail!("unrecognized arguments: {}\n\n{USAGE}", other.join(" ")),
    }
}

fn repo_root() -> anyhow::Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the repository root")
}

fn generate(bindings: &Bindings) -> anyhow::Result<()> {
    let root = repo_root()?;
    let rendered = render(&root, bindings)?;

    let target = root.join(bindings.committed);
    fs::write(&target, rendered)
        .with_context(|| format!("failed to write {}", target.display()))?;
    println!("Generated {}", target.display());
    Ok(())
}

fn check(bindings: &Bindings) -> anyhow::Result<()> {
    let root = repo_root()?;
    let rendered = render(&root, bindings)?;

    let target = root.join(bindings.committed);
    let committed = fs::read_to_string(&target)
        .with_context(|| format!("failed to read {}", target.display()))?;
    ensure!(
        committed == rendered,
        "{} is stale; run `cargo run -p xtask -- gen object`",
        bindings.committed
    );
    println!("{} is up to date", bindings.committed);
    Ok(())
}

/// Compiles the proto sources into a scratch directory and returns the formatted output.
fn render(root: &Path, bindings: &Bindings) -> anyhow::Result<String> {
    let proto_root = root.join("proto");
    let sources: Vec<PathBuf> = bindings
        .sources
        .iter()
        .map(|source| proto_root.join(source))
        .collect();
    for source in &sources {
        ensure!(source.exists(), "proto file not found: {}", source.display());
    }

    let scratch = root.join("target/xtask-proto");
    if scratch.exists() {
        fs::remove_dir_all(&scratch)
            .with_context(|| format!("failed to clear {}", scratch.display()))?;
    }
    fs::create_dir_all(&scratch)
        .with_context(|| format!("failed to create {}", scratch.display()))?;

    let descriptors = protox::compile(&sources, [&proto_root])
        .context("failed to compile zitadel protos")?;

    // Messages and enums only; service stubs are written by hand in src/client.
    tonic_prost_build::configure()
        .build_client(false)
        .build_server(false)
        .out_dir(&scratch)
        .compile_fds_with_config(descriptors, prost_build::Config::new())
        .context("failed to generate Rust bindings")?;

    let output = scratch.join(bindings.generated);
    ensure!(
        output.exists(),
        "expected {} in {}",
        bindings.generated,
        scratch.display()
    );
    rustfmt(&output);

    fs::read_to_string(&output).with_context(|| format!("failed to read {}", output.display()))
}

// Formatting is best effort; unformatted output is still valid Rust.
fn rustfmt(path: &Path) {
    let _ = Command::new("rustfmt")
        .args(["--edition", "2021"])
        .arg(path)
        .status();
}
