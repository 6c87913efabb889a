use crate::cli;
use color_eyre::eyre::{eyre, Result};
use duct::cmd;
use std::env;
use std::path::{Path, PathBuf};

pub fn install(args: &cli::InstallArgs) -> Result<()> {
    println!("Building {} in release mode...", args.name);

    cmd!("cargo", "build", "--bin", &args.name, "--release").run()?;

    let install_dir = match &args.path {
        Some(path) => PathBuf::from(path),
        None => default_install_dir()?,
    };

    if !install_dir.exists() {
        println!("Creating directory: {}", install_dir.display());
        std::fs::create_dir_all(&install_dir)?;
    }

    let source_path = PathBuf::from("target").join("release").join(&args.name);
    let dest_path = install_dir.join(&args.name);

    println!("Installing {} to {}", args.name, dest_path.display());
    std::fs::copy(&source_path, &dest_path)?;
    make_executable(&dest_path)?;

    println!(
        "✓ Successfully installed {} to {}",
        args.name,
        dest_path.display()
    );

    if !is_on_path(&install_dir) {
        println!("\nNote: {} is not in your PATH.", install_dir.display());
        println!("Add it to your PATH by adding this line to your shell config:");
        println!("  export PATH=\"{}:$PATH\"", install_dir.display());
    }

    Ok(())
}

/// `~/.local/bin`
fn default_install_dir() -> Result<PathBuf> {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map_err(|_| eyre!("Could not determine home directory"))?;
    Ok(PathBuf::from(home).join(".local").join("bin"))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

fn is_on_path(dir: &Path) -> bool {
    env::var_os("PATH")
        .map(|path| env::split_paths(&path).any(|entry| entry == dir))
        .unwrap_or(false)
}
