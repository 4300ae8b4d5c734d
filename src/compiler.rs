use crate::domain::{Project, Target};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// Builds the compiler argument vector for a target.
///
/// The relative order is fixed: flags, then the target's sources, then the
/// shared library entry point, then the loader modules.
pub fn compile_args(
    project: &Project,
    sources: &[PathBuf],
    loaders: &[PathBuf],
    watch: bool,
) -> Vec<String> {
    let mut args = vec![
        "--allowJs".to_string(),
        "-m".to_string(),
        "ES6".to_string(),
        "-t".to_string(),
        "ES6".to_string(),
        "--outDir".to_string(),
        project.out_dir.to_string_lossy().into_owned(),
        "--sourceMap".to_string(),
        "--alwaysStrict".to_string(),
    ];
    if watch {
        args.push("-w".to_string());
    }

    args.extend(sources.iter().map(|path| path.to_string_lossy().into_owned()));
    args.push(project.lib_entry.to_string_lossy().into_owned());
    args.extend(loaders.iter().map(|path| path.to_string_lossy().into_owned()));

    args
}

/// Assembles the compiler invocation as an explicit argument vector.
///
/// No shell is involved, so paths reach the compiler unescaped and verbatim.
/// Compiler output is not parsed; it goes straight to our own streams.
pub fn compile_command(project: &Project, args: &[String]) -> Command {
    let mut command = Command::new(&project.compiler);
    command
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    command
}

pub fn spawn_compiler(project: &Project, target: &Target, args: &[String]) -> Result<Child> {
    log::info!(
        "{} - Building TypeScript: {} {}",
        target,
        project.compiler,
        args.join(" ")
    );

    compile_command(project, args)
        .spawn()
        .with_context(|| format!("Failed to start compiler {} for {}", project.compiler, target))
}
