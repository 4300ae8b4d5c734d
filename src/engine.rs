use crate::compiler;
use crate::domain::{Project, Target};
use crate::fs;
use crate::TerminationMessage;
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{select, tick, Receiver};
use std::process::Child;
use std::time::Duration;

struct Compilation {
    target: Target,
    process: Child,
}

/// Builds the requested targets.
///
/// Each target's compiler is spawned first, then the static-asset trees are
/// mirrored into the output directory while the compilers run their first
/// pass. The call blocks until every compiler has exited, a compiler has
/// failed, or a termination signal arrives. The returned code is the
/// orchestrator's own exit code.
pub fn run(
    project: &Project,
    targets: &[Target],
    watch: bool,
    termination_events: Receiver<TerminationMessage>,
) -> Result<i32> {
    // Checked before any compiler is spawned, so a missing static dir
    // cannot leave a watch process behind.
    for target in targets {
        if !target.static_dir.is_dir() {
            return Err(anyhow!(
                "{} - Static asset directory {} does not exist",
                target,
                target.static_dir.display()
            ));
        }
    }

    let loaders = fs::list_files_with_extension(&project.loaders_dir, "js");

    let mut compilations = Vec::with_capacity(targets.len());
    for target in targets {
        let sources = fs::list_files_with_extension(&target.src_dir, "ts");
        if sources.is_empty() {
            log::debug!(
                "{} - No sources found in {}",
                target,
                target.src_dir.display()
            );
        }

        let args = compiler::compile_args(project, &sources, &loaders, watch);
        let process = compiler::spawn_compiler(project, target, &args)?;
        compilations.push(Compilation {
            target: target.clone(),
            process,
        });
    }

    for target in targets {
        log::info!(
            "{} - Copying static assets to {}",
            target,
            project.out_dir.display()
        );
        if let Err(e) = fs::copy_tree(&target.static_dir, &project.out_dir)
            .with_context(|| format!("{} - Failed to copy static assets", target))
        {
            terminate_all(&mut compilations);
            return Err(e);
        }
    }

    if watch {
        log::info!("Compilers are watching for changes (Ctrl-C to stop)");
    }

    supervise(compilations, termination_events)
}

/// Waits for the compilers, polling on a tick and reacting to termination
/// signals, so that no watch process outlives the orchestrator.
fn supervise(
    mut compilations: Vec<Compilation>,
    termination_events: Receiver<TerminationMessage>,
) -> Result<i32> {
    let ticks = tick(Duration::from_millis(10));

    loop {
        select! {
            recv(ticks) -> _ => {
                let mut poll_error = None;
                let mut failed_exit_code = None;
                let mut finished = Vec::new();

                for (index, compilation) in compilations.iter_mut().enumerate() {
                    match compilation.process.try_wait() {
                        Err(e) => {
                            poll_error = Some(e);
                            break;
                        }
                        Ok(None) => {}
                        Ok(Some(status)) if status.success() => {
                            log::info!("{} - Compiler exited", compilation.target);
                            finished.push(index);
                        }
                        Ok(Some(status)) => {
                            log::error!(
                                "{} - Compiler failed ({})",
                                compilation.target,
                                status
                            );
                            failed_exit_code = Some(status.code().unwrap_or(1));
                        }
                    }
                }

                if let Some(e) = poll_error {
                    terminate_all(&mut compilations);
                    return Err(e).context("Failed to poll compiler process");
                }
                if let Some(exit_code) = failed_exit_code {
                    terminate_all(&mut compilations);
                    return Ok(exit_code);
                }

                for index in finished.into_iter().rev() {
                    compilations.remove(index);
                }
                if compilations.is_empty() {
                    return Ok(0);
                }
            }
            recv(termination_events) -> _ => {
                log::info!("Terminating compilers");
                terminate_all(&mut compilations);
                return Ok(0);
            }
        }
    }
}

fn terminate_all(compilations: &mut Vec<Compilation>) {
    for compilation in compilations.iter_mut() {
        if let Err(e) = compilation.process.kill() {
            log::warn!("{} - Failed to kill compiler: {}", compilation.target, e);
        }
    }

    for compilation in compilations.iter_mut() {
        if let Err(e) = compilation.process.wait() {
            log::warn!(
                "{} - Failed to wait for compiler termination: {}",
                compilation.target,
                e
            );
        }
    }

    compilations.clear();
}
