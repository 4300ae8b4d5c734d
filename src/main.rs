mod cli;
mod compiler;
mod config;
mod domain;
mod engine;
mod fs;

use anyhow::{Context, Result};
use config::Config;
use std::path::Path;

pub struct TerminationMessage;

fn main() {
    let exit_code = match try_main() {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn try_main() -> Result<i32> {
    let arg_matches = cli::get_app().get_matches();

    if arg_matches.is_present(cli::arg::GENERATE_ZSH_COMPLETION) {
        cli::write_zsh_completion(&mut std::io::stdout());
        return Ok(0);
    }

    stderrlog::new()
        .module(module_path!())
        .verbosity(arg_matches.occurrences_of(cli::arg::VERBOSITY) as usize + 2)
        .init()?;

    let project_dir = Path::new(arg_matches.value_of(cli::arg::PROJECT_DIR).unwrap());
    let requested_targets = arg_matches.values_of_lossy(cli::arg::TARGETS);
    let watch = !arg_matches.is_present(cli::arg::ONCE);

    let config = Config::load(project_dir)?;
    let (project, targets) = config.into_project_and_targets(project_dir, requested_targets)?;
    log::debug!("Project directory {}", project.dir.display());

    let (termination_sender, termination_events) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = termination_sender.send(TerminationMessage);
    })
    .context("Failed to set termination signal handler")?;

    engine::run(&project, &targets, watch, termination_events)
}
