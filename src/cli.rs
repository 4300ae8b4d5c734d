use clap::{crate_version, App, AppSettings, Arg};
use clap_generate::{generate, generators::Zsh};
use std::io::Write;

pub fn write_zsh_completion(buf: &mut dyn Write) {
    generate::<Zsh, _>(&mut get_app(), "tscmake", buf);
}

pub mod arg {
    pub static PROJECT_DIR: &str = "project_dir";
    pub static VERBOSITY: &str = "verbosity";
    pub static ONCE: &str = "once";
    pub static GENERATE_ZSH_COMPLETION: &str = "generate_zsh_completion";
    pub static TARGETS: &str = "targets";
}

pub fn get_app() -> App<'static> {
    App::new("tscmake")
        .version(crate_version!())
        .about("Build the TypeScript targets and mirror their static assets")
        .arg(
            Arg::with_name(arg::PROJECT_DIR)
                .short('p')
                .long("project")
                .takes_value(true)
                .value_name("PROJECT_DIR")
                .default_value(".")
                .hide_default_value(true)
                .about("Directory of the project to build (in which the sources are located)"),
        )
        .arg(
            Arg::with_name(arg::VERBOSITY)
                .short('v')
                .multiple(true)
                .takes_value(false)
                .about("Increases message verbosity"),
        )
        .arg(Arg::with_name(arg::ONCE).long("once").about(
            "Run a single compilation instead of keeping the compiler resident in watch mode",
        ))
        .arg(
            Arg::with_name(arg::GENERATE_ZSH_COMPLETION)
                .long("generate-zsh-completion")
                .hidden(true),
        )
        .arg(
            Arg::with_name(arg::TARGETS)
                .value_name("TARGETS")
                .multiple(true)
                .about("Targets to build (defaults to all configured targets)"),
        )
        .setting(AppSettings::ColoredHelp)
}
