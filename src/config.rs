use crate::domain;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Optional project file overriding the built-in configuration.
const CONFIG_FILE_NAME: &str = "tscmake.yml";

#[derive(Debug, Deserialize)]
pub struct Target {
    src_dir: String,
    #[serde(default)]
    static_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    compiler: Option<String>,
    #[serde(default)]
    out_dir: Option<String>,
    #[serde(default)]
    lib_entry: Option<String>,
    #[serde(default)]
    loaders_dir: Option<String>,
    #[serde(default)]
    targets: Option<HashMap<String, Target>>,
}

#[derive(Debug)]
pub struct Config {
    compiler: String,
    out_dir: String,
    lib_entry: String,
    loaders_dir: String,
    targets: HashMap<String, Target>,
}

/// The two targets of the original project, with its directory layout.
fn builtin_targets() -> HashMap<String, Target> {
    ["minecraft", "pathtracer"]
        .iter()
        .map(|&name| {
            (
                name.to_string(),
                Target {
                    src_dir: format!("src/{}", name),
                    static_dir: None,
                },
            )
        })
        .collect()
}

impl Config {
    /// Loads the configuration for a project directory.
    ///
    /// The built-in configuration is used as-is when no `tscmake.yml` is
    /// present; an existing file overrides individual settings and may
    /// replace the target map entirely.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_file = project_dir.join(CONFIG_FILE_NAME);
        let overrides: ConfigFile = if config_file.is_file() {
            let contents = fs::read_to_string(&config_file).with_context(|| {
                format!("Something went wrong reading {}", config_file.display())
            })?;
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Invalid format for {}", config_file.display()))?
        } else {
            ConfigFile::default()
        };

        let config = Self {
            compiler: overrides.compiler.unwrap_or_else(|| "tsc".to_string()),
            out_dir: overrides.out_dir.unwrap_or_else(|| "dist".to_string()),
            lib_entry: overrides
                .lib_entry
                .unwrap_or_else(|| "src/lib/vue/vue.js".to_string()),
            loaders_dir: overrides
                .loaders_dir
                .unwrap_or_else(|| "src/lib/threejs/examples/jsm/loaders".to_string()),
            targets: overrides.targets.unwrap_or_else(builtin_targets),
        };

        check_settings(&config)
            .and_then(|_| check_targets(&config.targets))
            .with_context(|| format!("Invalid configuration in {}", config_file.display()))?;

        Ok(config)
    }

    pub fn get_target_names(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    /// Resolves the configuration into domain values, with every path
    /// anchored to the project directory.
    pub fn into_project_and_targets(
        self,
        project_dir: &Path,
        requested_targets: Option<Vec<String>>,
    ) -> Result<(domain::Project, Vec<domain::Target>)> {
        let requested_targets =
            requested_targets.unwrap_or_else(|| self.get_target_names());
        validate_requested_targets(&requested_targets, &self.targets)?;

        let mut seen = std::collections::HashSet::new();
        let requested_targets: Vec<String> = requested_targets
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();

        let Self {
            compiler,
            out_dir,
            lib_entry,
            loaders_dir,
            mut targets,
        } = self;

        // A compiler given as a path is anchored to the project directory;
        // a bare program name goes through the usual PATH lookup.
        let compiler = if compiler.contains(std::path::MAIN_SEPARATOR) || compiler.contains('/') {
            project_dir.join(compiler).to_string_lossy().into_owned()
        } else {
            compiler
        };

        let project = domain::Project {
            dir: project_dir.to_path_buf(),
            out_dir: project_dir.join(out_dir),
            compiler,
            lib_entry: project_dir.join(lib_entry),
            loaders_dir: project_dir.join(loaders_dir),
        };

        let targets = requested_targets
            .iter()
            .map(|name| {
                let Target {
                    src_dir,
                    static_dir,
                } = targets.remove(name).unwrap();
                let static_dir =
                    static_dir.unwrap_or_else(|| format!("{}/static", src_dir));
                domain::Target {
                    name: name.clone(),
                    src_dir: project_dir.join(src_dir),
                    static_dir: project_dir.join(static_dir),
                }
            })
            .collect();

        Ok((project, targets))
    }
}

fn check_settings(config: &Config) -> Result<()> {
    let path_settings = [
        ("compiler", &config.compiler),
        ("out_dir", &config.out_dir),
        ("lib_entry", &config.lib_entry),
        ("loaders_dir", &config.loaders_dir),
    ];
    for (setting_name, value) in path_settings.iter() {
        if value.is_empty() {
            return Err(anyhow!("{} must not be empty", setting_name));
        }
    }

    Ok(())
}

fn check_targets(targets: &HashMap<String, Target>) -> Result<()> {
    if targets.is_empty() {
        return Err(anyhow!("No targets configured"));
    }

    for (target_name, target) in targets.iter() {
        if target_name.is_empty() {
            return Err(anyhow!("Target names must not be empty"));
        }
        if target.src_dir.is_empty() {
            return Err(anyhow!("Target {} has an empty src_dir", target_name));
        }
        if let Some(static_dir) = &target.static_dir {
            if static_dir.is_empty() {
                return Err(anyhow!("Target {} has an empty static_dir", target_name));
            }
        }
    }

    Ok(())
}

fn validate_requested_targets(
    requested_targets: &[String],
    targets: &HashMap<String, Target>,
) -> Result<()> {
    let invalid_targets: Vec<String> = requested_targets
        .iter()
        .filter(|requested_target| !targets.contains_key(*requested_target))
        .map(|target_name| target_name.to_owned())
        .collect();

    if !invalid_targets.is_empty() {
        return Err(anyhow!("Invalid targets: {}", invalid_targets.join(", ")));
    }

    Ok(())
}
