use std::fmt;
use std::path::PathBuf;

/// Settings shared by every target of a project.
#[derive(Clone, Debug)]
pub struct Project {
    pub dir: PathBuf,
    pub out_dir: PathBuf,
    pub compiler: String,
    pub lib_entry: PathBuf,
    pub loaders_dir: PathBuf,
}

/// One build target: a tree of `.ts` sources plus a static-asset tree.
#[derive(Clone, Debug)]
pub struct Target {
    pub name: String,
    pub src_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl fmt::Display for Target {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.name)
    }
}
