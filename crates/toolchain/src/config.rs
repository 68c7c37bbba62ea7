use crate::error::{Result, ToolchainError};
use std::path::{Path, PathBuf};

/// Locations of the external tools and the project layout they work on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Project root; child processes run here
    pub root: PathBuf,

    /// Build output directory, relative to the root
    pub output_dir: PathBuf,

    /// C compiler used for every build step
    pub compiler: PathBuf,

    /// Interactive debugger for `debug`
    pub debugger: PathBuf,

    /// Memory analyzer for `memcheck`
    pub memchecker: PathBuf,

    /// Include directory passed with `-I`
    pub include_dir: PathBuf,

    /// Flags shared by every compile step
    pub cflags: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output_dir: PathBuf::from("./bin"),
            compiler: PathBuf::from("/usr/bin/gcc-9"),
            debugger: PathBuf::from("/usr/bin/gdb"),
            memchecker: PathBuf::from("/usr/bin/valgrind"),
            include_dir: PathBuf::from("./src"),
            cflags: [
                "-Wall",
                "-g",
                "-O0",
                "-Werror",
                "-std=gnu99",
                "-Wno-unused-function",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl ToolchainConfig {
    /// Default layout rooted somewhere other than the working directory
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Build output directory resolved against the root
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ToolchainError::invalid_config("output directory is empty"));
        }
        if self.output_dir.is_absolute() {
            return Err(ToolchainError::invalid_config(format!(
                "output directory {} must be relative to the project root",
                self.output_dir.display()
            )));
        }
        for (name, tool) in [
            ("compiler", &self.compiler),
            ("debugger", &self.debugger),
            ("memory analyzer", &self.memchecker),
        ] {
            if tool.as_os_str().is_empty() {
                return Err(ToolchainError::invalid_config(format!("{name} path is empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_layout_validates() {
        let config = ToolchainConfig::default();
        config.validate().expect("valid");
        assert_eq!(config.output_path(), PathBuf::from("./bin"));
    }

    #[test]
    fn output_path_follows_root() {
        let config = ToolchainConfig::with_root("/work/sim");
        assert_eq!(config.output_path(), PathBuf::from("/work/sim/./bin"));
    }

    #[test]
    fn rejects_absolute_output_dir_and_empty_tools() {
        let config = ToolchainConfig {
            output_dir: PathBuf::from("/tmp/bin"),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ToolchainConfig {
            debugger: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
