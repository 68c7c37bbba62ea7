use std::borrow::Borrow;
use std::fmt;

/// Symbolic name of a buildable or runnable artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetKey(String);

impl TargetKey {
    /// Instruction-set machine simulator
    pub const MACHINE: &'static str = "m";
    /// ELF linker test driver, plus its shared library and companion tool
    pub const LINKER: &'static str = "l";
    /// Static linker as a shared library only
    pub const SHARED_LIBRARY: &'static str = "so";
    /// Companion link tool; runnable but not separately buildable
    pub const LINK_TOOL: &'static str = "ld";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for TargetKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
