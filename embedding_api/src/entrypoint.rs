//! Program entry points and engine launch arguments

use crate::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conventional entry point function name
pub const DEFAULT_ENTRYPOINT: &str = "main";

/// Conventional program bundle location
pub const DEFAULT_BUNDLE_PATH: &str = "app_bundle";

/// A program entry point: the bundle to load and the function to run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entrypoint {
    /// Path to the program bundle
    pub bundle_path: String,
    /// Function to invoke inside the bundle
    pub function_name: String,
}

impl Entrypoint {
    /// Creates an entry point for the given bundle and function
    pub fn new(bundle_path: impl Into<String>, function_name: impl Into<String>) -> Self {
        Self {
            bundle_path: bundle_path.into(),
            function_name: function_name.into(),
        }
    }

    /// Creates an entry point that runs the conventional `main` function
    pub fn main(bundle_path: impl Into<String>) -> Self {
        Self::new(bundle_path, DEFAULT_ENTRYPOINT)
    }
}

impl fmt::Display for Entrypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bundle_path, self.function_name)
    }
}

/// Launch arguments handed to the engine bootstrap
///
/// Arguments are opaque to the embedding layer and are passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShellArgs(Vec<String>);

impl ShellArgs {
    /// Creates an empty argument list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates an argument list from the given values
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// Appends one argument
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.0.push(arg.into());
        self
    }

    /// Returns the arguments in order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Runs program entry points inside the engine
pub trait EntrypointExecutor {
    /// True once an entry point has started running in this engine
    fn is_executing(&self) -> bool;

    /// Starts the given entry point
    ///
    /// Failures are reported synchronously; the executor does not retry.
    fn execute(&self, entrypoint: &Entrypoint) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrypoint_main_uses_default_function() {
        let entrypoint = Entrypoint::main("/bundle");
        assert_eq!(entrypoint.function_name, DEFAULT_ENTRYPOINT);
        assert_eq!(entrypoint.bundle_path, "/bundle");
    }

    #[test]
    fn test_entrypoint_display() {
        let entrypoint = Entrypoint::new("/my/bundle/path", "myEntrypoint");
        assert_eq!(entrypoint.to_string(), "/my/bundle/path:myEntrypoint");
    }

    #[test]
    fn test_shell_args_preserve_order() {
        let args = ShellArgs::from_args(["--trace-startup", "--verbose-logging"])
            .with_arg("--enable-profiling");
        assert_eq!(args.len(), 3);
        assert_eq!(args.as_slice()[0], "--trace-startup");
        assert_eq!(args.as_slice()[2], "--enable-profiling");
    }

    #[test]
    fn test_shell_args_serialize_as_list() {
        let args = ShellArgs::from_args(["--a", "--b"]);
        let json = serde_json::to_string(&args).unwrap();
        assert_eq!(json, "[\"--a\",\"--b\"]");
        assert!(ShellArgs::new().is_empty());
    }
}
