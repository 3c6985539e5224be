//! Host-control contract tests
//!
//! Host control hands the engine the host's chrome and input. It is taken at
//! most once per attachment and always given back on detach.
