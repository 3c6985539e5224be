//! Entry point contract tests
//!
//! The entry point runs once per attachment, on the first start, after the
//! initial route (if any) has been delivered.
