//! Event forwarding contract tests
//!
//! Platform events reach the engine verbatim while attached and vanish
//! otherwise.
