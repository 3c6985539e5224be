//! Engine retention contract tests
//!
//! A host may keep its engine alive past the container. The delegate then
//! hands the engine back from `detach` instead of dropping it.
