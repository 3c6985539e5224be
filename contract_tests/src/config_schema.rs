//! Host configuration schema contract tests
//!
//! These tests pin the JSON shape of a stored host config. Field names and
//! enum spellings MUST NOT change without a document version bump.

use host_config::persistence::HostConfigDocument;

// ===== Document Version =====
#[allow(dead_code)]
const CONFIG_DOCUMENT_VERSION: u32 = HostConfigDocument::CURRENT_VERSION;

// ===== Canonical Field Names =====
#[allow(dead_code)]
const CONFIG_FIELDS: [&str; 9] = [
    "app_bundle_path",
    "entrypoint",
    "initial_route",
    "render_mode",
    "transparency_mode",
    "shell_args",
    "attach_to_activity",
    "retain_engine",
    "stop_policy",
];
