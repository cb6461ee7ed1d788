//! Exit codes for `pwa-report`.
//! These codes are part of the public contract; scripts branch on them.

pub const SUCCESS: i32 = 0;
pub const AUDIT_FAILED: i32 = 1; // Report not produced (generic failure)
pub const INTERNAL_ERROR: i32 = 2; // Bad configuration or output failure
pub const AUDIT_TIMEOUT: i32 = 3; // Report not produced, audit timed out
