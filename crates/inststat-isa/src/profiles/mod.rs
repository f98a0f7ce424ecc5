//! Built-in CPU cost profiles.
//!
//! Each profile is a static [`RuleSpec`](crate::RuleSpec) slice. Within a
//! first-letter group, declare specific patterns before general ones.

pub mod cortex_a57;
pub mod cortex_r52;

/// ARM Cortex-A57 (AArch64).
pub const CORTEX_A57: &str = "cortex-a57";
/// ARM Cortex-R52 (AArch32/Thumb-2).
pub const CORTEX_R52: &str = "cortex-r52";
