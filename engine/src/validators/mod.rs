//! Validation checks over a full definition set.
//!
//! Each module contributes findings to one shared report; the combined pass
//! lives in [`crate::validate`].

pub mod inheritance;
pub mod naming;
pub mod references;
