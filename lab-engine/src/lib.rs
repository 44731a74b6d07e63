//! Lab Engine - Core logic for the command injection and disclosure labs
//!
//! This crate provides the per-level target policies, the process runner used
//! by the ping diagnostic, and the path-confined help/source resolvers.

pub mod types;
pub mod traits;
pub mod error;
pub mod execution;
pub mod policy;
pub mod security;
pub mod safe_path;
pub mod highlight;
pub mod disclosure;


pub use types::{
    ValidatedTarget, ProcessOutput, PingConfig, DiagnosticOutcome, DiagnosticReport
};

pub use traits::{TargetPolicy, ProcessRunner};

pub use error::{LabError, LabResult, ErrorCategory};

pub use execution::{TokioProcessRunner, PingCommand, DiagnosticService};

pub use policy::{
    PermissivePolicy, PartialBlacklistPolicy, StrictPolicy, AllowListPolicy, PolicyFactory
};

pub use security::Blacklist;

pub use safe_path::{safe_join, ContentRoot};

pub use highlight::{Highlighter, escape_html};

pub use disclosure::{
    HelpResolver, SourceResolver, SourceListing, SourceFile, NOT_FOUND_PLACEHOLDER
};
