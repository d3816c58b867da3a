//! Link resolution for projects that straddle a main repository and its
//! GitHub wiki checkout.
//!
//! The core ([`resolver::LinkResolver`]) takes link text written in one file
//! and returns the files it can refer to, consulting a [`project::ProjectResolver`]
//! for the file list and repository roots. [`project::Project`] is the
//! implementation built from a directory on disk.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod link;
pub mod path;
pub mod project;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod vcs;
