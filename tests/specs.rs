//! Behavioral specifications for the nb CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, exit codes and the files left in the state directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// serve/
#[path = "specs/serve/commands.rs"]
mod serve_commands;
#[path = "specs/serve/restore.rs"]
mod serve_restore;

// store/
#[path = "specs/store/saved.rs"]
mod store_saved;
