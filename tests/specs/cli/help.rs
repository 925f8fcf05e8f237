//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn nb_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn nb_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("serve")
        .stdout_has("send")
        .stdout_has("saved")
        .stdout_has("action-types");
}

#[test]
fn nb_send_help_shows_flags() {
    cli()
        .args(&["send", "--help"])
        .passes()
        .stdout_has("--title")
        .stdout_has("--body");
}

#[test]
fn nb_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
