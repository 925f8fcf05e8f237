// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nb action-types` - print a persisted action group

use super::print_json;
use anyhow::Result;
use clap::Args;
use nb_adapters::NotifyAdapter;
use nb_engine::NotificationService;
use nb_storage::StoreBackend;

#[derive(Args, Debug)]
pub struct ActionTypesArgs {
    /// Action type (category) id
    pub id: String,
}

/// Corrupt entries print as `null` so positions stay meaningful.
pub fn handle<A, B>(args: ActionTypesArgs, service: &NotificationService<A, B>) -> Result<()>
where
    A: NotifyAdapter,
    B: StoreBackend,
{
    print_json(&service.action_group(&args.id)?)
}
