// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nb saved` - print persisted notification records

use super::print_json;
use anyhow::{anyhow, Result};
use clap::Args;
use nb_adapters::NotifyAdapter;
use nb_core::NotificationId;
use nb_engine::NotificationService;
use nb_storage::StoreBackend;

#[derive(Args, Debug)]
pub struct SavedArgs {
    /// Print only the record with this id
    #[arg(long)]
    pub id: Option<NotificationId>,
}

pub fn handle<A, B>(args: SavedArgs, service: &NotificationService<A, B>) -> Result<()>
where
    A: NotifyAdapter,
    B: StoreBackend,
{
    match args.id {
        Some(id) => {
            let record = service
                .records()
                .get(&id.to_string())?
                .ok_or_else(|| anyhow!("no saved notification with id {id}"))?;
            print_json(&record)
        }
        None => print_json(&service.records().records()?),
    }
}
