// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nb send` - show a notification immediately

use anyhow::Result;
use clap::Args;
use nb_adapters::NotifyAdapter;
use nb_core::NotificationRecord;
use nb_engine::NotificationService;
use nb_storage::StoreBackend;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Notification title
    #[arg(long)]
    pub title: String,

    /// Notification body
    #[arg(long)]
    pub body: Option<String>,

    /// Notification id
    #[arg(long, default_value_t = 0)]
    pub id: i32,

    /// Sound name understood by the platform
    #[arg(long)]
    pub sound: Option<String>,
}

impl SendArgs {
    pub fn record(&self) -> NotificationRecord {
        let mut record = NotificationRecord::new(self.id).title(&self.title);
        if let Some(body) = &self.body {
            record = record.body(body);
        }
        if let Some(sound) = &self.sound {
            record = record.sound(sound);
        }
        record
    }
}

pub async fn handle<A, B>(args: SendArgs, service: &NotificationService<A, B>) -> Result<()>
where
    A: NotifyAdapter,
    B: StoreBackend,
{
    service.notify(args.record()).await?;
    Ok(())
}
