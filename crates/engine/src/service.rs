// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification service: adapter, normalizer, stores and event bridge.

use crate::bridge::{EventBridge, Presentation};
use crate::error::ServiceError;
use crate::listeners::{ListenerId, Listeners};
use nb_adapters::NotifyAdapter;
use nb_core::{
    decode_request, encode, ActionType, CanonicalEvent, Channel, EventKind, NativeEvent,
    NativeRequest, NotificationAction, NotificationId, NotificationRecord, PermissionState,
    Schedule,
};
use nb_storage::{ActionGroupStore, NotificationStore, StoreBackend};
use tokio::sync::mpsc;

pub struct NotificationService<A, B: StoreBackend> {
    adapter: A,
    records: NotificationStore<B::Store>,
    action_groups: ActionGroupStore<B>,
    bridge: EventBridge<B::Store>,
}

impl<A: NotifyAdapter, B: StoreBackend> Clone for NotificationService<A, B> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            records: self.records.clone(),
            action_groups: self.action_groups.clone(),
            bridge: self.bridge.clone(),
        }
    }
}

impl<A: NotifyAdapter, B: StoreBackend> NotificationService<A, B> {
    pub fn new(adapter: A, backend: B) -> Result<Self, ServiceError> {
        let records = NotificationStore::open(&backend)?;
        let bridge = EventBridge::new(records.clone(), Listeners::new());
        Ok(Self {
            adapter,
            records,
            action_groups: ActionGroupStore::new(backend),
            bridge,
        })
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn records(&self) -> &NotificationStore<B::Store> {
        &self.records
    }

    /// Show or schedule one notification.
    pub async fn notify(&self, record: NotificationRecord) -> Result<(), ServiceError> {
        self.schedule(vec![record]).await
    }

    /// Persist the scheduled records, then submit everything to the platform.
    ///
    /// A record is stored before its request can fire. If the platform
    /// rejects the batch, the store is put back as it was.
    pub async fn schedule(&self, records: Vec<NotificationRecord>) -> Result<(), ServiceError> {
        let requests: Vec<NativeRequest> = records.iter().map(encode).collect();
        let checkpoint = self.records.checkpoint(&records)?;
        self.records.append(&records)?;
        if let Err(e) = self.adapter.schedule(requests).await {
            if let Err(revert) = self.records.revert(checkpoint) {
                tracing::warn!(error = %revert, "cannot roll back stored notifications");
            }
            return Err(e.into());
        }
        tracing::info!(count = records.len(), "notifications submitted");
        Ok(())
    }

    /// Persist each type's actions, then make the categories known to the platform.
    pub async fn register_action_types(&self, types: &[ActionType]) -> Result<(), ServiceError> {
        self.action_groups.register(types)?;
        self.adapter.register_action_types(types).await?;
        Ok(())
    }

    pub fn action_group(&self, id: &str) -> Result<Vec<Option<NotificationAction>>, ServiceError> {
        Ok(self.action_groups.action_group(id)?)
    }

    /// Pending requests as canonical records.
    pub async fn pending(&self) -> Result<Vec<NotificationRecord>, ServiceError> {
        let requests = self.adapter.pending().await?;
        Ok(requests
            .iter()
            .map(|request| self.decode(request))
            .collect())
    }

    /// Delivered notifications as canonical records.
    pub async fn active(&self) -> Result<Vec<NotificationRecord>, ServiceError> {
        let delivered = self.adapter.active().await?;
        Ok(delivered
            .iter()
            .map(|notification| self.decode(&notification.request))
            .collect())
    }

    fn decode(&self, request: &NativeRequest) -> NotificationRecord {
        let stored = self
            .records
            .get_raw(&request.identifier)
            .unwrap_or_else(|e| {
                tracing::warn!(identifier = %request.identifier, error = %e, "record lookup failed");
                None
            });
        decode_request(request, stored.as_ref())
    }

    pub async fn cancel(&self, ids: &[NotificationId]) -> Result<(), ServiceError> {
        self.adapter.cancel(ids).await?;
        for id in ids {
            self.records.delete(&id.to_string())?;
        }
        Ok(())
    }

    pub async fn cancel_all(&self) -> Result<(), ServiceError> {
        self.adapter.cancel_all().await?;
        self.records.clear()?;
        Ok(())
    }

    pub async fn remove_active(&self, ids: &[NotificationId]) -> Result<(), ServiceError> {
        Ok(self.adapter.remove_active(ids).await?)
    }

    pub async fn remove_all_active(&self) -> Result<(), ServiceError> {
        Ok(self.adapter.remove_all_active().await?)
    }

    pub async fn is_permission_granted(&self) -> Result<bool, ServiceError> {
        Ok(self.adapter.permission_state().await?.is_granted())
    }

    pub async fn request_permission(&self) -> Result<PermissionState, ServiceError> {
        Ok(self.adapter.request_permission().await?)
    }

    pub async fn create_channel(&self, channel: Channel) -> Result<(), ServiceError> {
        Ok(self.adapter.create_channel(channel).await?)
    }

    pub async fn delete_channel(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.adapter.delete_channel(id).await?)
    }

    pub async fn list_channels(&self) -> Result<Vec<Channel>, ServiceError> {
        Ok(self.adapter.list_channels().await?)
    }

    /// Re-arm every stored record with the platform.
    ///
    /// One-shot records whose time has passed are delivered at once by the
    /// platform. Returns how many records were submitted.
    pub async fn restore(&self) -> Result<usize, ServiceError> {
        let records = self.records.records()?;
        if records.is_empty() {
            return Ok(0);
        }
        let count = records.len();
        let requests = records.iter().map(encode).collect();
        self.adapter.schedule(requests).await?;
        tracing::info!(count, "restored stored notifications");
        Ok(count)
    }

    /// Bridge a native callback to listeners.
    ///
    /// A non-repeating `at` record is forgotten once it has been received.
    pub fn handle(&self, event: &NativeEvent) -> Presentation {
        let (canonical, presentation) = self.bridge.handle(event);
        if let CanonicalEvent::Received(record) = &canonical {
            if matches!(record.schedule, Some(Schedule::At { repeating: false, .. })) {
                if let Err(e) = self.records.delete(&record.key()) {
                    tracing::warn!(id = record.id, error = %e, "failed to delete fired record");
                }
            }
        }
        presentation
    }

    /// Drain native callbacks until every sender is dropped.
    pub async fn run(&self, mut events: mpsc::Receiver<NativeEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(&event);
        }
        tracing::debug!("native event channel closed");
    }

    pub fn listen<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&CanonicalEvent) + Send + Sync + 'static,
    {
        self.bridge.listeners().listen(kind, callback)
    }

    pub fn unlisten(&self, id: ListenerId) -> bool {
        self.bridge.listeners().unlisten(id)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
