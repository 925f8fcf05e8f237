// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use nb_core::test_support::{daily_record, scheduled_record};
use nb_core::{encode, NotificationRecord};

#[tokio::test]
async fn fake_schedule_records_calls() {
    let adapter = FakeNotifyAdapter::new();

    adapter
        .schedule(vec![encode(&scheduled_record(1, "one"))])
        .await
        .unwrap();
    adapter.cancel(&[1]).await.unwrap();

    assert_eq!(
        adapter.calls(),
        vec![
            NotifyCall::Schedule {
                identifiers: vec!["1".to_string()]
            },
            NotifyCall::Cancel { ids: vec![1] },
        ]
    );
    assert!(adapter.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn immediate_requests_become_active() {
    let adapter = FakeNotifyAdapter::new();
    adapter
        .schedule(vec![encode(&NotificationRecord::new(3).title("now"))])
        .await
        .unwrap();

    assert!(adapter.pending().await.unwrap().is_empty());
    let active = adapter.active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].request.content.title, "now");
}

#[tokio::test]
async fn deliver_moves_one_shot_requests_to_active() {
    let adapter = FakeNotifyAdapter::new();
    adapter
        .schedule(vec![
            encode(&scheduled_record(1, "once")),
            encode(&daily_record(2, "daily")),
        ])
        .await
        .unwrap();

    let event = adapter.deliver("1").unwrap();
    assert_eq!(event.identifier(), "1");
    assert!(adapter.deliver("2").is_some());
    assert!(adapter.deliver("404").is_none());

    let pending: Vec<_> = adapter
        .pending()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.identifier)
        .collect();
    assert_eq!(pending, vec!["2"]);
    assert_eq!(adapter.active().await.unwrap().len(), 2);
}

#[tokio::test]
async fn injected_schedule_failure_is_reported() {
    let adapter = FakeNotifyAdapter::new();
    adapter.fail_schedule("daemon gone");

    let err = adapter
        .schedule(vec![encode(&scheduled_record(1, "x"))])
        .await
        .unwrap_err();
    assert!(matches!(err, NotifyError::SendFailed(ref reason) if reason == "daemon gone"));
    assert!(adapter.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn permission_can_be_overridden() {
    let adapter = FakeNotifyAdapter::new();
    adapter.set_permission(PermissionState::Denied);
    assert_eq!(
        adapter.request_permission().await.unwrap(),
        PermissionState::Denied
    );
    assert_eq!(adapter.calls(), vec![NotifyCall::RequestPermission]);
}
