use std::sync::{Arc, Mutex};

use docpush_core::batch::FailurePolicy;
use docpush_core::block::BlockKind;
use docpush_core::config::Settings;
use docpush_core::contract::{
    DocumentHandle, MockDocumentStore, MockNotifier, NotifyError,
};
use docpush_core::publish::{publish, PublishError};

fn configured_settings() -> Settings {
    Settings {
        app_id: "cli_app".to_string(),
        app_secret: "s3cret".to_string(),
        folder_token: "fldr_token".to_string(),
        webhook_url: Some("https://hooks.example/bot".to_string()),
        max_batch_size: 2,
        ..Settings::default()
    }
}

fn created_handle() -> DocumentHandle {
    DocumentHandle {
        document_id: "docx-123".to_string(),
        root_block_id: "docx-123".to_string(),
        url: "https://feishu.cn/docx/docx-123".to_string(),
    }
}

#[tokio::test]
async fn refuses_when_not_configured() {
    // No expectations set: any remote call would panic the mocks.
    let store = MockDocumentStore::new();
    let notifier = MockNotifier::new();

    let settings = Settings::default();
    let result = publish(&settings, &store, Some(&notifier), "Daily", "# Daily").await;

    assert!(
        matches!(result, Err(PublishError::NotConfigured)),
        "Missing credentials must refuse before any remote call"
    );
}

#[tokio::test]
async fn create_failure_aborts_without_upload_or_notification() {
    let mut store = MockDocumentStore::new();
    store
        .expect_create_document()
        .times(1)
        .returning(|_req| Err("folder token rejected".into()));
    // append_blocks and send have no expectations; calling them panics.
    let notifier = MockNotifier::new();

    let result = publish(
        &configured_settings(),
        &store,
        Some(&notifier),
        "Daily",
        "# Daily\nbody",
    )
    .await;

    match result {
        Err(PublishError::CreateFailed(detail)) => {
            assert!(detail.contains("folder token rejected"));
        }
        other => panic!("Expected CreateFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn end_to_end_batches_of_two() {
    let mut store = MockDocumentStore::new();
    store
        .expect_create_document()
        .withf(|req| req.title == "Daily" && req.folder_token == "fldr_token")
        .return_once(|_req| Ok(created_handle()));

    let seen: Arc<Mutex<Vec<Vec<BlockKind>>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_in_mock = Arc::clone(&seen);
    store
        .expect_append_blocks()
        .times(2)
        .returning(move |_doc, batch| {
            seen_in_mock
                .lock()
                .unwrap()
                .push(batch.iter().map(|b| b.kind).collect());
            Ok(())
        });

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send()
        .times(1)
        .withf(|message| message.text.contains("https://feishu.cn/docx/docx-123"))
        .returning(|_message| Ok(()));

    let report = publish(
        &configured_settings(),
        &store,
        Some(&notifier),
        "Daily",
        "# Daily\nline one\n---\n## Section",
    )
    .await
    .expect("Publish should succeed");

    assert_eq!(report.document_url, "https://feishu.cn/docx/docx-123");
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[
            vec![BlockKind::Heading1, BlockKind::Paragraph],
            vec![BlockKind::Divider, BlockKind::Heading2],
        ],
        "Blocks must be batched [[H1, P], [Divider, H2]] at max_batch_size=2"
    );
    assert_eq!(report.batches.len(), 2);
    assert!(report.batches.iter().all(|o| o.succeeded));

    let notification = report.notification.expect("Notification was attempted");
    assert!(notification.delivered);
    assert!(notification.reason.is_none());
}

#[tokio::test]
async fn notification_failure_leaves_document_url_intact() {
    let mut store = MockDocumentStore::new();
    store
        .expect_create_document()
        .return_once(|_req| Ok(created_handle()));
    store.expect_append_blocks().returning(|_doc, _batch| Ok(()));

    let mut notifier = MockNotifier::new();
    notifier
        .expect_send()
        .times(1)
        .returning(|_message| Err(NotifyError::Timeout));

    let report = publish(
        &configured_settings(),
        &store,
        Some(&notifier),
        "Daily",
        "# Daily\nbody",
    )
    .await
    .expect("Publish must succeed despite notification failure");

    assert_eq!(
        report.document_url, "https://feishu.cn/docx/docx-123",
        "Overall result is independent of the notification outcome"
    );
    let notification = report.notification.expect("Notification was attempted");
    assert!(!notification.delivered);
    assert!(notification
        .reason
        .as_deref()
        .unwrap()
        .contains("timed out"));
}

#[tokio::test]
async fn missing_webhook_skips_notification() {
    let mut store = MockDocumentStore::new();
    store
        .expect_create_document()
        .return_once(|_req| Ok(created_handle()));
    store.expect_append_blocks().returning(|_doc, _batch| Ok(()));

    let mut settings = configured_settings();
    settings.webhook_url = None;

    let report = publish(&settings, &store, None::<&MockNotifier>, "Daily", "# Daily")
        .await
        .expect("Publish should succeed without a notifier");

    assert!(
        report.notification.is_none(),
        "Webhook absence degrades to a skip, not a failure"
    );
    assert_eq!(report.document_url, "https://feishu.cn/docx/docx-123");
}

#[tokio::test]
async fn partial_batch_failure_still_returns_document_url() {
    let mut store = MockDocumentStore::new();
    store
        .expect_create_document()
        .return_once(|_req| Ok(created_handle()));

    let calls = Arc::new(Mutex::new(0usize));
    let calls_in_mock = Arc::clone(&calls);
    store
        .expect_append_blocks()
        .times(2)
        .returning(move |_doc, _batch| {
            let mut n = calls_in_mock.lock().unwrap();
            *n += 1;
            if *n == 1 {
                Err("rate limited".into())
            } else {
                Ok(())
            }
        });

    let mut notifier = MockNotifier::new();
    notifier.expect_send().returning(|_message| Ok(()));

    let mut settings = configured_settings();
    settings.failure_policy = FailurePolicy::BestEffort;

    let report = publish(
        &settings,
        &store,
        Some(&notifier),
        "Daily",
        "# Daily\nline one\n---\n## Section",
    )
    .await
    .expect("Best-effort publish succeeds with partial batch failure");

    assert_eq!(report.document_url, "https://feishu.cn/docx/docx-123");
    assert_eq!(report.batches.len(), 2);
    assert!(!report.batches[0].succeeded);
    assert!(report.batches[0]
        .error_detail
        .as_deref()
        .unwrap()
        .contains("rate limited"));
    assert!(report.batches[1].succeeded);
}
