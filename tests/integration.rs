// SPDX-License-Identifier: MPL-2.0
use std::time::Duration;

use tempfile::tempdir;
use tokio::time::sleep;
use toast_queue::config::{self, Config, NotificationsConfig};
use toast_queue::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsCollector};
use toast_queue::{
    Kind, Lifetime, LifetimePolicy, NotificationPatch, NotificationQueue, ResolveMessages,
};

#[tokio::test(start_paused = true)]
async fn saved_toast_expires_after_success_lifetime() {
    let queue = NotificationQueue::new();
    queue.enqueue(Kind::Success, "Saved", None, None);

    let active = queue.snapshot();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind(), Kind::Success);
    assert_eq!(active[0].title(), "Saved");

    let lifetime = queue
        .policy()
        .lifetime_for(Kind::Success)
        .duration()
        .unwrap();
    sleep(lifetime + Duration::from_millis(50)).await;
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn removed_ids_stay_removed() {
    let queue = NotificationQueue::new();
    let id = queue.error("X");

    assert!(queue.remove(id));
    queue.update(id, NotificationPatch::new().kind(Kind::Success));
    assert!(!queue.remove(id));
    assert!(queue.get(id).is_none());
}

#[tokio::test(start_paused = true)]
async fn policy_from_config_file_drives_expiry() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let config = Config {
        notifications: NotificationsConfig {
            success_ms: Some(700),
            ..NotificationsConfig::default()
        },
        ..Config::default()
    };
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let queue = NotificationQueue::with_policy(LifetimePolicy::from_config(&loaded.notifications));
    let id = queue.success("Saved");
    assert_eq!(
        queue.get(id).unwrap().lifetime(),
        Lifetime::After(Duration::from_millis(700))
    );

    sleep(Duration::from_millis(750)).await;
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn tracked_upload_reports_to_diagnostics() {
    let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
    let queue = NotificationQueue::builder()
        .diagnostics(collector.handle())
        .build();

    let result: Result<(), String> = queue
        .resolve(
            async {
                sleep(Duration::from_secs(2)).await;
                Err("quota exceeded".to_string())
            },
            ResolveMessages::new("Uploading", "Uploaded", "Upload failed"),
        )
        .await;
    assert_eq!(result, Err("quota exceeded".to_string()));

    let failed = queue.snapshot()[0].clone();
    assert_eq!(failed.kind(), Kind::Error);
    assert_eq!(failed.message(), Some("quota exceeded"));

    let error_lifetime = queue.policy().lifetime_for(Kind::Error).duration().unwrap();
    sleep(error_lifetime + Duration::from_millis(50)).await;
    assert!(queue.is_empty());

    collector.process_pending();
    let id = failed.id();
    let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticEventKind::Shown {
                id,
                kind: Kind::Pending
            },
            DiagnosticEventKind::Changed {
                id,
                kind: Kind::Error
            },
            DiagnosticEventKind::Error {
                message: "Upload failed".into()
            },
            DiagnosticEventKind::Expired { id },
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_producers_keep_ids_unique() {
    let queue = NotificationQueue::new();

    let mut tasks = Vec::new();
    for worker in 0..8 {
        let queue = queue.clone();
        tasks.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..50 {
                let id = queue.info(format!("worker-{worker}-{i}"));
                if i % 2 == 0 {
                    queue.update(id, NotificationPatch::new().kind(Kind::Warning));
                }
                ids.push(id);
            }
            ids
        }));
    }

    let mut all = Vec::new();
    for task in tasks {
        all.extend(task.await.expect("producer panicked"));
    }
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 400);
    assert_eq!(queue.len(), 400);
}
