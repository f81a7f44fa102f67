//! Unit tests for schedule crate

#[cfg(test)]
mod document_tests {
    use crate::domain::entities::{
        REFRESH_INTERVALS_MS, ScheduleDocument, ScheduleEntry, StoredSchedule, default_schedule,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const NOW: i64 = 1_700_000_000_000;

    fn indices(document: &ScheduleDocument) -> Vec<u64> {
        document
            .schedule
            .iter()
            .filter_map(|e| e.video_index.as_u64())
            .collect()
    }

    #[test]
    fn test_next_refresh_is_one_of_the_intervals() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let doc = ScheduleDocument::new(default_schedule(3), NOW, &mut rng);
            assert!(REFRESH_INTERVALS_MS.contains(&(doc.next_refresh - NOW)));
        }
    }

    #[test]
    fn test_due_boundary() {
        let doc = ScheduleDocument {
            schedule: vec![],
            next_refresh: NOW,
        };
        assert!(!doc.is_due(NOW - 1));
        assert!(doc.is_due(NOW));
    }

    #[test]
    fn test_rotate_keeps_entries() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut doc = ScheduleDocument::new(default_schedule(20), NOW, &mut rng);
        let later = doc.next_refresh;

        doc.rotate(later, &mut rng);

        let mut sorted = indices(&doc);
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        assert!(doc.next_refresh > later);
    }

    #[test]
    fn test_unknown_entry_fields_survive() {
        let json = r#"{"videoIndex":3,"delay":500,"title":"intro"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.video_index.as_u64(), Some(3));
        assert_eq!(entry.extra["title"], "intro");

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["title"], "intro");
        assert_eq!(back["videoIndex"], 3);
    }

    #[test]
    fn test_stored_shapes() {
        let legacy: StoredSchedule =
            serde_json::from_str(r#"[{"videoIndex":1,"delay":0}]"#).unwrap();
        assert!(matches!(legacy, StoredSchedule::Legacy(ref e) if e.len() == 1));

        let empty: StoredSchedule = serde_json::from_str("[]").unwrap();
        assert!(matches!(empty, StoredSchedule::Legacy(ref e) if e.is_empty()));

        let document: StoredSchedule = serde_json::from_str(
            r#"{"schedule":[{"videoIndex":1,"delay":0}],"nextRefresh":123}"#,
        )
        .unwrap();
        match document {
            StoredSchedule::Document(doc) => assert_eq!(doc.next_refresh, 123),
            other => panic!("expected document, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod parse_tests {
    use crate::application::parse_entries;
    use crate::error::ScheduleError;
    use serde_json::json;

    #[test]
    fn test_accepts_array_and_document() {
        let entries = parse_entries(json!([{ "videoIndex": 0, "delay": 1000 }])).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].delay.as_u64(), Some(1000));

        let entries = parse_entries(json!({
            "schedule": [{ "videoIndex": 2, "delay": 0 }, { "videoIndex": 1, "delay": 5 }],
            "nextRefresh": 0
        }))
        .unwrap();
        assert_eq!(entries[0].video_index.as_u64(), Some(2));
    }

    #[test]
    fn test_rejects_non_arrays() {
        for body in [
            json!({ "videoIndex": 0 }),
            json!("schedule"),
            json!({ "schedule": 5 }),
        ] {
            assert!(matches!(
                parse_entries(body),
                Err(ScheduleError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_entry() {
        let err = parse_entries(json!([{ "videoIndex": 0, "delay": 1 }, { "delay": 1 }]));
        match err {
            Err(ScheduleError::MalformedInput(msg)) => assert!(msg.starts_with("entry 1")),
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use crate::application::config::ScheduleConfig;
    use crate::application::{GetScheduleUseCase, ReplaceScheduleUseCase, ScheduleLock};
    use crate::domain::entities::{REFRESH_INTERVALS_MS, ScheduleEntry};
    use crate::error::ScheduleError;
    use crate::infra::file::FileScheduleStore;
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;

    const NOW: i64 = 1_700_000_000_000;

    struct Fixture {
        dir: TempDir,
        store: Arc<FileScheduleStore>,
        lock: Arc<ScheduleLock>,
        config: Arc<ScheduleConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("data").join("schedule.json");
            Self {
                store: Arc::new(FileScheduleStore::new(path.clone())),
                lock: Arc::new(ScheduleLock::new(())),
                config: Arc::new(ScheduleConfig {
                    path,
                    default_entries: 5,
                }),
                dir,
            }
        }

        fn get(&self) -> GetScheduleUseCase<FileScheduleStore> {
            GetScheduleUseCase::new(self.store.clone(), self.lock.clone(), self.config.clone())
        }

        fn replace(&self) -> ReplaceScheduleUseCase<FileScheduleStore> {
            ReplaceScheduleUseCase::new(self.store.clone(), self.lock.clone())
        }

        fn on_disk(&self) -> Value {
            let raw = std::fs::read(&self.config.path).unwrap();
            serde_json::from_slice(&raw).unwrap()
        }
    }

    #[tokio::test]
    async fn test_missing_file_writes_default() {
        let f = Fixture::new();

        let doc = f.get().execute(NOW).await.unwrap();

        let indices: Vec<u64> = doc
            .schedule
            .iter()
            .filter_map(|e| e.video_index.as_u64())
            .collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(doc.schedule.iter().all(|e| e.delay.as_u64() == Some(0)));
        assert!(REFRESH_INTERVALS_MS.contains(&(doc.next_refresh - NOW)));
        assert_eq!(f.on_disk()["nextRefresh"], doc.next_refresh);
        assert!(!f.dir.path().join("data").join("schedule.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_replace_then_get_until_refresh() {
        let f = Fixture::new();
        let entries = vec![
            ScheduleEntry::new(0, 1000),
            ScheduleEntry::new(1, 0),
            ScheduleEntry::new(2, 250),
            ScheduleEntry::new(3, 0),
            ScheduleEntry::new(4, 0),
            ScheduleEntry::new(5, 0),
        ];

        let stored = f.replace().execute(entries.clone(), NOW).await.unwrap();
        assert!(stored.next_refresh > NOW);

        let before = f.get().execute(stored.next_refresh - 1).await.unwrap();
        assert_eq!(before, stored);

        let after = f.get().execute(stored.next_refresh).await.unwrap();
        assert!(after.next_refresh > stored.next_refresh);
        let mut rotated = after.schedule.clone();
        rotated.sort_by_key(|e| e.video_index.as_u64());
        assert_eq!(rotated, entries);

        // The rotation is persisted, so reading again changes nothing
        let again = f.get().execute(stored.next_refresh + 1).await.unwrap();
        assert_eq!(again, after);
    }

    #[tokio::test]
    async fn test_legacy_file_is_migrated() {
        let f = Fixture::new();
        std::fs::create_dir_all(f.config.path.parent().unwrap()).unwrap();
        std::fs::write(
            &f.config.path,
            r#"[{"videoIndex":3,"delay":100},{"videoIndex":7,"delay":0,"note":"x"}]"#,
        )
        .unwrap();

        let doc = f.get().execute(NOW).await.unwrap();
        assert_eq!(doc.schedule[0].video_index.as_u64(), Some(3));
        assert_eq!(doc.schedule[0].delay.as_u64(), Some(100));
        assert_eq!(doc.schedule[1].video_index.as_u64(), Some(7));

        let disk = f.on_disk();
        assert!(disk.is_object());
        assert_eq!(disk["nextRefresh"], doc.next_refresh);
        assert_eq!(disk["schedule"][0]["videoIndex"], 3);
        assert_eq!(disk["schedule"][1]["note"], "x");
    }

    #[tokio::test]
    async fn test_loose_numbers_in_file_are_kept() {
        let f = Fixture::new();
        std::fs::create_dir_all(f.config.path.parent().unwrap()).unwrap();
        std::fs::write(
            &f.config.path,
            r#"[{"videoIndex":0,"delay":1.5},{"videoIndex":1,"delay":-200},{"videoIndex":2.0}]"#,
        )
        .unwrap();

        let doc = f.get().execute(NOW).await.unwrap();
        assert_eq!(doc.schedule.len(), 3);
        assert_eq!(doc.schedule[0].delay.as_f64(), Some(1.5));
        assert_eq!(doc.schedule[1].delay.as_i64(), Some(-200));
        assert_eq!(doc.schedule[2].delay.as_u64(), Some(0));

        // Written back unchanged and readable on the next request
        let disk = f.on_disk();
        assert_eq!(disk["schedule"][0]["delay"], 1.5);
        assert_eq!(disk["schedule"][1]["delay"], -200);
        assert_eq!(disk["schedule"][2]["videoIndex"], 2.0);
        let again = f.get().execute(NOW + 1).await.unwrap();
        assert_eq!(again, doc);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_persistence_error() {
        let f = Fixture::new();
        std::fs::create_dir_all(f.config.path.parent().unwrap()).unwrap();
        std::fs::write(&f.config.path, "{ not json").unwrap();

        let err = f.get().execute(NOW).await.unwrap_err();
        assert!(matches!(err, ScheduleError::Persistence(_)));
        // No fallback to defaults once a file exists
        assert_eq!(std::fs::read_to_string(&f.config.path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_document_without_refresh_rotates_immediately() {
        let f = Fixture::new();
        std::fs::create_dir_all(f.config.path.parent().unwrap()).unwrap();
        std::fs::write(&f.config.path, r#"{"schedule":[{"videoIndex":0,"delay":0}]}"#).unwrap();

        let doc = f.get().execute(NOW).await.unwrap();
        assert!(doc.next_refresh > NOW);
        assert_eq!(f.on_disk()["nextRefresh"], doc.next_refresh);
    }
}

#[cfg(test)]
mod http_tests {
    use crate::application::config::ScheduleConfig;
    use crate::infra::file::FileScheduleStore;
    use crate::presentation::router::schedule_router_generic;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(dir: &TempDir) -> Router {
        let path = dir.path().join("schedule.json");
        schedule_router_generic(
            Arc::new(FileScheduleStore::new(path.clone())),
            ScheduleConfig {
                path,
                default_entries: 5,
            },
        )
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ncom/schedule")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get() -> Request<Body> {
        Request::builder()
            .uri("/ncom/schedule")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_post_then_get() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, body) = send(&app, post(r#"[{"videoIndex":0,"delay":1000}]"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let next_refresh = body["nextRefresh"].as_i64().unwrap();

        let (status, body) = send(&app, get()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["schedule"][0]["videoIndex"], 0);
        assert_eq!(body["schedule"][0]["delay"], 1000);
        assert_eq!(body["nextRefresh"], next_refresh);
    }

    #[tokio::test]
    async fn test_post_non_array_is_400() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, body) = send(&app, post(r#"{"videoIndex":0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, post("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!dir.path().join("schedule.json").exists());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_500() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("schedule.json"), "garbage").unwrap();
        let app = app(&dir);

        let (status, body) = send(&app, get()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to access schedule");
    }
}
