//! Integration tests for the editor crate, driven through a MemoryStore

use std::sync::Arc;
use vellum_editor::{media_references, Command, EditSession, StoreCall, TrackView};
use vellum_model::{
    ImageEntry, LeafAddress, LivePointers, Module, Payload, RevisionId, RichContent, Section,
    TrackKind,
};
use vellum_store::{MemoryStore, StoreOp};

fn module(headline: &str, image: &str) -> Module {
    Module {
        headline: headline.to_string(),
        body: format!("{} body", headline),
        images: vec![ImageEntry::new(0, image)],
    }
}

fn content(version: &str) -> Payload {
    Payload::RichContent(RichContent {
        sections: vec![
            Section {
                section_type: "hero".into(),
                modules: vec![module(&format!("Hero {}", version), "hero.png")],
            },
            Section {
                section_type: "specs".into(),
                modules: vec![
                    module(&format!("Weight {}", version), "weight.png"),
                    module(&format!("Size {}", version), "size.png"),
                ],
            },
        ],
    })
}

/// Store with rich-content revisions v1..v3; v2 is live
async fn seeded() -> (Arc<MemoryStore>, EditSession<MemoryStore>, Vec<RevisionId>) {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditSession::load(store.clone()).await.unwrap();

    let mut ids = Vec::new();
    for version in ["v1", "v2", "v3"] {
        ids.push(session.create_revision(content(version)).await.unwrap().id);
    }

    store
        .set_live(TrackKind::RichContent, Some(ids[1].clone()))
        .unwrap();
    session.refresh_live().await.unwrap();

    (store, session, ids)
}

fn headlines(session: &EditSession<MemoryStore>) -> Vec<String> {
    session
        .state()
        .compose()
        .unwrap()
        .modules()
        .map(|m| m.module.headline.clone())
        .collect()
}

#[tokio::test]
async fn test_compose_follows_live_revision() {
    let (_store, session, _ids) = seeded().await;
    assert_eq!(headlines(&session), vec!["Hero v2", "Weight v2", "Size v2"]);
}

#[tokio::test]
async fn test_single_override_is_persisted() {
    let (store, mut session, ids) = seeded().await;
    let leaf = LeafAddress::new("specs", 1);

    let report = session
        .dispatch(Command::SetLeafOverride {
            leaf: leaf.clone(),
            revision_id: ids[0].clone(),
        })
        .await
        .unwrap();

    assert!(report.is_persisted());
    assert_eq!(headlines(&session), vec!["Hero v2", "Weight v2", "Size v1"]);
    assert_eq!(store.snapshot().overrides.len(), 1);
    assert_eq!(store.snapshot().overrides[0].leaf(), leaf);
}

#[tokio::test]
async fn test_partial_bulk_failure_keeps_other_calls() {
    let (store, mut session, ids) = seeded().await;
    let failing = LeafAddress::new("specs", 0);
    store.fail_on(StoreOp::SetOverride(failing.clone(), ids[2].clone()));

    let report = session
        .dispatch(Command::ApplyRevisionToAllLeaves {
            revision_id: ids[2].clone(),
        })
        .await
        .unwrap();

    assert_eq!(report.issued, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].call,
        StoreCall::SetOverride {
            leaf: failing.clone(),
            revision_id: ids[2].clone()
        }
    );

    // in-memory table is fully updated, the store holds the other two rows
    assert_eq!(session.state().overrides().len(), 3);
    assert_eq!(headlines(&session), vec!["Hero v3", "Weight v3", "Size v3"]);

    let stored: Vec<_> = store
        .snapshot()
        .overrides
        .iter()
        .map(|row| row.leaf())
        .collect();
    assert_eq!(stored.len(), 2);
    assert!(!stored.contains(&failing));
}

#[tokio::test]
async fn test_bulk_to_live_clears_everything() {
    let (store, mut session, ids) = seeded().await;
    session
        .dispatch(Command::ApplyRevisionToAllLeaves {
            revision_id: ids[0].clone(),
        })
        .await
        .unwrap();
    assert_eq!(store.snapshot().overrides.len(), 3);

    session
        .dispatch(Command::ApplyRevisionToAllLeaves {
            revision_id: ids[1].clone(),
        })
        .await
        .unwrap();

    assert!(session.state().overrides().is_empty());
    assert!(store.snapshot().overrides.is_empty());
}

#[tokio::test]
async fn test_reload_normalizes_against_new_live() {
    let (store, mut session, ids) = seeded().await;
    session
        .dispatch(Command::SetLeafOverride {
            leaf: LeafAddress::new("hero", 0),
            revision_id: ids[2].clone(),
        })
        .await
        .unwrap();

    store
        .set_live(TrackKind::RichContent, Some(ids[2].clone()))
        .unwrap();
    let report = session.refresh_live().await.unwrap();

    assert!(report.changed);
    assert_eq!(report.issued, 1);
    assert!(session.state().overrides().is_empty());
    assert!(store.snapshot().overrides.is_empty());

    let reloaded = EditSession::load(store.clone()).await.unwrap();
    assert!(reloaded.state().overrides().is_empty());
}

#[tokio::test]
async fn test_override_cleared_by_publish_stays_cleared_after_later_publish() {
    let (store, mut session, ids) = seeded().await;
    let hero = LeafAddress::new("hero", 0);
    session
        .dispatch(Command::SetLeafOverride {
            leaf: hero.clone(),
            revision_id: ids[0].clone(),
        })
        .await
        .unwrap();

    store
        .set_live(TrackKind::RichContent, Some(ids[0].clone()))
        .unwrap();
    session.refresh_live().await.unwrap();

    store
        .set_live(TrackKind::RichContent, Some(ids[2].clone()))
        .unwrap();
    session.refresh_live().await.unwrap();

    assert!(store.snapshot().overrides.is_empty());
    assert_eq!(headlines(&session)[0], "Hero v3");

    let reloaded = EditSession::load(store.clone()).await.unwrap();
    assert!(reloaded.state().overrides().is_empty());
    assert_eq!(headlines(&reloaded), vec!["Hero v3", "Weight v3", "Size v3"]);
}

#[tokio::test]
async fn test_load_clears_stored_rows_equal_to_live() {
    let (store, mut session, ids) = seeded().await;
    let hero = LeafAddress::new("hero", 0);
    session
        .dispatch(Command::SetLeafOverride {
            leaf: hero.clone(),
            revision_id: ids[2].clone(),
        })
        .await
        .unwrap();

    // publish behind the session's back
    store
        .set_live(TrackKind::RichContent, Some(ids[2].clone()))
        .unwrap();
    assert_eq!(store.snapshot().overrides.len(), 1);

    let reloaded = EditSession::load(store.clone()).await.unwrap();
    assert!(reloaded.state().overrides().is_empty());
    assert!(store.snapshot().overrides.is_empty());
    assert!(matches!(
        store.calls().last(),
        Some(StoreOp::ClearOverride(cleared)) if cleared == &hero
    ));
}

#[tokio::test]
async fn test_leaf_navigation_round_trip() {
    let (store, mut session, _ids) = seeded().await;
    let leaf = LeafAddress::new("hero", 0);

    // history of hero#0 is v3, v2, v1; live v2 sits at index 1
    let history = session.state().history(&leaf);
    assert_eq!(history.len(), 3);

    session
        .dispatch(Command::LeafStepOlder { leaf: leaf.clone() })
        .await
        .unwrap();
    assert_eq!(headlines(&session)[0], "Hero v1");

    session
        .dispatch(Command::LeafJumpToLive { leaf: leaf.clone() })
        .await
        .unwrap();
    assert_eq!(headlines(&session)[0], "Hero v2");
    assert!(store.snapshot().overrides.is_empty());
    assert!(matches!(
        store.calls().last(),
        Some(StoreOp::ClearOverride(cleared)) if cleared == &leaf
    ));
}

#[tokio::test]
async fn test_track_views_and_media() {
    let (_store, mut session, ids) = seeded().await;
    assert_eq!(session.state().view(TrackKind::Heading), TrackView::Empty);

    session
        .dispatch(Command::SetLeafOverride {
            leaf: LeafAddress::new("hero", 0),
            revision_id: ids[0].clone(),
        })
        .await
        .unwrap();

    let document = session.state().compose().unwrap();
    let references = media_references(&document);
    assert_eq!(references.len(), 3);
    assert_eq!(references[0].source, ids[0]);
    assert_eq!(references[1].source, ids[1]);
}

#[tokio::test]
async fn test_unknown_revision_issues_nothing() {
    let (store, mut session, _ids) = seeded().await;
    let before = store.calls().len();

    let result = session
        .dispatch(Command::ApplyRevisionToAllLeaves {
            revision_id: "missing".into(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(store.calls().len(), before);
}

#[tokio::test]
async fn test_set_live_pointers_command() {
    let (_store, mut session, ids) = seeded().await;
    let live = LivePointers::new().with(TrackKind::RichContent, ids[0].clone());

    let report = session
        .dispatch(Command::SetLivePointers { live })
        .await
        .unwrap();

    assert!(report.changed);
    assert_eq!(report.issued, 0);
    assert_eq!(headlines(&session), vec!["Hero v1", "Weight v1", "Size v1"]);
}
