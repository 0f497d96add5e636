#![cfg(test)]
use std::path::PathBuf;

use sea_orm::DatabaseConnection;
use models::db::{connect_and_migrate, DatabaseConfig};

/// Fresh in-memory SQLite database with all migrations applied.
/// Each call gets its own database, so tests never share rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    Ok(connect_and_migrate(&DatabaseConfig::in_memory()).await?)
}

/// Unique, not-yet-created directory under the system temp dir.
pub fn temp_data_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("card_{tag}_{}", uuid::Uuid::new_v4()))
}

/// Behaviour every `MessageStore` backend must share.
pub mod contract {
    use std::{collections::HashSet, sync::Arc};

    use uuid::Uuid;

    use crate::errors::ServiceError;
    use crate::messages::{cosmetics, Message, MessageDraft, MessagePatch, MessageStore};

    pub async fn run_all<S: MessageStore + 'static>(store: Arc<S>) {
        assert!(store.list().await.unwrap().is_empty(), "contract expects an empty store");
        create_then_list(store.as_ref()).await;
        rejects_blank_fields(store.as_ref()).await;
        keeps_supplied_cosmetics(store.as_ref()).await;
        update_changes_only_given_fields(store.as_ref()).await;
        update_missing_is_not_found(store.as_ref()).await;
        delete_is_idempotent(store.as_ref()).await;
        list_is_ordered(store.as_ref()).await;
    }

    async fn create_then_list(store: &dyn MessageStore) {
        let before = store.list().await.unwrap();
        let draft = MessageDraft::new("Sarah", "Happy Birthday!\n\nLove, S. 🎂")
            .with_images(vec!["data:image/png;base64,iVBORw0KGgo=".into()])
            .with_videos(vec!["https://www.youtube.com/watch?v=dQw4w9WgXcQ".into()]);
        let created = store.create(draft.clone()).await.unwrap();

        assert!(before.iter().all(|m| m.id != created.id));
        assert_eq!(created.name, draft.name);
        assert_eq!(created.text, draft.text);
        assert_eq!(Some(created.images.clone()), draft.images);
        assert_eq!(Some(created.videos.clone()), draft.videos);
        assert!(cosmetics::PALETTE.contains(&created.color.as_str()));
        assert!((-cosmetics::ROTATION_LIMIT..=cosmetics::ROTATION_LIMIT).contains(&created.rotation));

        let after = store.list().await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.iter().filter(|m| m.id == created.id).collect::<Vec<_>>(), vec![&created]);

        let json = serde_json::to_string(&created).unwrap();
        assert_eq!(serde_json::from_str::<Message>(&json).unwrap(), created);
    }

    async fn rejects_blank_fields(store: &dyn MessageStore) {
        let before = store.list().await.unwrap();
        for draft in [MessageDraft::new("", "text"), MessageDraft::new("name", "   ")] {
            assert!(matches!(store.create(draft).await, Err(ServiceError::Validation(_))));
        }
        assert_eq!(store.list().await.unwrap(), before);
    }

    async fn keeps_supplied_cosmetics(store: &dyn MessageStore) {
        let draft = MessageDraft { color: Some("bg-red-200".into()), rotation: Some(-7.25), ..MessageDraft::new("Kian", "hi") };
        let created = store.create(draft).await.unwrap();
        assert_eq!(created.color, "bg-red-200");
        assert_eq!(created.rotation, -7.25);
        assert!(created.images.is_empty() && created.videos.is_empty());
    }

    async fn update_changes_only_given_fields(store: &dyn MessageStore) {
        let original = store.create(MessageDraft::new("Mila", "first draft")).await.unwrap();

        let updated = store.update(original.id, MessagePatch::text("X")).await.unwrap();
        assert_eq!(updated, Message { text: "X".into(), ..original.clone() });

        let unchanged = store.update(original.id, MessagePatch::default()).await.unwrap();
        assert_eq!(unchanged, updated);

        let blank = MessagePatch { name: Some(" ".into()), text: Some("Y".into()), ..Default::default() };
        assert!(matches!(store.update(original.id, blank).await, Err(ServiceError::Validation(_))));

        let media = MessagePatch { images: Some(vec!["https://img.example/cake.jpg".into()]), ..Default::default() };
        let with_media = store.update(original.id, media).await.unwrap();
        assert_eq!(with_media.images, vec!["https://img.example/cake.jpg".to_string()]);
        assert_eq!(with_media.timestamp, original.timestamp);

        let stored = store.list().await.unwrap().into_iter().find(|m| m.id == original.id).unwrap();
        assert_eq!(stored, with_media);
    }

    async fn update_missing_is_not_found(store: &dyn MessageStore) {
        let before = store.list().await.unwrap();
        let res = store.update(Uuid::new_v4(), MessagePatch::text("hi")).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(store.list().await.unwrap(), before);
    }

    async fn delete_is_idempotent(store: &dyn MessageStore) {
        let created = store.create(MessageDraft::new("Temp", "to be removed")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.list().await.unwrap().iter().all(|m| m.id != created.id));
        assert!(!store.delete(Uuid::new_v4()).await.unwrap());
    }

    async fn list_is_ordered(store: &dyn MessageStore) {
        let all = store.list().await.unwrap();
        assert!(all.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        let ids: HashSet<_> = all.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), all.len());
    }

    /// `n` creates racing on one store: every record lands, ids stay unique and
    /// timestamps strictly increase in list order.
    pub async fn concurrent_creates<S: MessageStore + 'static>(store: Arc<S>, n: usize) {
        let handles: Vec<_> = (0..n)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(MessageDraft::new(format!("guest-{i}"), "congrats")).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), n);
        assert!(all.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        let ids: HashSet<_> = all.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), n);
    }
}

/// Behaviour every `UserStore` backend must share.
pub async fn user_contract<S: crate::users::UserStore>(store: std::sync::Arc<S>) {
    use crate::errors::ServiceError;
    use crate::users::{password::verify_password, NewUser};

    let input = NewUser { username: "richell".into(), password: "S3curePass!".into() };
    let created = store.create(input.clone()).await.unwrap();
    assert_ne!(created.password_hash, input.password);
    assert!(verify_password(&created, "S3curePass!"));
    assert!(!verify_password(&created, "wrong-password"));

    assert_eq!(store.get(created.id).await.unwrap(), Some(created.clone()));
    assert_eq!(store.find_by_username("richell").await.unwrap(), Some(created.clone()));
    assert_eq!(store.find_by_username("nobody").await.unwrap(), None);

    let dup = store.create(NewUser { password: "another-pass".into(), ..input }).await;
    assert!(matches!(dup, Err(ServiceError::Conflict(_))));

    let short = store.create(NewUser { username: "kian".into(), password: "short".into() }).await;
    assert!(matches!(short, Err(ServiceError::Validation(_))));

    store.create(NewUser { username: "anna".into(), password: "another-pass".into() }).await.unwrap();
    let names: Vec<_> = store.list().await.unwrap().into_iter().map(|u| u.username).collect();
    assert_eq!(names, ["anna", "richell"]);
}

/// `n` registrations of one username racing: exactly one wins, the rest are `Conflict`.
pub async fn concurrent_registrations<S: crate::users::UserStore + 'static>(store: std::sync::Arc<S>, n: usize) {
    use crate::errors::ServiceError;
    use crate::users::NewUser;

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store.create(NewUser { username: "mila".into(), password: format!("password-{i}") }).await
            })
        })
        .collect();

    let mut created = 0;
    for h in handles {
        match h.await.unwrap() {
            Ok(_) => created += 1,
            Err(ServiceError::Conflict(_)) => {}
            Err(other) => panic!("expected Conflict, got {other:?}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(store.list().await.unwrap().len(), 1);
}
