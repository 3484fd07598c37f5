//! Service-level coverage of the visibility, filtering, and lifecycle
//! rules, running against the in-memory store.

use std::sync::Arc;

use codesnippets_backend::errors::ServiceError;
use codesnippets_backend::services::{CreateSnippet, SnippetFilters, SnippetService, UpdateSnippet};
use codesnippets_backend::store::memory::MemoryStore;
use uuid::Uuid;

fn service() -> SnippetService {
    SnippetService::new(Arc::new(MemoryStore::new()))
}

fn new_snippet(title: &str, language: &str, is_public: bool, tags: &[&str]) -> CreateSnippet {
    CreateSnippet {
        title: title.to_string(),
        description: String::new(),
        code: "x".to_string(),
        language: language.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_public,
    }
}

fn filters() -> SnippetFilters {
    SnippetFilters::default()
}

fn tag_filter(tags: &[&str]) -> SnippetFilters {
    SnippetFilters {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..SnippetFilters::default()
    }
}

#[actix_web::test]
async fn private_snippets_never_leak_to_other_users() {
    let service = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let t1 = service
        .create(owner, new_snippet("t1", "python", false, &[]))
        .await
        .unwrap();

    let seen_by_stranger = service.list(stranger, filters()).await.unwrap();
    assert!(seen_by_stranger.iter().all(|s| s.id != t1.id));

    let seen_by_owner = service.list(owner, filters()).await.unwrap();
    assert!(seen_by_owner.iter().any(|s| s.id == t1.id));

    // Reads hide existence: the stranger cannot tell t1 exists at all.
    assert!(matches!(
        service.get(stranger, t1.id).await,
        Err(ServiceError::NotFound)
    ));
}

#[actix_web::test]
async fn owner_sees_own_snippets_regardless_of_visibility() {
    let service = service();
    let owner = Uuid::new_v4();

    let private = service
        .create(owner, new_snippet("private", "rust", false, &[]))
        .await
        .unwrap();
    let public = service
        .create(owner, new_snippet("public", "rust", true, &[]))
        .await
        .unwrap();

    let listed = service.list(owner, filters()).await.unwrap();
    assert!(listed.iter().any(|s| s.id == private.id));
    assert!(listed.iter().any(|s| s.id == public.id));
}

#[actix_web::test]
async fn tag_filter_requires_every_listed_tag() {
    let service = service();
    let owner = Uuid::new_v4();
    let viewer = Uuid::new_v4();

    let s = service
        .create(owner, new_snippet("useFetch", "javascript", true, &["react", "hooks"]))
        .await
        .unwrap();
    service
        .create(owner, new_snippet("only react", "javascript", true, &["react"]))
        .await
        .unwrap();

    let both = service.list(viewer, tag_filter(&["react", "hooks"])).await.unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, s.id);

    let react = service.list(viewer, tag_filter(&["react"])).await.unwrap();
    assert_eq!(react.len(), 2);

    assert!(service.list(viewer, tag_filter(&["vue"])).await.unwrap().is_empty());
    assert!(service
        .list(viewer, tag_filter(&["react", "vue"]))
        .await
        .unwrap()
        .is_empty());
}

#[actix_web::test]
async fn language_all_is_a_sentinel_not_a_match_value() {
    let service = service();
    let owner = Uuid::new_v4();
    let viewer = Uuid::new_v4();

    service
        .create(owner, new_snippet("py", "python", true, &[]))
        .await
        .unwrap();
    service
        .create(owner, new_snippet("js", "javascript", true, &[]))
        .await
        .unwrap();

    let language = |value: &str| SnippetFilters {
        language: Some(value.to_string()),
        ..SnippetFilters::default()
    };

    assert_eq!(service.list(viewer, language("All")).await.unwrap().len(), 2);

    let python_only = service.list(viewer, language("python")).await.unwrap();
    assert_eq!(python_only.len(), 1);
    assert_eq!(python_only[0].title, "py");

    // An unsupported filter value matches nothing rather than erroring.
    assert!(service.list(viewer, language("cobol")).await.unwrap().is_empty());
}

#[actix_web::test]
async fn search_matches_case_insensitively_across_fields() {
    let service = service();
    let owner = Uuid::new_v4();

    service
        .create(
            owner,
            CreateSnippet {
                title: "Binary search".to_string(),
                description: "Classic divide and conquer".to_string(),
                code: "fn bisect() {}".to_string(),
                language: "rust".to_string(),
                tags: vec!["algorithms".to_string()],
                is_public: true,
            },
        )
        .await
        .unwrap();

    let search = |value: &str| SnippetFilters {
        search: Some(value.to_string()),
        ..SnippetFilters::default()
    };

    for needle in ["BINARY", "conquer", "bisect", "ALGO"] {
        let hits = service.list(owner, search(needle)).await.unwrap();
        assert_eq!(hits.len(), 1, "search {needle:?} should match");
    }
    assert!(service.list(owner, search("quicksort")).await.unwrap().is_empty());
}

#[actix_web::test]
async fn favorite_toggle_round_trips() {
    let service = service();
    let owner = Uuid::new_v4();
    let fan = Uuid::new_v4();

    let s = service
        .create(owner, new_snippet("t", "go", true, &[]))
        .await
        .unwrap();
    assert!(s.favorites.is_empty());

    let favorited = service.toggle_favorite(fan, s.id).await.unwrap();
    assert_eq!(favorited.favorites, vec![fan]);

    let unfavorited = service.toggle_favorite(fan, s.id).await.unwrap();
    assert_eq!(unfavorited.favorites, s.favorites);
}

#[actix_web::test]
async fn owner_may_favorite_their_own_snippet() {
    let service = service();
    let owner = Uuid::new_v4();

    let s = service
        .create(owner, new_snippet("t", "go", false, &[]))
        .await
        .unwrap();
    let favorited = service.toggle_favorite(owner, s.id).await.unwrap();
    assert_eq!(favorited.favorites, vec![owner]);
}

#[actix_web::test]
async fn favoriting_requires_read_access() {
    let service = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let private = service
        .create(owner, new_snippet("t", "go", false, &[]))
        .await
        .unwrap();

    // Indistinguishable from a missing snippet.
    assert!(matches!(
        service.toggle_favorite(stranger, private.id).await,
        Err(ServiceError::NotFound)
    ));
    let unchanged = service.get(owner, private.id).await.unwrap();
    assert!(unchanged.favorites.is_empty());
}

#[actix_web::test]
async fn updates_never_touch_owner_favorites_or_created_at() {
    let service = service();
    let owner = Uuid::new_v4();
    let fan = Uuid::new_v4();

    let s = service
        .create(owner, new_snippet("before", "ruby", true, &[]))
        .await
        .unwrap();
    service.toggle_favorite(fan, s.id).await.unwrap();

    let updated = service
        .update(
            owner,
            s.id,
            UpdateSnippet {
                title: Some("after".to_string()),
                is_public: Some(false),
                ..UpdateSnippet::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "after");
    assert!(!updated.is_public);
    assert_eq!(updated.owner_id, owner);
    assert_eq!(updated.favorites, vec![fan]);
    assert_eq!(updated.created_at, s.created_at);
}

#[actix_web::test]
async fn unauthorized_mutations_are_denied_and_leave_the_snippet_intact() {
    let service = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let s = service
        .create(owner, new_snippet("t1", "python", true, &[]))
        .await
        .unwrap();

    let update = service
        .update(
            stranger,
            s.id,
            UpdateSnippet {
                title: Some("hack".to_string()),
                ..UpdateSnippet::default()
            },
        )
        .await;
    assert!(matches!(update, Err(ServiceError::Denied(_))));

    let delete = service.delete(stranger, s.id).await;
    assert!(matches!(delete, Err(ServiceError::Denied(_))));

    let unchanged = service.get(owner, s.id).await.unwrap();
    assert_eq!(unchanged.title, "t1");
}

#[actix_web::test]
async fn listings_are_newest_first() {
    let service = service();
    let owner = Uuid::new_v4();

    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        let s = service
            .create(owner, new_snippet(title, "sql", false, &[]))
            .await
            .unwrap();
        ids.push(s.id);
    }

    let listed = service.list(owner, filters()).await.unwrap();
    let listed_ids: Vec<_> = listed.iter().map(|s| s.id).collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);

    let newest = service
        .create(owner, new_snippet("fourth", "sql", false, &[]))
        .await
        .unwrap();
    let relisted = service.list(owner, filters()).await.unwrap();
    assert_eq!(relisted[0].id, newest.id);
}

#[actix_web::test]
async fn visibility_filter_combines_with_ownership() {
    let service = service();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let private = service
        .create(owner, new_snippet("private", "css", false, &[]))
        .await
        .unwrap();
    service
        .create(owner, new_snippet("public", "css", true, &[]))
        .await
        .unwrap();

    let private_only = SnippetFilters {
        is_public: Some(false),
        ..SnippetFilters::default()
    };

    let own = service.list(owner, private_only.clone()).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, private.id);

    // Asking for private snippets does not bypass the ownership rule.
    assert!(service.list(stranger, private_only).await.unwrap().is_empty());
}

#[actix_web::test]
async fn create_rejects_invalid_fields_before_persisting() {
    let service = service();
    let owner = Uuid::new_v4();

    let cases = [
        new_snippet("", "python", false, &[]),
        new_snippet(&"x".repeat(101), "python", false, &[]),
        new_snippet("t", "brainfuck", false, &[]),
        CreateSnippet {
            code: "   ".to_string(),
            ..new_snippet("t", "python", false, &[])
        },
        new_snippet("t", "python", false, &["y".repeat(51).as_str()]),
    ];
    for case in cases {
        assert!(matches!(
            service.create(owner, case).await,
            Err(ServiceError::Validation { .. })
        ));
    }
    assert!(service.list(owner, filters()).await.unwrap().is_empty());
}

#[actix_web::test]
async fn update_applies_the_same_field_rules_as_create() {
    let service = service();
    let owner = Uuid::new_v4();

    let s = service
        .create(owner, new_snippet("t", "python", false, &[]))
        .await
        .unwrap();

    let bad = service
        .update(
            owner,
            s.id,
            UpdateSnippet {
                language: Some("brainfuck".to_string()),
                ..UpdateSnippet::default()
            },
        )
        .await;
    assert!(matches!(bad, Err(ServiceError::Validation { .. })));

    let unchanged = service.get(owner, s.id).await.unwrap();
    assert_eq!(unchanged.language, s.language);
}

#[actix_web::test]
async fn delete_removes_the_record_entirely() {
    let service = service();
    let owner = Uuid::new_v4();

    let s = service
        .create(owner, new_snippet("t", "html", true, &[]))
        .await
        .unwrap();

    service.delete(owner, s.id).await.unwrap();
    assert!(matches!(
        service.get(owner, s.id).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        service.delete(owner, s.id).await,
        Err(ServiceError::NotFound)
    ));
}

#[actix_web::test]
async fn operations_on_missing_ids_report_not_found() {
    let service = service();
    let user = Uuid::new_v4();
    let missing = Uuid::new_v4();

    assert!(matches!(
        service.get(user, missing).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        service.update(user, missing, UpdateSnippet::default()).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        service.delete(user, missing).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        service.toggle_favorite(user, missing).await,
        Err(ServiceError::NotFound)
    ));
}
