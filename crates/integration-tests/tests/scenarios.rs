//! End-to-end scenarios: precondition / persist / publish against SQLite and
//! the in-process event channel.

mod common;

use std::sync::Arc;

use common::fixture;
use usecase_core::application::{
    like_post, open_account, Collaborators, LikePostRequest, OpenAccountRequest,
    PostLikeService, SharedCollaborators, UseCaseExecutor,
};
use usecase_core::domain::{Account, PostLike};
use usecase_core::port::event_publisher::mocks::MockEventPublisher;
use usecase_core::port::{store_fn, CollaboratorError, EventPublisher};
use usecase_core::{Step, UseCaseError};

fn like_request(user: &str, post: &str) -> LikePostRequest {
    LikePostRequest {
        user_id: user.to_string(),
        post_id: post.to_string(),
    }
}

/// Scenario 1: precondition holds, persist echoes, publish succeeds
#[tokio::test]
async fn test_like_post_happy_path() {
    let mut fx = fixture().await;
    fx.post_store.register_post("post-1").await.unwrap();

    let publisher: Arc<dyn EventPublisher<PostLike>> = Arc::new(fx.publisher.clone());
    let service = PostLikeService::new(
        UseCaseExecutor::default(),
        SharedCollaborators::new(fx.post_store.clone(), fx.post_store.clone(), publisher),
        fx.id_provider.clone(),
        fx.time_provider.clone(),
    );

    let like = service
        .like_post(like_request("user-1", "post-1"))
        .await
        .unwrap();

    // Result equals the stored entity
    assert_eq!(fx.post_store.find_like(&like.id).await.unwrap(), Some(like.clone()));

    // Exactly one event, for the persisted entity
    let event = fx.events.recv().await.unwrap();
    assert_eq!(event.event_type, "post_like.created");
    assert_eq!(event.decode::<PostLike>().unwrap(), like);
    assert!(fx.events.try_recv().is_err());
}

/// Scenario 2: precondition false -> nothing persisted, nothing published
#[tokio::test]
async fn test_like_unknown_post() {
    let mut fx = fixture().await;

    let executor = UseCaseExecutor::default();
    let collaborators = Collaborators::<PostLike>::new(
        fx.post_store.as_ref(),
        fx.post_store.as_ref(),
        &fx.publisher,
    );

    let err = like_post::execute(
        &executor,
        fx.id_provider.as_ref(),
        fx.time_provider.as_ref(),
        &collaborators,
        like_request("user-1", "ghost"),
    )
    .await
    .unwrap_err();

    match err {
        UseCaseError::PreconditionFailed { subject_id, reason } => {
            assert_eq!(subject_id, "ghost");
            assert_eq!(reason, "post does not exist");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(fx.post_store.count_likes("ghost").await.unwrap(), 0);
    assert!(fx.events.try_recv().is_err());
}

/// Scenario 3: persist fails -> PersistenceFailed, no publish
#[tokio::test]
async fn test_persist_failure_skips_publish() {
    let mut fx = fixture().await;
    fx.post_store.register_post("post-1").await.unwrap();

    let failing_store = store_fn(|_like: PostLike| async move {
        Err(CollaboratorError::Unavailable("replica offline".to_string()))
    });
    let collaborators =
        Collaborators::<PostLike>::new(fx.post_store.as_ref(), &failing_store, &fx.publisher);

    let err = like_post::execute(
        &UseCaseExecutor::default(),
        fx.id_provider.as_ref(),
        fx.time_provider.as_ref(),
        &collaborators,
        like_request("user-1", "post-1"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, UseCaseError::PersistenceFailed(_)));
    assert_eq!(err.step(), Step::Persist);
    assert!(fx.events.try_recv().is_err());
}

/// Scenario 4: publish fails -> PublishFailed, entity stays committed
#[tokio::test]
async fn test_publish_failure_leaves_like_committed() {
    let fx = fixture().await;
    fx.post_store.register_post("post-1").await.unwrap();

    let failing_publisher = MockEventPublisher::<PostLike>::new_fail(
        CollaboratorError::ChannelClosed("bus".to_string()),
    );
    let collaborators = Collaborators::<PostLike>::new(
        fx.post_store.as_ref(),
        fx.post_store.as_ref(),
        &failing_publisher,
    );

    let err = like_post::execute(
        &UseCaseExecutor::default(),
        fx.id_provider.as_ref(),
        fx.time_provider.as_ref(),
        &collaborators,
        like_request("user-1", "post-1"),
    )
    .await
    .unwrap_err();

    let UseCaseError::PublishFailed { entity_id, .. } = &err else {
        panic!("unexpected error: {:?}", err);
    };
    assert!(err.is_committed());
    assert!(fx.post_store.find_like(entity_id).await.unwrap().is_some());
    assert_eq!(failing_publisher.call_count(), 1);
}

/// Scenario 4 with compensation: consumer gone, like removed again
#[tokio::test]
async fn test_publish_failure_with_compensation() {
    let fx = fixture().await;
    fx.post_store.register_post("post-1").await.unwrap();

    let publisher = fx.publisher.clone();
    drop(fx.events); // no consumer -> publish fails

    let collaborators = Collaborators::<PostLike>::new(
        fx.post_store.as_ref(),
        fx.post_store.as_ref(),
        &publisher,
    )
    .with_compensation(fx.post_store.as_ref());

    let err = like_post::execute(
        &UseCaseExecutor::default(),
        fx.id_provider.as_ref(),
        fx.time_provider.as_ref(),
        &collaborators,
        like_request("user-1", "post-1"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, UseCaseError::PublishFailed { compensated: true, .. }));
    assert_eq!(fx.post_store.count_likes("post-1").await.unwrap(), 0);
}

/// Same logical ids twice -> two distinct likes
#[tokio::test]
async fn test_repeated_like_is_not_idempotent() {
    let mut fx = fixture().await;
    fx.post_store.register_post("post-1").await.unwrap();

    let collaborators = Collaborators::<PostLike>::new(
        fx.post_store.as_ref(),
        fx.post_store.as_ref(),
        &fx.publisher,
    );
    let executor = UseCaseExecutor::default();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let like = like_post::execute(
            &executor,
            fx.id_provider.as_ref(),
            fx.time_provider.as_ref(),
            &collaborators,
            like_request("user-1", "post-1"),
        )
        .await
        .unwrap();
        ids.push(like.id);
    }

    assert_ne!(ids[0], ids[1]);
    assert_eq!(fx.post_store.count_likes("post-1").await.unwrap(), 2);
    assert!(fx.events.recv().await.is_some());
    assert!(fx.events.recv().await.is_some());
}

/// Open account end-to-end, then close it as a new entity
#[tokio::test]
async fn test_open_then_close_account() {
    let mut fx = fixture().await;
    fx.account_store.register_customer("cust-1").await.unwrap();

    let collaborators = Collaborators::<Account>::new(
        fx.account_store.as_ref(),
        fx.account_store.as_ref(),
        &fx.publisher,
    );

    let account = open_account::execute(
        &UseCaseExecutor::default(),
        fx.id_provider.as_ref(),
        fx.time_provider.as_ref(),
        &collaborators,
        OpenAccountRequest {
            customer_id: "cust-1".to_string(),
            product_code: "SAVINGS".to_string(),
        },
    )
    .await
    .unwrap();

    let event = fx.events.recv().await.unwrap();
    assert_eq!(event.event_type, "account.created");
    assert_eq!(event.entity_id, account.id);

    // Update modelled as a new entity, persisted through the same store
    let closed = account.close(account.opened_at + 1).unwrap();
    let stored = usecase_core::port::EntityStore::persist(fx.account_store.as_ref(), closed.clone())
        .await
        .unwrap();
    assert_eq!(stored, closed);
    assert_eq!(
        fx.account_store.find_account(&account.id).await.unwrap(),
        Some(closed)
    );
}

/// Open account for an unregistered customer
#[tokio::test]
async fn test_open_account_unknown_customer() {
    let mut fx = fixture().await;

    let collaborators = Collaborators::<Account>::new(
        fx.account_store.as_ref(),
        fx.account_store.as_ref(),
        &fx.publisher,
    );

    let err = open_account::execute(
        &UseCaseExecutor::default(),
        fx.id_provider.as_ref(),
        fx.time_provider.as_ref(),
        &collaborators,
        OpenAccountRequest {
            customer_id: "nobody".to_string(),
            product_code: "SAVINGS".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.step(), Step::Precondition);
    assert!(fx.events.try_recv().is_err());
}
