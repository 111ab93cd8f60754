// Like Post Use Case

use crate::application::executor::{Collaborators, SharedCollaborators, UseCaseExecutor};
use crate::domain::PostLike;
use crate::error::Result;
use crate::port::{IdProvider, TimeProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Like request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikePostRequest {
    pub user_id: String,
    pub post_id: String,
}

/// Execute like-post use case
///
/// The precondition is checked against `post_id`.
///
/// # Arguments
///
/// * `executor` - Use-case executor
/// * `id_provider` - ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `collaborators` - Post-exists check, like store, like publisher
/// * `req` - Like request
pub async fn execute(
    executor: &UseCaseExecutor,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    collaborators: &Collaborators<'_, PostLike>,
    req: LikePostRequest,
) -> Result<PostLike> {
    let LikePostRequest { user_id, post_id } = req;
    let subject_id = post_id.clone();

    executor
        .run(
            &subject_id,
            move || {
                PostLike::new(
                    id_provider.generate_id(),
                    time_provider.now_millis(),
                    user_id,
                    post_id,
                )
            },
            collaborators,
        )
        .await
}

/// Like service (constructor-injected form)
pub struct PostLikeService {
    executor: UseCaseExecutor,
    collaborators: SharedCollaborators<PostLike>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl PostLikeService {
    pub fn new(
        executor: UseCaseExecutor,
        collaborators: SharedCollaborators<PostLike>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            executor,
            collaborators,
            id_provider,
            time_provider,
        }
    }

    /// Like a post
    pub async fn like_post(&self, req: LikePostRequest) -> Result<PostLike> {
        execute(
            &self.executor,
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            &self.collaborators.borrow(),
            req,
        )
        .await
    }
}
