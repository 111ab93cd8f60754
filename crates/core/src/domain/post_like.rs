// PostLike Domain Model

use crate::domain::entity::{require_identifier, Entity};
use crate::domain::error::Result;
use serde::{Deserialize, Serialize};

/// PostLike ID (UUID v4 in production)
pub type PostLikeId = String;

/// A user liking a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLike {
    pub id: PostLikeId,
    pub user_id: String,
    pub post_id: String,
    pub liked_at: i64, // epoch ms
}

impl PostLike {
    /// Create a new like
    ///
    /// # Arguments
    ///
    /// * `id` - Unique like ID (injected, not generated)
    /// * `liked_at` - Timestamp in epoch ms (injected, not system time)
    /// * `user_id` - User giving the like
    /// * `post_id` - Post being liked
    pub fn new(
        id: impl Into<String>,
        liked_at: i64,
        user_id: impl Into<String>,
        post_id: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: require_identifier("id", id)?,
            user_id: require_identifier("user_id", user_id)?,
            post_id: require_identifier("post_id", post_id)?,
            liked_at,
        })
    }
}

impl Entity for PostLike {
    const KIND: &'static str = "post_like";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_like() {
        let like = PostLike::new("like-1", 1000, "user-1", "post-1").unwrap();
        assert_eq!(like.id(), "like-1");
        assert_eq!(like.user_id, "user-1");
        assert_eq!(like.post_id, "post-1");
        assert_eq!(like.liked_at, 1000);
    }

    #[test]
    fn test_rejects_missing_identifiers() {
        assert!(PostLike::new("", 1000, "user-1", "post-1").is_err());
        assert!(PostLike::new("like-1", 1000, "", "post-1").is_err());
        assert!(PostLike::new("like-1", 1000, "user-1", " ").is_err());
    }

    #[test]
    fn test_serializes_flat() {
        let like = PostLike::new("like-1", 1000, "user-1", "post-1").unwrap();
        let value = serde_json::to_value(&like).unwrap();
        assert_eq!(value["post_id"], "post-1");
        assert_eq!(value["liked_at"], 1000);
    }
}
