use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    helpers::song_helpers::find_song,
    middlewares::mw_auth::Ctx,
    models::comment::{Comment, CreateCommentRequest, ModifyCommentRequest},
    services::catalog::Catalog,
};

pub struct CommentService;

impl CommentService {
    /// Open to every caller.
    pub async fn create_comment(
        catalog: &Catalog,
        song_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment> {
        find_song(catalog.store.as_ref(), song_id).await?;

        let comment = Comment {
            id: Uuid::new_v4().simple().to_string(),
            song_id: song_id.to_string(),
            text: request.text,
            nickname: request.nickname,
            date: Utc::now(),
        };
        catalog.store.put_comment(&comment).await?;

        tracing::debug!("comment {} on song {} by {}", comment.id, song_id, comment.nickname);
        Ok(comment)
    }

    pub async fn modify_comment(
        catalog: &Catalog,
        ctx: &Ctx,
        comment_id: &str,
        request: ModifyCommentRequest,
    ) -> Result<Comment> {
        ctx.require_superuser()?;

        let mut comment = Self::find_comment(catalog, comment_id).await?;
        if let Some(text) = request.text {
            comment.text = text;
        }
        if let Some(nickname) = request.nickname {
            comment.nickname = nickname;
        }
        catalog.store.put_comment(&comment).await?;

        Ok(comment)
    }

    pub async fn delete_comment(catalog: &Catalog, ctx: &Ctx, comment_id: &str) -> Result<()> {
        ctx.require_superuser()?;

        Self::find_comment(catalog, comment_id).await?;
        catalog.store.delete_comment(comment_id).await
    }

    async fn find_comment(catalog: &Catalog, comment_id: &str) -> Result<Comment> {
        catalog
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| Error::CommentNotFound {
                id: comment_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::song_service::SongService,
        store::CatalogStore,
        test_support::{sample_song, test_catalog},
    };

    fn request(text: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            text: text.to_string(),
            nickname: "fan".to_string(),
        }
    }

    #[tokio::test]
    async fn test_anyone_can_comment_and_comments_show_oldest_first() {
        let t = test_catalog();
        t.store.put_song(&sample_song("s1", "One", 1)).await.unwrap();

        let first = CommentService::create_comment(&t.catalog, "s1", request("first"))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = CommentService::create_comment(&t.catalog, "s1", request("second"))
            .await
            .unwrap();

        let view = SongService::get_song(&t.catalog, "s1").await.unwrap();
        let comments = view.comments.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, first.id);
        assert_eq!(comments[1].id, second.id);
    }

    #[tokio::test]
    async fn test_comment_on_missing_song_is_not_found() {
        let t = test_catalog();
        let err = CommentService::create_comment(&t.catalog, "nope", request("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SongNotFound { .. }));
    }

    #[tokio::test]
    async fn test_modify_keeps_the_date_and_needs_superuser() {
        let t = test_catalog();
        t.store.put_song(&sample_song("s1", "One", 1)).await.unwrap();
        let comment = CommentService::create_comment(&t.catalog, "s1", request("typo"))
            .await
            .unwrap();

        let edit = ModifyCommentRequest {
            text: Some("fixed".into()),
            nickname: None,
        };
        let err = CommentService::modify_comment(&t.catalog, &Ctx::anonymous(), &comment.id, edit.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));

        let modified = CommentService::modify_comment(&t.catalog, &Ctx::superuser("admin"), &comment.id, edit)
            .await
            .unwrap();
        assert_eq!(modified.text, "fixed");
        assert_eq!(modified.nickname, "fan");
        assert_eq!(modified.date, comment.date);
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let t = test_catalog();
        t.store.put_song(&sample_song("s1", "One", 1)).await.unwrap();
        let comment = CommentService::create_comment(&t.catalog, "s1", request("bye"))
            .await
            .unwrap();

        CommentService::delete_comment(&t.catalog, &Ctx::superuser("admin"), &comment.id)
            .await
            .unwrap();

        assert!(t.store.get_comment(&comment.id).await.unwrap().is_none());
        assert!(matches!(
            CommentService::delete_comment(&t.catalog, &Ctx::superuser("admin"), &comment.id).await,
            Err(Error::CommentNotFound { .. })
        ));
    }
}
