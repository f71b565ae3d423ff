use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    middlewares::mw_auth::Ctx,
    models::{
        pagination::UpdatesQuery,
        update::{CreateUpdateRequest, ModifyUpdateRequest, Update, UpdateView},
    },
    services::{catalog::Catalog, resolver::Resolver},
    store::dedup_ids,
};

pub struct UpdateService;

impl UpdateService {
    /// `updates[start..count]`, newest first.
    pub async fn get_updates(catalog: &Catalog, query: &UpdatesQuery) -> Result<Vec<UpdateView>> {
        let updates = catalog
            .store
            .list_updates(query.start, query.limit())
            .await?;

        let mut views = Vec::with_capacity(updates.len());
        for update in updates {
            views.push(Resolver::update_view(catalog.store.as_ref(), update).await?);
        }
        Ok(views)
    }

    pub async fn create_update(
        catalog: &Catalog,
        ctx: &Ctx,
        request: CreateUpdateRequest,
    ) -> Result<UpdateView> {
        ctx.require_superuser()?;

        let update = Update {
            id: Uuid::new_v4().simple().to_string(),
            title: request.title,
            content: request.content,
            date: Utc::now(),
            song_ids: dedup_ids(&request.songs),
            album_ids: dedup_ids(&request.albums),
        };
        catalog.store.put_update(&update).await?;

        tracing::info!("published update {} ({})", update.id, update.title);

        Resolver::update_view(catalog.store.as_ref(), update).await
    }

    /// Every save moves the update to the top of the feed.
    pub async fn modify_update(
        catalog: &Catalog,
        ctx: &Ctx,
        update_id: &str,
        request: ModifyUpdateRequest,
    ) -> Result<UpdateView> {
        ctx.require_superuser()?;

        let mut update = Self::find_update(catalog, update_id).await?;
        if let Some(title) = request.title {
            update.title = title;
        }
        if let Some(content) = request.content {
            update.content = content;
        }
        if let Some(songs) = &request.songs {
            update.song_ids = dedup_ids(songs);
        }
        if let Some(albums) = &request.albums {
            update.album_ids = dedup_ids(albums);
        }
        update.date = Utc::now();
        catalog.store.put_update(&update).await?;

        Resolver::update_view(catalog.store.as_ref(), update).await
    }

    pub async fn delete_update(catalog: &Catalog, ctx: &Ctx, update_id: &str) -> Result<()> {
        ctx.require_superuser()?;

        Self::find_update(catalog, update_id).await?;
        catalog.store.delete_update(update_id).await
    }

    async fn find_update(catalog: &Catalog, update_id: &str) -> Result<Update> {
        catalog
            .store
            .get_update(update_id)
            .await?
            .ok_or_else(|| Error::UpdateNotFound {
                id: update_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        store::CatalogStore,
        test_support::{sample_album, test_catalog},
    };
    use std::time::Duration;

    fn admin() -> Ctx {
        Ctx::superuser("admin")
    }

    fn request(title: &str) -> CreateUpdateRequest {
        CreateUpdateRequest {
            title: title.to_string(),
            content: format!("{title} body"),
            songs: Vec::new(),
            albums: Vec::new(),
        }
    }

    async fn publish(t: &crate::test_support::TestCatalog, titles: &[&str]) -> Vec<String> {
        let mut ids = Vec::new();
        for title in titles {
            let view = UpdateService::create_update(&t.catalog, &admin(), request(title))
                .await
                .unwrap();
            ids.push(view.id);
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        ids
    }

    fn titles(views: &[UpdateView]) -> Vec<&str> {
        views.iter().map(|view| view.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_feed_is_a_newest_first_slice() {
        let t = test_catalog();
        publish(&t, &["u1", "u2", "u3", "u4"]).await;

        let all = UpdateService::get_updates(&t.catalog, &UpdatesQuery::default())
            .await
            .unwrap();
        assert_eq!(titles(&all), vec!["u4", "u3", "u2", "u1"]);

        let query = UpdatesQuery {
            start: 1,
            count: Some(3),
        };
        let slice = UpdateService::get_updates(&t.catalog, &query).await.unwrap();
        assert_eq!(titles(&slice), vec!["u3", "u2"]);

        let query = UpdatesQuery {
            start: 3,
            count: Some(2),
        };
        assert!(UpdateService::get_updates(&t.catalog, &query)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_modify_moves_update_to_the_top() {
        let t = test_catalog();
        let ids = publish(&t, &["old", "new"]).await;

        let request = ModifyUpdateRequest {
            content: Some("edited".into()),
            ..Default::default()
        };
        let view = UpdateService::modify_update(&t.catalog, &admin(), &ids[0], request)
            .await
            .unwrap();
        assert_eq!(view.title, "old");
        assert_eq!(view.content, "edited");

        let feed = UpdateService::get_updates(&t.catalog, &UpdatesQuery::default())
            .await
            .unwrap();
        assert_eq!(titles(&feed), vec!["old", "new"]);
    }

    #[tokio::test]
    async fn test_references_are_expanded_and_dangling_ones_dropped() {
        let t = test_catalog();
        t.store.put_album(&sample_album("a1", "Record")).await.unwrap();

        let mut create = request("release");
        create.albums = vec!["a1".into(), "a1".into(), "deleted".into()];
        let view = UpdateService::create_update(&t.catalog, &admin(), create)
            .await
            .unwrap();

        assert_eq!(view.references_albums.len(), 1);
        assert_eq!(view.references_albums[0].title, "Record");
        assert!(view.references_songs.is_empty());
    }

    #[tokio::test]
    async fn test_updates_need_superuser() {
        let t = test_catalog();
        let err = UpdateService::create_update(&t.catalog, &Ctx::anonymous(), request("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));

        let ids = publish(&t, &["kept"]).await;
        let err = UpdateService::delete_update(&t.catalog, &Ctx::anonymous(), &ids[0])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
        assert!(t.store.get_update(&ids[0]).await.unwrap().is_some());

        UpdateService::delete_update(&t.catalog, &admin(), &ids[0])
            .await
            .unwrap();
        assert!(matches!(
            UpdateService::delete_update(&t.catalog, &admin(), &ids[0]).await,
            Err(Error::UpdateNotFound { .. })
        ));
    }
}
