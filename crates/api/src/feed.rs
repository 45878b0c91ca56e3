use crate::{get_user_from_jwt_opt, Perform};
use actix_web::web::Data;
use log::debug;
use quill_api_common::{
  blocking,
  context::{QuillContext, GLOBAL_FEED_CACHE_KEY},
  feed::{GetFeed, GetFeedResponse},
};
use quill_db::{
  source::{group::{Group, Group_}, user::{User, User_}},
  views::post_view::{PagedPosts, PostQuery},
  ViewMode,
};
use quill_utils::{APIError, QuillError};
use std::str::FromStr;

fn feed_response(paged: PagedPosts, group: Option<Group>) -> GetFeedResponse {
  GetFeedResponse {
    posts: paged.posts,
    page: paged.page,
    total_pages: paged.total_pages,
    total_count: paged.total_count,
    has_next: paged.has_next,
    has_previous: paged.has_previous,
    group,
  }
}

#[async_trait::async_trait(?Send)]
impl Perform for GetFeed {
  type Response = GetFeedResponse;

  async fn perform(&self, context: &Data<QuillContext>) -> Result<GetFeedResponse, QuillError> {
    let data: &GetFeed = &self;
    let viewer = get_user_from_jwt_opt(&data.auth, context.pool()).await?;

    let mode = match ViewMode::from_str(data.mode.as_deref().unwrap_or("Global")) {
      Ok(mode) => mode,
      Err(_e) => return Err(APIError::validation("invalid_view_mode").into()),
    };
    let page = data.page;

    match mode {
      ViewMode::Global => {
        // Only the first page of the global feed sits behind the TTL
        // cache. Entries leave by expiry alone, so a fresh post shows up
        // here late while profile and post detail reads see it at once.
        let first_page = page.unwrap_or(1) <= 1;
        if first_page {
          if let Some(cached) = context.feed_cache().get(&GLOBAL_FEED_CACHE_KEY) {
            debug!("global feed page 1 served from cache");
            return Ok(cached);
          }
        }

        let paged = blocking(context.pool(), move |conn| {
          PostQuery {
            page,
            ..Default::default()
          }
          .list(conn)
        })
        .await??;

        let res = feed_response(paged, None);
        if first_page {
          context
            .feed_cache()
            .insert(GLOBAL_FEED_CACHE_KEY, res.clone());
        }
        Ok(res)
      }
      ViewMode::Group => {
        let slug = match &data.group {
          Some(slug) => slug.to_owned(),
          None => return Err(APIError::validation("group_slug_required").into()),
        };
        let group = match blocking(context.pool(), move |conn| {
          Group::read_from_slug(conn, &slug)
        })
        .await?
        {
          Ok(group) => group,
          Err(_e) => return Err(APIError::not_found("couldnt_find_group").into()),
        };

        let group_id = group.id;
        let paged = blocking(context.pool(), move |conn| {
          PostQuery {
            group_id: Some(group_id),
            page,
            ..Default::default()
          }
          .list(conn)
        })
        .await??;

        Ok(feed_response(paged, Some(group)))
      }
      ViewMode::Author => {
        let username = match &data.username {
          Some(username) => username.to_owned(),
          None => return Err(APIError::validation("username_required").into()),
        };
        let author = match blocking(context.pool(), move |conn| {
          User::read_from_name(conn, &username)
        })
        .await?
        {
          Ok(user) => user,
          Err(_e) => return Err(APIError::not_found("couldnt_find_user").into()),
        };

        let author_id = author.id;
        let paged = blocking(context.pool(), move |conn| {
          PostQuery {
            author_id: Some(author_id),
            page,
            ..Default::default()
          }
          .list(conn)
        })
        .await??;

        Ok(feed_response(paged, None))
      }
      ViewMode::Following => {
        let viewer = match viewer {
          Some(viewer) => viewer,
          None => return Err(APIError::not_logged_in().into()),
        };

        let viewer_id = viewer.id;
        let paged = blocking(context.pool(), move |conn| {
          PostQuery {
            followed_by: Some(viewer_id),
            page,
            ..Default::default()
          }
          .list(conn)
        })
        .await??;

        Ok(feed_response(paged, None))
      }
    }
  }
}
