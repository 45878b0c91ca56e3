use quill_db::{source::group::Group, views::post_view::PostView};
use serde::{Deserialize, Serialize};

/// `mode` parses into a `ViewMode` and defaults to the global feed.
/// `group` names a group slug, `username` an author; each is required by
/// its mode and ignored by the others.
#[derive(Deserialize, Debug)]
pub struct GetFeed {
  pub mode: Option<String>,
  pub group: Option<String>,
  pub username: Option<String>,
  pub page: Option<i64>,
  pub auth: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct GetFeedResponse {
  pub posts: Vec<PostView>,
  pub page: i64,
  pub total_pages: i64,
  pub total_count: i64,
  pub has_next: bool,
  pub has_previous: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub group: Option<Group>,
}
