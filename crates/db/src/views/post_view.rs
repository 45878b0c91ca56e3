use crate::{
  pagination::{page_bounds, FEED_PAGE_SIZE},
  schema::{group_, post, user_},
  source::{group::Group, post::Post, user::User, user_follower::UserFollower},
  views::ViewToVec,
  GroupId,
  PostId,
  UserId,
};
use diesel::{
  dsl::count_star,
  result::Error,
  ExpressionMethods,
  NullableExpressionMethods,
  QueryDsl,
  RunQueryDsl,
  SqliteConnection,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PostView {
  pub post: Post,
  pub author: User,
  pub group: Option<Group>,
}

type PostViewTuple = (Post, User, Option<Group>);

impl PostView {
  pub fn read(conn: &mut SqliteConnection, post_id: PostId) -> Result<Self, Error> {
    let (post, author, group) = post::table
      .find(post_id)
      .inner_join(user_::table)
      .left_join(group_::table)
      .select((
        post::all_columns,
        user_::all_columns,
        group_::all_columns.nullable(),
      ))
      .first::<PostViewTuple>(conn)?;

    Ok(PostView {
      post,
      author,
      group,
    })
  }
}

/// One slice of a feed plus the numbers the pager needs.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PagedPosts {
  pub posts: Vec<PostView>,
  pub page: i64,
  pub total_pages: i64,
  pub total_count: i64,
  pub has_next: bool,
  pub has_previous: bool,
}

/// Every feed mode funnels through this query; a mode is just a choice of
/// filters. Newest first, id as tie-break, so pagination stays
/// deterministic when timestamps collide at second granularity.
#[derive(Default, Clone)]
pub struct PostQuery {
  pub author_id: Option<UserId>,
  pub group_id: Option<GroupId>,
  pub followed_by: Option<UserId>,
  pub page: Option<i64>,
}

impl PostQuery {
  pub fn list(self, conn: &mut SqliteConnection) -> Result<PagedPosts, Error> {
    let followed_ids = match self.followed_by {
      Some(for_follower_id) => Some(UserFollower::following_ids(conn, for_follower_id)?),
      None => None,
    };

    let mut count_query = post::table.select(count_star()).into_boxed();
    if let Some(for_author_id) = self.author_id {
      count_query = count_query.filter(post::author_id.eq(for_author_id));
    }
    if let Some(for_group_id) = self.group_id {
      count_query = count_query.filter(post::group_id.eq(for_group_id));
    }
    if let Some(ids) = &followed_ids {
      count_query = count_query.filter(post::author_id.eq_any(ids.clone()));
    }
    let total_count = count_query.first::<i64>(conn)?;

    // Clamp before computing the offset, so an out-of-range page lands on
    // the last page instead of coming back empty.
    let (page, total_pages, offset) = page_bounds(self.page, total_count);

    let mut query = post::table
      .inner_join(user_::table)
      .left_join(group_::table)
      .select((
        post::all_columns,
        user_::all_columns,
        group_::all_columns.nullable(),
      ))
      .into_boxed();
    if let Some(for_author_id) = self.author_id {
      query = query.filter(post::author_id.eq(for_author_id));
    }
    if let Some(for_group_id) = self.group_id {
      query = query.filter(post::group_id.eq(for_group_id));
    }
    if let Some(ids) = followed_ids {
      query = query.filter(post::author_id.eq_any(ids));
    }

    let res = query
      .order_by(post::published.desc())
      .then_order_by(post::id.desc())
      .limit(FEED_PAGE_SIZE)
      .offset(offset)
      .load::<PostViewTuple>(conn)?;

    Ok(PagedPosts {
      posts: PostView::to_vec(res),
      page,
      total_pages,
      total_count,
      has_next: page < total_pages,
      has_previous: page > 1,
    })
  }
}

impl ViewToVec for PostView {
  type DbTuple = PostViewTuple;
  fn to_vec(posts: Vec<Self::DbTuple>) -> Vec<Self> {
    posts
      .into_iter()
      .map(|a| Self {
        post: a.0,
        author: a.1,
        group: a.2,
      })
      .collect::<Vec<Self>>()
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    establish_unpooled_connection,
    source::{
      group::{Group, GroupInsertForm},
      post::{Post, PostInsertForm},
      user::{User, UserInsertForm},
      user_follower::{FollowForm, UserFollower},
    },
    views::post_view::{PostQuery, PostView},
    Crud,
    Followable,
    UserId,
  };
  use chrono::{Duration, NaiveDate};
  use diesel::SqliteConnection;
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  fn insert_post_at(
    conn: &mut SqliteConnection,
    author_id: UserId,
    text: &str,
    seconds_offset: i64,
  ) -> Post {
    let base = NaiveDate::from_ymd_opt(2026, 1, 1)
      .unwrap()
      .and_hms_opt(12, 0, 0)
      .unwrap();
    let mut form = PostInsertForm::new(author_id, text, None, None);
    form.published = base + Duration::seconds(seconds_offset);
    Post::create(conn, &form).unwrap()
  }

  #[test]
  #[serial]
  fn test_newest_first_with_id_tie_break() {
    let mut conn = establish_unpooled_connection();
    let author = User::create(&mut conn, &UserInsertForm::new("chrono")).unwrap();

    let oldest = insert_post_at(&mut conn, author.id, "oldest", 0);
    // Two posts sharing one timestamp; the later insert (higher id) wins.
    let tied_low = insert_post_at(&mut conn, author.id, "tied low", 5);
    let tied_high = insert_post_at(&mut conn, author.id, "tied high", 5);
    let newest = insert_post_at(&mut conn, author.id, "newest", 9);

    let paged = PostQuery::default().list(&mut conn).unwrap();

    let ids: Vec<_> = paged.posts.iter().map(|pv| pv.post.id).collect();
    assert_eq!(vec![newest.id, tied_high.id, tied_low.id, oldest.id], ids);
    assert_eq!(4, paged.total_count);
    assert_eq!(1, paged.total_pages);
    assert!(!paged.has_next);
    assert!(!paged.has_previous);
  }

  #[test]
  #[serial]
  fn test_pagination_clamps_and_fills() {
    let mut conn = establish_unpooled_connection();
    let author = User::create(&mut conn, &UserInsertForm::new("steady")).unwrap();

    for i in 0..25 {
      insert_post_at(&mut conn, author.id, &format!("post {}", i), i);
    }

    let page_1 = PostQuery {
      page: Some(1),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();
    assert_eq!(10, page_1.posts.len());
    assert_eq!(1, page_1.page);
    assert_eq!(3, page_1.total_pages);
    assert_eq!(25, page_1.total_count);
    assert!(page_1.has_next);
    assert!(!page_1.has_previous);

    let page_3 = PostQuery {
      page: Some(3),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();
    assert_eq!(5, page_3.posts.len());
    assert!(!page_3.has_next);
    assert!(page_3.has_previous);

    // A page past the end clamps to the last page, identical items.
    let page_99 = PostQuery {
      page: Some(99),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();
    assert_eq!(3, page_99.page);
    assert_eq!(page_3.posts, page_99.posts);

    // Page zero and negatives are treated as page one.
    let page_0 = PostQuery {
      page: Some(0),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();
    assert_eq!(1, page_0.page);
    assert_eq!(page_1.posts, page_0.posts);
  }

  #[test]
  #[serial]
  fn test_empty_set_is_one_empty_page() {
    let mut conn = establish_unpooled_connection();

    let paged = PostQuery {
      page: Some(7),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();

    assert_eq!(0, paged.posts.len());
    assert_eq!(1, paged.page);
    assert_eq!(1, paged.total_pages);
    assert_eq!(0, paged.total_count);
    assert!(!paged.has_next);
    assert!(!paged.has_previous);
  }

  #[test]
  #[serial]
  fn test_mode_filters() {
    let mut conn = establish_unpooled_connection();

    let ada = User::create(&mut conn, &UserInsertForm::new("ada")).unwrap();
    let ben = User::create(&mut conn, &UserInsertForm::new("ben")).unwrap();
    let cal = User::create(&mut conn, &UserInsertForm::new("cal")).unwrap();
    let group =
      Group::create(&mut conn, &GroupInsertForm::new("Gardening", "garden", "")).unwrap();

    let mut grouped_form = PostInsertForm::new(ada.id, "tomatoes", Some(group.id), None);
    grouped_form.published = NaiveDate::from_ymd_opt(2026, 1, 1)
      .unwrap()
      .and_hms_opt(12, 0, 0)
      .unwrap();
    let ada_grouped = Post::create(&mut conn, &grouped_form).unwrap();
    let ada_plain = insert_post_at(&mut conn, ada.id, "no group", 1);
    let ben_post = insert_post_at(&mut conn, ben.id, "ben post", 2);
    insert_post_at(&mut conn, cal.id, "cal post", 3);

    let by_author = PostQuery {
      author_id: Some(ada.id),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();
    assert_eq!(2, by_author.total_count);
    assert!(by_author.posts.iter().all(|pv| pv.author.id == ada.id));

    let by_group = PostQuery {
      group_id: Some(group.id),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();
    assert_eq!(1, by_group.total_count);
    assert_eq!(ada_grouped.id, by_group.posts[0].post.id);
    assert_eq!(
      Some("garden".to_string()),
      by_group.posts[0].group.as_ref().map(|g| g.slug.to_owned())
    );

    // cal follows ada and ben, not themself, so cal's own post is absent.
    UserFollower::follow(&mut conn, &FollowForm::new(ada.id, cal.id)).unwrap();
    UserFollower::follow(&mut conn, &FollowForm::new(ben.id, cal.id)).unwrap();

    let personal = PostQuery {
      followed_by: Some(cal.id),
      ..Default::default()
    }
    .list(&mut conn)
    .unwrap();
    let ids: Vec<_> = personal.posts.iter().map(|pv| pv.post.id).collect();
    assert_eq!(vec![ben_post.id, ada_plain.id, ada_grouped.id], ids);
  }

  #[test]
  #[serial]
  fn test_read_single() {
    let mut conn = establish_unpooled_connection();

    let author = User::create(&mut conn, &UserInsertForm::new("solo")).unwrap();
    let post = Post::create(
      &mut conn,
      &PostInsertForm::new(author.id, "hello", None, None),
    )
    .unwrap();

    let view = PostView::read(&mut conn, post.id).unwrap();
    assert_eq!(post.id, view.post.id);
    assert_eq!("solo", view.author.name);
    assert_eq!(None, view.group);
  }
}
