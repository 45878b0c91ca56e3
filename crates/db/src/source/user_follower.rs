use crate::{naive_now, schema::user_follower, Followable, UserId};
use diesel::{
  dsl::{exists, insert_into},
  result::Error,
  select,
  ExpressionMethods,
  QueryDsl,
  RunQueryDsl,
  SqliteConnection,
};
use serde::{Deserialize, Serialize};

/// A follow edge. `user_id` is the followee, `follower_id` the user who
/// follows them.
#[derive(Clone, Queryable, Identifiable, PartialEq, Debug, Serialize, Deserialize)]
#[diesel(table_name = user_follower)]
pub struct UserFollower {
  pub id: i32,
  pub user_id: UserId,
  pub follower_id: UserId,
  pub published: chrono::NaiveDateTime,
}

#[derive(Insertable, AsChangeset, Clone)]
#[diesel(table_name = user_follower)]
pub struct FollowForm {
  pub user_id: UserId,
  pub follower_id: UserId,
  pub published: chrono::NaiveDateTime,
}

impl FollowForm {
  pub fn new(user_id: UserId, follower_id: UserId) -> Self {
    FollowForm {
      user_id,
      follower_id,
      published: naive_now(),
    }
  }
}

impl Followable for UserFollower {
  type Form = FollowForm;

  /// Idempotent. A second follow of the same pair lands on the unique
  /// (user_id, follower_id) index and updates in place instead of failing.
  fn follow(conn: &mut SqliteConnection, form: &FollowForm) -> Result<Self, Error> {
    use crate::schema::user_follower::dsl::*;
    insert_into(user_follower)
      .values(form)
      .on_conflict((user_id, follower_id))
      .do_update()
      .set(form)
      .get_result::<Self>(conn)
  }

  /// Unfollowing an absent edge deletes zero rows and is not an error.
  fn unfollow(conn: &mut SqliteConnection, form: &FollowForm) -> Result<usize, Error> {
    use crate::schema::user_follower::dsl::*;
    diesel::delete(
      user_follower
        .filter(user_id.eq(form.user_id))
        .filter(follower_id.eq(form.follower_id)),
    )
    .execute(conn)
  }
}

impl UserFollower {
  pub fn is_following(
    conn: &mut SqliteConnection,
    for_follower_id: UserId,
    for_user_id: UserId,
  ) -> Result<bool, Error> {
    use crate::schema::user_follower::dsl::*;
    select(exists(
      user_follower
        .filter(user_id.eq(for_user_id))
        .filter(follower_id.eq(for_follower_id)),
    ))
    .get_result(conn)
  }

  pub fn follower_count(conn: &mut SqliteConnection, for_user_id: UserId) -> Result<i64, Error> {
    use crate::schema::user_follower::dsl::*;
    user_follower
      .filter(user_id.eq(for_user_id))
      .count()
      .get_result(conn)
  }

  pub fn following_count(
    conn: &mut SqliteConnection,
    for_follower_id: UserId,
  ) -> Result<i64, Error> {
    use crate::schema::user_follower::dsl::*;
    user_follower
      .filter(follower_id.eq(for_follower_id))
      .count()
      .get_result(conn)
  }

  /// Everyone the given user follows. Seeds the personalized feed query.
  pub fn following_ids(
    conn: &mut SqliteConnection,
    for_follower_id: UserId,
  ) -> Result<Vec<UserId>, Error> {
    use crate::schema::user_follower::dsl::*;
    user_follower
      .filter(follower_id.eq(for_follower_id))
      .select(user_id)
      .load::<UserId>(conn)
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    establish_unpooled_connection,
    source::{
      user::{User, UserInsertForm},
      user_follower::{FollowForm, UserFollower},
    },
    Crud,
    Followable,
  };
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_follow_and_unfollow() {
    let mut conn = establish_unpooled_connection();

    let followed = User::create(&mut conn, &UserInsertForm::new("star")).unwrap();
    let follower = User::create(&mut conn, &UserInsertForm::new("admirer")).unwrap();

    let form = FollowForm::new(followed.id, follower.id);
    let inserted_edge = UserFollower::follow(&mut conn, &form).unwrap();

    let expected_edge = UserFollower {
      id: inserted_edge.id,
      user_id: followed.id,
      follower_id: follower.id,
      published: inserted_edge.published,
    };

    assert_eq!(expected_edge.user_id, inserted_edge.user_id);
    assert_eq!(expected_edge.follower_id, inserted_edge.follower_id);
    assert!(UserFollower::is_following(&mut conn, follower.id, followed.id).unwrap());
    assert_eq!(1, UserFollower::follower_count(&mut conn, followed.id).unwrap());
    assert_eq!(1, UserFollower::following_count(&mut conn, follower.id).unwrap());
    assert_eq!(
      vec![followed.id],
      UserFollower::following_ids(&mut conn, follower.id).unwrap()
    );

    let num_deleted = UserFollower::unfollow(&mut conn, &form).unwrap();
    assert_eq!(1, num_deleted);
    assert!(!UserFollower::is_following(&mut conn, follower.id, followed.id).unwrap());
  }

  #[test]
  #[serial]
  fn test_follow_twice_keeps_one_edge() {
    let mut conn = establish_unpooled_connection();

    let followed = User::create(&mut conn, &UserInsertForm::new("idol")).unwrap();
    let follower = User::create(&mut conn, &UserInsertForm::new("devoted")).unwrap();

    let form = FollowForm::new(followed.id, follower.id);
    UserFollower::follow(&mut conn, &form).unwrap();
    UserFollower::follow(&mut conn, &form).unwrap();

    assert_eq!(1, UserFollower::follower_count(&mut conn, followed.id).unwrap());
  }

  #[test]
  #[serial]
  fn test_unfollow_absent_edge_is_noop() {
    let mut conn = establish_unpooled_connection();

    let a = User::create(&mut conn, &UserInsertForm::new("aaa")).unwrap();
    let b = User::create(&mut conn, &UserInsertForm::new("bbb")).unwrap();

    let num_deleted =
      UserFollower::unfollow(&mut conn, &FollowForm::new(a.id, b.id)).unwrap();
    assert_eq!(0, num_deleted);
  }
}
