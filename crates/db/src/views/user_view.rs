use crate::{source::{user::User, user_follower::UserFollower}, Crud, UserId};
use diesel::{result::Error, SqliteConnection};
use serde::{Deserialize, Serialize};

/// A user plus the social-graph numbers every profile page shows.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct UserView {
  pub user: User,
  pub follower_count: i64,
  pub following_count: i64,
}

impl UserView {
  pub fn read(conn: &mut SqliteConnection, for_user_id: UserId) -> Result<Self, Error> {
    let user = User::read(conn, for_user_id)?;
    let follower_count = UserFollower::follower_count(conn, for_user_id)?;
    let following_count = UserFollower::following_count(conn, for_user_id)?;

    Ok(UserView {
      user,
      follower_count,
      following_count,
    })
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
    views::user_view::UserView,
    Crud,
    Followable,
  };
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_read_with_counts() {
    let mut conn = establish_unpooled_connection();

    let star = User::create(&mut conn, &UserInsertForm::new("star")).unwrap();
    let fan_one = User::create(&mut conn, &UserInsertForm::new("fan_one")).unwrap();
    let fan_two = User::create(&mut conn, &UserInsertForm::new("fan_two")).unwrap();

    UserFollower::follow(&mut conn, &FollowForm::new(star.id, fan_one.id)).unwrap();
    UserFollower::follow(&mut conn, &FollowForm::new(star.id, fan_two.id)).unwrap();
    UserFollower::follow(&mut conn, &FollowForm::new(fan_one.id, star.id)).unwrap();

    let view = UserView::read(&mut conn, star.id).unwrap();

    assert_eq!("star", view.user.name);
    assert_eq!(2, view.follower_count);
    assert_eq!(1, view.following_count);
  }
}
