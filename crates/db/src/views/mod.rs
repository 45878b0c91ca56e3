pub mod comment_view;
pub mod post_view;
pub mod user_view;

pub trait ViewToVec {
  type DbTuple;
  fn to_vec(tuple: Vec<Self::DbTuple>) -> Vec<Self>
  where
    Self: Sized;
}
