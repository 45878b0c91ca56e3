pub mod comment;
pub mod group;
pub mod post;
pub mod user;
pub mod user_follower;
