use actix_web::{web, Error, HttpResponse};
use quill_api::Perform;
use quill_api_common::{
  comment::AddComment,
  context::QuillContext,
  feed::GetFeed,
  post::{CreatePost, EditPost, GetPost},
  user::{FollowUser, GetProfile, Register},
};
use serde::Deserialize;

pub fn config(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      // User
      .service(
        web::scope("/user")
          .route("", web::get().to(route_get::<GetProfile>))
          .route("/register", web::post().to(route_post::<Register>))
          .route("/follow", web::post().to(route_post::<FollowUser>)),
      )
      // Post
      .service(
        web::scope("/post")
          .route("", web::get().to(route_get::<GetPost>))
          .route("", web::post().to(route_post::<CreatePost>))
          .route("", web::put().to(route_post::<EditPost>)),
      )
      // Comment
      .service(web::scope("/comment").route("", web::post().to(route_post::<AddComment>)))
      // Feed
      .service(web::scope("/feed").route("", web::get().to(route_get::<GetFeed>))),
  );
}

async fn perform<Request>(
  data: Request,
  context: web::Data<QuillContext>,
) -> Result<HttpResponse, Error>
where
  Request: Perform,
  Request: Send + 'static,
{
  let res = data
    .perform(&context)
    .await
    .map(|json| HttpResponse::Ok().json(json))?;
  Ok(res)
}

async fn route_get<'a, Data>(
  data: web::Query<Data>,
  context: web::Data<QuillContext>,
) -> Result<HttpResponse, Error>
where
  Data: Deserialize<'a> + Send + 'static + Perform,
{
  perform::<Data>(data.0, context).await
}

async fn route_post<'a, Data>(
  data: web::Json<Data>,
  context: web::Data<QuillContext>,
) -> Result<HttpResponse, Error>
where
  Data: Deserialize<'a> + Send + 'static + Perform,
{
  perform::<Data>(data.0, context).await
}
