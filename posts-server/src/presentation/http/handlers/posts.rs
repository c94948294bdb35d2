use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::post::{AuthorInput, Post, PostInput, ReplacePostRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorDto {
    #[validate(required, length(min = 1))]
    pub(crate) first_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub(crate) last_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(required, length(min = 1))]
    pub(crate) title: Option<String>,
    #[validate(required, length(min = 1))]
    pub(crate) content: Option<String>,
    #[validate(required, nested)]
    pub(crate) author: Option<AuthorDto>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ReplacePostDto {
    /// Must equal the id in the path.
    pub(crate) id: Option<String>,
    #[validate(required, length(min = 1))]
    pub(crate) title: Option<String>,
    #[validate(required, length(min = 1))]
    pub(crate) content: Option<String>,
    #[validate(required, nested)]
    pub(crate) author: Option<AuthorDto>,
}

/// Public representation of a post.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) content: String,
    /// `"<firstName> <lastName>"`
    pub(crate) author: String,
    pub(crate) created: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            author: post.author.display_name(),
            created: post.created,
        }
    }
}

impl From<AuthorDto> for AuthorInput {
    fn from(dto: AuthorDto) -> Self {
        Self {
            first_name: dto.first_name.unwrap_or_default(),
            last_name: dto.last_name.unwrap_or_default(),
        }
    }
}

impl From<CreatePostDto> for PostInput {
    fn from(dto: CreatePostDto) -> Self {
        Self {
            title: dto.title.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            author: dto.author.map(AuthorInput::from),
        }
    }
}

impl From<ReplacePostDto> for ReplacePostRequest {
    fn from(dto: ReplacePostDto) -> Self {
        Self {
            id: dto.id,
            post: PostInput {
                title: dto.title.unwrap_or_default(),
                content: dto.content.unwrap_or_default(),
                author: dto.author.map(AuthorInput::from),
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts", body = ListPostsResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let posts = state.post_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            posts: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id (24-character hex)")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let result = state.post_service.get_post(&id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<CreatePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let result = state.post_service.create_post(dto.into()).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(result))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id (24-character hex)")
    ),
    request_body = ReplacePostDto,
    responses(
        (status = 201, description = "Post replaced", body = PostDto),
        (status = 400, description = "Validation error or id mismatch"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn replace_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReplacePostDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let result = state.post_service.replace_post(&id, dto.into()).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(result))))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id (24-character hex)")
    ),
    responses(
        (status = 204, description = "Post deleted (or already absent)"),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
