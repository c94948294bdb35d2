use utoipa::OpenApi;

use crate::presentation::http::handlers::health::HealthzResponse;
use crate::presentation::http::handlers::posts::{
    AuthorDto, CreatePostDto, ListPostsResponseDto, PostDto, ReplacePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::health_handler,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::replace_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            HealthzResponse,
            AuthorDto,
            CreatePostDto,
            ReplacePostDto,
            PostDto,
            ListPostsResponseDto
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "posts", description = "Blog post resource")
    )
)]
pub(crate) struct ApiDoc;
