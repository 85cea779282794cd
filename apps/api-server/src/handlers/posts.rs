//! Post and comment handlers.

use actix_web::{HttpResponse, web};

use lookbook_core::domain::{Comment, NewPost, Post, PostId};
use lookbook_core::error::DomainError;
use lookbook_shared::ApiResponse;
use lookbook_shared::dto::{CategoryQuery, CreateCommentRequest, LimitQuery, PostDetailResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

async fn require_post(state: &AppState, id: PostId) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Post",
                id,
            }
            .into()
        })
}

/// GET /api/posts?category=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<CategoryQuery>,
) -> AppResult<HttpResponse> {
    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());
    let posts = state.posts.list(category).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/featured?limit=
pub async fn list_featured(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_featured(query.limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/recent?limit=
pub async fn list_recent(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent(query.limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = require_post(&state, path.into_inner()).await?;
    let links = state.posts.neighbours(&post).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetailResponse::new(post, links))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let post = state.posts.create(input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    require_post(&state, post_id).await?;

    let comments = state
        .comments
        .list_where(&move |c: &Comment| c.post_id == post_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// POST /api/posts/{id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    require_post(&state, post_id).await?;

    let draft = body.into_inner().for_post(post_id);
    draft.validate()?;

    let comment = state.comments.create(draft).await?;
    tracing::info!(post_id, comment_id = comment.id, "Comment added");
    Ok(HttpResponse::Created().json(ApiResponse::ok(comment)))
}
