//! Post handlers - publish, list, update, delete.

use actix_web::{HttpResponse, web};

use quickblog_core::domain::{NewPost, Post, PostPatch};
use quickblog_shared::ApiResponse;
use quickblog_shared::dto::{
    CheckTitleRequest, CreatePostRequest, CreatedPost, PostEnvelope, PostList, PostView,
    TitleAvailability, UpdatePostRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn post_view(post: Post) -> PostView {
    PostView {
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        author: post.author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn post_list(posts: Vec<Post>) -> ApiResponse<PostList> {
    ApiResponse::ok(PostList {
        blogs: posts.into_iter().map(post_view).collect(),
    })
}

/// POST /api/blogs
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = NewPost {
        title: req.title,
        content: req.content,
        category: req.category,
        tags: req.tags.unwrap_or_default(),
    };

    let published = state.blog.create_post(&req.username, input).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        CreatedPost {
            shareable_link: state.config.article_url(&published.slug),
            blog_id: published.id,
        },
        "Blog published successfully",
    )))
}

/// GET /api/blogs - public feed across all authors.
pub async fn list_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.blog.list_all_posts().await?;
    Ok(HttpResponse::Ok().json(post_list(posts)))
}

/// GET /api/blogs/{username}
pub async fn list_by_author(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let posts = state.blog.list_posts(&path).await?;
    Ok(HttpResponse::Ok().json(post_list(posts)))
}

/// PUT /api/blogs/{username}/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let (username, id) = path.into_inner();
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        content: req.content,
        category: req.category,
        tags: req.tags,
    };

    let post = state.blog.update_post(&username, &id, patch).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        PostEnvelope {
            blog: post_view(post),
        },
        "Blog updated successfully",
    )))
}

/// DELETE /api/blogs/{username}/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (username, id) = path.into_inner();

    state.blog.delete_post(&username, &id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Blog deleted successfully")))
}

/// POST /api/blogs/check-title
pub async fn check_title(
    state: web::Data<AppState>,
    body: web::Json<CheckTitleRequest>,
) -> AppResult<HttpResponse> {
    let available = state.blog.is_title_available(body.candidate()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(TitleAvailability { available })))
}
