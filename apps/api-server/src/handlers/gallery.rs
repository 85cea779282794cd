//! Gallery handlers.

use actix_web::{HttpResponse, web};

use lookbook_core::domain::{GalleryImage, NewGalleryImage};
use lookbook_shared::ApiResponse;
use lookbook_shared::dto::CategoryQuery;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/gallery?category=
pub async fn list_images(
    state: web::Data<AppState>,
    query: web::Query<CategoryQuery>,
) -> AppResult<HttpResponse> {
    let images = match query.into_inner().category.filter(|c| !c.trim().is_empty()) {
        Some(category) => {
            let wanted = category.to_lowercase();
            state
                .gallery
                .list_where(&move |img: &GalleryImage| img.category.to_lowercase() == wanted)
                .await?
        }
        None => state.gallery.list().await?,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(images)))
}

/// POST /api/gallery
pub async fn create_image(
    state: web::Data<AppState>,
    body: web::Json<NewGalleryImage>,
) -> AppResult<HttpResponse> {
    let draft = body.into_inner();
    draft.validate()?;

    let image = state.gallery.create(draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(image)))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    #[actix_web::test]
    async fn test_gallery_create_and_filter() {
        let state = AppState::seeded();
        let routes_state = state.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(move |cfg| configure_routes(cfg, &routes_state)),
        )
        .await;

        for (title, category) in [("Trench", "Street"), ("Harbour", "Travel")] {
            let req = test::TestRequest::post()
                .uri("/api/gallery")
                .set_json(json!({
                    "title": title,
                    "imageUrl": format!("/images/gallery/{title}.jpg"),
                    "category": category
                }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/gallery?category=street").to_request(),
        )
        .await;
        let items = body["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Trench");
    }
}
