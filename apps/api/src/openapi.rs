use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer-token security scheme referenced by the order and
/// category-write operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "Bookstore administration backend: products, categories and orders with token authentication"
    ),
    nest(
        (path = "/bookstore/v1/products", api = domain_catalog::handlers::ProductsApiDoc),
        (path = "/bookstore/v1/categories", api = domain_catalog::handlers::CategoriesApiDoc),
        (path = "/bookstore/v1/orders", api = domain_orders::handlers::ApiDoc),
        (path = "/api-token-auth", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
