use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{
    api::{
        handlers::{ComponentHealth, HealthResponse},
        models::{AuthRequest, EmptyData, ProductRequest, RegisterRequest},
    },
    core::{
        models::{product::ProductResponse, user::Role},
        services::{AuthTokens, UserInfo},
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_products,
        super::handlers::list_products_paginated,
        super::handlers::search_products,
        super::handlers::products_by_price_range,
        super::handlers::get_product,
        super::handlers::create_product,
        super::handlers::update_product,
        super::handlers::delete_product,
        super::handlers::register,
        super::handlers::login,
        super::handlers::health_check
    ),
    components(schemas(
        ProductRequest,
        ProductResponse,
        RegisterRequest,
        AuthRequest,
        AuthTokens,
        UserInfo,
        Role,
        EmptyData,
        HealthResponse,
        ComponentHealth
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Product", description = "Product management APIs"),
        (name = "Authentication", description = "Authentication management APIs"),
        (name = "Health", description = "Liveness and dependency checks")
    ),
    info(
        title = "Storefront API",
        description = "Product catalogue with cached reads and JWT-protected writes",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
