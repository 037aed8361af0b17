//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the HTTP surface: the catalog index, the account flows, and the health
//! probes. The generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::accounts::{
    AccountSummary, LoginForm, PageNotices, RegisterForm,
};
use crate::inbound::http::catalogue::{CatalogPage, DestinationView};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the destination catalog API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Destination catalog backend API",
        description = "Destination catalog with registration, login, and session-bound account access."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::catalogue::index,
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::register_page,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_session,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CatalogPage,
        DestinationView,
        PageNotices,
        LoginForm,
        RegisterForm,
        AccountSummary,
        Error,
        ErrorCode
    )),
    tags(
        (name = "catalogue", description = "Destination catalog browsing"),
        (name = "accounts", description = "Registration, login, and session access"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! The generated document must reference every route the server mounts.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/")]
    #[case("/login")]
    #[case("/register")]
    #[case("/logout")]
    #[case("/session")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_contains_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths.paths.contains_key(path),
            "missing path {path} in OpenAPI document"
        );
    }

    #[rstest]
    fn document_registers_catalog_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.schemas.contains_key("CatalogPage"));
        assert!(components.schemas.contains_key("AccountSummary"));
    }
}
