//! Catalog index endpoint.
//!
//! ```text
//! GET /    all destinations plus pending notices
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::DestinationsQuery as _;
use crate::domain::{Destination, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One destination as exposed to the view layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DestinationView {
    /// Stable identifier.
    #[schema(value_type = String, example = "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d")]
    pub id: String,
    /// Display label.
    #[schema(example = "Lalibela")]
    pub name: String,
    /// Relative image path.
    #[schema(example = "pics/lalibela.jpg")]
    pub image: String,
    /// Free-text description.
    pub description: String,
    /// Non-negative price.
    #[schema(example = 2500)]
    pub price: i32,
    /// Promotional flag.
    pub on_offer: bool,
}

impl From<&Destination> for DestinationView {
    fn from(destination: &Destination) -> Self {
        Self {
            id: destination.id().to_string(),
            name: destination.name().to_string(),
            image: destination.image().as_ref().to_owned(),
            description: destination.description().as_ref().to_owned(),
            price: destination.price().amount(),
            on_offer: destination.on_offer(),
        }
    }
}

/// Catalog page payload: every destination plus pending flash notices.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogPage {
    /// All destinations in store order; empty when the catalog is empty.
    pub destinations: Vec<DestinationView>,
    /// User-visible messages queued by a previous request, drained here.
    pub notices: Vec<String>,
}

/// The catalog index.
///
/// An empty store yields an empty collection, not an error.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Catalog page payload", body = CatalogPage),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "catalogIndex"
)]
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CatalogPage>> {
    let destinations = state.destinations.list_destinations().await?;
    Ok(web::Json(CatalogPage {
        destinations: destinations.iter().map(DestinationView::from).collect(),
        notices: session.take_notices()?,
    }))
}

#[cfg(test)]
mod tests {
    //! Catalog endpoint coverage over fixture and stub ports.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use async_trait::async_trait;

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::DestinationsQuery;
    use crate::inbound::http::test_utils::test_session_middleware;

    struct EmptyCatalogue;

    #[async_trait]
    impl DestinationsQuery for EmptyCatalogue {
        async fn list_destinations(&self) -> Result<Vec<Destination>, Error> {
            Ok(Vec::new())
        }
    }

    fn app_with_state(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .service(index)
    }

    #[actix_web::test]
    async fn fixture_catalog_lists_every_destination() {
        let app = actix_test::init_service(app_with_state(HttpState::fixture())).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        let page: CatalogPage = actix_test::read_body_json(response).await;
        assert_eq!(page.destinations.len(), 2);
        assert_eq!(page.destinations[0].name, "Lalibela");
        assert!(page.destinations[0].on_offer);
        assert!(page.notices.is_empty());
    }

    #[actix_web::test]
    async fn empty_catalog_is_a_successful_empty_page() {
        let mut state = HttpState::fixture();
        state.destinations = Arc::new(EmptyCatalogue);
        let app = actix_test::init_service(app_with_state(state)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        let page: CatalogPage = actix_test::read_body_json(response).await;
        assert!(page.destinations.is_empty());
    }

    #[actix_web::test]
    async fn catalog_is_reachable_without_authentication() {
        let app = actix_test::init_service(app_with_state(HttpState::fixture())).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
