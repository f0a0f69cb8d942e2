//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::data::ProductUpdate;

use crate::{
    amounts::parse_minor_units,
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,

    /// New unit price as a decimal string. Placed orders keep their price.
    pub price: String,
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let update = ProductUpdate {
        name: request.name,
        price: parse_minor_units(&request.price, state.currency, "price")?,
    };

    let product = state
        .app
        .products
        .update_product(product.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(product, state.currency)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == ProductUpdate {
                            name: "Laptop Pro".to_string(),
                            price: 149_999,
                        }
            })
            .return_once(move |_, update| Ok(make_product(uuid, &update.name, update.price)));

        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "name": "Laptop Pro", "price": "1499.99" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.name, "Laptop Pro");
        assert_eq!(body.price, "1499.99");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(move |u, _| *u == uuid)
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        repo.expect_get_product().never();
        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_delete_product().never();

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "name": "Laptop", "price": "1.00" }))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
