//! Calculate Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    cart::{errors::into_status_error, requests::CartPayload, responses::CalculationResponse},
    extensions::*,
    observability::{CartOutcome, record_cart_calculation},
    state::State,
};

/// Calculate Cart Handler
///
/// Prices a cart against the live catalog without placing an order.
#[endpoint(
    tags("cart"),
    summary = "Calculate Cart Totals",
    responses(
        (status_code = StatusCode::OK, description = "Cart priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid cart or coupon"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartPayload>,
    depot: &mut Depot,
) -> Result<Json<CalculationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let calculation = state
        .app
        .orders
        .calculate_cart(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_cart_calculation(CartOutcome::Calculated);

    Ok(Json(CalculationResponse::from(&calculation)))
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront::{
        calculator::OrderCalculation,
        delivery::{AddOns, DeliveryTier},
        errors::{PricingError, ValidationError},
    };
    use storefront_app::domain::{
        coupons::records::Ineligibility,
        orders::{MockOrdersService, OrdersServiceError, data::CartLine},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{orders_service, strict_orders_mock};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("cart/calculate").post(handler))
    }

    fn expect_only_calculate(
        orders: &mut MockOrdersService,
        result: Result<OrderCalculation<'static>, OrdersServiceError>,
    ) {
        orders
            .expect_calculate_cart()
            .once()
            .return_once(move |_| result);

        orders.expect_create_order_with_calculations().never();
        orders.expect_get_order().never();
    }

    fn save10_calculation() -> OrderCalculation<'static> {
        OrderCalculation {
            subtotal: Money::from_minor(189_700, USD),
            discount: Money::from_minor(18_970, USD),
            shipping: Money::from_minor(0, USD),
            tax: Money::from_minor(13_658, USD),
            add_ons: Money::from_minor(0, USD),
            total: Money::from_minor(184_388, USD),
        }
    }

    #[tokio::test]
    async fn test_calculate_returns_decimal_totals() -> TestResult {
        let laptop = ProductUuid::new();
        let mouse = ProductUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_calculate_cart()
            .once()
            .withf(move |cart| {
                cart.items
                    == [
                        CartLine {
                            product_uuid: laptop,
                            quantity: 1,
                        },
                        CartLine {
                            product_uuid: mouse,
                            quantity: 2,
                        },
                    ]
                    && cart.coupon_code.as_deref() == Some("SAVE10")
                    && cart.delivery == DeliveryTier::Standard
                    && cart.add_ons == AddOns::NONE
            })
            .return_once(|_| Ok(save10_calculation()));

        orders.expect_create_order_with_calculations().never();
        orders.expect_get_order().never();

        let mut res = TestClient::post("http://example.com/cart/calculate")
            .json(&json!({
                "items": [
                    { "product_id": laptop.into_uuid(), "quantity": 1 },
                    { "product_id": mouse.into_uuid(), "quantity": 2 }
                ],
                "coupon_code": "SAVE10"
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CalculationResponse = res.take_json().await?;

        assert_eq!(
            body,
            CalculationResponse {
                currency: "USD".to_string(),
                subtotal: "1897.00".to_string(),
                discount: "189.70".to_string(),
                shipping: "0.00".to_string(),
                tax: "136.58".to_string(),
                add_ons: "0.00".to_string(),
                total: "1843.88".to_string(),
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_calculate_unknown_product_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        expect_only_calculate(
            &mut orders,
            Err(OrdersServiceError::ProductNotFound(ProductUuid::new())),
        );

        let res = TestClient::post("http://example.com/cart/calculate")
            .json(&json!({ "items": [{ "product_id": ProductUuid::new().into_uuid(), "quantity": 1 }] }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_calculate_empty_cart_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        expect_only_calculate(
            &mut orders,
            Err(OrdersServiceError::Pricing(PricingError::from(
                ValidationError::EmptyCart,
            ))),
        );

        let res = TestClient::post("http://example.com/cart/calculate")
            .json(&json!({ "items": [] }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_calculate_expired_coupon_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        expect_only_calculate(
            &mut orders,
            Err(OrdersServiceError::CouponIneligible {
                code: "SUMMER".to_string(),
                reason: Ineligibility::Expired,
            }),
        );

        let res = TestClient::post("http://example.com/cart/calculate")
            .json(&json!({
                "items": [{ "product_id": ProductUuid::new().into_uuid(), "quantity": 1 }],
                "coupon_code": "SUMMER"
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_calculate_items_not_array_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/cart/calculate")
            .json(&json!({ "items": "laptop" }))
            .send(&make_service(strict_orders_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
