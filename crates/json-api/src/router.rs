//! App Router

use salvo::Router;

use crate::{affiliates, cart, coupons, healthcheck, observability, orders, products};

pub fn app_router(metrics_enabled: bool) -> Router {
    let router = Router::new()
        .hoop(observability::request_logging)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("cart/calculate").post(cart::calculate::handler))
        .push(
            Router::with_path("orders")
                .push(Router::with_path("create-with-calculations").post(orders::create::handler))
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("coupons")
                .post(coupons::create::handler)
                .push(Router::with_path("{code}").get(coupons::get::handler)),
        )
        .push(
            Router::with_path("affiliates")
                .post(affiliates::create::handler)
                .push(Router::with_path("{code}").get(affiliates::get::handler)),
        );

    if metrics_enabled {
        router.push(Router::with_path("metrics").get(observability::metrics_handler))
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::TestServices;

    use super::*;

    fn service(metrics_enabled: bool) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(TestServices::default().into_state()))
                .push(app_router(metrics_enabled)),
        )
    }

    #[tokio::test]
    async fn healthcheck_is_routed() -> TestResult {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&service(true))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn metrics_route_follows_setting() -> TestResult {
        let enabled = TestClient::get("http://example.com/metrics")
            .send(&service(true))
            .await;

        let disabled = TestClient::get("http://example.com/metrics")
            .send(&service(false))
            .await;

        assert_eq!(enabled.status_code, Some(StatusCode::OK));
        assert_eq!(disabled.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
