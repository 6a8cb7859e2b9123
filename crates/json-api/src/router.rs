//! App Router

use salvo::Router;

use crate::{auth, carts, healthcheck, orders, products};

/// Catalog reads are public; everything else runs behind bearer auth.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("products")
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::add_item::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::update_item::handler)
                                        .delete(carts::remove_item::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("mine").get(orders::mine::handler))
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(
                                    Router::with_path("status")
                                        .put(orders::update_status::handler),
                                ),
                        ),
                ),
        )
}
