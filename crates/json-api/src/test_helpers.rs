//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        orders::{
            MockOrdersService,
            records::{
                OrderLineItem, OrderRecord, OrderStatus, OrderUuid, PaymentMethod, PaymentStatus,
            },
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid, Variation},
        },
        users::{
            MockUsersService,
            records::{Address, Role, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_PRINCIPAL: Principal = Principal::new(TEST_USER_UUID, Role::User);

#[salvo::handler]
pub(crate) async fn inject_principal(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(TEST_PRINCIPAL);
    ctrl.call_next(req, depot, res).await;
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_get_order().never();
    orders.expect_list_my_orders().never();
    orders.expect_list_orders().never();
    orders.expect_update_order_status().never();

    orders
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();

    users
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

/// Mocked services; anything left at its default rejects every call.
pub(crate) struct MockServices {
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            products: strict_products_mock(),
            carts: strict_carts_mock(),
            orders: strict_orders_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            users: Arc::new(strict_users_mock()),
            auth: Arc::new(self.auth),
        })
    }

    /// A service for `route` with [`TEST_PRINCIPAL`] already authenticated.
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_principal)
                .push(route),
        )
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    MockServices {
        products,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    MockServices {
        carts,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    MockServices {
        orders,
        ..MockServices::default()
    }
    .into_service(route)
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        title: "Mug".to_string(),
        description: "A mug".to_string(),
        images: vec!["mug.png".to_string()],
        videos: Vec::new(),
        price: 10_00,
        variations: Vec::new(),
        sku: "SKU-1".to_string(),
        stock_quantity: 5,
        low_stock_alert_threshold: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, product: ProductUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user: TEST_USER_UUID,
        items: vec![OrderLineItem {
            product,
            quantity: 3,
            variation: Variation::default(),
            price_at_purchase: 10_00,
        }],
        subtotal: 30_00,
        shipping_cost: 2_00,
        tax: 1_00,
        total_amount: 33_00,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: PaymentMethod::Stripe,
        shipping_address: Address {
            street: Some("1 High Street".to_string()),
            city: Some("London".to_string()),
            state: None,
            zip: Some("N1 1AA".to_string()),
            country: Some("GB".to_string()),
        },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
