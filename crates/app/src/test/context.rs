//! In-memory test context for service tests.

use std::sync::Arc;

use jiff::Timestamp;

use crate::{
    auth::Principal,
    context::{AppContext, Stores},
    domain::{
        carts::{Cart, CartsService},
        orders::OrdersService,
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
        },
    },
    memory::MemoryStore,
};

pub struct TestContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub admin: Principal,
    pub customer: Principal,
}

impl TestContext {
    /// A fresh store seeded with one admin and one customer.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        let admin = seed_user(&store, "Admin", "admin@example.com", Role::Admin);
        let customer = seed_user(&store, "Customer", "customer@example.com", Role::User);

        let app = AppContext::from_stores(&Stores::memory(Arc::clone(&store)));

        Self {
            products: app.products,
            carts: app.carts,
            orders: app.orders,
            users: app.users,
            admin,
            customer,
        }
    }

    /// Create a product as the admin, with defaults for everything but the
    /// fields tests usually care about.
    pub async fn create_product(
        &self,
        title: &str,
        price: u64,
        stock_quantity: u32,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let uuid = ProductUuid::new();
        let mut product = NewProduct::new(uuid, title, "", price, stock_quantity);

        // Generated SKUs only have millisecond resolution.
        product.sku = format!("SKU-{}", uuid.into_uuid().simple());

        self.products.create_product(self.admin, product).await
    }

    pub async fn create_customer(&self, email: &str) -> Result<Principal, UsersServiceError> {
        let user = self
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                name: "Customer".to_string(),
                email: email.to_string(),
                role: Role::User,
            })
            .await?;

        Ok(Principal::new(user.uuid, user.role))
    }
}

fn seed_user(store: &MemoryStore, name: &str, email: &str, role: Role) -> Principal {
    let now = Timestamp::now();

    let user = UserRecord {
        uuid: UserUuid::new(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        saved_addresses: Vec::new(),
        cart: Cart::default(),
        created_at: now,
        updated_at: now,
    };

    let principal = Principal::new(user.uuid, user.role);

    store.insert_user(user);

    principal
}
