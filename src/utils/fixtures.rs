//! Rows seeded through the repositories for tests that need a real database.

use bigdecimal::BigDecimal;
use sqlx::PgPool;
use std::sync::Arc;
use ulid::Ulid;

use crate::{
    modules::{
        auth::middleware::Auth,
        driver::repository::{self as drivers, Driver},
        order::repository::{self as orders, Order},
        payment::repository::{self as payments, Payment},
        restaurant::repository::{self as restaurants, Restaurant},
        user::repository::{self as users, Role, User},
    },
    types::Context,
    utils::database::DatabaseConnection,
};

pub fn context(pool: PgPool) -> Arc<Context> {
    Arc::new(Context {
        db_conn: DatabaseConnection { pool },
        ..Context::for_tests()
    })
}

pub fn auth(user: &User) -> Auth {
    Auth { user: user.clone() }
}

pub async fn user(pool: &PgPool, role: Role) -> User {
    let user = users::create(
        pool,
        users::CreateUserPayload {
            email: format!("{}@example.com", Ulid::new()),
            password_hash: None,
            google_id: None,
            first_name: String::from("Ada"),
            last_name: String::from("Obi"),
            phone_number: None,
            role,
        },
    )
    .await
    .expect("user should be created");

    users::create_profile(pool, &user)
        .await
        .expect("profile should be created");

    user
}

pub struct Marketplace {
    pub customer: User,
    pub owner: User,
    pub restaurant: Restaurant,
}

pub async fn marketplace(pool: &PgPool) -> Marketplace {
    let customer = user(pool, Role::Customer).await;
    let owner = user(pool, Role::RestaurantOwner).await;
    let owner_id = users::find_restaurant_owner_by_user_id(pool, owner.id.clone())
        .await
        .expect("owner lookup should succeed")
        .expect("owner profile should exist")
        .id;

    let restaurant = restaurants::create(
        pool,
        restaurants::CreateRestaurantPayload {
            name: String::from("Mama Put"),
            description: String::from("Rice and stew"),
            address: String::from("3 Allen Avenue, Ikeja"),
            phone_number: String::from("+2348012345678"),
            opening_time: String::from("08:00"),
            closing_time: String::from("22:00"),
            owner_id,
        },
    )
    .await
    .expect("restaurant should be created");

    Marketplace {
        customer,
        owner,
        restaurant,
    }
}

/// A pending order for `total` placed by the marketplace customer.
pub async fn order(pool: &PgPool, marketplace: &Marketplace, total: i64) -> Order {
    let customer_id = users::find_customer_by_user_id(pool, marketplace.customer.id.clone())
        .await
        .expect("customer lookup should succeed")
        .expect("customer profile should exist")
        .id;

    orders::create(
        pool,
        orders::CreateOrderPayload {
            sub_total: BigDecimal::from(total - 2),
            delivery_fee: BigDecimal::from(2),
            total: BigDecimal::from(total),
            delivery_address: String::from("12 Marina Road, Lagos"),
            delivery_coordinates: None,
            customer_id,
            restaurant_id: marketplace.restaurant.id.clone(),
        },
    )
    .await
    .expect("order should be created")
}

pub async fn payment(pool: &PgPool, order: &Order) -> Payment {
    payments::create(
        pool,
        payments::CreatePaymentPayload {
            payment_intent_id: format!("pi_{}", Ulid::new()),
            amount: order.total.clone(),
            currency: String::from("usd"),
            order_id: order.id.clone(),
        },
    )
    .await
    .expect("payment should be created")
}

pub async fn driver(pool: &PgPool) -> (User, Driver) {
    let user = user(pool, Role::Driver).await;
    let driver = drivers::create(
        pool,
        drivers::CreateDriverPayload {
            vehicle_type: String::from("motorcycle"),
            license_plate: String::from("LSR-123-AB"),
            user_id: user.id.clone(),
        },
    )
    .await
    .expect("driver should be created");

    let driver = drivers::set_availability(pool, driver.id.clone(), true)
        .await
        .expect("driver should go online");

    (user, driver)
}

/// Moves a pending order straight to `status`, the way the lifecycle would.
pub async fn advance(pool: &PgPool, order: &Order, status: orders::OrderStatus) -> Order {
    sqlx::query_as::<_, Order>("UPDATE orders SET status = $1 WHERE id = $2 RETURNING *")
        .bind(status)
        .bind(order.id.clone())
        .fetch_one(pool)
        .await
        .expect("order status should be updated")
}
