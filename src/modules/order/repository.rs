use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use std::str::FromStr;
use ulid::Ulid;

use crate::{
    text_column,
    utils::{
        geo::Coordinates,
        pagination::{Paginated, Pagination},
    },
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "PREPARED")]
    Prepared,
    #[serde(rename = "OUT_FOR_DELIVERY")]
    OutForDelivery,
    #[serde(rename = "DELIVERED")]
    Delivered,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Prepared => "PREPARED",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PREPARED" => Ok(OrderStatus::Prepared),
            "OUT_FOR_DELIVERY" => Ok(OrderStatus::OutForDelivery),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("'{}' is not a valid OrderStatus", s)),
        }
    }
}

text_column!(OrderStatus);

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum OrderSimpleStatus {
    #[serde(rename = "ONGOING")]
    Ongoing,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl OrderSimpleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSimpleStatus::Ongoing => "ONGOING",
            OrderSimpleStatus::Completed => "COMPLETED",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub sub_total: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub delivery_address: String,
    pub delivery_latitude: Option<f64>,
    pub delivery_longitude: Option<f64>,
    pub payment_intent_id: Option<String>,
    pub customer_id: String,
    pub restaurant_id: String,
    pub driver_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Order {
    pub fn delivery_coordinates(&self) -> Option<Coordinates> {
        match (self.delivery_latitude, self.delivery_longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct OrderItem {
    pub id: String,
    pub quantity: i32,
    pub price: BigDecimal,
    pub order_id: String,
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub created_at: NaiveDateTime,
}

/// An unassigned order together with where it has to be picked up.
#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct PickupOrder {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub order: Order,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub restaurant_latitude: f64,
    pub restaurant_longitude: f64,
}

impl PickupOrder {
    pub fn pickup_coordinates(&self) -> Coordinates {
        Coordinates::new(self.restaurant_latitude, self.restaurant_longitude)
    }
}

pub struct CreateOrderPayload {
    pub sub_total: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub delivery_address: String,
    pub delivery_coordinates: Option<Coordinates>,
    pub customer_id: String,
    pub restaurant_id: String,
}

pub struct CreateOrderItemPayload {
    pub quantity: i32,
    pub price: BigDecimal,
    pub menu_item_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateOrderPayload,
) -> Result<Order, Error> {
    sqlx::query_as::<_, Order>(
        "
        INSERT INTO orders (
            id,
            status,
            sub_total,
            delivery_fee,
            total,
            delivery_address,
            delivery_latitude,
            delivery_longitude,
            customer_id,
            restaurant_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(OrderStatus::Pending)
    .bind(payload.sub_total)
    .bind(payload.delivery_fee)
    .bind(payload.total)
    .bind(payload.delivery_address)
    .bind(payload.delivery_coordinates.map(|c| c.latitude))
    .bind(payload.delivery_coordinates.map(|c| c.longitude))
    .bind(payload.customer_id)
    .bind(payload.restaurant_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create an order: {}", err);
        Error::UnexpectedError
    })
}

pub async fn create_items<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
    items: Vec<CreateOrderItemPayload>,
) -> Result<(), Error> {
    let ids = items
        .iter()
        .map(|_| Ulid::new().to_string())
        .collect::<Vec<_>>();
    let order_ids = items.iter().map(|_| order_id.clone()).collect::<Vec<_>>();
    let quantities = items.iter().map(|item| item.quantity).collect::<Vec<_>>();
    let prices = items
        .iter()
        .map(|item| item.price.clone())
        .collect::<Vec<_>>();
    let menu_item_ids = items
        .into_iter()
        .map(|item| item.menu_item_id)
        .collect::<Vec<_>>();

    sqlx::query(
        "
        INSERT INTO order_items (id, quantity, price, order_id, menu_item_id)
        SELECT * FROM UNNEST($1::TEXT[], $2::INT[], $3::NUMERIC[], $4::TEXT[], $5::TEXT[])
        ",
    )
    .bind(ids)
    .bind(quantities)
    .bind(prices)
    .bind(order_ids)
    .bind(menu_item_ids)
    .execute(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating items of order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })
    .map(|_| ())
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch order {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn lock_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to lock order {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_items_by_order_id<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<Vec<OrderItem>, Error> {
    sqlx::query_as::<_, OrderItem>(
        "
        SELECT
            order_items.id,
            order_items.quantity,
            order_items.price,
            order_items.order_id,
            order_items.menu_item_id,
            menu_items.name AS menu_item_name,
            order_items.created_at
        FROM
            order_items
        INNER JOIN menu_items ON menu_items.id = order_items.menu_item_id
        WHERE
            order_items.order_id = $1
        ORDER BY order_items.created_at ASC, order_items.id ASC
        ",
    )
    .bind(order_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching items of order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Clone, Debug, Default)]
pub struct Filters {
    pub customer_id: Option<String>,
    pub restaurant_id: Option<String>,
    pub restaurant_owner_id: Option<String>,
    pub driver_id: Option<String>,
    pub status: Option<OrderStatus>,
    pub simple_status: Option<OrderSimpleStatus>,
}

const FILTER_CLAUSE: &str = "
    ($1::TEXT IS NULL OR orders.customer_id = $1)
    AND ($2::TEXT IS NULL OR orders.restaurant_id = $2)
    AND ($3::TEXT IS NULL OR restaurants.owner_id = $3)
    AND ($4::TEXT IS NULL OR orders.driver_id = $4)
    AND ($5::TEXT IS NULL OR orders.status = $5)
    AND (
        $6::TEXT IS NULL OR
        CASE
            WHEN $6 = 'ONGOING' THEN orders.status NOT IN ('DELIVERED', 'CANCELLED')
            WHEN $6 = 'COMPLETED' THEN orders.status IN ('DELIVERED', 'CANCELLED')
            ELSE TRUE
        END
    )
";

pub async fn find_many<'e, E: PgExecutor<'e> + Copy>(
    e: E,
    pagination: Pagination,
    filters: Filters,
) -> Result<Paginated<Order>, Error> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "
        SELECT orders.* FROM orders
        INNER JOIN restaurants ON restaurants.id = orders.restaurant_id
        WHERE {}
        ORDER BY orders.created_at DESC
        LIMIT $7 OFFSET $8
        ",
        FILTER_CLAUSE
    ))
    .bind(filters.customer_id.clone())
    .bind(filters.restaurant_id.clone())
    .bind(filters.restaurant_owner_id.clone())
    .bind(filters.driver_id.clone())
    .bind(filters.status)
    .bind(filters.simple_status.map(|s| s.as_str()))
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many orders: {}", err);
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "
        SELECT COUNT(orders.id) FROM orders
        INNER JOIN restaurants ON restaurants.id = orders.restaurant_id
        WHERE {}
        ",
        FILTER_CLAUSE
    ))
    .bind(filters.customer_id)
    .bind(filters.restaurant_id)
    .bind(filters.restaurant_owner_id)
    .bind(filters.driver_id)
    .bind(filters.status)
    .bind(filters.simple_status.map(|s| s.as_str()))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to count orders: {}", err);
        Error::UnexpectedError
    })?;

    Ok(pagination.paginate(orders, total))
}

/// Orders that are paid for, not yet picked by a driver, and whose restaurant has a
/// known location.
pub async fn find_awaiting_driver<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<PickupOrder>, Error> {
    sqlx::query_as::<_, PickupOrder>(
        "
        SELECT
            orders.*,
            restaurants.name AS restaurant_name,
            restaurants.address AS restaurant_address,
            geo_locations.latitude AS restaurant_latitude,
            geo_locations.longitude AS restaurant_longitude
        FROM
            orders
        INNER JOIN restaurants ON restaurants.id = orders.restaurant_id
        INNER JOIN geo_locations ON geo_locations.restaurant_id = restaurants.id
        WHERE
            orders.driver_id IS NULL
            AND orders.status IN ('CONFIRMED', 'PREPARED')
        ORDER BY orders.created_at ASC
        ",
    )
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching orders awaiting a driver: {}",
            err
        );
        Error::UnexpectedError
    })
}

/// Moves an order from `from` to `to`. Returns `None` when the order is no longer in
/// `from`, which happens when another request changed it first.
pub async fn update_status<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>(
        "
        UPDATE orders SET
            status = $1,
            updated_at = NOW()
        WHERE
            id = $2
            AND status = $3
        RETURNING *
        ",
    )
    .bind(to)
    .bind(id.clone())
    .bind(from)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error updating status for order {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn confirm_payment<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<Order>, Error> {
    update_status(e, id, OrderStatus::Pending, OrderStatus::Confirmed).await
}

pub async fn set_payment_intent_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payment_intent_id: String,
) -> Result<(), Error> {
    sqlx::query(
        "
        UPDATE orders SET
            payment_intent_id = $1,
            updated_at = NOW()
        WHERE
            id = $2
        ",
    )
    .bind(payment_intent_id)
    .bind(id.clone())
    .execute(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while saving payment intent of order {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
    .map(|_| ())
}

/// Returns `None` when the order already has a driver or can no longer be picked.
pub async fn assign_driver<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    driver_id: String,
) -> Result<Option<Order>, Error> {
    sqlx::query_as::<_, Order>(
        "
        UPDATE orders SET
            driver_id = $1,
            updated_at = NOW()
        WHERE
            id = $2
            AND driver_id IS NULL
            AND status IN ('CONFIRMED', 'PREPARED')
        RETURNING *
        ",
    )
    .bind(driver_id.clone())
    .bind(id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while assigning driver {} to order {}: {}",
            driver_id,
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<(), Error> {
    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while deleting order {}: {}", id, err);
            Error::UnexpectedError
        })
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures;
    use sqlx::PgPool;

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn stale_status_updates_are_rejected(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;

        let cancelled = update_status(
            &pool,
            order.id.clone(),
            OrderStatus::Pending,
            OrderStatus::Cancelled,
        )
        .await
        .expect("update should run");
        let confirmed = update_status(
            &pool,
            order.id.clone(),
            OrderStatus::Pending,
            OrderStatus::Confirmed,
        )
        .await
        .expect("update should run");

        assert!(cancelled.is_some());
        assert!(confirmed.is_none());

        let order = find_by_id(&pool, order.id)
            .await
            .expect("lookup should run")
            .expect("order should exist");
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn orders_take_a_single_driver(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let order = fixtures::advance(&pool, &order, OrderStatus::Confirmed).await;
        let (_, first) = fixtures::driver(&pool).await;
        let (_, second) = fixtures::driver(&pool).await;

        let taken = assign_driver(&pool, order.id.clone(), first.id.clone())
            .await
            .expect("assignment should run");
        let refused = assign_driver(&pool, order.id.clone(), second.id)
            .await
            .expect("assignment should run");

        assert_eq!(taken.and_then(|order| order.driver_id), Some(first.id));
        assert!(refused.is_none());
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn pending_orders_cannot_be_picked_up(pool: PgPool) {
        let marketplace = fixtures::marketplace(&pool).await;
        let order = fixtures::order(&pool, &marketplace, 25).await;
        let (_, driver) = fixtures::driver(&pool).await;

        let assigned = assign_driver(&pool, order.id, driver.id)
            .await
            .expect("assignment should run");

        assert!(assigned.is_none());
    }
}
