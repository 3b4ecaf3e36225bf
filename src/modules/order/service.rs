use bigdecimal::{BigDecimal, FromPrimitive, Zero};
use std::sync::Arc;

use super::repository::{self, Order, OrderStatus};
use crate::{
    modules::{driver, menu_item::repository::MenuItem, restaurant, user},
    types::{Context, DeliveryContext},
    utils::geo::Coordinates,
};

/// The part a user plays in a given order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Actor {
    Customer,
    RestaurantOwner,
    Driver,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    OrderNotFound,
    OrderNotVisible,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineError {
    NoItems,
    InvalidQuantity(String),
    UnknownMenuItem(String),
    WrongRestaurant(String),
    Unavailable(String),
}

pub fn can_transition(actor: Actor, from: OrderStatus, to: OrderStatus) -> bool {
    matches!(
        (actor, from, to),
        (Actor::Customer, OrderStatus::Pending, OrderStatus::Cancelled)
            | (
                Actor::RestaurantOwner,
                OrderStatus::Confirmed,
                OrderStatus::Prepared
            )
            | (
                Actor::RestaurantOwner,
                OrderStatus::Confirmed,
                OrderStatus::Cancelled
            )
            | (
                Actor::Driver,
                OrderStatus::Prepared,
                OrderStatus::OutForDelivery
            )
            | (
                Actor::Driver,
                OrderStatus::OutForDelivery,
                OrderStatus::Delivered
            )
    )
}

/// `base + per_km * distance`, rounded to cents. Falls back to the base fee when
/// either end of the trip has no known location.
pub fn calculate_delivery_fee(
    delivery: &DeliveryContext,
    pickup: Option<Coordinates>,
    drop_off: Option<Coordinates>,
) -> BigDecimal {
    let distance = match (pickup, drop_off) {
        (Some(pickup), Some(drop_off)) => pickup.distance_km(&drop_off),
        _ => return delivery.base_fee.with_scale(2),
    };

    let distance = BigDecimal::from_f64(distance).unwrap_or_else(BigDecimal::zero);

    (&delivery.base_fee + &delivery.fee_per_km * distance)
        .round(2)
        .with_scale(2)
}

pub fn calculate_sub_total<'a, I>(lines: I) -> BigDecimal
where
    I: IntoIterator<Item = (&'a BigDecimal, i32)>,
{
    lines
        .into_iter()
        .fold(BigDecimal::zero(), |acc, (price, quantity)| {
            acc + price * BigDecimal::from(quantity)
        })
        .with_scale(2)
}

/// Pairs each requested `(menu_item_id, quantity)` with its menu item. Repeated ids
/// are merged, first occurrence wins the position.
pub fn resolve_lines(
    requested: Vec<(String, i32)>,
    menu_items: Vec<MenuItem>,
    restaurant_id: &str,
) -> Result<Vec<(MenuItem, i32)>, LineError> {
    if requested.is_empty() {
        return Err(LineError::NoItems);
    }

    let mut merged: Vec<(String, i32)> = Vec::with_capacity(requested.len());
    for (menu_item_id, quantity) in requested {
        if quantity < 1 {
            return Err(LineError::InvalidQuantity(menu_item_id));
        }

        match merged.iter_mut().find(|(id, _)| *id == menu_item_id) {
            Some((_, total)) => *total = total.saturating_add(quantity),
            None => merged.push((menu_item_id, quantity)),
        }
    }

    merged
        .into_iter()
        .map(|(menu_item_id, quantity)| {
            let menu_item = menu_items
                .iter()
                .find(|menu_item| menu_item.id == menu_item_id)
                .ok_or_else(|| LineError::UnknownMenuItem(menu_item_id.clone()))?;

            if menu_item.restaurant_id != restaurant_id {
                return Err(LineError::WrongRestaurant(menu_item_id));
            }

            if !menu_item.is_available {
                return Err(LineError::Unavailable(menu_item_id));
            }

            Ok((menu_item.clone(), quantity))
        })
        .collect()
}

/// Works out how `user` relates to `order`. `None` means the user has no business
/// looking at it.
pub async fn resolve_actor(
    ctx: Arc<Context>,
    user: &user::repository::User,
    order: &Order,
) -> Result<Option<Actor>, Error> {
    match user.role {
        user::repository::Role::Customer => {
            let customer =
                user::repository::find_customer_by_user_id(&ctx.db_conn.pool, user.id.clone())
                    .await
                    .map_err(|_| Error::UnexpectedError)?;

            Ok(customer
                .filter(|customer| customer.id == order.customer_id)
                .map(|_| Actor::Customer))
        }
        user::repository::Role::RestaurantOwner => {
            let owner = user::repository::find_restaurant_owner_by_user_id(
                &ctx.db_conn.pool,
                user.id.clone(),
            )
            .await
            .map_err(|_| Error::UnexpectedError)?;

            let owner = match owner {
                Some(owner) => owner,
                None => return Ok(None),
            };

            let restaurant =
                restaurant::repository::find_by_id(&ctx.db_conn.pool, order.restaurant_id.clone())
                    .await
                    .map_err(|_| Error::UnexpectedError)?;

            Ok(restaurant
                .filter(|restaurant| restaurant::repository::is_owner(restaurant, &owner.id))
                .map(|_| Actor::RestaurantOwner))
        }
        user::repository::Role::Driver => {
            let driver = driver::repository::find_by_user_id(&ctx.db_conn.pool, user.id.clone())
                .await
                .map_err(|_| Error::UnexpectedError)?;

            Ok(driver
                .filter(|driver| order.driver_id.as_deref() == Some(driver.id.as_str()))
                .map(|_| Actor::Driver))
        }
    }
}

/// Loads an order along with the part `user` plays in it.
pub async fn find_for_actor(
    ctx: Arc<Context>,
    user: &user::repository::User,
    order_id: String,
) -> Result<(Order, Actor), Error> {
    let order = repository::find_by_id(&ctx.db_conn.pool, order_id)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::OrderNotFound)?;

    match resolve_actor(ctx, user, &order).await? {
        Some(actor) => Ok((order, actor)),
        None => Err(Error::OrderNotVisible),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn delivery() -> DeliveryContext {
        DeliveryContext {
            base_fee: BigDecimal::from(2),
            fee_per_km: BigDecimal::from_str("0.5").unwrap(),
        }
    }

    fn menu_item(id: &str, restaurant_id: &str, is_available: bool) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price: BigDecimal::from(5),
            image: None,
            is_available,
            restaurant_id: restaurant_id.to_string(),
            category_id: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: None,
        }
    }

    #[test]
    fn repeated_lines_are_merged() {
        let lines = resolve_lines(
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 2),
                ("a".to_string(), 3),
            ],
            vec![menu_item("a", "r1", true), menu_item("b", "r1", true)],
            "r1",
        )
        .unwrap();

        let summary = lines
            .iter()
            .map(|(item, quantity)| (item.id.as_str(), *quantity))
            .collect::<Vec<_>>();
        assert_eq!(summary, vec![("a", 4), ("b", 2)]);
    }

    #[test]
    fn lines_must_come_from_the_ordered_restaurant() {
        let err = resolve_lines(
            vec![("a".to_string(), 1)],
            vec![menu_item("a", "r2", true)],
            "r1",
        )
        .unwrap_err();
        assert_eq!(err, LineError::WrongRestaurant("a".to_string()));
    }

    #[test]
    fn unavailable_or_unknown_items_are_rejected() {
        let items = vec![menu_item("a", "r1", false)];
        assert_eq!(
            resolve_lines(vec![("a".to_string(), 1)], items.clone(), "r1").unwrap_err(),
            LineError::Unavailable("a".to_string())
        );
        assert_eq!(
            resolve_lines(vec![("z".to_string(), 1)], items, "r1").unwrap_err(),
            LineError::UnknownMenuItem("z".to_string())
        );
    }

    #[test]
    fn empty_orders_and_zero_quantities_are_rejected() {
        assert_eq!(
            resolve_lines(vec![], vec![], "r1").unwrap_err(),
            LineError::NoItems
        );
        assert_eq!(
            resolve_lines(
                vec![("a".to_string(), 0)],
                vec![menu_item("a", "r1", true)],
                "r1"
            )
            .unwrap_err(),
            LineError::InvalidQuantity("a".to_string())
        );
    }

    #[test]
    fn customers_can_only_cancel_pending_orders() {
        assert!(can_transition(
            Actor::Customer,
            OrderStatus::Pending,
            OrderStatus::Cancelled
        ));
        assert!(!can_transition(
            Actor::Customer,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled
        ));
        assert!(!can_transition(
            Actor::Customer,
            OrderStatus::Pending,
            OrderStatus::Confirmed
        ));
    }

    #[test]
    fn owners_prepare_or_cancel_confirmed_orders() {
        assert!(can_transition(
            Actor::RestaurantOwner,
            OrderStatus::Confirmed,
            OrderStatus::Prepared
        ));
        assert!(can_transition(
            Actor::RestaurantOwner,
            OrderStatus::Confirmed,
            OrderStatus::Cancelled
        ));
        assert!(!can_transition(
            Actor::RestaurantOwner,
            OrderStatus::Pending,
            OrderStatus::Prepared
        ));
        assert!(!can_transition(
            Actor::RestaurantOwner,
            OrderStatus::Prepared,
            OrderStatus::OutForDelivery
        ));
    }

    #[test]
    fn drivers_move_prepared_orders_to_delivered() {
        assert!(can_transition(
            Actor::Driver,
            OrderStatus::Prepared,
            OrderStatus::OutForDelivery
        ));
        assert!(can_transition(
            Actor::Driver,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered
        ));
        assert!(!can_transition(
            Actor::Driver,
            OrderStatus::Prepared,
            OrderStatus::Delivered
        ));
        assert!(!can_transition(
            Actor::Driver,
            OrderStatus::Delivered,
            OrderStatus::Cancelled
        ));
    }

    #[test]
    fn terminal_statuses_never_move() {
        for actor in [Actor::Customer, Actor::RestaurantOwner, Actor::Driver] {
            for to in [
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Prepared,
                OrderStatus::OutForDelivery,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(!can_transition(actor, OrderStatus::Delivered, to));
                assert!(!can_transition(actor, OrderStatus::Cancelled, to));
            }
        }
    }

    #[test]
    fn unknown_locations_cost_the_base_fee() {
        let fee = calculate_delivery_fee(&delivery(), None, Some(Coordinates::new(6.5, 3.3)));
        assert_eq!(fee, BigDecimal::from(2));
    }

    #[test]
    fn same_place_costs_the_base_fee() {
        let point = Coordinates::new(6.5244, 3.3792);
        let fee = calculate_delivery_fee(&delivery(), Some(point), Some(point));
        assert_eq!(fee, BigDecimal::from(2));
    }

    #[test]
    fn fee_grows_with_distance() {
        // One degree of latitude is roughly 111.2 km.
        let fee = calculate_delivery_fee(
            &delivery(),
            Some(Coordinates::new(0.0, 0.0)),
            Some(Coordinates::new(1.0, 0.0)),
        );
        assert_eq!(fee, BigDecimal::from_str("57.60").unwrap());
    }

    #[test]
    fn sub_total_multiplies_price_by_quantity() {
        let burger = BigDecimal::from_str("8.50").unwrap();
        let fries = BigDecimal::from_str("2.25").unwrap();
        let sub_total = calculate_sub_total(vec![(&burger, 2), (&fries, 3)]);
        assert_eq!(sub_total, BigDecimal::from_str("23.75").unwrap());
    }
}
