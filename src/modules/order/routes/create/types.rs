pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::{Deserialize, Serialize};
    use validator::Validate;

    #[derive(Serialize, Deserialize, Validate)]
    pub struct Item {
        pub menu_item_id: String,
        #[validate(range(min = 1, code = "INVALID_QUANTITY", message = "Quantity must be at least 1"))]
        pub quantity: i32,
    }

    #[derive(Deserialize, Validate)]
    pub struct Body {
        pub restaurant_id: String,
        #[validate(
            length(min = 1, code = "NO_ITEMS", message = "An order needs at least one item"),
            nested
        )]
        pub items: Vec<Item>,
        #[validate(length(min = 1, code = "INVALID_ADDRESS", message = "Delivery address cannot be empty"))]
        pub delivery_address: String,
        #[validate(range(min = -90.0, max = 90.0, code = "INVALID_LATITUDE"))]
        pub delivery_latitude: Option<f64>,
        #[validate(range(min = -180.0, max = 180.0, code = "INVALID_LONGITUDE"))]
        pub delivery_longitude: Option<f64>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::order::{
            repository::{Order, OrderItem},
            service::LineError,
        },
        utils::validation,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OrderCreated(Order, Vec<OrderItem>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OrderCreated(order, items) => {
                    let mut body = json!(order);
                    body["items"] = json!(items);
                    (StatusCode::CREATED, Json(body)).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        NotCustomer,
        RestaurantNotFound,
        RestaurantClosed,
        InvalidItems(LineError),
        FailedToCreateOrder,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::NotCustomer => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only customers can place orders" })),
                )
                    .into_response(),
                Self::RestaurantNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Restaurant not found" })),
                )
                    .into_response(),
                Self::RestaurantClosed => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Restaurant is closed" })),
                )
                    .into_response(),
                Self::InvalidItems(err) => {
                    let message = match err {
                        LineError::NoItems => String::from("An order needs at least one item"),
                        LineError::InvalidQuantity(id) => {
                            format!("Quantity of menu item {} must be at least 1", id)
                        }
                        LineError::UnknownMenuItem(id) => format!("Menu item {} not found", id),
                        LineError::WrongRestaurant(id) => {
                            format!("Menu item {} does not belong to this restaurant", id)
                        }
                        LineError::Unavailable(id) => {
                            format!("Menu item {} is not available", id)
                        }
                    };
                    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
                }
                Self::FailedToCreateOrder => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

#[cfg(test)]
mod tests {
    use super::request::{Body, Item};
    use validator::Validate;

    fn body(items: Vec<Item>) -> Body {
        Body {
            restaurant_id: "01HRESTAURANT".to_string(),
            items,
            delivery_address: "12 Marina Road, Lagos".to_string(),
            delivery_latitude: Some(6.45),
            delivery_longitude: Some(3.39),
        }
    }

    fn item(quantity: i32) -> Item {
        Item {
            menu_item_id: "01HMENUITEM".to_string(),
            quantity,
        }
    }

    #[test]
    fn orders_with_items_are_valid() {
        assert!(body(vec![item(2)]).validate().is_ok());
    }

    #[test]
    fn orders_need_at_least_one_item() {
        let errors = body(vec![]).validate().unwrap_err();
        let codes: Vec<String> = errors
            .field_errors()
            .get("items")
            .map(|errors| errors.iter().map(|error| error.code.to_string()).collect())
            .unwrap_or_default();

        assert_eq!(codes, vec!["NO_ITEMS".to_string()]);
    }

    #[test]
    fn every_item_needs_a_positive_quantity() {
        let errors = body(vec![item(1), item(0)]).validate().unwrap_err();

        assert!(errors.errors().contains_key("items"));
        assert!(errors.field_errors().get("items").is_none());
    }
}
