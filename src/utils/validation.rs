use axum::{http::StatusCode, Json};
use bigdecimal::{BigDecimal, Zero};
use regex::Regex;
use serde_json::json;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub fn into_response(errors: ValidationErrors) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({"errors": errors})))
}

pub fn validate_time_of_day(time_str: &str) -> Result<(), ValidationError> {
    let regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("Invalid time of day regex");
    match regex.is_match(time_str) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_TIME_OF_DAY")
            .with_message(Cow::from("Time must be in 24 hour format (e.g: 08:00)"))),
    }
}

pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    let regex = Regex::new(r"^\+\d{7,15}$").expect("Invalid phone number regex");
    match regex.is_match(phone_number) {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_PHONE_NUMBER").with_message(Cow::from(
            "Phone number must be in international format (e.g: +15551234567)",
        ))),
    }
}

pub fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    match price > &BigDecimal::zero() {
        true => Ok(()),
        false => Err(ValidationError::new("INVALID_PRICE")
            .with_message(Cow::from("Price must be greater than zero"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_24_hour_times() {
        assert!(validate_time_of_day("08:00").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("8:00").is_err());
    }

    #[test]
    fn phone_numbers_need_a_country_code() {
        assert!(validate_phone_number("+2348012345678").is_ok());
        assert!(validate_phone_number("08012345678").is_err());
    }

    #[test]
    fn prices_must_be_positive() {
        assert!(validate_price(&BigDecimal::from(5)).is_ok());
        assert!(validate_price(&BigDecimal::zero()).is_err());
        assert!(validate_price(&BigDecimal::from(-1)).is_err());
    }
}
