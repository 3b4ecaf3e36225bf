use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use std::str::FromStr;
use ulid::Ulid;

use crate::text_column;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentProvider {
    #[serde(rename = "STRIPE")]
    Stripe,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Stripe => "STRIPE",
        }
    }
}

impl FromStr for PaymentProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STRIPE" => Ok(PaymentProvider::Stripe),
            _ => Err(format!("'{}' is not a valid PaymentProvider", s)),
        }
    }
}

text_column!(PaymentProvider);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "SUCCEEDED")]
    Succeeded,
    #[serde(rename = "FAILED")]
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Succeeded => "SUCCEEDED",
            PaymentStatus::Failed => "FAILED",
        }
    }

    /// A succeeded payment is final. A failed one can still succeed when the customer
    /// retries the same intent.
    pub fn settles_from(&self) -> &'static [PaymentStatus] {
        match self {
            PaymentStatus::Pending => &[],
            PaymentStatus::Succeeded => &[PaymentStatus::Pending, PaymentStatus::Failed],
            PaymentStatus::Failed => &[PaymentStatus::Pending],
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "SUCCEEDED" => Ok(PaymentStatus::Succeeded),
            "FAILED" => Ok(PaymentStatus::Failed),
            _ => Err(format!("'{}' is not a valid PaymentStatus", s)),
        }
    }
}

text_column!(PaymentStatus);

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Payment {
    pub id: String,
    pub provider: PaymentProvider,
    pub payment_intent_id: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub status: PaymentStatus,
    pub order_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreatePaymentPayload {
    pub payment_intent_id: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub order_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreatePaymentPayload,
) -> Result<Payment, Error> {
    sqlx::query_as::<_, Payment>(
        "
        INSERT INTO payments (
            id,
            provider,
            payment_intent_id,
            amount,
            currency,
            status,
            order_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(PaymentProvider::Stripe)
    .bind(payload.payment_intent_id)
    .bind(payload.amount)
    .bind(payload.currency)
    .bind(PaymentStatus::Pending)
    .bind(payload.order_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while recording payment for order {}: {}",
            payload.order_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Holds a row lock on the payment until the transaction ends.
pub async fn lock_by_payment_intent_id<'e, E: PgExecutor<'e>>(
    e: E,
    payment_intent_id: String,
) -> Result<Option<Payment>, Error> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE payment_intent_id = $1 FOR UPDATE")
        .bind(payment_intent_id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while locking payment for intent {}: {}",
                payment_intent_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_latest_by_order_id<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<Option<Payment>, Error> {
    sqlx::query_as::<_, Payment>(
        "
        SELECT * FROM payments
        WHERE order_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        ",
    )
    .bind(order_id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching payment of order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn has_succeeded_for_order<'e, E: PgExecutor<'e>>(
    e: E,
    order_id: String,
) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM payments WHERE order_id = $1 AND status = 'SUCCEEDED')",
    )
    .bind(order_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while checking payments of order {}: {}",
            order_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Moves the payment of an intent to `status`. Returns `None` when the payment is not
/// in a state `status` can be reached from.
pub async fn settle<'e, E: PgExecutor<'e>>(
    e: E,
    payment_intent_id: String,
    status: PaymentStatus,
) -> Result<Option<Payment>, Error> {
    let from = status
        .settles_from()
        .iter()
        .map(|status| status.as_str().to_string())
        .collect::<Vec<_>>();

    sqlx::query_as::<_, Payment>(
        "
        UPDATE payments SET
            status = $1,
            updated_at = NOW()
        WHERE
            payment_intent_id = $2
            AND status = ANY($3)
        RETURNING *
        ",
    )
    .bind(status)
    .bind(payment_intent_id.clone())
    .bind(from)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while settling payment for intent {}: {}",
            payment_intent_id,
            err
        );
        Error::UnexpectedError
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_payments_can_still_succeed() {
        assert_eq!(
            PaymentStatus::Succeeded.settles_from(),
            &[PaymentStatus::Pending, PaymentStatus::Failed]
        );
    }

    #[test]
    fn only_pending_payments_can_fail() {
        assert_eq!(PaymentStatus::Failed.settles_from(), &[PaymentStatus::Pending]);
        assert!(PaymentStatus::Pending.settles_from().is_empty());
    }
}
