//! Wire envelopes of the LocalPay API.

use pagination::{Cursor, Page};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{BalanceAdjustment, Payment, UserRecord};
use crate::domain::ports::UserList;

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersResponseDto {
    users: Vec<UserRecord>,
    #[serde(default)]
    total: u64,
}

impl UsersResponseDto {
    pub(super) fn into_domain(self) -> UserList {
        UserList {
            users: self.users,
            total: self.total,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PaymentsResponseDto {
    payments: Vec<Payment>,
    #[serde(default)]
    total: u64,
    #[serde(default, deserialize_with = "Cursor::deserialize_optional")]
    next_cursor: Option<Cursor>,
}

impl PaymentsResponseDto {
    pub(super) fn into_page(self) -> Page<Payment> {
        Page::new(self.payments, self.total, self.next_cursor)
    }
}

/// `PATCH /update_user/{id}` body carrying one balance movement.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct BalanceBodyDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    refill: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    write_off: Option<u64>,
}

impl From<BalanceAdjustment> for BalanceBodyDto {
    fn from(value: BalanceAdjustment) -> Self {
        match value {
            BalanceAdjustment::Refill(amount) => Self {
                refill: Some(amount),
                write_off: None,
            },
            BalanceAdjustment::WriteOff(amount) => Self {
                refill: None,
                write_off: Some(amount),
            },
        }
    }
}

/// Error body; validation failures send a list instead of a string.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    detail: Value,
}

impl ErrorBodyDto {
    pub(super) fn into_message(self) -> String {
        match self.detail {
            Value::String(text) => text,
            other => other.to_string(),
        }
    }
}
