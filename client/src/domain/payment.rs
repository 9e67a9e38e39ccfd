//! Payment records, edits and new payment requests.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Lifecycle status of a payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    /// `Выполнен`.
    Completed,
    /// `Аннулирован`.
    Annulled,
    /// Any status this client does not know by name.
    Other(String),
}

impl PaymentStatus {
    /// Wire and display name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "Выполнен",
            Self::Annulled => "Аннулирован",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Выполнен" => Self::Completed,
            "Аннулирован" => Self::Annulled,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payer name split into the given name and the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayerName {
    pub name: String,
    pub surname: String,
}

impl PayerName {
    /// First word is the given name; remaining words form the surname.
    ///
    /// # Examples
    /// ```
    /// use localpay_client::domain::PayerName;
    ///
    /// let payer = PayerName::split("Асан уулу Нурлан");
    /// assert_eq!(payer.name, "Асан");
    /// assert_eq!(payer.surname, "уулу Нурлан");
    /// ```
    pub fn split(full_name: &str) -> Self {
        let mut words = full_name.split_whitespace();
        let name = words.next().unwrap_or_default().to_owned();
        let surname = words.collect::<Vec<_>>().join(" ");
        Self { name, surname }
    }
}

/// A payment row as listed on the payments and profile screens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Payment {
    pub id: i64,
    #[serde(default)]
    pub payment_number: Option<String>,
    #[serde(default, deserialize_with = "super::date::deserialize_optional_timestamp")]
    pub payment_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "super::date::deserialize_optional_timestamp")]
    pub payment_accept: Option<NaiveDateTime>,
    pub ls_abon: String,
    pub money: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub annulment: bool,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "super::date::deserialize_optional_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, rename = "FullName")]
    pub full_name: Option<String>,
}

impl Payment {
    /// Payer name split for display.
    pub fn payer(&self) -> PayerName {
        self.full_name
            .as_deref()
            .map(PayerName::split)
            .unwrap_or_default()
    }
}

/// Fields an operator may change on an existing payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentUpdate {
    pub payment_status: PaymentStatus,
    pub annulment: bool,
    pub comment: Option<String>,
}

impl PaymentUpdate {
    /// Start an edit from the current payment values.
    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            payment_status: payment.payment_status.clone(),
            annulment: payment.annulment,
            comment: payment.comment.clone(),
        }
    }
}

/// Validation errors for a new payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewPaymentError {
    /// Subscriber account was blank.
    EmptyAccount,
    /// Amount was not a positive finite number.
    InvalidAmount { input: String },
}

impl fmt::Display for NewPaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAccount => write!(f, "subscriber account must not be empty"),
            Self::InvalidAmount { input } => write!(f, "`{input}` is not a positive amount"),
        }
    }
}

impl std::error::Error for NewPaymentError {}

/// Validated payment request for `POST /create_payment`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    ls_abon: String,
    money: f64,
}

impl NewPayment {
    /// Validate raw form inputs.
    pub fn try_from_parts(ls_abon: &str, money: &str) -> Result<Self, NewPaymentError> {
        let account = ls_abon.trim();
        if account.is_empty() {
            return Err(NewPaymentError::EmptyAccount);
        }
        let amount = money
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or_else(|| NewPaymentError::InvalidAmount {
                input: money.to_owned(),
            })?;
        Ok(Self {
            ls_abon: account.to_owned(),
            money: amount,
        })
    }

    /// Subscriber account.
    pub fn ls_abon(&self) -> &str {
        self.ls_abon.as_str()
    }

    /// Amount to pay.
    pub const fn money(&self) -> f64 {
        self.money
    }
}
