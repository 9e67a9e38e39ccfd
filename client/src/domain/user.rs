//! User records as served by the LocalPay API.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Numeric user identifier assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Oblast a user operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    #[serde(rename = "Чуйская")]
    Chuy,
    #[serde(rename = "Иссык-кульская")]
    IssykKul,
    #[serde(rename = "Нарынская")]
    Naryn,
    #[serde(rename = "Джалал-Абадская")]
    JalalAbad,
    #[serde(rename = "Баткенская")]
    Batken,
    #[serde(rename = "Ошская")]
    Osh,
    #[serde(rename = "Таласская")]
    Talas,
}

impl Region {
    /// Every region in the order the server lists them.
    pub const ALL: [Self; 7] = [
        Self::Chuy,
        Self::IssykKul,
        Self::Naryn,
        Self::JalalAbad,
        Self::Batken,
        Self::Osh,
        Self::Talas,
    ];

    /// Wire and display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chuy => "Чуйская",
            Self::IssykKul => "Иссык-кульская",
            Self::Naryn => "Нарынская",
            Self::JalalAbad => "Джалал-Абадская",
            Self::Batken => "Баткенская",
            Self::Osh => "Ошская",
            Self::Talas => "Таласская",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a region name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region `{0}`")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRegion(trimmed.to_owned()))
    }
}

/// Server-side role string carried on user records.
///
/// Kept separate from [`crate::domain::Role`], which also models the
/// unauthenticated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    Supervisor,
    #[default]
    User,
}

/// A user record as listed on the users screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub login: String,
    #[serde(default)]
    pub role: AccountRole,
    #[serde(default)]
    pub access_to_payments: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub available_balance: i64,
    #[serde(default)]
    pub spent_money: i64,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub planup_id: Option<i64>,
    #[serde(default, deserialize_with = "super::date::deserialize_optional_timestamp")]
    pub date_reg: Option<NaiveDateTime>,
}

impl UserRecord {
    /// `"<name> <surname>"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_owned()
    }

    /// Whether `term` matches the users-screen search.
    ///
    /// The id matches as a substring of its decimal form; name, surname,
    /// login and region match case-insensitively. A blank term matches all.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.id.to_string().contains(&needle)
            || [
                self.name.as_str(),
                self.surname.as_str(),
                self.login.as_str(),
                self.region.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Editable fields of a user; absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AccountRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_to_payments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_balance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planup_id: Option<i64>,
}

impl UserUpdate {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A balance movement applied through `PATCH /update_user/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAdjustment {
    /// Add funds to the available balance.
    Refill(u64),
    /// Remove funds, bounded server-side by the money already spent.
    WriteOff(u64),
}

/// Error returned for a zero adjustment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("adjustment amount must be positive")]
pub struct ZeroAdjustment;

impl BalanceAdjustment {
    /// Validate a refill amount.
    pub fn refill(amount: u64) -> Result<Self, ZeroAdjustment> {
        if amount == 0 {
            return Err(ZeroAdjustment);
        }
        Ok(Self::Refill(amount))
    }

    /// Validate a write-off amount.
    pub fn write_off(amount: u64) -> Result<Self, ZeroAdjustment> {
        if amount == 0 {
            return Err(ZeroAdjustment);
        }
        Ok(Self::WriteOff(amount))
    }

    /// Amount moved.
    pub const fn amount(self) -> u64 {
        match self {
            Self::Refill(amount) | Self::WriteOff(amount) => amount,
        }
    }
}

/// Validation errors for the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    EmptyName,
    EmptySurname,
    EmptyLogin,
    EmptyPassword,
    PasswordMismatch,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptySurname => write!(f, "surname must not be empty"),
            Self::EmptyLogin => write!(f, "login must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordMismatch => write!(f, "password confirmation does not match"),
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Raw registration form values.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub surname: String,
    pub login: String,
    pub password: Zeroizing<String>,
    pub password_confirmation: Zeroizing<String>,
    pub role: AccountRole,
    pub access_to_payments: bool,
    pub is_active: bool,
    pub region: Region,
    pub comment: Option<String>,
    pub planup_id: Option<i64>,
}

/// Validated payload for `POST /create_user`.
///
/// New accounts always start with zero balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    name: String,
    surname: String,
    login: String,
    #[serde(serialize_with = "serialize_secret")]
    password: Zeroizing<String>,
    role: AccountRole,
    access_to_payments: bool,
    is_active: bool,
    region: Region,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    planup_id: Option<i64>,
    available_balance: i64,
    spent_money: i64,
    refill: i64,
    write_off: i64,
}

fn serialize_secret<S>(value: &Zeroizing<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_str())
}

impl TryFrom<RegistrationForm> for Registration {
    type Error = RegistrationError;

    fn try_from(form: RegistrationForm) -> Result<Self, Self::Error> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }
        let surname = form.surname.trim();
        if surname.is_empty() {
            return Err(RegistrationError::EmptySurname);
        }
        let login = form.login.trim();
        if login.is_empty() {
            return Err(RegistrationError::EmptyLogin);
        }
        if form.password.is_empty() {
            return Err(RegistrationError::EmptyPassword);
        }
        if form.password.as_str() != form.password_confirmation.as_str() {
            return Err(RegistrationError::PasswordMismatch);
        }

        Ok(Self {
            name: name.to_owned(),
            surname: surname.to_owned(),
            login: login.to_owned(),
            password: form.password,
            role: form.role,
            access_to_payments: form.access_to_payments,
            is_active: form.is_active,
            region: form.region,
            comment: form.comment.filter(|comment| !comment.trim().is_empty()),
            planup_id: form.planup_id,
            available_balance: 0,
            spent_money: 0,
            refill: 0,
            write_off: 0,
        })
    }
}

impl Registration {
    /// Login of the account being created.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }
}
