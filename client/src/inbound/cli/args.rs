//! Command-line grammar of the `localpay` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{AccountRole, Region, ReportFlavour, Route};

/// `localpay` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "localpay",
    about = "Role-gated LocalPay client for payments, users and reports",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One screen action.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and store the session credential.
    Login {
        login: String,
        #[arg(long, env = "LOCALPAY_PASSWORD", hide_env_values = true)]
        password: String,
        /// Route to resume after signing in.
        #[arg(long = "return-to", value_name = "route")]
        return_to: Option<Route>,
    },
    /// Sign out and forget the stored credential.
    Logout,
    /// Show the current role and the routes it may open.
    Whoami,
    /// Run the role guard for a route.
    Open { route: Route },
    /// List payments (admin, supervisor).
    Payments(PaymentsArgs),
    /// Create a payment (admin).
    CreatePayment { ls_abon: String, money: String },
    /// Change status, annulment or comment of a payment (admin).
    UpdatePayment(UpdatePaymentArgs),
    /// List users (admin, supervisor).
    Users(UsersArgs),
    /// Change editable fields of a user (admin).
    UpdateUser(UpdateUserArgs),
    /// Add funds to a user's balance (admin).
    Refill { id: i64, amount: u64 },
    /// Write off funds already spent by a user (admin).
    WriteOff { id: i64, amount: u64 },
    /// Create an account (admin).
    Register(RegisterArgs),
    /// Show the signed-in user's record and payment history (user).
    Profile(ProfileArgs),
    /// Pay into a subscriber account (user).
    Pay { ls_abon: String, money: String },
    /// Download a spreadsheet report (admin, supervisor).
    Report(ReportArgs),
    /// Suggest logins for the single-user report (admin, supervisor).
    Suggest { fragment: String },
}

impl Command {
    /// Subcommand name, safe to log.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Open { .. } => "open",
            Self::Payments(_) => "payments",
            Self::CreatePayment { .. } => "create-payment",
            Self::UpdatePayment(_) => "update-payment",
            Self::Users(_) => "users",
            Self::UpdateUser(_) => "update-user",
            Self::Refill { .. } => "refill",
            Self::WriteOff { .. } => "write-off",
            Self::Register(_) => "register",
            Self::Profile(_) => "profile",
            Self::Pay { .. } => "pay",
            Self::Report(_) => "report",
            Self::Suggest { .. } => "suggest",
        }
    }
}

/// Date range inputs in `yyyy-mm-dd`.
#[derive(Debug, Clone, Default, Args)]
pub struct DateArgs {
    #[arg(long, value_name = "yyyy-mm-dd", default_value = "")]
    pub start: String,
    #[arg(long, value_name = "yyyy-mm-dd", default_value = "")]
    pub end: String,
}

#[derive(Debug, Clone, Args)]
pub struct PaymentsArgs {
    #[command(flatten)]
    pub dates: DateArgs,
    /// Subscriber account filter.
    #[arg(long = "ls-abon", default_value = "")]
    pub ls_abon: String,
    /// Payer name filter.
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,
    /// Page to show, following cursors from the first page.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Clone, Args)]
pub struct UpdatePaymentArgs {
    pub id: i64,
    #[arg(long)]
    pub status: String,
    #[arg(long)]
    pub annulled: bool,
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct UsersArgs {
    #[arg(long = "min-balance", default_value = "")]
    pub min_balance: String,
    #[arg(long = "max-balance", default_value = "")]
    pub max_balance: String,
    /// Local search over id, name, surname, login and region.
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateUserArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub login: Option<String>,
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,
    #[arg(long)]
    pub region: Option<Region>,
    #[arg(long = "payments-access")]
    pub access_to_payments: Option<bool>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long = "planup-id")]
    pub planup_id: Option<i64>,
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub login: String,
    #[arg(long)]
    pub password: String,
    #[arg(long = "confirm-password")]
    pub confirm_password: String,
    #[arg(long, value_enum, default_value_t = RoleArg::User)]
    pub role: RoleArg,
    #[arg(long, default_value = "Чуйская")]
    pub region: Region,
    #[arg(long = "payments-access")]
    pub access_to_payments: bool,
    #[arg(long)]
    pub inactive: bool,
    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long = "planup-id")]
    pub planup_id: Option<i64>,
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub dates: DateArgs,
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Also download a personal report for the range.
    #[arg(long, value_enum)]
    pub report: Option<FlavourArg>,
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub kind: ReportKind,
    #[command(flatten)]
    pub dates: DateArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReportKind {
    /// Payments of one user.
    Single {
        login: String,
        #[arg(long, value_enum, default_value_t = FlavourArg::Localpay)]
        flavour: FlavourArg,
    },
    /// Payments of every user, optionally in one region.
    AllPayments {
        #[arg(long)]
        region: Option<Region>,
    },
    /// Account information of every user.
    UsersInfo,
}

/// Account role accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Admin,
    Supervisor,
    User,
}

impl From<RoleArg> for AccountRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Self::Admin,
            RoleArg::Supervisor => Self::Supervisor,
            RoleArg::User => Self::User,
        }
    }
}

/// Single-user report flavour accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlavourArg {
    Localpay,
    Planup,
}

impl From<FlavourArg> for ReportFlavour {
    fn from(value: FlavourArg) -> Self {
        match value {
            FlavourArg::Localpay => Self::LocalPay,
            FlavourArg::Planup => Self::PlanUpComparison,
        }
    }
}
