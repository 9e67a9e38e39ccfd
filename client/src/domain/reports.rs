//! Spreadsheet report requests and the files they produce.

use super::{DateRange, Region};

/// File name used by the reports screen for every report.
pub const REPORTS_FILE_NAME: &str = "Отчет.xlsx";

/// Which single-user report to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFlavour {
    /// LocalPay payments only.
    #[default]
    LocalPay,
    /// PlanUp against LocalPay comparison.
    PlanUpComparison,
}

impl ReportFlavour {
    fn label(self) -> &'static str {
        match self {
            Self::LocalPay => "LocalPay",
            Self::PlanUpComparison => "PlanUp-LocalPay",
        }
    }
}

/// A downloadable report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRequest {
    /// Payments of one user, looked up by login.
    SingleUser {
        login: String,
        range: DateRange,
        flavour: ReportFlavour,
    },
    /// Payments of every user, optionally restricted to a region.
    AllUsersPayments {
        range: DateRange,
        region: Option<Region>,
    },
    /// Account information of every user.
    AllUsersInfo,
}

impl ReportRequest {
    /// API path serving the report.
    pub fn path(&self) -> &'static str {
        match self {
            Self::SingleUser {
                flavour: ReportFlavour::LocalPay,
                ..
            } => "/export-single-user-payments/",
            Self::SingleUser {
                flavour: ReportFlavour::PlanUpComparison,
                ..
            } => "/planup-localpay-comparison",
            Self::AllUsersPayments { .. } => "/export-all-user-payments",
            Self::AllUsersInfo => "/export-all-users-info",
        }
    }

    /// Query pairs in wire naming.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::SingleUser { login, range, .. } => {
                let mut pairs = vec![("login", login.clone())];
                pairs.extend(range.query_pairs());
                pairs
            }
            Self::AllUsersPayments { range, region } => {
                let mut pairs = range.query_pairs();
                if let Some(region) = region {
                    pairs.push(("region", region.as_str().to_owned()));
                }
                pairs
            }
            Self::AllUsersInfo => Vec::new(),
        }
    }
}

/// File name used by the profile screen: `Отчет <flavour> <login>.xlsx`.
pub fn profile_report_file_name(flavour: ReportFlavour, login: &str) -> String {
    format!("Отчет {} {login}.xlsx", flavour.label())
}

/// Downloaded report body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for report routing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReportFlavour::LocalPay, "/export-single-user-payments/")]
    #[case(ReportFlavour::PlanUpComparison, "/planup-localpay-comparison")]
    fn single_user_flavours_choose_endpoint(#[case] flavour: ReportFlavour, #[case] path: &str) {
        let request = ReportRequest::SingleUser {
            login: "kassa_osh".to_owned(),
            range: DateRange::default(),
            flavour,
        };
        assert_eq!(request.path(), path);
        assert_eq!(request.query_pairs(), vec![("login", "kassa_osh".to_owned())]);
    }

    #[rstest]
    fn region_is_sent_by_name() {
        let request = ReportRequest::AllUsersPayments {
            range: DateRange::default(),
            region: Some(Region::Naryn),
        };
        assert_eq!(request.query_pairs(), vec![("region", "Нарынская".to_owned())]);
        assert!(ReportRequest::AllUsersInfo.query_pairs().is_empty());
    }

    #[rstest]
    #[case(ReportFlavour::LocalPay, "Отчет LocalPay kassa.xlsx")]
    #[case(ReportFlavour::PlanUpComparison, "Отчет PlanUp-LocalPay kassa.xlsx")]
    fn profile_file_names(#[case] flavour: ReportFlavour, #[case] expected: &str) {
        assert_eq!(profile_report_file_name(flavour, "kassa"), expected);
    }
}
