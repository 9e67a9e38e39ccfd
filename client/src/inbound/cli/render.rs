//! Plain-text rendering of screen state.

use pagination::{CursorPager, OffsetPager};

use crate::domain::screens::Transition;
use crate::domain::{Notice, NoticeKind, Payment, UserRecord};

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub(super) fn notice(notice: &Notice) -> String {
    match notice.kind() {
        NoticeKind::Success => format!("ok: {}", notice.text()),
        NoticeKind::Error => format!("error: {}", notice.text()),
    }
}

pub(super) fn transition(transition: Transition) -> Option<String> {
    match transition {
        Transition::Stay => None,
        Transition::Navigate {
            to,
            return_to: Some(resume),
        } => Some(format!("-> {to} (return to {resume})")),
        Transition::Navigate { to, .. } => Some(format!("-> {to}")),
    }
}

pub(super) fn payments<F>(pager: &CursorPager<Payment, F>) -> Vec<String> {
    let mut lines = vec![format!(
        "page {} | {} shown | {} total{}",
        pager.page_number(),
        pager.items().len(),
        pager.total(),
        if pager.has_next() { " | more" } else { "" }
    )];
    lines.extend(pager.items().iter().map(payment_row));
    lines
}

fn payment_row(payment: &Payment) -> String {
    let date = payment
        .payment_date
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default();
    let payer = payment.payer();
    format!(
        "{}\t{}\t{}\t{:.2}\t{}{}\t{} {}",
        payment.id,
        date,
        payment.ls_abon,
        payment.money,
        payment.payment_status,
        if payment.annulment { " (annulled)" } else { "" },
        payer.name,
        payer.surname,
    )
    .trim_end()
    .to_owned()
}

pub(super) fn users(pager: &OffsetPager<UserRecord>) -> Vec<String> {
    let mut lines = vec![format!(
        "page {}/{} | {} matching of {}",
        pager.current_page(),
        pager.total_pages(),
        pager.filtered().len(),
        pager.base().len()
    )];
    lines.extend(pager.current_items().iter().map(user_row));
    lines
}

fn user_row(user: &UserRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\tbalance {}\tspent {}{}",
        user.id,
        user.login,
        user.full_name(),
        user.region,
        user.available_balance,
        user.spent_money,
        if user.is_active { "" } else { "\tinactive" },
    )
}

pub(super) fn profile(user: &UserRecord) -> Vec<String> {
    vec![
        format!("{} ({})", user.full_name(), user.login),
        format!("region: {}", user.region),
        format!("available balance: {}", user.available_balance),
        format!("spent: {}", user.spent_money),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Route;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Transition::Stay, None)]
    #[case(Transition::to(Route::Admin), Some("-> /admin"))]
    #[case(
        Transition::Navigate { to: Route::Login, return_to: Some(Route::Reports) },
        Some("-> /login (return to /reports)")
    )]
    fn transitions_render_as_arrows(#[case] input: Transition, #[case] expected: Option<&str>) {
        assert_eq!(transition(input).as_deref(), expected);
    }

    #[rstest]
    fn payment_rows_show_payer_and_status() {
        let payment: Payment = serde_json::from_value(json!({
            "id": 12,
            "payment_date": "2024-06-10T09:15:00",
            "ls_abon": "100200",
            "money": 150.5,
            "payment_status": "Аннулирован",
            "annulment": true,
            "FullName": "Иван Петров"
        }))
        .expect("payment");
        assert_eq!(
            payment_row(&payment),
            "12\t10.06.2024 09:15\t100200\t150.50\tАннулирован (annulled)\tИван Петров"
        );
    }

    #[rstest]
    fn notices_are_prefixed_by_kind() {
        assert_eq!(notice(&Notice::error("нет")), "error: нет");
        assert_eq!(notice(&Notice::success("да")), "ok: да");
    }
}
