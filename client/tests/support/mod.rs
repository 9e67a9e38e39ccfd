//! Helpers shared by the client behaviour suites.

use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use serde_json::json;

/// Clock starting at 2024-06-11 12:00 UTC that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 6, 11, 12, 0, 0)
            .single()
            .expect("valid instant");
        Self(Mutex::new(start))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        let mut guard = self.0.lock().expect("clock mutex");
        *guard += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

/// Unsigned JWT carrying `{ id, role, exp }`; `exp` is omitted when `None`.
pub fn token(id: i64, role: &str, exp: Option<i64>) -> String {
    let mut claims = json!({ "id": id, "role": role });
    if let Some(exp) = exp {
        claims["exp"] = json!(exp);
    }
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}
