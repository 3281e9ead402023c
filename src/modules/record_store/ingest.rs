//! Normalisation of raw record store payloads.
//!
//! The store's JSON has drifted over time (`tanggal_daftar` vs `created_at`,
//! `nama_agen` vs `nama`, ...). Each canonical field has an ordered alias
//! list; the first alias that is present and non-empty wins. Resolution
//! happens once here, the aggregation and filter code only ever sees the
//! canonical models.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use super::error::{StoreError, StoreResult};
use super::client::LoginOutcome;
use crate::features::admin::models::{ActivityLogEntry, User};
use crate::features::agents::models::Agent;
use crate::features::auth::model::Role;
use crate::features::installations::models::{
    InstallationDetails, InstallationRecord, InstallationStatus,
};
use crate::features::villages::models::Village;

type Object = Map<String, Value>;

const ID: &[&str] = &["id", "_id", "id_pelanggan"];

pub const REGISTRATION_DATE: &[&str] = &[
    "tanggal_daftar",
    "tanggalDaftar",
    "tgl_daftar",
    "registration_date",
    "registrationDate",
    "created_at",
    "createdAt",
];
pub const RECORD_AGENT: &[&str] = &["agen", "nama_agen", "agent"];
pub const RECORD_VILLAGE: &[&str] = &["desa", "nama_desa", "village"];
const CUSTOMER_NAME: &[&str] = &["nama", "nama_pelanggan", "name"];
const PHONE: &[&str] = &["no_hp", "no_telp", "telepon", "phone"];
const ADDRESS: &[&str] = &["alamat", "address"];
const STATUS: &[&str] = &["status", "status_pemasangan"];
const INSTALLATION_DATE: &[&str] = &[
    "tanggal_pasang",
    "tanggal_pemasangan",
    "installation_date",
    "installationDate",
];
const INSTALLATION_TIME: &[&str] = &[
    "jam_pasang",
    "waktu_pemasangan",
    "installation_time",
    "installationTime",
];
const TECHNICIAN: &[&str] = &["teknisi", "technician"];
const NOTES: &[&str] = &["catatan", "keterangan", "notes"];
const COMMISSION_PAID: &[&str] = &[
    "komisi_dibayar",
    "status_komisi",
    "komisi",
    "commission_paid",
    "commissionPaid",
];

pub const AGENT_NAME: &[&str] = &["nama_agen", "nama", "name"];
pub const VILLAGE_NAME: &[&str] = &["nama_desa", "nama", "name"];
const EMAIL: &[&str] = &["email"];
const KECAMATAN: &[&str] = &["kecamatan", "district"];
const KABUPATEN: &[&str] = &["kabupaten", "regency"];
const USER_NAME: &[&str] = &["nama", "name", "username"];
const ROLE: &[&str] = &["role", "level"];

const LOG_TIMESTAMP: &[&str] = &["waktu", "timestamp", "created_at", "tanggal"];
const LOG_USER: &[&str] = &["nama_user", "user_name", "userName", "nama", "user"];
const LOG_ACTIVITY: &[&str] = &["aktivitas", "activity", "aksi"];
const LOG_DETAILS: &[&str] = &["detail", "details", "keterangan"];
const LOG_IP: &[&str] = &["ip_address", "ipAddress", "ip"];

const TOKEN: &[&str] = &["token", "access_token", "accessToken"];

/// Unwrap a list response; anything but a JSON array is malformed
pub fn array(payload: Value) -> StoreResult<Vec<Value>> {
    match payload {
        Value::Array(items) => Ok(items),
        other => Err(StoreError::MalformedResponse(format!(
            "expected a JSON array, got {}",
            kind(&other)
        ))),
    }
}

pub fn installations(items: &[Value]) -> Vec<InstallationRecord> {
    objects(items, "installation", installation)
}

pub fn agents(items: &[Value]) -> Vec<Agent> {
    objects(items, "agent", agent)
}

pub fn villages(items: &[Value]) -> Vec<Village> {
    objects(items, "village", village)
}

pub fn users(items: &[Value]) -> Vec<User> {
    objects(items, "user", user)
}

pub fn activity_logs(items: &[Value]) -> Vec<ActivityLogEntry> {
    objects(items, "activity log", activity_log)
}

/// Single installation from an item endpoint
pub fn single_installation(payload: &Value) -> StoreResult<InstallationRecord> {
    payload
        .as_object()
        .and_then(installation)
        .ok_or_else(|| {
            StoreError::MalformedResponse(format!(
                "expected an installation object, got {}",
                kind(payload)
            ))
        })
}

/// `{"token": ..., "user": {...}}` from the login endpoint
pub fn login(payload: &Value) -> StoreResult<LoginOutcome> {
    let obj = payload
        .as_object()
        .ok_or_else(|| StoreError::MalformedResponse("login response is not an object".into()))?;

    let token = text(obj, TOKEN)
        .ok_or_else(|| StoreError::MalformedResponse("login response has no token".into()))?;

    let user = ["user", "data"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_object))
        .and_then(user)
        .ok_or_else(|| StoreError::MalformedResponse("login response has no user".into()))?;

    Ok(LoginOutcome { token, user })
}

fn objects<T>(items: &[Value], what: &str, convert: fn(&Object) -> Option<T>) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| {
            let converted = item.as_object().and_then(convert);
            if converted.is_none() {
                tracing::warn!("Skipping unusable {} entry: {}", what, kind(item));
            }
            converted
        })
        .collect()
}

fn installation(obj: &Object) -> Option<InstallationRecord> {
    let status = text(obj, STATUS)
        .and_then(|raw| InstallationStatus::parse(&raw))
        .unwrap_or(InstallationStatus::Awaiting);

    // Installation details and commission only exist once installed
    let (installation, commission_paid) = match status {
        InstallationStatus::Installed => (
            Some(InstallationDetails {
                date: date(obj, INSTALLATION_DATE),
                time: text(obj, INSTALLATION_TIME),
                technician: text(obj, TECHNICIAN),
                notes: text(obj, NOTES),
            }),
            flag(obj, COMMISSION_PAID),
        ),
        InstallationStatus::Awaiting => (None, false),
    };

    Some(InstallationRecord {
        id: text(obj, ID).unwrap_or_default(),
        name: text(obj, CUSTOMER_NAME).unwrap_or_default(),
        phone: text(obj, PHONE).unwrap_or_default(),
        address: text(obj, ADDRESS).unwrap_or_default(),
        village: text(obj, RECORD_VILLAGE).unwrap_or_default(),
        agent: text(obj, RECORD_AGENT).unwrap_or_default(),
        registration_date: date(obj, REGISTRATION_DATE),
        status,
        installation,
        commission_paid,
    })
}

fn agent(obj: &Object) -> Option<Agent> {
    Some(Agent {
        id: text(obj, ID).unwrap_or_default(),
        name: text(obj, AGENT_NAME)?,
        phone: text(obj, PHONE),
        email: text(obj, EMAIL),
        address: text(obj, ADDRESS),
    })
}

fn village(obj: &Object) -> Option<Village> {
    Some(Village {
        id: text(obj, ID).unwrap_or_default(),
        name: text(obj, VILLAGE_NAME)?,
        kecamatan: text(obj, KECAMATAN),
        kabupaten: text(obj, KABUPATEN),
    })
}

fn user(obj: &Object) -> Option<User> {
    Some(User {
        id: text(obj, ID).unwrap_or_default(),
        name: text(obj, USER_NAME).unwrap_or_default(),
        email: text(obj, EMAIL)?,
        role: text(obj, ROLE)
            .map(|r| Role::parse(&r))
            .unwrap_or_default(),
        phone: text(obj, PHONE),
        address: text(obj, ADDRESS),
    })
}

fn activity_log(obj: &Object) -> Option<ActivityLogEntry> {
    Some(ActivityLogEntry {
        id: text(obj, ID).unwrap_or_default(),
        timestamp: text(obj, LOG_TIMESTAMP),
        user_name: text(obj, LOG_USER),
        activity: text(obj, LOG_ACTIVITY)?,
        details: text(obj, LOG_DETAILS),
        ip_address: text(obj, LOG_IP),
    })
}

/// First alias holding a non-null value
fn find_alias<'a>(obj: &'a Object, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find(|value| !value.is_null())
}

/// Trimmed text; numbers and booleans are stringified, blanks are absent
fn text(obj: &Object, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find_map(|value| {
            let s = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            (!s.is_empty()).then_some(s)
        })
}

fn date(obj: &Object, aliases: &[&str]) -> Option<NaiveDate> {
    find_alias(obj, aliases)
        .and_then(Value::as_str)
        .and_then(parse_date)
}

/// Booleans arrive as true/false, 0/1 or words such as "sudah"/"dibayar"
fn flag(obj: &Object, aliases: &[&str]) -> bool {
    match find_alias(obj, aliases) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "ya" | "yes" | "sudah" | "dibayar" | "lunas" | "paid"
        ),
        _ => false,
    }
}

/// Parse the date formats seen in the store; unparsable input yields `None`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::date as ymd;
    use serde_json::json;

    #[test]
    fn test_array_rejects_non_array_payload() {
        assert!(array(json!([1, 2])).is_ok());
        assert!(matches!(
            array(json!({ "data": [] })),
            Err(StoreError::MalformedResponse(_))
        ));
        assert!(array(Value::Null).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Some(ymd(2024, 5, 1));
        assert_eq!(parse_date("2024-05-01"), expected);
        assert_eq!(parse_date("2024-05-01T08:30:00.000Z"), expected);
        assert_eq!(parse_date("2024-05-01 08:30:00"), expected);
        assert_eq!(parse_date("2024-05-01T08:30:00"), expected);
        assert_eq!(parse_date("01/05/2024"), expected);
        assert_eq!(parse_date("01-05-2024"), expected);
        assert_eq!(parse_date("kemarin"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn test_installation_aliases_resolve() {
        let records = installations(&[
            json!({
                "id": 1,
                "nama": "Rina",
                "no_hp": "08123456789",
                "alamat": "Jl. Melati",
                "desa": "Sukamaju",
                "agen": "YOGA",
                "tanggal_daftar": "2024-05-01",
                "status": "menunggu"
            }),
            json!({
                "id": "b-2",
                "nama_pelanggan": "Dedi",
                "phone": 628123456789u64,
                "nama_desa": "Cibiru",
                "nama_agen": "SARI",
                "createdAt": "2024-06-03T10:00:00Z",
                "status": "TERPASANG",
                "tanggal_pasang": "2024-06-05",
                "teknisi": "Budi",
                "komisi_dibayar": 1
            }),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].registration_date, Some(ymd(2024, 5, 1)));
        assert_eq!(records[0].status, InstallationStatus::Awaiting);

        let second = &records[1];
        assert_eq!(second.name, "Dedi");
        assert_eq!(second.phone, "628123456789");
        assert_eq!(second.village, "Cibiru");
        assert_eq!(second.agent, "SARI");
        assert_eq!(second.registration_date, Some(ymd(2024, 6, 3)));
        assert!(second.is_installed());
        assert!(second.commission_paid);
        let details = second.installation.as_ref().unwrap();
        assert_eq!(details.date, Some(ymd(2024, 6, 5)));
        assert_eq!(details.technician.as_deref(), Some("Budi"));
    }

    #[test]
    fn test_first_present_alias_wins() {
        let records = installations(&[json!({
            "tanggal_daftar": null,
            "tgl_daftar": "2024-02-10",
            "created_at": "2023-01-01"
        })]);
        assert_eq!(records[0].registration_date, Some(ymd(2024, 2, 10)));
    }

    #[test]
    fn test_awaiting_records_drop_installation_fields() {
        let records = installations(&[json!({
            "status": "menunggu",
            "teknisi": "Budi",
            "tanggal_pasang": "2024-01-01",
            "komisi_dibayar": true
        })]);
        assert!(records[0].installation.is_none());
        assert!(!records[0].commission_paid);
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let records = installations(&[json!({ "status": "bogus", "tanggal_daftar": "n/a" }), json!(5)]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].registration_date, None);
        assert_eq!(records[0].status, InstallationStatus::Awaiting);
    }

    #[test]
    fn test_reference_data_names() {
        let agents = agents(&[
            json!({ "id": 1, "nama_agen": "YOGA", "email": "yoga@example.com" }),
            json!({ "id": 2, "name": "SARI", "no_hp": "0812" }),
            json!({ "id": 3 }),
        ]);
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[1].name, "SARI");
        assert_eq!(agents[1].phone.as_deref(), Some("0812"));

        let villages = villages(&[json!({
            "id": 4,
            "nama": "Sukamaju",
            "kecamatan": "Cibeunying",
            "kabupaten": "Bandung"
        })]);
        assert_eq!(villages[0].name, "Sukamaju");
        assert_eq!(villages[0].kabupaten.as_deref(), Some("Bandung"));
    }

    #[test]
    fn test_login_response() {
        let outcome = login(&json!({
            "token": "abc.def.ghi",
            "user": { "id": 3, "nama": "Sari", "email": "sari@example.com", "role": "Administrator" }
        }))
        .unwrap();
        assert_eq!(outcome.token, "abc.def.ghi");
        assert_eq!(outcome.user.role, Role::Administrator);

        assert!(login(&json!({ "user": {} })).is_err());
    }

    #[test]
    fn test_activity_log_entries() {
        let logs = activity_logs(&[json!({
            "id": 10,
            "waktu": "2024-06-01 09:00:00",
            "nama_user": "Sari",
            "aktivitas": "Tambah pelanggan",
            "detail": "Rina",
            "ip_address": "10.0.0.2"
        })]);
        assert_eq!(logs[0].activity, "Tambah pelanggan");
        assert_eq!(logs[0].user_name.as_deref(), Some("Sari"));
    }
}
