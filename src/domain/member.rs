use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

/// Avatar path every member starts with until an image is linked.
pub const DEFAULT_IMAGE_URL: &str = "/static/default-avatar.png";

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub join_date: Option<DateTime<Utc>>,
    pub image_url: String,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMemberRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    /// Absent or `null` means the creation time.
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub join_date: Option<DateTime<Utc>>,
}

/// Partial update. `None` means the key was absent from the payload.
///
/// Nullable columns use `Option<Option<_>>` so an explicit `null` clears the
/// stored value while an omitted key leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_timestamp")]
    pub join_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateMemberRequest {
    /// Overwrites every field of `member` that is present in this request.
    pub fn apply_to(self, member: &mut Member) {
        if let Some(first_name) = self.first_name {
            member.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            member.last_name = last_name;
        }
        if let Some(email) = self.email {
            member.email = email;
        }
        if let Some(phone) = self.phone {
            member.phone = phone;
        }
        if let Some(address) = self.address {
            member.address = address;
        }
        if let Some(role) = self.role {
            member.role = role;
        }
        if let Some(join_date) = self.join_date {
            member.join_date = join_date;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.role.is_none()
            && self.join_date.is_none()
    }
}

/// Accepts RFC 3339, a naive ISO-8601 date-time (read as UTC) or a bare date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
        None => Ok(None),
    }
}

fn nullable_timestamp<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_timestamp(deserializer).map(Some)
}

// Only called when the key exists, so `null` reaches `T` and is rejected.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_member() -> Member {
        Member {
            id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            phone: Some("111".to_string()),
            address: Some("12 St James's Square".to_string()),
            role: Some("Analyst".to_string()),
            join_date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            is_deleted: false,
        }
    }

    #[test]
    fn test_update_distinguishes_missing_from_null() {
        let update: UpdateMemberRequest =
            serde_json::from_str(r#"{"phone": null, "role": "Chair"}"#).unwrap();

        assert_eq!(update.phone, Some(None));
        assert_eq!(update.role, Some(Some("Chair".to_string())));
        assert_eq!(update.address, None);
        assert_eq!(update.first_name, None);
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut member = sample_member();
        let before = member.clone();

        let update: UpdateMemberRequest = serde_json::from_str(r#"{"phone": "555"}"#).unwrap();
        update.apply_to(&mut member);

        assert_eq!(member.phone.as_deref(), Some("555"));
        assert_eq!(Member { phone: before.phone.clone(), ..member.clone() }, before);
    }

    #[test]
    fn test_apply_null_clears_optional_field() {
        let mut member = sample_member();
        let update: UpdateMemberRequest =
            serde_json::from_str(r#"{"address": null, "role": ""}"#).unwrap();
        update.apply_to(&mut member);

        assert_eq!(member.address, None);
        assert_eq!(member.role.as_deref(), Some(""));
        assert_eq!(member.phone.as_deref(), Some("111"));
    }

    #[test]
    fn test_update_rejects_null_required_field() {
        let result = serde_json::from_str::<UpdateMemberRequest>(r#"{"email": null}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<UpdateMemberRequest>(r#"{"last_name": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_applies_empty_text_as_value() {
        let mut member = sample_member();
        let update: UpdateMemberRequest =
            serde_json::from_str(r#"{"first_name": "", "email": ""}"#).unwrap();
        update.apply_to(&mut member);

        assert_eq!(member.first_name, "");
        assert_eq!(member.email, "");
        assert_eq!(member.last_name, "Lovelace");
    }

    #[test]
    fn test_join_date_null_clears_and_omission_keeps() {
        let mut member = sample_member();

        let update: UpdateMemberRequest = serde_json::from_str(r#"{"role": "Chair"}"#).unwrap();
        assert_eq!(update.join_date, None);
        update.apply_to(&mut member);
        assert!(member.join_date.is_some());

        let update: UpdateMemberRequest = serde_json::from_str(r#"{"join_date": null}"#).unwrap();
        assert_eq!(update.join_date, Some(None));
        update.apply_to(&mut member);
        assert_eq!(member.join_date, None);

        let update: UpdateMemberRequest =
            serde_json::from_str(r#"{"join_date": "2021-06-01"}"#).unwrap();
        update.apply_to(&mut member);
        assert_eq!(member.join_date, Some(Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()));

        let bad = serde_json::from_str::<UpdateMemberRequest>(r#"{"join_date": "soon"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_create_requires_base_fields() {
        let missing = serde_json::from_str::<CreateMemberRequest>(
            r#"{"first_name": "Ada", "last_name": "Lovelace"}"#,
        );
        assert!(missing.is_err());

        let wrong_type = serde_json::from_str::<CreateMemberRequest>(
            r#"{"first_name": "Ada", "last_name": "Lovelace", "email": 42}"#,
        );
        assert!(wrong_type.is_err());

        let ok: CreateMemberRequest = serde_json::from_str(
            r#"{"first_name": "", "last_name": "Lovelace", "email": "ada@x.com", "phone": null}"#,
        )
        .unwrap();
        assert_eq!(ok.first_name, "");
        assert_eq!(ok.phone, None);
        assert_eq!(ok.join_date, None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-09T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-09T12:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-09T10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-09 10:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-09"),
            Some(Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
