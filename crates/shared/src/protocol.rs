use serde::{Deserialize, Serialize};

use crate::domain::{EventId, OrgId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An event as returned by the backend, including the joined organization name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<OrgId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
}

/// Body for `POST /events` and `PUT /events/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    pub date: String,
    pub venue: String,
    pub description: String,
    pub org_id: Option<OrgId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_with_only_id_and_title_is_valid() {
        let event: Event = serde_json::from_str(r#"{"id":1,"title":"Gala"}"#).expect("decode");
        assert_eq!(event.id, EventId(1));
        assert_eq!(event.title, "Gala");
        assert!(event.date.is_none());
        assert!(event.org_id.is_none());
    }

    #[test]
    fn event_accepts_null_join_columns() {
        let event: Event = serde_json::from_str(
            r#"{"id":3,"title":"Orphan","date":"2025-01-01T10:00","venue":null,"description":null,"org_id":null,"org_name":null}"#,
        )
        .expect("decode");
        assert_eq!(event.date.as_deref(), Some("2025-01-01T10:00"));
        assert!(event.org_name.is_none());
    }

    #[test]
    fn payload_serializes_org_id_as_plain_number() {
        let payload = EventPayload {
            title: "Meetup".to_string(),
            date: "2025-03-01T18:30".to_string(),
            venue: String::new(),
            description: String::new(),
            org_id: Some(OrgId(2)),
        };
        let json = serde_json::to_value(&payload).expect("encode");
        assert_eq!(json["org_id"], serde_json::json!(2));
        assert!(json.get("id").is_none());
    }

    #[test]
    fn organization_decodes_backend_row() {
        let org: Organization = serde_json::from_str(
            r#"{"id":1,"name":"Example Org","tagline":"We run cool events","contact":"+91-99999-99999","email":"hello@example.org","description":"Community-first events","logo":"https://via.placeholder.com/128"}"#,
        )
        .expect("decode");
        assert_eq!(org.id, OrgId(1));
        assert_eq!(org.email.as_deref(), Some("hello@example.org"));
    }
}
