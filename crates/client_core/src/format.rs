use chrono::{DateTime, Local, NaiveDateTime};
use shared::protocol::{Event, Organization};

pub const DEFAULT_TITLE: &str = "Events Organizer";
pub const DEFAULT_TAGLINE: &str = "Organizing memorable events since forever";
pub const DATE_NOT_SET: &str = "Date not set";

const DISPLAY_FORMAT: &str = "%b %-d, %Y %H:%M";
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Renders an event date for humans. Text that does not parse is shown as-is.
pub fn display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DATE_NOT_SET.to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn event_date(event: &Event) -> String {
    display_date(event.date.as_deref())
}

pub fn hosted_by(event: &Event) -> String {
    format!("Hosted by {}", event.org_name.as_deref().unwrap_or_default())
}

pub fn header_title(org: Option<&Organization>) -> &str {
    org.map(|org| org.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_TITLE)
}

pub fn header_tagline(org: Option<&Organization>) -> &str {
    org.and_then(|org| org.tagline.as_deref())
        .filter(|tagline| !tagline.is_empty())
        .unwrap_or(DEFAULT_TAGLINE)
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{EventId, OrgId};

    #[test]
    fn renders_datetime_local_values() {
        assert_eq!(display_date(Some("2025-03-01T18:30")), "Mar 1, 2025 18:30");
        assert_eq!(display_date(Some("2025-12-24T09:05:00")), "Dec 24, 2025 09:05");
    }

    #[test]
    fn renders_rfc3339_in_local_time() {
        let expected = DateTime::parse_from_rfc3339("2025-03-01T18:30:00Z")
            .expect("parse")
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string();
        assert_eq!(display_date(Some("2025-03-01T18:30:00Z")), expected);
    }

    #[test]
    fn missing_or_unparseable_dates_fall_back() {
        assert_eq!(display_date(None), DATE_NOT_SET);
        assert_eq!(display_date(Some("  ")), DATE_NOT_SET);
        assert_eq!(display_date(Some("next friday")), "next friday");
    }

    #[test]
    fn header_falls_back_without_selection() {
        assert_eq!(header_title(None), DEFAULT_TITLE);
        assert_eq!(header_tagline(None), DEFAULT_TAGLINE);

        let org = Organization {
            id: OrgId(1),
            name: "Example Org".to_string(),
            tagline: None,
            logo: None,
            contact: None,
            email: None,
            description: None,
        };
        assert_eq!(header_title(Some(&org)), "Example Org");
        assert_eq!(header_tagline(Some(&org)), DEFAULT_TAGLINE);
    }

    #[test]
    fn hosted_by_uses_joined_org_name() {
        let event = Event {
            id: EventId(1),
            title: "Gala".to_string(),
            date: None,
            venue: None,
            description: None,
            org_id: Some(OrgId(1)),
            org_name: Some("Example Org".to_string()),
        };
        assert_eq!(hosted_by(&event), "Hosted by Example Org");
        assert_eq!(event_date(&event), DATE_NOT_SET);
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo wörld", 6), "héllo…");
    }

    #[test]
    fn zero_width_truncation_is_empty() {
        assert_eq!(truncate("anything", 0), "");
        assert_eq!(truncate("", 0), "");
        assert_eq!(truncate("ab", 1), "…");
    }
}
