//! Request objects for each ingestion call.

use crate::properties::Properties;
use crate::types::{Event, Ip, ProfileTime, ProfileUpdate};
use serde::Serialize;

/// Event name the track endpoint uses for alias creation.
pub(crate) const CREATE_ALIAS: &str = "$create_alias";

/// Body object for the track endpoint.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TrackRequest {
    pub event: String,
    pub properties: Properties,
}

/// Build a track request. Custom properties are applied last and win
/// over `token`, `distinct_id`, `ip` and `time`.
pub(crate) fn track(
    token: &str,
    distinct_id: &str,
    event_name: &str,
    event: Event,
) -> TrackRequest {
    let mut reserved = Properties::new()
        .insert("token", token)
        .insert("distinct_id", distinct_id);

    if let Some(ip) = event.ip.wire_value() {
        reserved.set("ip", ip);
    }
    if let Some(ts) = event.timestamp {
        reserved.set("time", ts.timestamp());
    }

    TrackRequest {
        event: event_name.to_string(),
        properties: reserved.merge(event.properties),
    }
}

pub(crate) fn alias(token: &str, distinct_id: &str, new_id: &str) -> TrackRequest {
    TrackRequest {
        event: CREATE_ALIAS.to_string(),
        properties: Properties::new()
            .insert("token", token)
            .insert("distinct_id", distinct_id)
            .insert("alias", new_id),
    }
}

/// Profile a keyed update applies to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    User { distinct_id: &'a str },
    Group { key: &'a str, id: &'a str },
}

/// Build a profile update object: token, target identifiers, optional
/// `$ip` / `$time` / `$ignore_time`, then `<operation>: properties`.
pub(crate) fn keyed_update(
    token: &str,
    target: Target<'_>,
    update: ProfileUpdate,
) -> Properties {
    let mut request = Properties::new().insert("$token", token);

    match target {
        Target::User { distinct_id } => request.set("$distinct_id", distinct_id),
        Target::Group { key, id } => {
            request.set("$group_id", id);
            request.set("$group_key", key);
        }
    }

    if let Some(ip) = update.ip.wire_value() {
        request.set("$ip", ip);
    }
    match update.time {
        ProfileTime::Now => {}
        ProfileTime::At(ts) => request.set("$time", ts.timestamp()),
        ProfileTime::Ignore => request.set("$ignore_time", true),
    }

    request.set(update.operation.as_str(), update.properties);
    request
}

/// Drop the IP and timestamp from an update. Union and group calls
/// only carry the operation and its properties.
pub(crate) fn without_metadata(update: ProfileUpdate) -> ProfileUpdate {
    ProfileUpdate {
        ip: Ip::Detect,
        time: ProfileTime::Now,
        ..update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;
    use chrono::DateTime;
    use serde_json::json;
    use std::net::{IpAddr, Ipv4Addr};

    fn ts() -> chrono::DateTime<chrono::Utc> {
        DateTime::from_timestamp(1_706_400_000, 500_000_000).unwrap()
    }

    #[test]
    fn test_track_reserved_fields() {
        let event = Event::new().property("plan", "pro");
        let request = track("tok", "user_1", "signup", event);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["event"], "signup");
        assert_eq!(json["properties"]["token"], "tok");
        assert_eq!(json["properties"]["distinct_id"], "user_1");
        assert_eq!(json["properties"]["plan"], "pro");
        assert!(json["properties"].get("ip").is_none());
        assert!(json["properties"].get("time").is_none());
    }

    #[test]
    fn test_track_time_is_epoch_seconds() {
        let event = Event::new().property("k", 1).timestamp(ts());
        let request = track("tok", "user_1", "signup", event);
        assert_eq!(request.properties.get("time"), Some(&json!(1_706_400_000)));
    }

    #[test]
    fn test_track_ip_states() {
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let request = track("tok", "u", "e", Event::new().ip(addr));
        assert_eq!(request.properties.get("ip"), Some(&json!("10.0.0.1")));

        let request = track("tok", "u", "e", Event::new().ip(Ip::Omit));
        assert_eq!(request.properties.get("ip"), Some(&json!("0")));
    }

    #[test]
    fn test_track_custom_properties_override_reserved() {
        let event = Event::new()
            .timestamp(ts())
            .property("token", "other")
            .property("time", 42);
        let request = track("tok", "user_1", "signup", event);

        assert_eq!(request.properties.get("token"), Some(&json!("other")));
        assert_eq!(request.properties.get("time"), Some(&json!(42)));
        assert_eq!(request.properties.get("distinct_id"), Some(&json!("user_1")));
    }

    #[test]
    fn test_alias_request() {
        let json = serde_json::to_value(alias("tok", "u1", "u2")).unwrap();
        assert_eq!(
            json,
            json!({
                "event": "$create_alias",
                "properties": {"token": "tok", "distinct_id": "u1", "alias": "u2"}
            })
        );
    }

    #[test]
    fn test_user_update_ignore_time() {
        let update = ProfileUpdate::set().property("plan", "pro").ignore_time();
        let request = keyed_update("tok", Target::User { distinct_id: "u1" }, update);

        assert_eq!(request.get("$ignore_time"), Some(&json!(true)));
        assert!(request.get("$time").is_none());
        assert_eq!(request.get("$set"), Some(&json!({"plan": "pro"})));
    }

    #[test]
    fn test_user_update_explicit_time() {
        let update = ProfileUpdate::set().property("plan", "pro").time(ts());
        let request = keyed_update("tok", Target::User { distinct_id: "u1" }, update);

        assert_eq!(request.get("$time"), Some(&json!(1_706_400_000)));
        assert!(request.get("$ignore_time").is_none());
    }

    #[test]
    fn test_user_update_default_time_omits_both() {
        let update = ProfileUpdate::new("$add").property("logins", 1);
        let request = keyed_update("tok", Target::User { distinct_id: "u1" }, update);

        assert!(request.get("$time").is_none());
        assert!(request.get("$ignore_time").is_none());
        assert_eq!(request.get("$distinct_id"), Some(&json!("u1")));
        assert_eq!(request.get("$add"), Some(&json!({"logins": 1})));
    }

    #[test]
    fn test_group_update_fields() {
        let update = ProfileUpdate::new(Operation::SetOnce).property("tier", "gold");
        let request = keyed_update(
            "tok",
            Target::Group {
                key: "company",
                id: "acme",
            },
            update,
        );

        assert_eq!(
            request.into_value(),
            json!({
                "$token": "tok",
                "$group_key": "company",
                "$group_id": "acme",
                "$set_once": {"tier": "gold"}
            })
        );
    }

    #[test]
    fn test_without_metadata_drops_ip_and_time() {
        let update = ProfileUpdate::union()
            .property("tags", json!(["a"]))
            .ip(Ip::Omit)
            .ignore_time();
        let request = keyed_update(
            "tok",
            Target::User { distinct_id: "u1" },
            without_metadata(update),
        );

        assert_eq!(
            request.into_value(),
            json!({"$token": "tok", "$distinct_id": "u1", "$union": {"tags": ["a"]}})
        );
    }
}
