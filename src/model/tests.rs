use super::topic::matches;
use super::{DeliveryMode, Destination, Message};

#[test]
fn test_message_text_defaults() {
    let msg = Message::text(Destination::topic("tutorial/topic"), "hello");
    assert_eq!(msg.destination, Destination::Topic("tutorial/topic".to_string()));
    assert_eq!(msg.payload, "hello");
    assert_eq!(msg.delivery_mode, DeliveryMode::Direct);
    assert!(msg.reply_to.is_none());
    assert!(!msg.message_id.is_empty());
    assert!(msg.timestamp > 0);
}

#[test]
fn test_message_ids_are_unique() {
    let a = Message::text(Destination::queue("Q/tutorial"), "a");
    let b = Message::text(Destination::queue("Q/tutorial"), "b");
    assert_ne!(a.message_id, b.message_id);
}

#[test]
fn test_reply_goes_to_reply_address() {
    let request = Message::text(Destination::topic("tutorial/requests"), "ping")
        .with_reply_to(Destination::topic("#P2P/inbox/abc"))
        .with_correlation_id("corr-1");

    let reply = request.reply("pong").expect("request has a reply-address");
    assert_eq!(reply.destination, Destination::topic("#P2P/inbox/abc"));
    assert_eq!(reply.payload, "pong");
    assert_eq!(reply.correlation_id.as_deref(), Some("corr-1"));
    assert!(!reply.is_persistent());
}

#[test]
fn test_reply_correlates_on_message_id_when_missing() {
    let request = Message::text(Destination::topic("tutorial/requests"), "ping")
        .with_reply_to(Destination::topic("inbox"));
    let reply = request.reply("pong").unwrap();
    assert_eq!(reply.correlation_id, Some(request.message_id.clone()));
}

#[test]
fn test_reply_without_reply_address() {
    let request = Message::text(Destination::topic("tutorial/requests"), "ping");
    assert!(request.reply("pong").is_none());
}

#[test]
fn test_delivery_mode_qos_mapping() {
    assert_eq!(DeliveryMode::Direct.qos(), 0);
    assert_eq!(DeliveryMode::Persistent.qos(), 1);
    assert_eq!(DeliveryMode::from_qos(0), DeliveryMode::Direct);
    assert_eq!(DeliveryMode::from_qos(1), DeliveryMode::Persistent);
    assert_eq!(DeliveryMode::from_qos(2), DeliveryMode::Persistent);
}

#[test]
fn test_destination_serializes_with_kind() {
    let json = serde_json::to_value(Destination::queue("Q/tutorial")).unwrap();
    assert_eq!(json["kind"], "queue");
    assert_eq!(json["name"], "Q/tutorial");
}

#[test]
fn test_exact_topic_match() {
    assert!(matches("tutorial/topic", "tutorial/topic"));
    assert!(!matches("tutorial/topic", "tutorial/other"));
    assert!(!matches("tutorial/topic", "tutorial/topic/deeper"));
    assert!(!matches("tutorial/topic/deeper", "tutorial/topic"));
}

#[test]
fn test_single_level_wildcard() {
    assert!(matches("tutorial/*", "tutorial/topic"));
    assert!(matches("*/topic", "tutorial/topic"));
    assert!(!matches("tutorial/*", "tutorial/topic/deeper"));
    assert!(!matches("tutorial/*", "tutorial"));
}

#[test]
fn test_multi_level_wildcard() {
    assert!(matches("tutorial/>", "tutorial/topic"));
    assert!(matches("tutorial/>", "tutorial/topic/deeper"));
    assert!(!matches("tutorial/>", "tutorial"));
    assert!(!matches("tutorial/>", "other/topic"));
    // only meaningful as the last level
    assert!(!matches(">/topic", "tutorial/topic"));
    assert!(matches(">/topic", ">/topic"));
}
