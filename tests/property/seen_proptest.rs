//! Read-receipt recomputation invariants

use proptest::prelude::*;

use blink::shared::messaging::{
    mark_conversation_seen, mark_group_seen, DirectMessage, GroupMessage, SeenMarker,
};

fn direct(is_incoming: bool, is_seen: bool, last_seen: bool) -> DirectMessage {
    DirectMessage {
        id: "m".to_string(),
        is_seen,
        last_seen,
        sender: if is_incoming { "bob" } else { "user" }.to_string(),
        time_stamp: "2024-01-01T00:00:00".to_string(),
        text: "hi".to_string(),
        is_incoming,
    }
}

fn group(markers: Vec<SeenMarker>) -> GroupMessage {
    GroupMessage {
        id: "g".to_string(),
        time_stamp: "2024-01-01T00:00:00".to_string(),
        text: "hi".to_string(),
        is_seen_by: markers,
        is_incoming: true,
        sender: "alice".to_string(),
        sender_avatar: String::new(),
    }
}

fn marker(email: &str) -> SeenMarker {
    SeenMarker {
        email: email.to_string(),
        username: email.split('@').next().unwrap_or_default().to_string(),
        avatar: String::new(),
    }
}

fn viewer_email() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("bob@example.com".to_string()),
        Just("carol@example.com".to_string()),
        Just("dave@example.com".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_conversation_all_seen_one_last_marker(
        flags in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..20)
    ) {
        let mut messages: Vec<DirectMessage> =
            flags.iter().map(|&(i, s, l)| direct(i, s, l)).collect();
        let incoming_before: Vec<bool> = messages
            .iter()
            .filter(|m| m.is_incoming)
            .map(|m| m.last_seen)
            .collect();

        mark_conversation_seen(&mut messages);

        prop_assert!(messages.iter().all(|m| m.is_seen));
        let outgoing_marked: Vec<usize> = messages
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_incoming && m.last_seen)
            .map(|(i, _)| i)
            .collect();
        let last_outgoing = messages.iter().rposition(|m| !m.is_incoming);
        prop_assert_eq!(outgoing_marked, last_outgoing.into_iter().collect::<Vec<_>>());

        let incoming_after: Vec<bool> = messages
            .iter()
            .filter(|m| m.is_incoming)
            .map(|m| m.last_seen)
            .collect();
        prop_assert_eq!(incoming_before, incoming_after);
    }

    #[test]
    fn test_conversation_recompute_is_idempotent(
        flags in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..20)
    ) {
        let mut once: Vec<DirectMessage> = flags.iter().map(|&(i, s, l)| direct(i, s, l)).collect();
        mark_conversation_seen(&mut once);
        let mut twice = once.clone();
        mark_conversation_seen(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_group_marker_on_last_message_only(
        initial in prop::collection::vec(prop::collection::vec(viewer_email(), 0..3), 1..10),
        viewers in prop::collection::vec(viewer_email(), 1..6),
    ) {
        let mut messages: Vec<GroupMessage> = initial
            .iter()
            .map(|emails| group(emails.iter().map(|e| marker(e)).collect()))
            .collect();

        for viewer in &viewers {
            prop_assert!(mark_group_seen(&mut messages, marker(viewer)));
        }

        let last = messages.len() - 1;
        for viewer in &viewers {
            let holders: Vec<usize> = messages
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_seen_by.iter().any(|s| &s.email == viewer))
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(holders, vec![last]);
            let count = messages[last].is_seen_by.iter().filter(|s| &s.email == viewer).count();
            prop_assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_group_empty_conversation_unmarked(email in viewer_email()) {
        let mut messages: Vec<GroupMessage> = Vec::new();
        prop_assert!(!mark_group_seen(&mut messages, marker(&email)));
    }
}
