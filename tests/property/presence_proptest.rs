//! Presence registry guard: a stale unregister never evicts a newer session

use proptest::prelude::*;

use blink::backend::realtime::{ConnectionHandle, PresenceRegistry};

#[derive(Debug, Clone)]
enum Op {
    /// Register a new connection for user `n`
    Register(usize),
    /// Unregister the `k`-th connection ever created (if any)
    Unregister(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3).prop_map(Op::Register),
        (0usize..10).prop_map(Op::Unregister),
    ]
}

proptest! {
    #[test]
    fn test_registry_tracks_latest_registration(ops in prop::collection::vec(op(), 1..40)) {
        tokio_test::block_on(async {
            let registry = PresenceRegistry::new();
            let emails = ["a@example.com", "b@example.com", "c@example.com"];
            let mut created: Vec<(usize, ConnectionHandle)> = Vec::new();
            let mut receivers = Vec::new();
            // Model: the latest live registration per user
            let mut expected: [Option<uuid::Uuid>; 3] = [None, None, None];

            for op in ops {
                match op {
                    Op::Register(user) => {
                        let (handle, rx) = ConnectionHandle::new();
                        receivers.push(rx);
                        registry.register(emails[user], handle.clone()).await;
                        expected[user] = Some(handle.id);
                        created.push((user, handle));
                    }
                    Op::Unregister(k) => {
                        if let Some((user, handle)) = created.get(k) {
                            let removed = registry.unregister(emails[*user], handle.id).await;
                            let was_current = expected[*user] == Some(handle.id);
                            prop_assert_eq!(removed, was_current);
                            if was_current {
                                expected[*user] = None;
                            }
                        }
                    }
                }
            }

            for (user, email) in emails.iter().enumerate() {
                let live = registry.lookup(email).await.map(|h| h.id);
                prop_assert_eq!(live, expected[user]);
            }
            Ok(())
        })?;
    }
}
