use crate::ClientCounter;

use proptest::prelude::*;

proptest! {
    /// Any interleaving of connects and disconnects ends at
    /// max(0, running balance) and never underflows.
    #[test]
    fn counter_never_negative(events in proptest::collection::vec(any::<bool>(), 0..200)) {
        let counter = ClientCounter::new();
        let mut expected = 0usize;

        for connect in events {
            if connect {
                expected += 1;
                prop_assert_eq!(counter.connected(), expected);
            } else {
                expected = expected.saturating_sub(1);
                prop_assert_eq!(counter.disconnected(), expected);
            }
        }

        prop_assert_eq!(counter.get(), expected);
    }
}
