//! Property-based tests for location derivation

use proptest::prelude::*;
use vmname_registry_client::{derive_location, ENVIRONMENT_CODES};

fn arb_environment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(ENVIRONMENT_CODES.to_vec())
}

proptest! {
    #[test]
    fn conventional_names_yield_their_location(
        env in arb_environment(),
        location in "[a-z0-9]{1,10}",
        sequence in "[0-9]{1,6}",
    ) {
        let name = format!("lcp{env}{location}-{sequence}");
        prop_assert_eq!(derive_location(&name), location);
    }

    #[test]
    fn names_without_separator_yield_nothing(name in "[a-z0-9]{0,20}") {
        prop_assert_eq!(derive_location(&name), "");
    }

    #[test]
    fn short_first_segments_yield_nothing(
        prefix in "[a-z]{0,3}",
        rest in "[a-z0-9-]{0,10}",
    ) {
        let name = format!("{prefix}-{rest}");
        prop_assert_eq!(derive_location(&name), "");
    }

    #[test]
    fn unknown_environments_yield_nothing(
        env in "[a-z]{3}".prop_filter("known environment", |env| !ENVIRONMENT_CODES.contains(&env.as_str())),
        location in "[a-z]{0,6}",
        sequence in "[0-9]{1,4}",
    ) {
        let name = format!("lcp{env}{location}-{sequence}");
        prop_assert_eq!(derive_location(&name), "");
    }

    #[test]
    fn derivation_never_panics(name in "\\PC{0,24}") {
        let _ = derive_location(&name);
    }
}
