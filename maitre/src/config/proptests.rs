//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{BookingConfig, Config, InitialStatus, WaitlistConfig};
use proptest::prelude::*;

fn initial_status_strategy() -> impl Strategy<Value = InitialStatus> {
    prop_oneof![Just(InitialStatus::Pending), Just(InitialStatus::Confirmed)]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of((
            prop::option::of(1u32..=1440),
            prop::option::of(initial_status_strategy()),
        )),
        prop::option::of(prop::option::of(0u32..=600)),
        prop::option::of(1u64..=60),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(booking, waitlist, lock, autoinit)| Config {
            booking: booking.map(|(default_duration_minutes, initial_status)| BookingConfig {
                default_duration_minutes,
                initial_status,
            }),
            waitlist: waitlist.map(|default_wait_minutes| WaitlistConfig {
                default_wait_minutes,
            }),
            maximum_lock_wait_seconds: lock,
            disable_autoinit: autoinit,
        })
}

fn merged(low: &Config, high: &Config) -> Config {
    let mut result = low.clone();
    ConfigMerger::merge_into(&mut result, high);
    result
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Each effective value comes from the higher layer when it sets one
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let result = merged(&low, &high);

        let expected_lock = high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds);
        prop_assert_eq!(result.maximum_lock_wait_seconds, expected_lock);

        let expected_autoinit = high.disable_autoinit.or(low.disable_autoinit);
        prop_assert_eq!(result.disable_autoinit, expected_autoinit);

        let duration = |c: &Config| c.booking.as_ref().and_then(|b| b.default_duration_minutes);
        prop_assert_eq!(duration(&result), duration(&high).or(duration(&low)));

        let wait = |c: &Config| c.waitlist.as_ref().and_then(|w| w.default_wait_minutes);
        prop_assert_eq!(wait(&result), wait(&high).or(wait(&low)));
    }

    // Merging an empty layer changes nothing
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        prop_assert_eq!(merged(&config, &Config::default()), config);
    }

    // (a + b) + c and a + (b + c) agree
    #[test]
    fn config_merge_associative(
        a in config_strategy(),
        b in config_strategy(),
        c in config_strategy()
    ) {
        let left = merged(&merged(&a, &b), &c);
        let right = merged(&a, &merged(&b, &c));
        prop_assert_eq!(left, right);
    }

    // Generated configs survive a YAML round trip
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        prop_assert_eq!(serde_yaml::from_str::<Config>(&yaml).unwrap(), config);
    }
}
