#![no_main]
use libfuzzer_sys::fuzz_target;
use nameparser::{HumanName, Preferences, RuleSet};

fuzz_target!(|data: &str| {
    let prefs = Preferences {
        first_over_prefix: true,
        parse_multiple_names: true,
    };
    let mut name = HumanName::parse_with(data, &RuleSet::new(), prefs);

    if name.is_unparsable() {
        assert!(name.to_string().is_empty());
    }

    name.normalize(true);
    let _ = name.as_dictionary(true);
});
