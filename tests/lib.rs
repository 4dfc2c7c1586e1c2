use nameparser::{HumanName, Preferences, RuleKind, RuleSet};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

fn fixture_lines(path: &str) -> Vec<String> {
    let f = File::open(path).unwrap();
    BufReader::new(f)
        .lines()
        .map(|l| l.unwrap())
        .filter(|l| !l.starts_with('#') && l.contains('|'))
        .collect()
}

#[test]
fn parsing() {
    for line in fixture_lines("tests/parseable-names.txt") {
        let parts: Vec<&str> = line.split('|').collect();
        let input = parts[0];
        let name = HumanName::parse(input);

        let actual = [
            name.title(),
            name.first(),
            name.middle(),
            name.last(),
            name.suffix(),
            name.nickname(),
        ];
        let buckets = ["title", "first", "middle", "last", "suffix", "nickname"];

        for (i, bucket) in buckets.iter().enumerate() {
            assert!(
                actual[i] == parts[i + 1],
                "[{}] Expected {} {:?}, got {:?}",
                input,
                bucket,
                parts[i + 1],
                actual[i]
            );
        }
        assert!(!name.is_unparsable(), "[{}] Marked unparsable", input);
    }
}

#[test]
fn unparsable() {
    for input in ["", "   ", ",", " , , "] {
        let name = HumanName::parse(input);
        assert!(name.is_unparsable(), "'Parsed' junk name: {:?} as {}", input, name);
        assert_eq!("", name.to_string());
    }
}

#[test]
fn equality() {
    for line in fixture_lines("tests/equal-names.txt") {
        let parts: Vec<&str> = line.split('|').collect();
        let a = HumanName::parse(parts[0]);
        let b = HumanName::parse(parts[1]);
        let expect = parts[2] == "true";

        assert!(
            (a == b) == expect,
            "{} {} {}",
            parts[0],
            if expect { "should equal" } else { "should not equal" },
            parts[1]
        );
        assert_eq!(a == b, b == a, "{} and {} compare asymmetrically", parts[0], parts[1]);
    }
}

#[test]
fn normalization() {
    for line in fixture_lines("tests/normalized-names.txt") {
        let parts: Vec<&str> = line.split('|').collect();
        let mut name = HumanName::parse(parts[0]);
        name.normalize(false);
        assert_eq!(parts[1], name.to_string(), "[{}] normalized wrong", parts[0]);

        let once = name.to_string();
        name.normalize(true);
        assert_eq!(once, name.to_string(), "[{}] normalize is not idempotent", parts[0]);
    }
}

#[test]
fn last_name_views() {
    let name = HumanName::parse("Dr. Juan Q. Xavier de la Vega III");
    assert_eq!("de la", name.last_prefixes());
    assert_eq!("Vega", name.last_base());

    let name = HumanName::parse("John Doe");
    assert_eq!("", name.last_prefixes());
    assert_eq!("Doe", name.last_base());
}

#[test]
fn coupled_names() {
    let prefs = Preferences {
        parse_multiple_names: true,
        ..Preferences::default()
    };
    let name = HumanName::parse_with("John D. and Mrs. Catherine T. MacArthur", &RuleSet::new(), prefs);
    assert_eq!("", name.title());
    assert_eq!("John", name.first());
    assert_eq!("D.", name.middle());
    assert_eq!("MacArthur", name.last());

    let other = name.additional_name().unwrap();
    assert_eq!("Mrs.", other.title());
    assert_eq!("Catherine", other.first());
    assert_eq!("MacArthur", other.last());
}

#[test]
fn custom_rules() {
    let mut rules = RuleSet::new();
    rules.add(RuleKind::Title, "Poobah.").unwrap();
    rules.add(RuleKind::Prefix, "zu").unwrap();

    let name = HumanName::parse_with("Poobah Bob Smith", &rules, Preferences::default());
    assert_eq!("Poobah", name.title());
    assert_eq!("Bob", name.first());
    assert_eq!("Smith", name.last());

    let name = HumanName::parse("Poobah Bob Smith");
    assert_eq!("", name.title());
    assert_eq!("Poobah", name.first());

    let name = HumanName::parse_with("Karl zu Guttenberg", &rules, Preferences::default());
    assert_eq!("Karl", name.first());
    assert_eq!("zu Guttenberg", name.last());
    assert_eq!("zu", name.last_prefixes());

    let default = HumanName::parse("Karl zu Guttenberg");
    assert_eq!("zu", default.middle());
    assert_eq!("Guttenberg", default.last());
}
