use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct RuleData {
    titles: Vec<String>,
    first_name_titles: Vec<String>,
    conjunctions: Vec<String>,
    prefixes: Vec<String>,
    suffix_acronyms: Vec<String>,
    suffixes_not_acronyms: Vec<String>,
    roman_numerals: Vec<String>,
    capitalization_exceptions: BTreeMap<String, String>,
}

type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn main() -> Result<()> {
    let input = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let output = PathBuf::from(env::var("OUT_DIR")?);

    let json = read_file(&input, "build/rule_data.json")?;
    let rules: RuleData = serde_json::from_str(&json)?;

    // Every title that implies a first name is also a title
    let mut titles = rules.titles;
    titles.extend(rules.first_name_titles.iter().cloned());

    write_set(&output.join("titles.rs"), &titles, trim_periods)?;
    write_set(
        &output.join("first_name_titles.rs"),
        &rules.first_name_titles,
        trim_periods,
    )?;
    write_set(&output.join("conjunctions.rs"), &rules.conjunctions, str::to_string)?;
    write_set(&output.join("prefixes.rs"), &rules.prefixes, trim_periods)?;
    write_set(
        &output.join("suffix_acronyms.rs"),
        &rules.suffix_acronyms,
        |s| trim_periods(s).replace('.', ""),
    )?;
    write_set(
        &output.join("suffixes_not_acronyms.rs"),
        &rules.suffixes_not_acronyms,
        trim_periods,
    )?;
    write_set(
        &output.join("roman_numerals.rs"),
        &rules.roman_numerals,
        str::to_string,
    )?;
    write_map(
        &output.join("capitalization_exceptions.rs"),
        &rules.capitalization_exceptions,
    )?;

    Ok(())
}

fn trim_periods(s: &str) -> String {
    s.trim_matches('.').to_string()
}

// Keys are stored lowercase, in the same form the classifier looks them up in
fn write_set<F>(output: &Path, set: &[String], key_form: F) -> Result<()>
where
    F: Fn(&str) -> String,
{
    let keys: BTreeSet<String> = set
        .iter()
        .map(|v| key_form(&v.trim().to_lowercase()))
        .filter(|k| !k.is_empty())
        .collect();

    let mut builder = phf_codegen::Set::new();
    for k in &keys {
        builder.entry(k.as_str());
    }
    fs::write(output, format!("{}", builder.build()))?;
    Ok(())
}

fn write_map(output: &Path, map: &BTreeMap<String, String>) -> Result<()> {
    let mut builder = phf_codegen::Map::new();
    for (k, v) in map {
        builder.entry(k.to_lowercase(), &format!("{:?}", v));
    }
    fs::write(output, format!("{}", builder.build()))?;
    Ok(())
}

fn read_file(input_dir: &Path, file_path: &str) -> Result<String> {
    println!("cargo:rerun-if-changed={}", file_path);
    let s = fs::read_to_string(input_dir.join(file_path))?;
    Ok(s)
}
