/// Upper-case the first character (by its titlecase mapping) and lowercase
/// the rest.
pub fn title_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());

    if word.is_ascii() {
        let bytes = word.as_bytes();
        if let Some((first, rest)) = bytes.split_first() {
            result.push(first.to_ascii_uppercase() as char);
            result.extend(rest.iter().map(|c| c.to_ascii_lowercase() as char));
        }
        return result;
    }

    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        push_mapped(&mut result, first, &unicode_case_mapping::to_titlecase(first));
    }
    for c in chars {
        push_mapped(&mut result, c, &unicode_case_mapping::to_lowercase(c));
    }

    result
}

// The mapping tables use zero for "no more chars", and all zeros for a
// character that maps to itself.
#[inline]
fn push_mapped(result: &mut String, original: char, mapped: &[u32]) {
    if mapped[0] == 0 {
        result.push(original);
        return;
    }
    result.extend(
        mapped
            .iter()
            .take_while(|&&code| code != 0)
            .filter_map(|&code| char::from_u32(code)),
    );
}

/// Does the text have both upper- and lowercase letters?
pub fn is_mixed_case(s: &str) -> bool {
    let mut cased = s.chars().filter(|c| c.is_uppercase() || c.is_lowercase());
    match cased.next() {
        Some(first) if first.is_uppercase() => cased.any(char::is_lowercase),
        Some(_) => cased.any(char::is_uppercase),
        None => false,
    }
}
