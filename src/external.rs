//! A C API for interacting with `HumanName` objects.
//!
//! Strings returned by the accessors are owned by the caller and must be
//! released with `nameparser_free_string`; names with `nameparser_free_name`.

use super::{HumanName, Preferences};
use crate::{Error, RuleSet};
use libc::c_char;
use std::ffi::{CStr, CString};
use std::mem;
use std::ptr;

// Interior NULs cannot cross the boundary; such strings come back as null.
macro_rules! str_to_char_star {
    ($str:expr) => {{
        match CString::new($str) {
            Ok(s) => s.into_raw(),
            Err(_) => ptr::null_mut(),
        }
    }};
}

unsafe fn input_str<'a>(input: *const c_char) -> Result<std::borrow::Cow<'a, str>, Error> {
    if input.is_null() {
        return Err(Error::MissingInput);
    }
    Ok(CStr::from_ptr(input).to_string_lossy())
}

/// Parse `input` with the built-in rules. Returns null when `input` is null.
#[no_mangle]
pub unsafe extern "C" fn nameparser_parse(input: *const c_char) -> Option<Box<HumanName>> {
    match input_str(input) {
        Ok(s) => Some(Box::new(HumanName::parse(&s))),
        Err(e) => {
            tracing::debug!(error = %e, "rejected C input");
            None
        }
    }
}

/// Like `nameparser_parse`, but splitting coupled names ("John and Jane Doe").
#[no_mangle]
pub unsafe extern "C" fn nameparser_parse_multiple(
    input: *const c_char,
) -> Option<Box<HumanName>> {
    let prefs = Preferences {
        parse_multiple_names: true,
        ..Preferences::default()
    };
    let s = input_str(input).ok()?;
    Some(Box::new(HumanName::parse_with(&s, &RuleSet::new(), prefs)))
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_free_name(name_ptr: *mut HumanName) {
    if !name_ptr.is_null() {
        mem::drop(Box::from_raw(name_ptr));
    }
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_free_string(str_ptr: *mut c_char) {
    if !str_ptr.is_null() {
        mem::drop(CString::from_raw(str_ptr));
    }
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_normalize(name: &mut HumanName, force: bool) {
    name.normalize(force)
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_is_unparsable(name: &HumanName) -> bool {
    name.is_unparsable()
}

/// The coupled name, borrowed from `name`; do not free it separately.
#[no_mangle]
pub unsafe extern "C" fn nameparser_additional_name(name: &HumanName) -> *const HumanName {
    name.additional_name()
        .map_or(ptr::null(), |n| n as *const HumanName)
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_title(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.title())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_first(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.first())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_middle(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.middle())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_last(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.last())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_last_base(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.last_base())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_last_prefixes(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.last_prefixes())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_suffix(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.suffix())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_nickname(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.nickname())
}

#[no_mangle]
pub unsafe extern "C" fn nameparser_display(name: &HumanName) -> *mut c_char {
    str_to_char_star!(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(s: *mut c_char) -> String {
        assert!(!s.is_null());
        unsafe { CString::from_raw(s) }.into_string().unwrap()
    }

    #[test]
    fn round_trip() {
        let input = CString::new("Dr. Juan de la Vega").unwrap();
        let name = unsafe { nameparser_parse(input.as_ptr()) }.unwrap();

        unsafe {
            assert_eq!("Dr.", take(nameparser_title(&name)));
            assert_eq!("Juan", take(nameparser_first(&name)));
            assert_eq!("de la Vega", take(nameparser_last(&name)));
            assert_eq!("Vega", take(nameparser_last_base(&name)));
            assert_eq!("", take(nameparser_suffix(&name)));
            assert!(!nameparser_is_unparsable(&name));
            assert!(nameparser_additional_name(&name).is_null());
            nameparser_free_name(Box::into_raw(name));
        }
    }

    #[test]
    fn null_input() {
        assert!(unsafe { nameparser_parse(ptr::null()) }.is_none());
        assert!(unsafe { nameparser_parse_multiple(ptr::null()) }.is_none());
    }
}
