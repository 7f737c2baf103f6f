//! Ignore-list filtering of host variables.

use std::borrow::Cow;

use invguard_types::VarsMap;

use crate::patterns::KeyPatterns;

/// Drop every variable whose key matches an ignore pattern.
///
/// With no patterns the input is returned as-is, without copying.
pub fn filter_vars<'a>(vars: &'a VarsMap, ignore: &KeyPatterns) -> Cow<'a, VarsMap> {
    if ignore.is_empty() {
        return Cow::Borrowed(vars);
    }
    Cow::Owned(
        vars.iter()
            .filter(|(k, _)| !ignore.matches(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    )
}
