//! Static naming tables used by [`crate::NameNormalizer`].
//!
//! Keys are lowercase. Segment abbreviations only ever apply to a whole
//! `-`/`_` delimited segment, never to a substring of one.

/// Names returned untouched for every product, even though some of their
/// segments appear in [`SEGMENT_ABBREVIATIONS`].
pub const EXCLUSIVE_NAMES: &[&str] = &[
    "spidermonkey-errasdebug",
    "spidermonkey-warnaserr",
    "spidermonkey-warnaserrdebug",
    "spidermonkey-rootanalysis",
    "spidermonkey-exactrooting",
    "spidermonkey-generational",
    "spidermonkey-dtrace",
];

/// Whole-name short codes that only apply to one product: `(product, branch,
/// code)`.
pub const PRODUCT_BRANCH_CODES: &[(&str, &str, &str)] = &[
    ("thunderbird", "try-comm-central", "try"),
    ("seamonkey", "try-comm-central", "try"),
    ("b2g", "mozilla-central", "cen"),
    ("mobile", "mozilla-central", "cen"),
];

/// Whole-name short codes for any product: `(branch, code)`.
pub const BRANCH_CODES: &[(&str, &str)] = &[
    ("mozilla-inbound", "m-in"),
    ("b2g-inbound", "b2g-in"),
    ("services-central", "srv-cen"),
    ("ionmonkey", "ion"),
    ("graphics", "gfx"),
];

/// Per-segment abbreviations: `(segment, abbreviation)`.
pub const SEGMENT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("mozilla", "m"),
    ("comm", "c"),
    ("central", "cen"),
    ("release", "rel"),
    ("aurora", "aur"),
    ("shadow", "sh"),
    ("mobile", "mb"),
    ("debug", "dbg"),
    ("nightly", "ntly"),
    ("build", "bld"),
    ("xulrunner", "xr"),
    ("spidermonkey", "sm"),
    ("standalone", "sa"),
    ("profiling", "prof"),
    ("valgrind", "vg"),
    ("l10n", "lx"),
    ("linux", "lnx"),
    ("linux64", "lnx64"),
    ("win32", "w32"),
    ("win64", "w64"),
    ("macosx", "osx"),
    ("macosx64", "osx64"),
    ("android", "andrd"),
];

/// Short-code prefixes of non-default products: `(product, code)`.
///
/// Unknown products fall back to their first character.
pub const PRODUCT_CODES: &[(&str, &str)] = &[
    ("firefox", "fx"),
    ("thunderbird", "tb"),
    ("seamonkey", "sea"),
    ("mobile", "mb"),
    ("fennec", "mb"),
    ("xulrunner", "xr"),
    ("b2g", "b2g"),
];

pub(crate) fn lookup<'a>(table: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub(crate) fn lookup_product_branch(product: &str, branch: &str) -> Option<&'static str> {
    PRODUCT_BRANCH_CODES
        .iter()
        .find(|(p, b, _)| *p == product && *b == branch)
        .map(|(_, _, code)| *code)
}
