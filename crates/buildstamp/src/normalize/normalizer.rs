use crate::{
    Error, NormalizerConfig,
    normalize::tables::{
        BRANCH_CODES, EXCLUSIVE_NAMES, PRODUCT_CODES, SEGMENT_ABBREVIATIONS, lookup,
        lookup_product_branch,
    },
};
use std::sync::LazyLock;
#[cfg(feature = "tracing")]
use tracing::{instrument, trace};

static DEFAULT_NORMALIZER: LazyLock<NameNormalizer> = LazyLock::new(NameNormalizer::default);

/// Shortens `name` to its canonical short code using the default
/// [`NameNormalizer`].
///
/// `product` defaults to [`crate::DEFAULT_PRODUCT`], whose codes carry no
/// prefix.
///
/// # Example
/// ```
/// use buildstamp::normalize_name;
///
/// assert_eq!(normalize_name("mozilla-beta", None), "m-beta");
/// assert_eq!(normalize_name("comm-release", Some("thunderbird")), "tb-c-rel");
/// assert_eq!(normalize_name("spidermonkey-errasdebug", None), "spidermonkey-errasdebug");
/// ```
pub fn normalize_name(name: &str, product: Option<&str>) -> String {
    DEFAULT_NORMALIZER.normalize(name, product)
}

/// Maps release-branch names to short canonical codes.
///
/// Resolution order:
/// 1. Names in [`EXCLUSIVE_NAMES`] (after trimming and lowercasing) are
///    returned as listed there, for every product and without truncation.
/// 2. The per-product whole-name table, then the product-agnostic one.
/// 3. Otherwise the lowercased name is rewritten segment by segment (on `-`
///    and `_`) through [`SEGMENT_ABBREVIATIONS`].
///
/// Non-default products then get a `<code>-` prefix, and the result is cut
/// to `max_len` characters if one is configured.
///
/// The function is total: unknown names come back lowercased with known
/// segments abbreviated, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNormalizer {
    default_product: String,
    max_len: Option<usize>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl TryFrom<NormalizerConfig> for NameNormalizer {
    type Error = Error;

    fn try_from(config: NormalizerConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self::new(config))
    }
}

impl NameNormalizer {
    fn new(config: NormalizerConfig) -> Self {
        Self {
            default_product: config.default_product.trim().to_lowercase(),
            max_len: config.max_len,
        }
    }

    /// Returns the product whose codes are not prefixed.
    pub fn default_product(&self) -> &str {
        &self.default_product
    }

    /// Returns the short code for `name` built by `product` (or the default
    /// product when `None`).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn normalize(&self, name: &str, product: Option<&str>) -> String {
        let branch = name.trim().to_lowercase();
        if let Some(exclusive) = EXCLUSIVE_NAMES.iter().find(|n| **n == branch) {
            return exclusive.to_string();
        }

        let product = product
            .map(|p| p.trim().to_lowercase())
            .unwrap_or_else(|| self.default_product.clone());

        let body = match lookup_product_branch(&product, &branch)
            .or_else(|| lookup(BRANCH_CODES, &branch))
        {
            Some(code) => {
                #[cfg(feature = "tracing")]
                trace!(code, "whole-name table hit");
                code.to_string()
            }
            None => abbreviate_segments(&branch),
        };

        let code = if product == self.default_product {
            body
        } else {
            match product_code(&product) {
                Some(prefix) => format!("{prefix}-{body}"),
                None => body,
            }
        };

        match self.max_len {
            Some(max) if code.chars().count() > max => code.chars().take(max).collect(),
            _ => code,
        }
    }
}

fn product_code(product: &str) -> Option<String> {
    lookup(PRODUCT_CODES, product)
        .map(str::to_string)
        .or_else(|| product.chars().next().map(String::from))
}

fn abbreviate_segments(branch: &str) -> String {
    let mut out = String::with_capacity(branch.len());
    let mut rest = branch;

    loop {
        match rest.find(|c: char| c == '-' || c == '_') {
            Some(idx) => {
                let (segment, tail) = rest.split_at(idx);
                out.push_str(lookup(SEGMENT_ABBREVIATIONS, segment).unwrap_or(segment));
                // separators are ASCII, so a one-byte split is always valid
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
            None => {
                out.push_str(lookup(SEGMENT_ABBREVIATIONS, rest).unwrap_or(rest));
                return out;
            }
        }
    }
}
