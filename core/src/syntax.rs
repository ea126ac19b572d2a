//! Single-line usage rendering.

use crate::coerce::{render_option, value_hint};
use crate::{Key, Manifest};

/// Renders a one-line usage string for a manifest.
///
/// Named entries render as `-name=<type>` (or `-name` for booleans) and
/// positional entries as a bare `<type>`. Entries not marked required are
/// wrapped in brackets. Returns an empty string when there is no manifest.
///
/// # Examples
///
/// ```
/// use argmap_core::{Manifest, OptionSpec, syntax};
///
/// let manifest = Manifest::new()
///     .with_option("verbose", OptionSpec::boolean())
///     .with_option("format", OptionSpec::string().with_allow(["json", "yaml"]))
///     .with_option("jobs", OptionSpec::int().required())
///     .with_option("0", OptionSpec::string().required())
///     .with_option("1", OptionSpec::float());
///
/// assert_eq!(
///     syntax(Some(&manifest)),
///     "[-verbose] [-format=<json|yaml>] -jobs=<int> <string> [<float>]"
/// );
/// assert_eq!(syntax(None), "");
/// ```
pub fn syntax(manifest: Option<&Manifest>) -> String {
    let Some(manifest) = manifest else {
        return String::new();
    };
    manifest
        .iter()
        .map(|(name, spec)| {
            let form = if Key::parse(name).is_positional() {
                value_hint(spec)
            } else {
                format!("-{}", render_option(name, spec))
            };
            if spec.required { form } else { format!("[{form}]") }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
