//! Command line of the raw-to-DNG converter.

use std::ffi::OsString;
use std::path::Path;

use crate::config::{ConversionMethod, ImportPolicy, PreviewSize};

/// Flags derived from the policy, in the order the converter expects them.
pub fn dng_args(policy: &ImportPolicy) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();

    args.push(
        match policy.preview_size {
            PreviewSize::Full => "-p2",
            PreviewSize::Medium => "-p1",
            PreviewSize::Low => "-p0",
        }
        .into(),
    );

    args.push(if policy.lossless_compression { "-c" } else { "-u" }.into());

    if policy.conversion_method == ConversionMethod::Linear {
        args.push("-l".into());
    }

    if policy.embed_original_raw {
        args.push("-e".into());
    }

    args
}

/// Full invocation: minimised output into `destination_dir`, policy flags,
/// then the source file.
pub fn conversion_args(
    policy: &ImportPolicy,
    destination_dir: &Path,
    source: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-mp".into(), "-d".into(), destination_dir.into()];
    args.extend(dng_args(policy));
    args.push(source.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_default_policy_flags() {
        let policy = ImportPolicy::new("/photos");
        assert_eq!(strings(&dng_args(&policy)), vec!["-p1", "-u"]);
    }

    #[test]
    fn test_all_optional_flags() {
        let mut policy = ImportPolicy::new("/photos");
        policy.preview_size = PreviewSize::Full;
        policy.lossless_compression = true;
        policy.conversion_method = ConversionMethod::Linear;
        policy.embed_original_raw = true;

        assert_eq!(strings(&dng_args(&policy)), vec!["-p2", "-c", "-l", "-e"]);
    }

    #[test]
    fn test_no_preview() {
        let mut policy = ImportPolicy::new("/photos");
        policy.preview_size = PreviewSize::Low;
        assert_eq!(strings(&dng_args(&policy))[0], "-p0");
    }

    #[test]
    fn test_conversion_args_put_source_last() {
        let policy = ImportPolicy::new("/photos");
        let args = conversion_args(
            &policy,
            Path::new("/photos/20230714"),
            Path::new("/card/IMG_0001.CR2"),
        );

        assert_eq!(
            strings(&args),
            vec![
                "-mp",
                "-d",
                "/photos/20230714",
                "-p1",
                "-u",
                "/card/IMG_0001.CR2"
            ]
        );
    }
}
