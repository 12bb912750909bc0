use anyhow::{bail, Context, Result};

/// Container width used when `--width` is not given.
pub const DEFAULT_WIDTH: f32 = 600.0;

/// Arguments shared by the command-line tools.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub aspect_ratios: Vec<f64>,
    pub gap: Option<f64>,
    /// Container width in pixels for pixel output
    pub width: f32,
}

/// Parse `RATIO... [--gap G] [--width W]`.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs> {
    let mut aspect_ratios = Vec::new();
    let mut gap = None;
    let mut width = DEFAULT_WIDTH;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--gap" => {
                let value = args.next().context("--gap needs a value")?;
                gap = Some(
                    value
                        .parse::<f64>()
                        .with_context(|| format!("invalid gap '{}'", value))?,
                );
            }
            "--width" => {
                let value = args.next().context("--width needs a value")?;
                width = value
                    .parse::<f32>()
                    .with_context(|| format!("invalid width '{}'", value))?;
                if !(width.is_finite() && width > 0.0) {
                    bail!("width must be positive, got {}", value);
                }
            }
            other if other.starts_with("--") => bail!("unknown flag '{}'", other),
            other => aspect_ratios.push(parse_aspect_ratio(other)?),
        }
    }

    Ok(CliArgs {
        aspect_ratios,
        gap,
        width,
    })
}

/// Parse `1.5`, `16/9` or `4:3` into a positive aspect ratio.
pub fn parse_aspect_ratio(s: &str) -> Result<f64> {
    let ratio = match s.split_once(['/', ':']) {
        Some((w, h)) => {
            let w: f64 = w
                .trim()
                .parse()
                .with_context(|| format!("invalid width in '{}'", s))?;
            let h: f64 = h
                .trim()
                .parse()
                .with_context(|| format!("invalid height in '{}'", s))?;
            w / h
        }
        None => s
            .trim()
            .parse()
            .with_context(|| format!("invalid aspect ratio '{}'", s))?,
    };

    if !(ratio.is_finite() && ratio > 0.0) {
        bail!("aspect ratio must be positive and finite, got '{}'", s);
    }
    Ok(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_ratio_forms() {
        assert!((parse_aspect_ratio("16/9").unwrap() - 16.0 / 9.0).abs() < 1e-12);
        assert!((parse_aspect_ratio("4:3").unwrap() - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(parse_aspect_ratio("1.5").unwrap(), 1.5);
    }

    #[test]
    fn rejects_bad_ratios() {
        assert!(parse_aspect_ratio("0").is_err());
        assert!(parse_aspect_ratio("1/0").is_err());
        assert!(parse_aspect_ratio("-2").is_err());
        assert!(parse_aspect_ratio("wide").is_err());
    }

    #[test]
    fn parses_flags_between_ratios() {
        let parsed = parse_args(args(&["1", "--gap", "0.02", "16/9", "--width", "800"])).unwrap();
        assert_eq!(parsed.aspect_ratios.len(), 2);
        assert_eq!(parsed.gap, Some(0.02));
        assert_eq!(parsed.width, 800.0);
    }

    #[test]
    fn defaults_without_flags() {
        let parsed = parse_args(args(&["1"])).unwrap();
        assert_eq!(parsed.gap, None);
        assert_eq!(parsed.width, DEFAULT_WIDTH);
    }

    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["1", "--gap"])).is_err());
        assert!(parse_args(args(&["1", "--width", "-5"])).is_err());
    }
}
