use clap::Parser;

use crate::config::{ConfigError, DEFAULT_NO_VALUE, NormalizeConfig, OutlierPolicy};

/// Normalizes the pixel values of a float image into [0, 1]
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image to normalize
    #[arg(value_name = "IN_IMAGE")]
    pub in_image: String,

    /// Where to write the normalized image
    #[arg(value_name = "OUT_IMAGE")]
    pub out_image: String,

    /// Clamp (instead of remove) outliers
    #[arg(short, long)]
    pub clamp: bool,

    /// Fraction of outliers to remove, split over both tails
    #[arg(short, long, default_value_t = 0.0)]
    pub epsilon: f32,

    /// Value to ignore
    #[arg(short, long, default_value_t = DEFAULT_NO_VALUE, allow_negative_numbers = true)]
    pub ignore: f32,

    /// Calculate normalization based on these images (comma separated list).
    /// If no image is given the normalization is calculated from IN_IMAGE
    #[arg(long, value_delimiter = ',')]
    pub images: Vec<String>,

    /// Specify minimum (overrides automatic estimation)
    #[arg(long, allow_negative_numbers = true)]
    pub minimum: Option<f32>,

    /// Specify maximum (overrides automatic estimation)
    #[arg(long, allow_negative_numbers = true)]
    pub maximum: Option<f32>,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl TryFrom<&Args> for NormalizeConfig {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        NormalizeConfig::new(&args.in_image, &args.out_image)
            .with_reference_images(args.images.iter().cloned())?
            .with_epsilon(args.epsilon)?
            .with_bounds(args.minimum, args.maximum)
            .map(|config| {
                config
                    .with_no_value(args.ignore)
                    .with_policy(OutlierPolicy::from_clamp_flag(args.clamp))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("pfmnorm").chain(argv.iter().copied()))
    }

    #[test]
    fn test_requires_two_positionals() {
        assert!(parse(&["in.pfm"]).is_err());
        assert!(parse(&["in.pfm", "out.pfm", "extra.pfm"]).is_err());
        assert!(parse(&["in.pfm", "out.pfm"]).is_ok());
    }

    #[test]
    fn test_defaults_map_to_config() {
        let args = parse(&["in.pfm", "out.pfm"]).unwrap();
        let config = NormalizeConfig::try_from(&args).unwrap();
        assert_eq!(config.input(), "in.pfm");
        assert_eq!(config.output(), "out.pfm");
        assert_eq!(config.reference_images(), ["in.pfm"]);
        assert_eq!(config.no_value(), -1.0);
        assert_eq!(config.policy(), OutlierPolicy::Discard);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "-c",
            "-e",
            "0.2",
            "-i",
            "-2.5",
            "--images",
            "a.pfm,b.pfm",
            "--minimum",
            "-3",
            "--maximum",
            "7",
            "in.pfm",
            "out.pfm",
        ])
        .unwrap();
        let config = NormalizeConfig::try_from(&args).unwrap();
        assert_eq!(config.policy(), OutlierPolicy::Clamp);
        assert_eq!(config.epsilon(), 0.2);
        assert_eq!(config.no_value(), -2.5);
        assert_eq!(config.reference_images(), ["a.pfm", "b.pfm"]);
        assert_eq!(config.minimum(), Some(-3.0));
        assert_eq!(config.maximum(), Some(7.0));
    }

    #[test]
    fn test_non_numeric_epsilon_is_usage_error() {
        assert!(parse(&["-e", "lots", "in.pfm", "out.pfm"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected_before_run() {
        let args = parse(&["-e", "1.5", "in.pfm", "out.pfm"]).unwrap();
        assert_matches!(
            NormalizeConfig::try_from(&args),
            Err(ConfigError::EpsilonOutOfRange(_))
        );

        let args = parse(&["--minimum", "4", "--maximum", "1", "in.pfm", "out.pfm"]).unwrap();
        assert_matches!(
            NormalizeConfig::try_from(&args),
            Err(ConfigError::InvertedBounds { .. })
        );
    }
}
