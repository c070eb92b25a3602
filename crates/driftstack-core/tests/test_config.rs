use driftstack_core::align::UpsampledDftEstimator;
use driftstack_core::error::DriftError;
use driftstack_core::frame::Frame;
use driftstack_core::pipeline::align_and_sum;
use driftstack_core::pipeline::config::AlignConfig;

#[test]
fn test_defaults() {
    let config = AlignConfig::default();
    assert!(config.blur);
    assert_eq!(config.blur_kernel_size, 7);
    assert!(!config.edge_filter);
    assert_eq!(config.upsample_factor, 100);
}

#[test]
fn test_default_config_is_valid() {
    assert!(AlignConfig::default().validate().is_ok());
}

#[test]
fn test_even_kernel_size_rejected() {
    let config = AlignConfig {
        blur_kernel_size: 6,
        ..AlignConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(DriftError::InvalidConfig(_))
    ));
}

#[test]
fn test_zero_kernel_size_rejected() {
    let config = AlignConfig {
        blur_kernel_size: 0,
        ..AlignConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_upsample_factor_rejected() {
    let config = AlignConfig {
        upsample_factor: 0,
        ..AlignConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(DriftError::InvalidConfig(_))
    ));
}

#[test]
fn test_engine_rejects_invalid_config_before_any_work() {
    let config = AlignConfig {
        blur_kernel_size: 4,
        ..AlignConfig::default()
    };
    let stack = vec![Frame::new(ndarray::Array2::zeros((8, 8)))];

    let result = align_and_sum(&stack, &config, &UpsampledDftEstimator);
    assert!(matches!(result, Err(DriftError::InvalidConfig(_))));
}

#[test]
fn test_serde_round_trip() {
    let config = AlignConfig {
        blur: false,
        blur_kernel_size: 9,
        edge_filter: true,
        upsample_factor: 50,
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: AlignConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back.blur, config.blur);
    assert_eq!(back.blur_kernel_size, config.blur_kernel_size);
    assert_eq!(back.edge_filter, config.edge_filter);
    assert_eq!(back.upsample_factor, config.upsample_factor);
}

#[test]
fn test_missing_fields_take_defaults() {
    let config: AlignConfig = serde_json::from_str("{}").unwrap();
    assert!(config.blur);
    assert_eq!(config.blur_kernel_size, 7);
    assert!(!config.edge_filter);
    assert_eq!(config.upsample_factor, 100);
}
