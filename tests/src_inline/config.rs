use super::*;

#[test]
fn test_config_normalizes_base_url() {
    let config = AnalyticsConfig::new(" https://hr.example.com/api/ ", 3).unwrap();
    assert_eq!(config.api_base, "https://hr.example.com/api");
    assert_eq!(config.org_id, 3);
    assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(config.session_path, default_session_path());
}

#[test]
fn test_config_rejects_bad_base_url() {
    assert!(matches!(
        AnalyticsConfig::new("", 1),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        AnalyticsConfig::new("ftp://hr.example.com", 1),
        Err(AppError::Config(_))
    ));
}

#[test]
fn test_config_rejects_non_positive_org() {
    let err = AnalyticsConfig::new("http://localhost:8080", 0).unwrap_err();
    assert!(err.to_string().contains("--org"));
}

#[test]
fn test_config_overrides() {
    let config = AnalyticsConfig::new("http://localhost:8080", 1)
        .unwrap()
        .with_session_path(Some(PathBuf::from("/tmp/s.json")))
        .with_timeout_secs(0);
    assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
    assert_eq!(config.request_timeout, Duration::from_secs(1));

    let unchanged = config.clone().with_session_path(None);
    assert_eq!(unchanged.session_path, PathBuf::from("/tmp/s.json"));
}
