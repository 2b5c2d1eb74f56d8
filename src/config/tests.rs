use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_credence_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("CREDENCE_PORT");
        env::remove_var("CREDENCE_BIND_ADDR");
        env::remove_var("CREDENCE_DATASET_PATHS");
        env::remove_var("CREDENCE_LLM_MODEL");
        env::remove_var("CREDENCE_LLM_TIMEOUT_SECS");
        env::remove_var("CREDENCE_SEARCH_API_KEY");
        env::remove_var("CREDENCE_SEARCH_ENGINE_ID");
        env::remove_var("CREDENCE_SEARCH_TIMEOUT_SECS");
        env::remove_var("CREDENCE_FETCH_TIMEOUT_SECS");
        env::remove_var("CREDENCE_RATE_LIMIT_INTERVAL_MS");
        env::remove_var("CREDENCE_RATE_LIMIT_BURST");
        env::remove_var("CREDENCE_CORS_ORIGINS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(
        config.dataset_paths,
        vec![
            PathBuf::from("filtered_mbfc_fact_1.csv"),
            PathBuf::from("filtered_mbfc_fact_2.csv")
        ]
    );
    assert_eq!(config.llm_model, "gemini-2.0-flash");
    assert_eq!(config.rate_limit_interval, Duration::from_secs(2));
    assert_eq!(config.rate_limit_burst, 1);
    assert_eq!(config.fetch_timeout, Duration::from_secs(5));
    assert_eq!(config.search_timeout, Duration::from_secs(10));
    assert!(!config.search_configured());
    assert_eq!(config.cors_origins, vec!["*".to_string()]);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 8081,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:8081");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_credence_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert_eq!(config.llm_model, "gemini-2.0-flash");
    assert!(config.search_api_key.is_none());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_credence_env();

    with_env_vars(&[("CREDENCE_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_port_zero_rejected() {
    clear_credence_env();

    with_env_vars(&[("CREDENCE_PORT", "0")], || {
        let err = Config::from_env().expect_err("port 0 should be rejected");
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_port_not_a_number() {
    clear_credence_env();

    with_env_vars(&[("CREDENCE_PORT", "eighty")], || {
        let err = Config::from_env().expect_err("non-numeric port should fail");
        assert!(matches!(err, ConfigError::PortParseError { .. }));
        assert!(err.to_string().contains("eighty"));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_bind_addr() {
    clear_credence_env();

    with_env_vars(&[("CREDENCE_BIND_ADDR", "not-an-ip")], || {
        let err = Config::from_env().expect_err("bad bind address should fail");
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_dataset_paths_list() {
    clear_credence_env();

    with_env_vars(
        &[("CREDENCE_DATASET_PATHS", " a.csv, ,b.csv ")],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(
                config.dataset_paths,
                vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]
            );
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_list_keeps_default() {
    clear_credence_env();

    with_env_vars(&[("CREDENCE_CORS_ORIGINS", " , ")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    });
}

#[test]
#[serial]
fn test_from_env_search_credentials() {
    clear_credence_env();

    with_env_vars(
        &[
            ("CREDENCE_SEARCH_API_KEY", "key-123"),
            ("CREDENCE_SEARCH_ENGINE_ID", "   "),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.search_api_key.as_deref(), Some("key-123"));
            assert!(config.search_engine_id.is_none());
            assert!(!config.search_configured());
        },
    );
}

#[test]
#[serial]
fn test_from_env_rate_limit() {
    clear_credence_env();

    with_env_vars(
        &[
            ("CREDENCE_RATE_LIMIT_INTERVAL_MS", "250"),
            ("CREDENCE_RATE_LIMIT_BURST", "4"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.rate_limit_interval, Duration::from_millis(250));
            assert_eq!(config.rate_limit_burst, 4);
        },
    );
}

#[test]
#[serial]
fn test_from_env_burst_out_of_range_rejected() {
    clear_credence_env();

    for value in ["4294967296", "4294967297"] {
        with_env_vars(&[("CREDENCE_RATE_LIMIT_BURST", value)], || {
            let err = Config::from_env().expect_err("burst must fit in u32");
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    name: "CREDENCE_RATE_LIMIT_BURST",
                    ..
                }
            ));
            assert!(err.to_string().contains(value));
        });
    }
}

#[test]
#[serial]
fn test_from_env_burst_at_u32_max() {
    clear_credence_env();

    with_env_vars(&[("CREDENCE_RATE_LIMIT_BURST", "4294967295")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.rate_limit_burst, u32::MAX);
    });
}

#[test]
fn test_validate_rejects_oversized_interval() {
    let config = Config {
        rate_limit_interval: Duration::from_millis(u64::MAX / 1000),
        ..Config::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            name: "CREDENCE_RATE_LIMIT_INTERVAL_MS",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_from_env_unparseable_numbers_fall_back() {
    clear_credence_env();

    with_env_vars(&[("CREDENCE_LLM_TIMEOUT_SECS", "soon")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
    });
}

#[test]
fn test_validate_defaults_ok() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_zero_burst() {
    let config = Config {
        rate_limit_burst: 0,
        ..Default::default()
    };
    let err = config.validate().expect_err("zero burst is invalid");
    assert!(err.to_string().contains("CREDENCE_RATE_LIMIT_BURST"));
}

#[test]
fn test_validate_blank_model() {
    let config = Config {
        llm_model: "  ".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_validate_dataset_path_is_directory() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let config = Config {
        dataset_paths: vec![dir.path().to_path_buf()],
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_validate_missing_dataset_is_not_an_error() {
    let config = Config {
        dataset_paths: vec![PathBuf::from("/definitely/not/here.csv")],
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}
