use promptx::integration::ProviderEntry;
use promptx::variations::VariationPolicy;
use promptx::{Credentials, ProviderKind, PromptxConfig, PromptxSystem};
use serial_test::serial;
use tempfile::NamedTempFile;

#[test]
fn test_config_serialization_roundtrip() {
    let mut original_config = PromptxConfig::default();
    original_config.http.timeout_secs = 12;
    original_config.variations.policy = VariationPolicy::AllOrNothing;
    original_config.providers[1].model = Some("gpt-4o-mini".to_string());

    let toml_str = original_config
        .to_toml_string()
        .expect("Should be able to serialize config to TOML");

    assert!(toml_str.contains("[[providers]]"), "Should contain provider tables");
    assert!(toml_str.contains("timeout_secs = 12"));
    assert!(
        !toml_str.contains("api_key ="),
        "Credentials never belong in the TOML file"
    );

    let deserialized_config = PromptxConfig::from_toml_str(&toml_str)
        .expect("Should be able to deserialize TOML string");

    assert_eq!(original_config.providers, deserialized_config.providers);
    assert_eq!(deserialized_config.http.timeout_secs, 12);
    assert_eq!(
        deserialized_config.variations.policy,
        VariationPolicy::AllOrNothing
    );
    assert_eq!(
        original_config.enhance.max_prompt_chars,
        deserialized_config.enhance.max_prompt_chars
    );
}

#[test]
fn test_config_file_operations() {
    let original_config = PromptxConfig {
        providers: vec![
            ProviderEntry::new(ProviderKind::HuggingFace, 1),
            ProviderEntry::new(ProviderKind::Gemini, 2),
        ],
        ..PromptxConfig::default()
    };

    let temp_file = NamedTempFile::new().expect("Should be able to create temporary file");
    let temp_path = temp_file.path();

    original_config
        .to_toml_file(temp_path)
        .expect("Should be able to save config to file");

    let loaded_config =
        PromptxConfig::from_toml_file(temp_path).expect("Should be able to load config from file");

    assert_eq!(original_config.providers, loaded_config.providers);

    let orchestrator = loaded_config
        .build_orchestrator(&Credentials::default())
        .expect("Loaded configuration should build");
    let order: Vec<&str> = orchestrator
        .providers()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(order, vec!["huggingface", "gemini"]);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let result = PromptxConfig::from_toml_str("[http\ntimeout_secs = ");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_credentials_are_read_from_custom_env_var() {
    let config = PromptxConfig::from_toml_str(
        r#"
[[providers]]
kind = "deepseek"
priority = 1
api_key_env = "PROMPTX_TEST_DEEPSEEK_KEY"
"#,
    )
    .expect("Valid TOML");

    unsafe {
        std::env::set_var("PROMPTX_TEST_DEEPSEEK_KEY", "ds-test-key");
    }
    let credentials = Credentials::from_env(&config);
    unsafe {
        std::env::remove_var("PROMPTX_TEST_DEEPSEEK_KEY");
    }

    assert_eq!(credentials.get("PROMPTX_TEST_DEEPSEEK_KEY"), Some("ds-test-key"));
    assert_eq!(credentials.get("DEEPSEEK_API_KEY"), None);
}

#[tokio::test]
#[serial]
async fn test_missing_env_credentials_fail_fast() {
    let config = PromptxConfig::from_toml_str(
        r#"
[[providers]]
kind = "gemini"
priority = 1
api_key_env = "PROMPTX_TEST_UNSET_KEY"
"#,
    )
    .expect("Valid TOML");

    unsafe {
        std::env::remove_var("PROMPTX_TEST_UNSET_KEY");
    }
    let system = PromptxSystem::new(&config, &Credentials::from_env(&config))
        .expect("Configuration is valid");

    let error = system
        .generate("hello", None)
        .await
        .expect_err("No credential is present");
    assert_eq!(
        error.to_string(),
        "All providers failed. Errors: gemini: Configuration error: PROMPTX_TEST_UNSET_KEY not found"
    );
}
