//! End-to-end configuration resolution tests.

use std::path::{Path, PathBuf};

use ts_ingress_config::config::classes::DEFAULT_INGRESS_CLASS;
use ts_ingress_config::config::env::{
    ENV_CONFIGMAP, ENV_INGRESS_CLASSES, ENV_KEYFILE, ENV_SERVER, ENV_TLS, ENV_TOKEN,
};
use ts_ingress_config::config::{SyntaxError, ValidationError};
use ts_ingress_config::ConfigError;

mod common;
use common::Fixture;

#[test]
fn test_defaults_fail_only_on_missing_server() {
    let fixture = Fixture::new();

    let err = fixture.load(None).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ValidationError::MissingServer)));
    assert_eq!(err.to_string(), "must specify server");

    let mut fixture = Fixture::new();
    fixture.set_env(ENV_SERVER, "http://env");
    let config = fixture.load(None).unwrap();

    assert_eq!(config.server(), "http://env");
    assert!(config.tls() && config.tls_verify() && config.remap() && config.x_forwarded_proto());
    assert_eq!(config.ingress_classes().len(), 1);
    assert!(config.ingress_classes().contains(DEFAULT_INGRESS_CLASS));
    assert!(config.token().is_none());
    assert!(config.client_cert().is_none());
    assert!(config.tls_ca_file().is_none());
    assert!(config.configmap().is_none());
}

#[test]
fn test_file_values() {
    let fixture = Fixture::new();
    fixture.write_config(
        "k8s.config",
        "# ingress controller\n\
         server: https://api.example:6443\n\
         token: abc\n\
         tls_verify: false\n\
         x_forwarded_proto: false\n\
         ingress_classes: public internal\n\
         configmap: ingress/ts-config\n",
    );

    let config = fixture.load(Some("k8s.config")).unwrap();
    assert_eq!(config.server(), "https://api.example:6443");
    assert_eq!(config.server_url().unwrap().port(), Some(6443));
    assert_eq!(config.token(), Some("abc"));
    assert!(config.tls());
    assert!(!config.tls_verify());
    assert!(!config.x_forwarded_proto());
    assert!(config.ingress_classes().contains("public"));
    assert!(config.ingress_classes().contains("internal"));
    assert!(!config.ingress_classes().contains(DEFAULT_INGRESS_CLASS));

    let cm = config.configmap().unwrap();
    assert_eq!(cm.namespace, "ingress");
    assert_eq!(cm.name, "ts-config");
}

#[test]
fn test_key_file_clears_token() {
    let fixture = Fixture::new();
    fixture.write_config(
        "k8s.config",
        "server: http://file\ntoken: abc\nkeyfile: /k\ncertfile: /c\n",
    );

    let config = fixture.load(Some("k8s.config")).unwrap();
    assert!(config.token().is_none());
    let cert = config.client_cert().unwrap();
    assert_eq!(cert.cert_file, PathBuf::from("/c"));
    assert_eq!(cert.key_file, PathBuf::from("/k"));
}

#[test]
fn test_key_file_from_env_clears_service_account_token() {
    let mut fixture = Fixture::new();
    fixture.service_account_token("sa-token\n");
    fixture
        .in_cluster("10.96.0.1", "443")
        .set_env(ENV_KEYFILE, "/k")
        .set_env("TS_CERTFILE", "/c");

    let config = fixture.load(None).unwrap();
    assert_eq!(config.server(), "https://10.96.0.1:443");
    assert!(config.token().is_none());
}

#[test]
fn test_unpaired_client_credentials() {
    let fixture = Fixture::new();
    fixture.write_config("key-only.config", "server: http://x\nkeyfile: /k\n");
    fixture.write_config("cert-only.config", "server: http://x\ncertfile: /c\n");

    let err = fixture.load(Some("key-only.config")).unwrap_err();
    assert_eq!(err.to_string(), "must specify certfile with keyfile");

    let err = fixture.load(Some("cert-only.config")).unwrap_err();
    assert_eq!(err.to_string(), "must specify keyfile with certfile");
}

#[test]
fn test_environment_overrides_file() {
    let mut fixture = Fixture::new();
    fixture.write_config(
        "k8s.config",
        "server: http://file\ntoken: file-token\ntls: true\ningress_classes: a\n",
    );
    fixture
        .set_env(ENV_SERVER, "http://env")
        .set_env(ENV_TOKEN, "env-token")
        .set_env(ENV_TLS, "false")
        .set_env(ENV_INGRESS_CLASSES, "b c")
        .set_env(ENV_CONFIGMAP, "ns/name");

    let config = fixture.load(Some("k8s.config")).unwrap();
    assert_eq!(config.server(), "http://env");
    assert_eq!(config.token(), Some("env-token"));
    assert!(!config.tls());
    assert_eq!(config.ingress_classes().iter().collect::<Vec<_>>(), vec!["b", "c"]);
    assert_eq!(config.configmap().unwrap().to_string(), "ns/name");
}

#[test]
fn test_service_account_overrides_file() {
    let mut fixture = Fixture::new();
    fixture.write_config(
        "k8s.config",
        "server: http://file\ntoken: file-token\ncafile: /file/ca.pem\n",
    );
    fixture.service_account_token("sa-token\n");
    let ca = fixture.service_account_ca();
    fixture.in_cluster("10.96.0.1", "443");

    let config = fixture.load(Some("k8s.config")).unwrap();
    assert_eq!(config.server(), "https://10.96.0.1:443");
    assert_eq!(config.token(), Some("sa-token"));
    assert_eq!(config.tls_ca_file(), Some(ca.as_path()));
}

#[test]
fn test_environment_overrides_service_account() {
    let mut fixture = Fixture::new();
    fixture.service_account_token("sa-token\n");
    fixture.service_account_ca();
    fixture
        .in_cluster("10.96.0.1", "443")
        .set_env(ENV_SERVER, "http://env")
        .set_env("TS_CAFILE", "/env/ca.pem");

    let config = fixture.load(None).unwrap();
    assert_eq!(config.server(), "http://env");
    assert_eq!(config.token(), Some("sa-token"));
    assert_eq!(config.tls_ca_file(), Some(Path::new("/env/ca.pem")));
}

#[test]
fn test_partial_service_coordinates_leave_server_alone() {
    let mut fixture = Fixture::new();
    fixture.write_config("k8s.config", "server: http://file\n");
    fixture.service_account_token("sa-token\n");
    fixture.set_env("KUBERNETES_SERVICE_HOST", "10.96.0.1");

    let config = fixture.load(Some("k8s.config")).unwrap();
    assert_eq!(config.server(), "http://file");
    assert_eq!(config.token(), Some("sa-token"));
}

#[test]
fn test_unknown_option_reports_line() {
    let fixture = Fixture::new();
    let path = fixture.write_config("k8s.config", "server: http://x\n\n# comment\nbogus: 1\n");

    let err = fixture.load(Some("k8s.config")).unwrap_err();
    match &err {
        ConfigError::Syntax { path: p, line, kind } => {
            assert_eq!(p, &path);
            assert_eq!(*line, 4);
            assert_eq!(kind, &SyntaxError::UnknownOption("bogus".into()));
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        format!("{}:4: unknown option \"bogus\"", path.display())
    );
}

#[test]
fn test_configmap_without_namespace() {
    let fixture = Fixture::new();
    fixture.write_config("k8s.config", "server: http://x\nconfigmap: onlyname\n");

    let err = fixture.load(Some("k8s.config")).unwrap_err();
    assert!(matches!(err, ConfigError::Syntax { line: 2, .. }));
}

#[test]
fn test_file_error_wins_over_valid_environment() {
    let mut fixture = Fixture::new();
    fixture.write_config("k8s.config", "tls: maybe\n");
    fixture.set_env(ENV_SERVER, "http://env");

    let err = fixture.load(Some("k8s.config")).unwrap_err();
    assert!(matches!(err, ConfigError::Syntax { line: 1, .. }));
    assert!(err.to_string().ends_with(":1: expected \"true\" or \"false\""));
}

#[test]
fn test_bad_environment_boolean() {
    let mut fixture = Fixture::new();
    fixture.set_env(ENV_SERVER, "http://env").set_env(ENV_TLS, "1");

    let err = fixture.load(None).unwrap_err();
    assert_eq!(err.to_string(), "$TS_TLS: expected \"true\" or \"false\", not \"1\"");
}

#[test]
fn test_missing_explicit_file_is_fatal() {
    let mut fixture = Fixture::new();
    fixture.set_env(ENV_SERVER, "http://env");

    let err = fixture.load(Some("absent.config")).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, fixture.config_dir().join("absent.config")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_explicit_path_bypasses_config_dir() {
    let fixture = Fixture::new();
    let elsewhere = tempfile::tempdir().unwrap();
    let path = elsewhere.path().join("k8s.config");
    std::fs::write(&path, "server: http://elsewhere\n").unwrap();

    let config = fixture.loader().load(Some(path.as_path())).unwrap();
    assert_eq!(config.server(), "http://elsewhere");
}

#[test]
fn test_snapshot_serialization_redacts_token() {
    let fixture = Fixture::new();
    fixture.write_config("k8s.config", "server: http://x\ntoken: secret\n");

    let config = fixture.load(Some("k8s.config")).unwrap();
    let json: serde_json::Value = serde_json::to_value(&config).unwrap();
    assert_eq!(json["server"], "http://x");
    assert_eq!(json["token"], "<redacted>");
    assert_eq!(json["ingress_classes"], serde_json::json!([DEFAULT_INGRESS_CLASS]));

    let toml = toml::to_string(&config).unwrap();
    assert!(!toml.contains("secret"));
}
