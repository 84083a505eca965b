/// End-to-end tests for the CLI
///
/// None of these reach a network: every case fails or finishes before a
/// session is opened, or points at an unconfigured service.
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Command isolated from the developer's environment and config file
    fn isolated(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("prodsec-query");
        cmd.current_dir(dir.path())
            .env_remove("PRODSEC_REGISTRY_URL")
            .env_remove("PRODSEC_INCIDENT_DB_URL")
            .env_remove("PRODSEC_ACCESS_TOKEN")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("prodsec-query")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("queries"))
            .stdout(predicate::str::contains("entities"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("prodsec-query")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("prodsec-query")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("prodsec-query")
            .args(["-f", "invalid_format", "entities", "trackers", "list"])
            .assert()
            .code(2);
    }

    /// Exit code 2: A query without parameters never opens a session
    #[test]
    fn test_exit_code_query_without_parameters() {
        let dir = TempDir::new().unwrap();
        isolated(&dir)
            .args(["queries", "components-affected-by-cve"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Accepted parameters: cve_id"));
    }

    /// Exit code 2: Optional filters alone do not select anything
    #[test]
    fn test_exit_code_optional_filter_only() {
        let dir = TempDir::new().unwrap();
        isolated(&dir)
            .args(["queries", "components-contain-component", "--type", "npm"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Malformed uuid is rejected before any request
    #[test]
    fn test_exit_code_invalid_uuid() {
        let dir = TempDir::new().unwrap();
        isolated(&dir)
            .args(["entities", "affects", "get", "--uuid", "not-a-uuid"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("uuid"));
    }

    /// Exit code 2: Service URL without scheme
    #[test]
    fn test_exit_code_invalid_registry_url() {
        let dir = TempDir::new().unwrap();
        isolated(&dir)
            .args([
                "--registry-url",
                "registry.example.com",
                "entities",
                "product-streams",
                "list",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("registry_url"));
    }

    /// Exit code 3: No incident database configured
    #[test]
    fn test_exit_code_service_not_configured() {
        let dir = TempDir::new().unwrap();
        isolated(&dir)
            .args(["entities", "trackers", "list"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("incident-database is not accessible"));
    }

    /// Exit code 3: Explicit config file that does not exist
    #[test]
    fn test_exit_code_missing_config_file() {
        let dir = TempDir::new().unwrap();
        isolated(&dir)
            .args(["--config", "missing.yml", "entities", "trackers", "list"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    /// Exit code 2: Discovered config file with an invalid limit
    #[test]
    fn test_exit_code_invalid_discovered_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("prodsec-query.config.yml"),
            "registry_url: https://registry.example.com\nmax_concurrent_requests: 0\n",
        )
        .unwrap();

        isolated(&dir)
            .args(["entities", "product-streams", "list"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("max_concurrent_requests"));
    }

    /// Environment URL is used when no flag is given
    #[test]
    fn test_environment_url_is_validated() {
        let dir = TempDir::new().unwrap();
        isolated(&dir)
            .env("PRODSEC_INCIDENT_DB_URL", "ftp://osidb.example.com")
            .args(["entities", "flaws", "list", "--impact", "IMPORTANT"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("incident_db_url"));
    }
}
