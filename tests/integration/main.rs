//! Integration tests for buildinfo

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Command isolated from any user configuration
    fn buildinfo(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("buildinfo");
        cmd.env("BUILDINFO_CONFIG", dir.path().join("config.toml"));
        cmd
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    fn stdout_json(output: &[u8]) -> serde_json::Value {
        serde_json::from_slice(output).unwrap()
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        buildinfo(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Build provenance records"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        buildinfo(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("buildinfo"));
    }

    #[test]
    fn accumulate_filters_attributes() {
        let dir = TempDir::new().unwrap();
        let output = buildinfo(&dir)
            .args([
                "--compact",
                "accumulate",
                "--key",
                "meta",
                "--frontend",
                "dockerfile.v0",
                "-a",
                "build-arg:BUILDKIT_INLINE_CACHE=1",
                "-a",
                "build-arg:FOO=bar",
                "-a",
                "label:com.x=y",
                "-a",
                "target=builder",
                "-a",
                "unknown=z",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let record = stdout_json(&output);
        assert_eq!(record["frontend"], "dockerfile.v0");
        assert_eq!(
            record["attrs"],
            serde_json::json!({
                "build-arg:FOO": "bar",
                "label:com.x": "y",
                "target": "builder",
            })
        );
    }

    #[test]
    fn accumulate_platform_scoped_context() {
        let dir = TempDir::new().unwrap();
        let attrs = write(
            &dir,
            "attrs.json",
            r#"{"context:base::linux/amd64":"ref1","context:base::linux/arm64":"ref2"}"#,
        );
        let output = buildinfo(&dir)
            .args(["accumulate", "--key", "meta/linux/amd64", "--attrs-file", &attrs])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let record = stdout_json(&output);
        assert_eq!(record["attrs"], serde_json::json!({"context:base": "ref1"}));
    }

    #[test]
    fn accumulate_merges_stored_record() {
        let dir = TempDir::new().unwrap();
        let metadata = write(
            &dir,
            "metadata.json",
            r#"{"meta":{"frontend":"dockerfile.v0","attrs":{"build-arg:A":"old","build-arg:B":"kept"}}}"#,
        );
        let output = buildinfo(&dir)
            .args(["accumulate", "-m", &metadata, "-k", "meta", "-a", "build-arg:A=new"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let record = stdout_json(&output);
        assert_eq!(record["frontend"], "dockerfile.v0");
        assert_eq!(record["attrs"]["build-arg:A"], "new");
        assert_eq!(record["attrs"]["build-arg:B"], "kept");
    }

    #[test]
    fn finalize_merges_sources() {
        let dir = TempDir::new().unwrap();
        let metadata = write(
            &dir,
            "metadata.json",
            r#"{"meta":{"frontend":"dockerfile.v0","sources":[{"type":"docker-image","ref":"alpine","alias":"docker.io/library/alpine:latest"}]}}"#,
        );
        let sources = write(
            &dir,
            "sources.json",
            r#"{"docker-image://docker.io/library/alpine:latest":"sha256:deadbeef","git://github.com/moby/buildkit.git#main":"abc"}"#,
        );
        let output = buildinfo(&dir)
            .args(["finalize", "-m", &metadata, "-k", "meta", "-s", &sources])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let record = stdout_json(&output);
        assert_eq!(
            record["sources"],
            serde_json::json!([
                {"type": "docker-image", "ref": "docker.io/library/alpine:latest", "pin": "sha256:deadbeef"},
                {"type": "git", "ref": "https://github.com/moby/buildkit.git#main", "pin": "abc"},
            ])
        );
    }

    #[test]
    fn finalize_rejects_bad_identifier() {
        let dir = TempDir::new().unwrap();
        let sources = write(&dir, "sources.json", r#"{"not-a-source":"x"}"#);
        buildinfo(&dir)
            .args(["finalize", "-k", "meta", "-s", &sources])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not-a-source"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn format_removes_attrs() {
        let dir = TempDir::new().unwrap();
        let record = write(
            &dir,
            "record.json",
            r#"{"frontend":"dockerfile.v0","attrs":{"target":"app"}}"#,
        );
        buildinfo(&dir)
            .args(["--compact", "format", "--remove-attrs", &record])
            .assert()
            .success()
            .stdout(predicate::str::diff("{\"frontend\":\"dockerfile.v0\"}\n"));
    }

    #[test]
    fn encode_then_decode_from_stdin() {
        let dir = TempDir::new().unwrap();
        let record = r#"{"frontend":"dockerfile.v0","attrs":{"target":"app"}}"#;
        let encoded = buildinfo(&dir)
            .arg("encode")
            .write_stdin(record)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        buildinfo(&dir)
            .args(["--compact", "decode"])
            .write_stdin(encoded)
            .assert()
            .success()
            .stdout(predicate::str::diff(format!("{}\n", record)));
    }

    #[test]
    fn inspect_image_config_without_build_info() {
        let dir = TempDir::new().unwrap();
        let config = write(&dir, "config.json", r#"{"os":"linux","architecture":"amd64"}"#);
        buildinfo(&dir)
            .args(["inspect", &config])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("No build info"));
    }

    #[test]
    fn decode_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        buildinfo(&dir)
            .args(["decode", "%%%"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid base64"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        buildinfo(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        buildinfo(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[output]"));
    }

    #[test]
    fn config_init_recovers_broken_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "config.toml", "not = [valid");
        buildinfo(&dir)
            .args(["config", "init", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));

        buildinfo(&dir).args(["config", "show"]).assert().success();
    }
}
