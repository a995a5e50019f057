use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["markerKey"], "HttpClient");
    assert_eq!(parsed["serviceNameKey"], "ServiceName");
    assert_eq!(parsed["pathKey"], "Path");
    assert_eq!(parsed["ignoreTestFiles"], true);
    assert!(
        parsed.get("includes").is_some(),
        "Config should have 'includes' field"
    );
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .stubgenrc.json

    ----- stderr -----
    ");

    assert!(test.exists(".stubgenrc.json"));
    let content = test.read_file(".stubgenrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".stubgenrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: .stubgenrc.json already exists"));
    assert_eq!(test.read_file(".stubgenrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;

    test.write_file(
        "src/api.ts",
        "// @HttpClient\nexport interface Api {\n  // @Path /ping\n  ping(req: Ping): Promise<Pong>;\n}\n",
    )?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "generate should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.exists("src/api_gen.ts"));

    Ok(())
}
