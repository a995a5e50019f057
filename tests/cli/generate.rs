use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const USER_SERVICE: &str = r#"// @HttpClient
// @ServiceName UserAPI
export interface UserService {
  // @Path /user/get
  get(req: GetUserReq): Promise<GetUserResp>;

  // @doc default path
  list(req: ListUsersReq): Promise<ListUsersResp>;
}

export interface GetUserReq { id: number }
export interface GetUserResp { name: string }
"#;

#[test]
fn test_generate_writes_client_next_to_source() -> Result<()> {
    let test = CliTest::with_file("src/user.ts", USER_SERVICE)?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Generated ./src/user_a_p_i_gen.ts from ./src/user.ts (UserAPI)"));
    assert!(out.contains("Scanned 1 source file - generated 1 client"));

    let generated = test.read_file("src/user_a_p_i_gen.ts")?;
    assert!(generated.starts_with("// Code generated by stubgen. DO NOT EDIT.\n"));
    assert!(generated.contains(
        "import type { UserService, GetUserReq, GetUserResp, ListUsersReq, ListUsersResp } from \"./user\";"
    ));
    assert!(generated.contains("export class UserAPIGen implements UserService {"));
    assert!(generated.contains("this.endpoint + this.path + \"/user/get\""));
    assert!(generated.contains("this.endpoint + this.path + \"/list\""));

    Ok(())
}

#[test]
fn test_generate_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/user.ts", USER_SERVICE)?;

    let output = test.generate_command().arg("--dry-run").output()?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.contains("Would generate ./src/user_a_p_i_gen.ts"));
    assert!(out.contains("(dry run, nothing written)"));
    assert!(!test.exists("src/user_a_p_i_gen.ts"));

    Ok(())
}

#[test]
fn test_generate_into_output_dir() -> Result<()> {
    let test = CliTest::with_file("src/api/user.ts", USER_SERVICE)?;

    let output = test
        .generate_command()
        .args(["--output-dir", "generated"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let generated = test.read_file("generated/user_a_p_i_gen.ts")?;
    assert!(generated.contains("from \"../src/api/user\";"));
    assert!(!test.exists("src/api/user_a_p_i_gen.ts"));

    Ok(())
}

#[test]
fn test_generate_uses_config_output_dir_and_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".stubgenrc.json",
        r#"{ "markerKey": "Client", "pathKey": "Route", "outputDir": "out" }"#,
    )?;
    test.write_file(
        "orders.ts",
        "// @Client\nexport interface Orders {\n  // @Route /orders/list\n  list(req: Req): Promise<Resp>;\n}\n\n// @HttpClient\nexport interface Ignored {}\n",
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let generated = test.read_file("out/orders_gen.ts")?;
    assert!(generated.contains("\"/orders/list\""));
    assert!(!test.exists("out/ignored_gen.ts"));

    Ok(())
}

#[test]
fn test_generate_reports_rejected_declaration() -> Result<()> {
    let test = CliTest::with_file(
        "api.ts",
        r#"// @HttpClient
export interface Broken {
  // @Path /get
  get(id: string): Promise<User>;
}

// @HttpClient
export interface Fine {
  // @Path /ping
  ping(req: Ping): Promise<Pong>;
}
"#,
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains(
        "error: method 'get' must take a request of a named type as its first parameter  invalid-service"
    ));
    assert!(out.contains("--> ./api.ts:2"));
    assert!(out.contains("= note: in declaration of Broken"));
    assert!(out.contains("1 problems (1 error, 0 warnings)"));

    assert!(!test.exists("broken_gen.ts"));
    assert!(test.exists("fine_gen.ts"));

    Ok(())
}

#[test]
fn test_generate_reports_parse_errors() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("bad.ts", "export interface {\n")?;
    test.write_file(
        "good.ts",
        "// @HttpClient\nexport interface Good {\n  // @Path /a\n  a(req: A): Promise<B>;\n}\n",
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    assert!(stdout(&output).contains("parse-error"));
    assert!(stderr(&output).contains("1 file(s) could not be parsed (use -v for details)"));
    assert!(test.exists("good_gen.ts"));

    Ok(())
}

#[test]
fn test_generate_rejects_duplicate_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "a.ts",
        "// @HttpClient\n// @ServiceName Shared\nexport interface A {}\n",
    )?;
    test.write_file(
        "b.ts",
        "// @HttpClient\n// @ServiceName Shared\nexport interface B {}\n",
    )?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("is also generated for service 'Shared'"));
    assert!(out.contains("--> ./b.ts:3"));
    assert!(test.read_file("shared_gen.ts")?.contains("implements A {"));

    Ok(())
}

#[test]
fn test_generate_skips_test_and_generated_files() -> Result<()> {
    let test = CliTest::new()?;
    let marked = "// @HttpClient\nexport interface Api {}\n";
    test.write_file("api.test.ts", marked)?;
    test.write_file("existing_gen.ts", marked)?;
    test.write_file("node_modules/pkg/index.ts", marked)?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Scanned 0 source files - generated 0 clients"));
    assert!(!test.exists("api_gen.ts"));

    Ok(())
}

#[test]
fn test_generate_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file(".stubgenrc.json", r#"{ "ignores": ["**/[oops"] }"#)?;

    let output = test.generate_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_generate_with_source_root() -> Result<()> {
    let test = CliTest::with_file("web/user.ts", USER_SERVICE)?;

    let output = test
        .generate_command()
        .args(["--source-root", "web"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(test.exists("web/user_a_p_i_gen.ts"));

    Ok(())
}
