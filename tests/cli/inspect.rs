use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_inspect_prints_file_info() -> Result<()> {
    let test = CliTest::with_file(
        "user.ts",
        r#"// @author team

// @HttpClient
export interface UserService {
  // @Path /user/get
  get(req: GetUserReq): Promise<GetUserResp>;
}
"#,
    )?;

    let output = test.command().args(["inspect", "user.ts"]).output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    assert_snapshot!(stdout(&output), @r#"
    {
      "node": {
        "path": "user.ts",
        "module": "user"
      },
      "annotations": [
        {
          "key": "author",
          "value": "team"
        }
      ],
      "types": [
        {
          "node": {
            "name": "UserService",
            "kind": "interface",
            "line": 4
          },
          "annotations": [
            {
              "key": "HttpClient",
              "value": ""
            }
          ],
          "fields": [
            {
              "node": {
                "name": "get",
                "kind": "method",
                "params": [
                  {
                    "name": "req",
                    "type_expr": {
                      "named": {
                        "name": "GetUserReq",
                        "args": []
                      }
                    }
                  }
                ],
                "returns": {
                  "named": {
                    "name": "Promise",
                    "args": [
                      {
                        "named": {
                          "name": "GetUserResp",
                          "args": []
                        }
                      }
                    ]
                  }
                },
                "optional": false,
                "line": 6
              },
              "annotations": [
                {
                  "key": "Path",
                  "value": "/user/get"
                }
              ]
            }
          ]
        }
      ]
    }
    "#);

    Ok(())
}

#[test]
fn test_inspect_parse_error() -> Result<()> {
    let test = CliTest::with_file("bad.ts", "interface A {\n  x: \n")?;

    let output = test.command().args(["inspect", "bad.ts"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("error: Failed to parse at line"));
    assert!(out.contains("--> bad.ts"));

    Ok(())
}

#[test]
fn test_inspect_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().args(["inspect", "nope.ts"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Failed to read nope.ts"));

    Ok(())
}
