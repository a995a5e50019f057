//! Client source rendering.

use anyhow::{Context, Result};
use minijinja::{Environment, context};

use super::service::ServiceDefinition;

const TEMPLATE_NAME: &str = "client.ts";

const CLIENT_TEMPLATE: &str = r#"// Code generated by stubgen. DO NOT EDIT.
// source: {{ source }}

import type { {{ interface }}{% for name in imports %}, {{ name }}{% endfor %} } from "{{ import_path }}";

export class {{ gen_name }} implements {{ interface }} {
  constructor(
    private readonly endpoint: string,
    private readonly path: string,
    private readonly fetchFn: typeof fetch = fetch,
  ) {}
{% for method in methods %}

  async {{ method.name }}(req: {{ method.req_type }}): Promise<{{ method.resp_type }}> {
    const resp = await this.fetchFn(this.endpoint + this.path + "{{ method.path }}", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(req),
    });
    if (!resp.ok) {
      throw new Error(`{{ method.name }}: HTTP ${resp.status}`);
    }
    return (await resp.json()) as {{ method.resp_type }};
  }
{% endfor %}
}
"#;

/// Render the client of `def`.
///
/// `source` is shown in the header and `import_path` is the module specifier
/// the declared types are imported from.
pub fn render(def: &ServiceDefinition, source: &str, import_path: &str) -> Result<String> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template(TEMPLATE_NAME, CLIENT_TEMPLATE)
        .context("Invalid client template")?;
    let tmpl = env.get_template(TEMPLATE_NAME)?;

    tmpl.render(context! {
        source => source,
        import_path => import_path,
        interface => &def.interface,
        gen_name => def.gen_name(),
        imports => def.imports(),
        methods => &def.methods,
    })
    .with_context(|| format!("Failed to render client for {}", def.name))
}
