//! File bodies and insertion snippets for generated TypeScript sources.
//!
//! Every body is a `{{VARIABLE}}` template rendered through a
//! [`RenderContext`]. Only names derived by [`crate::domain::naming`] flow
//! into the context, so rendering is a pure function of the user's answers.

use std::collections::HashMap;
use std::fmt;

use crate::domain::casing::to_kebab_case;
use crate::domain::naming::{ArtifactKind, DerivedNameSet, DtoNames, ToolNames};

// ============================================================================
// Render Context
// ============================================================================

/// Variables for one render.
///
/// `{{UNKNOWN}}` placeholders are left as-is.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding the standard variables of one artifact.
    ///
    /// | Variable | Example |
    /// |----------|---------|
    /// | `DOMAIN` | `weather-data` |
    /// | `CLASS_NAME` | `OpenMeteoHttpClient` |
    /// | `INSTANCE_NAME` | `openMeteoHttpClient` |
    /// | `METHOD` | `getForecast` |
    /// | `ENDPOINT` | `get-forecast` |
    /// | `REQUEST_DTO` / `RESPONSE_DTO` | `GetForecastRequestDto` |
    /// | `DTO_MODULE` | `getForecast.dto` |
    /// | `ENV_VAR` | `OPEN_METEO_API_URL` |
    pub fn for_names(names: &DerivedNameSet) -> Self {
        Self::new()
            .with_variable("DOMAIN", &names.domain_dir)
            .with_variable("CLASS_NAME", &names.class_name)
            .with_variable("INSTANCE_NAME", &names.instance_name)
            .with_variable("METHOD", &names.method_name)
            .with_variable("ENDPOINT", names.method_slug())
            .with_variable("ENV_VAR", &names.env_var)
            .with_dto(&names.dto)
    }

    pub fn with_dto(self, dto: &DtoNames) -> Self {
        self.with_variable("REQUEST_DTO", &dto.request)
            .with_variable("RESPONSE_DTO", &dto.response)
            .with_variable("DTO_MODULE", dto.module())
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace every `{{VARIABLE}}` placeholder in `template`.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();

        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Whole-file bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Service,
    HttpClient,
    DbClient,
    Dto,
    ApiUtils,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Service => "service",
            Self::HttpClient => "HTTP client",
            Self::DbClient => "DB client",
            Self::Dto => "DTO",
            Self::ApiUtils => "API utils",
        })
    }
}

/// A client class a service is wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRef {
    pub class_name: String,
    /// File stem inside `clients/`, e.g. `open-meteo.http.client`.
    pub module: String,
}

impl ClientRef {
    pub fn new(class_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            module: module.into(),
        }
    }

    pub fn from_names(names: &DerivedNameSet) -> Self {
        Self::new(&names.class_name, names.module())
    }
}

/// Clients injected into a generated service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceWiring {
    pub http: Option<ClientRef>,
    pub db: Option<ClientRef>,
}

impl ServiceWiring {
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.db.is_none()
    }
}

/// Render a whole file. Services are rendered without clients; use
/// [`render_service`] to wire them.
pub fn render(kind: TemplateKind, names: &DerivedNameSet) -> String {
    match kind {
        TemplateKind::Service => render_service(names, &ServiceWiring::default()),
        TemplateKind::HttpClient | TemplateKind::DbClient => render_client(names),
        TemplateKind::Dto => render_dto(&names.dto),
        TemplateKind::ApiUtils => render_api_utils(),
    }
}

const SERVICE: &str = r#"{{IMPORTS}}

/**
 * {{CLASS_NAME}}: business logic for the {{DOMAIN}} domain.
 */
export class {{CLASS_NAME}} {
{{CONSTRUCTOR}}

  async {{METHOD}}(request: {{REQUEST_DTO}}): Promise<{{RESPONSE_DTO}}{{NULLABLE}}> {
{{METHOD_BODY}}
  }
}

export const {{INSTANCE_NAME}} = new {{CLASS_NAME}}({{INSTANCE_ARGS}});
"#;

/// Service body. The import, constructor, and instantiation lists each get
/// one clause per wired client.
pub fn render_service(names: &DerivedNameSet, wiring: &ServiceWiring) -> String {
    let mut imports = Vec::new();
    let mut params = Vec::new();
    let mut args = Vec::new();

    if let Some(http) = &wiring.http {
        imports.push(import_line(&[&http.class_name], &format!("../clients/{}", http.module)));
        params.push(format!("    private readonly httpClient: {},", http.class_name));
        args.push(format!("new {}()", http.class_name));
    }
    if let Some(db) = &wiring.db {
        imports.push(import_line(&[&db.class_name], &format!("../clients/{}", db.module)));
        params.push(format!("    private readonly dbClient: {},", db.class_name));
        args.push(format!("new {}()", db.class_name));
    }
    imports.push(import_line(
        &[&names.dto.request, &names.dto.response],
        &format!("../dtos/{}", names.dto.module()),
    ));

    let constructor = if params.is_empty() {
        "  constructor() {}".to_string()
    } else {
        format!("  constructor(\n{}\n  ) {{}}", params.join("\n"))
    };

    let method = &names.method_name;
    let body = match (&wiring.http, &wiring.db) {
        (Some(_), Some(_)) => format!(
            "    // TODO: combine httpClient and dbClient results\n    return this.httpClient.{method}(request);"
        ),
        (Some(_), None) => format!("    return this.httpClient.{method}(request);"),
        (None, Some(_)) => format!("    return this.dbClient.{method}(request);"),
        (None, None) => format!("    // TODO: implement {method}\n    return null;"),
    };

    RenderContext::for_names(names)
        .with_variable("IMPORTS", imports.join("\n"))
        .with_variable("CONSTRUCTOR", constructor)
        .with_variable("METHOD_BODY", body)
        .with_variable("NULLABLE", if wiring.is_empty() { " | null" } else { "" })
        .with_variable("INSTANCE_ARGS", args.join(", "))
        .render(SERVICE)
}

const HTTP_CLIENT: &str = r#"import { buildHeaders } from "../utils/api.utils";
import { {{REQUEST_DTO}}, {{RESPONSE_DTO}} } from "../dtos/{{DTO_MODULE}}";

export class {{CLASS_NAME}} {
  private readonly baseUrl = process.env.{{ENV_VAR}} ?? "";

{{METHOD_BLOCK}}
}
"#;

const DB_CLIENT: &str = r#"import { {{REQUEST_DTO}}, {{RESPONSE_DTO}} } from "../dtos/{{DTO_MODULE}}";

export class {{CLASS_NAME}} {
  private readonly connectionString = process.env.{{ENV_VAR}} ?? "";

{{METHOD_BLOCK}}
}
"#;

const HTTP_METHOD: &str = r#"async {{METHOD}}(request: {{REQUEST_DTO}}): Promise<{{RESPONSE_DTO}}> {
  const response = await fetch(`${this.baseUrl}/{{ENDPOINT}}`, {
    method: "POST",
    headers: buildHeaders(),
    body: JSON.stringify(request),
  });

  if (!response.ok) {
    throw new Error(`{{CLASS_NAME}}.{{METHOD}} failed with status ${response.status}`);
  }

  return (await response.json()) as {{RESPONSE_DTO}};
}"#;

const DB_METHOD: &str = r#"async {{METHOD}}(request: {{REQUEST_DTO}}): Promise<{{RESPONSE_DTO}}> {
  // TODO: query the database using this.connectionString
  throw new Error("{{CLASS_NAME}}.{{METHOD}} is not implemented");
}"#;

const SERVICE_METHOD: &str = r#"async {{METHOD}}(request: {{REQUEST_DTO}}): Promise<{{RESPONSE_DTO}} | null> {
  // TODO: implement {{METHOD}}
  return null;
}"#;

/// HTTP or DB client body, depending on `names.kind`.
pub fn render_client(names: &DerivedNameSet) -> String {
    let ctx = RenderContext::for_names(names);
    let (body, method) = match names.kind {
        ArtifactKind::DbClient => (DB_CLIENT, DB_METHOD),
        _ => (HTTP_CLIENT, HTTP_METHOD),
    };
    let block = indent(&ctx.render(method), "  ");
    ctx.with_variable("METHOD_BLOCK", block).render(body)
}

/// Method appended to an existing client class (unindented).
pub fn client_method_stub(
    kind: ArtifactKind,
    class_name: &str,
    method: &str,
    dto: &DtoNames,
) -> String {
    let template = match kind {
        ArtifactKind::DbClient => DB_METHOD,
        _ => HTTP_METHOD,
    };
    RenderContext::new()
        .with_variable("CLASS_NAME", class_name)
        .with_variable("METHOD", method)
        .with_variable("ENDPOINT", to_kebab_case(method))
        .with_dto(dto)
        .render(template)
}

/// Method appended to an existing service class (unindented).
pub fn service_method_stub(method: &str, dto: &DtoNames) -> String {
    RenderContext::new()
        .with_variable("METHOD", method)
        .with_dto(dto)
        .render(SERVICE_METHOD)
}

const DTO: &str = r#"export interface {{REQUEST_DTO}} {
  // TODO: request fields
}

export interface {{RESPONSE_DTO}} {
  // TODO: response fields
}
"#;

pub fn render_dto(dto: &DtoNames) -> String {
    RenderContext::new().with_dto(dto).render(DTO)
}

const API_UTILS: &str = r#"export function buildHeaders(extra: Record<string, string> = {}): Record<string, string> {
  return {
    "Content-Type": "application/json",
    Accept: "application/json",
    ...extra,
  };
}
"#;

pub fn render_api_utils() -> String {
    API_UTILS.to_string()
}

// ============================================================================
// Snippets
// ============================================================================

/// `import { A, B } from "<from>";`
pub fn import_line(names: &[&str], from: &str) -> String {
    format!("import {{ {} }} from \"{from}\";", names.join(", "))
}

/// Toggle field for `src/env.ts`.
pub fn env_field(env_var: &str) -> String {
    format!("{env_var}: process.env.{env_var} !== \"false\"")
}

/// Entry for `toolsMetadata`.
pub fn metadata_entry(tool: &ToolNames) -> String {
    let description = tool.description.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "\"{key}\": {{ name: \"{key}\", description: \"{description}\" }}",
        key = tool.key
    )
}

/// Entry for the `tools` registry.
pub fn registry_entry(tool: &ToolNames, instance_name: &str) -> String {
    format!(
        "\"{}\": (args: {}) => {instance_name}.{}(args)",
        tool.key, tool.dto.request, tool.method_name
    )
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|l| {
            if l.is_empty() {
                String::new()
            } else {
                format!("{prefix}{l}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
