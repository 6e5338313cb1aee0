//! Identifier derivation.
//!
//! Turns the handful of free-text answers a generator collects into every
//! name a rendered or rewritten file needs. Nothing in here touches the
//! filesystem; all names are a pure function of the inputs plus the fixed
//! suffix table on [`ArtifactKind`].

use std::fmt;

use serde::Serialize;

use crate::domain::casing::{
    to_camel_case, to_kebab_case, to_pascal_case, to_upper_snake_case,
};
use crate::domain::error::DomainError;

/// Extension of every generated source file.
pub const SOURCE_EXT: &str = "ts";

/// Method used when a service or DB client method is left blank.
pub const DEFAULT_DB_METHOD: &str = "getData";

/// Method used when an HTTP client method is left blank.
pub const DEFAULT_HTTP_METHOD: &str = "fetchData";

/// Project name used when the answer is left blank.
pub const DEFAULT_PROJECT_NAME: &str = "mcp-server";

/// The kinds of class a generator can emit inside a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Service,
    HttpClient,
    DbClient,
}

impl ArtifactKind {
    /// Appended to the Pascal-cased artifact name.
    pub const fn class_suffix(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::HttpClient => "HttpClient",
            Self::DbClient => "DbClient",
        }
    }

    /// Inserted between the kebab-cased artifact name and `.ts`.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::HttpClient => "http.client",
            Self::DbClient => "db.client",
        }
    }

    /// Appended to the UPPER_SNAKE artifact name.
    pub const fn env_suffix(self) -> &'static str {
        match self {
            Self::Service => "_SERVICE",
            Self::HttpClient => "_API_URL",
            Self::DbClient => "_DATABASE_URL",
        }
    }

    /// Method name substituted for a blank method answer.
    pub const fn default_method(self) -> &'static str {
        match self {
            Self::HttpClient => DEFAULT_HTTP_METHOD,
            Self::Service | Self::DbClient => DEFAULT_DB_METHOD,
        }
    }

    /// Full file-name ending, e.g. `.http.client.ts`.
    pub fn file_ending(self) -> String {
        format!(".{}.{SOURCE_EXT}", self.file_suffix())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Service => "service",
            Self::HttpClient => "HTTP client",
            Self::DbClient => "DB client",
        })
    }
}

/// Semantic role of a prompt answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputRole {
    ProjectName,
    ProjectDescription,
    DomainName,
    ServiceName,
    ServiceMethodName,
    ClientType,
    ClientName,
    ClientMethodName,
    ToolName,
    ToolDescription,
    YesNo,
    Selection,
}

impl InputRole {
    /// Human-readable field name used in validation messages.
    pub const fn field(self) -> &'static str {
        match self {
            Self::ProjectName => "project name",
            Self::ProjectDescription => "project description",
            Self::DomainName => "domain name",
            Self::ServiceName => "service name",
            Self::ServiceMethodName => "service method name",
            Self::ClientType => "client type",
            Self::ClientName => "client name",
            Self::ClientMethodName => "client method name",
            Self::ToolName => "tool name",
            Self::ToolDescription => "tool description",
            Self::YesNo => "answer",
            Self::Selection => "selection",
        }
    }
}

/// One untyped answer, tagged with the role it plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    role: InputRole,
    value: String,
}

impl RawInput {
    pub fn new(role: InputRole, value: impl Into<String>) -> Self {
        Self {
            role,
            value: value.into().trim().to_string(),
        }
    }

    pub fn role(&self) -> InputRole {
        self.role
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }

    /// The answer, or `default` when it was left blank.
    pub fn or_default(&self, default: &str) -> String {
        if self.is_blank() {
            default.to_string()
        } else {
            self.value.clone()
        }
    }

    /// The answer, rejecting blanks and values with no word characters.
    pub fn require(&self) -> Result<&str, DomainError> {
        if self.is_blank() || to_kebab_case(&self.value).is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: self.role.field(),
            });
        }
        Ok(&self.value)
    }
}

/// Request/response DTO names for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtoNames {
    pub request: String,
    pub response: String,
    /// `createOrder.dto.ts`
    pub file_name: String,
}

impl DtoNames {
    /// Derive from a method name. Callers substitute defaults first.
    pub fn for_method(method: &str) -> Self {
        let pascal = to_pascal_case(method);
        Self {
            request: format!("{pascal}RequestDto"),
            response: format!("{pascal}ResponseDto"),
            file_name: format!("{}.dto.{SOURCE_EXT}", to_camel_case(method)),
        }
    }

    /// Import specifier without the extension, e.g. `createOrder.dto`.
    pub fn module(&self) -> &str {
        strip_source_ext(&self.file_name)
    }
}

/// Every name needed to render or rewrite one domain artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedNameSet {
    pub kind: ArtifactKind,
    /// kebab-case domain directory
    pub domain_dir: String,
    /// kebab-case artifact name
    pub artifact: String,
    pub class_name: String,
    /// camelCase class name, used for exported singletons
    pub instance_name: String,
    pub file_name: String,
    pub method_name: String,
    pub dto: DtoNames,
    pub env_var: String,
}

impl DerivedNameSet {
    /// Import specifier without the extension, e.g. `open-meteo.http.client`.
    pub fn module(&self) -> &str {
        strip_source_ext(&self.file_name)
    }

    /// kebab-case method name, used for endpoints and tool keys.
    pub fn method_slug(&self) -> String {
        to_kebab_case(&self.method_name)
    }
}

/// Names for one MCP tool registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolNames {
    /// kebab-case registry key
    pub key: String,
    pub method_name: String,
    pub dto: DtoNames,
    /// `<UPPER_SNAKE>_ENABLED` toggle
    pub env_var: String,
    pub description: String,
}

/// Derives [`DerivedNameSet`]s and [`ToolNames`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NameDeriver;

impl NameDeriver {
    pub fn new() -> Self {
        Self
    }

    /// Derive the names for an artifact of `kind` inside `domain`.
    ///
    /// A blank `artifact` falls back to the domain name, which then acts as
    /// the class prefix. A blank `method` falls back to the kind's default
    /// before DTO names are derived.
    pub fn derive(
        &self,
        domain: &str,
        kind: ArtifactKind,
        artifact: &str,
        method: &str,
    ) -> DerivedNameSet {
        let artifact = if to_kebab_case(artifact).is_empty() {
            domain
        } else {
            artifact
        };
        let method = self.method_or_default(method, kind);

        let class_name = compose_class_name(artifact, kind);
        DerivedNameSet {
            kind,
            domain_dir: to_kebab_case(domain),
            artifact: to_kebab_case(artifact),
            instance_name: to_camel_case(&class_name),
            class_name,
            file_name: format!(
                "{}.{}.{SOURCE_EXT}",
                to_kebab_case(artifact),
                kind.file_suffix()
            ),
            dto: DtoNames::for_method(&method),
            env_var: format!("{}{}", to_upper_snake_case(artifact), kind.env_suffix()),
            method_name: method,
        }
    }

    /// Derive the names for a tool registration.
    pub fn tool(&self, tool: &str, description: &str) -> ToolNames {
        let key = to_kebab_case(tool);
        let method_name = to_camel_case(tool);
        let description = if description.trim().is_empty() {
            format!("TODO: describe {key}")
        } else {
            description.trim().to_string()
        };

        ToolNames {
            dto: DtoNames::for_method(&method_name),
            env_var: format!("{}_ENABLED", to_upper_snake_case(tool)),
            key,
            method_name,
            description,
        }
    }

    /// camelCase method, or the kind's default when blank.
    pub fn method_or_default(&self, method: &str, kind: ArtifactKind) -> String {
        let method = to_camel_case(method);
        if method.is_empty() {
            kind.default_method().to_string()
        } else {
            method
        }
    }
}

/// `<Pascal(artifact)><Suffix>`.
pub fn compose_class_name(artifact: &str, kind: ArtifactKind) -> String {
    format!("{}{}", to_pascal_case(artifact), kind.class_suffix())
}

/// camelCase instance name for an exported class.
pub fn instance_name_for(class_name: &str) -> String {
    to_camel_case(class_name)
}

fn strip_source_ext(file_name: &str) -> &str {
    file_name
        .strip_suffix(SOURCE_EXT)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(file_name)
}
