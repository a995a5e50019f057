//! Service definitions built from annotated type declarations.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::Config,
    core::{
        FileInfo, TypeInfo,
        nodes::{MemberKind, Param, TypeExpr},
    },
};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

static METHOD_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[A-Za-z0-9_\-./~:{}]*$").unwrap());

/// Reasons an annotated declaration cannot become a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// First parameter missing or not a named type.
    #[error("method '{method}' must take a request of a named type as its first parameter")]
    InvalidParams { method: String },

    /// Return type is not `Promise<Named>`.
    #[error("method '{method}' must return Promise<T> where T is a named response type")]
    InvalidReturn { method: String },

    #[error("invalid service name \"{0}\": expected an identifier")]
    InvalidServiceName(String),

    #[error("invalid method name {0}: expected an identifier")]
    InvalidMethodName(String),

    #[error("invalid path \"{path}\" on method '{method}': expected an absolute path like /{method}")]
    InvalidPath { method: String, path: String },

    /// Another service already renders to the same file.
    #[error("output file {path} is also generated for service '{other}'")]
    DuplicateOutput { path: String, other: String },
}

/// Annotation keys the generator looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationKeys {
    pub marker: String,
    pub service_name: String,
    pub path: String,
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AnnotationKeys {
    pub fn from_config(config: &Config) -> Self {
        Self {
            marker: config.marker_key.clone(),
            service_name: config.service_name_key.clone(),
            path: config.path_key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceMethod {
    pub name: String,
    /// Path appended to the client's endpoint, `/<name>` unless overridden.
    pub path: String,
    pub req_type: String,
    pub resp_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDefinition {
    /// Module the declaration is imported from.
    pub module: String,
    /// Name of the declared type the client implements.
    pub interface: String,
    pub name: String,
    pub methods: Vec<ServiceMethod>,
}

impl ServiceDefinition {
    /// Build the definition of one marked type.
    ///
    /// Property members are skipped. Methods are checked in source order and
    /// the first invalid one rejects the whole declaration.
    pub fn from_type(
        module: &str,
        typ: &TypeInfo,
        keys: &AnnotationKeys,
    ) -> Result<Self, GenerateError> {
        let interface = typ.node().name.clone();
        let name = match typ.get(&keys.service_name) {
            Some(a) => {
                let value = a.value.trim();
                if !IDENTIFIER.is_match(value) {
                    return Err(GenerateError::InvalidServiceName(value.to_string()));
                }
                value.to_string()
            }
            None => interface.clone(),
        };

        let mut methods = Vec::new();
        for field in &typ.fields {
            let member = field.node();
            let MemberKind::Method { params, returns } = &member.kind else {
                continue;
            };

            if !IDENTIFIER.is_match(&member.name) {
                return Err(GenerateError::InvalidMethodName(member.name.clone()));
            }

            let path = match field.get(&keys.path) {
                Some(a) => a.value.trim().to_string(),
                None => format!("/{}", member.name),
            };
            if !METHOD_PATH.is_match(&path) {
                return Err(GenerateError::InvalidPath {
                    method: member.name.clone(),
                    path,
                });
            }

            let req_type = request_type(params).ok_or_else(|| GenerateError::InvalidParams {
                method: member.name.clone(),
            })?;
            let resp_type = response_type(returns.as_ref()).ok_or_else(|| {
                GenerateError::InvalidReturn {
                    method: member.name.clone(),
                }
            })?;

            methods.push(ServiceMethod {
                name: member.name.clone(),
                path,
                req_type: req_type.to_string(),
                resp_type: resp_type.to_string(),
            });
        }

        Ok(Self {
            module: module.to_string(),
            interface,
            name,
            methods,
        })
    }

    pub fn gen_name(&self) -> String {
        format!("{}Gen", self.name)
    }

    /// Request and response type names, sorted and deduplicated.
    pub fn imports(&self) -> Vec<String> {
        self.methods
            .iter()
            .flat_map(|m| [m.req_type.clone(), m.resp_type.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn request_type(params: &[Param]) -> Option<&str> {
    params.first()?.type_expr.as_ref()?.as_plain_name()
}

fn response_type(returns: Option<&TypeExpr>) -> Option<&str> {
    returns?.unwrap_generic("Promise")?.as_plain_name()
}

/// A marked type and the outcome of turning it into a service.
pub struct ServiceCandidate<'a> {
    pub typ: &'a TypeInfo,
    pub result: Result<ServiceDefinition, GenerateError>,
}

/// Every type of `file` carrying the marker annotation, in source order.
pub fn find_services<'a>(
    file: &'a FileInfo,
    keys: &'a AnnotationKeys,
) -> impl Iterator<Item = ServiceCandidate<'a>> + 'a {
    let module = file.node().module.as_str();
    file.types
        .iter()
        .filter(move |typ| typ.has(&keys.marker))
        .map(move |typ| ServiceCandidate {
            typ,
            result: ServiceDefinition::from_type(module, typ, keys),
        })
}
