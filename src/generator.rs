//! Hook generators.
//!
//! Each hook kind renders one template per module. The generator maps the
//! module signature onto the brick instances its template expects and
//! appends the rendered code to the hook's accumulation.

use crate::config::Conventions;
use crate::error::{Error, Result};
use crate::registry::HookRegistry;
use crate::signature::Module;
use crate::template::{BrickInstance, BrickMap, Template};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integration hooks a module contributes code to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Scanner rule turning the statement keyword into its token
    ScannerKeyword,
    /// Parser token declaration
    ParserToken,
    /// Parser rule mapping the token to the statement enum
    ParserIdentifier,
    /// Statement enum entry
    StatementEnum,
    /// Interpreter `case` executing the statement
    StatementExec,
    /// `#include` of the module source
    ModuleInclude,
}

impl HookKind {
    pub const ALL: [HookKind; 6] = [
        HookKind::ScannerKeyword,
        HookKind::ParserToken,
        HookKind::ParserIdentifier,
        HookKind::StatementEnum,
        HookKind::StatementExec,
        HookKind::ModuleInclude,
    ];

    /// Hook name as used in host file markers and template names.
    pub fn name(self) -> &'static str {
        match self {
            HookKind::ScannerKeyword => "scanner_keyword",
            HookKind::ParserToken => "parser_token",
            HookKind::ParserIdentifier => "parser_identifier",
            HookKind::StatementEnum => "statement_enum",
            HookKind::StatementExec => "statement_exec",
            HookKind::ModuleInclude => "module_include",
        }
    }

    /// Builds the brick map for `module`'s contribution to this hook.
    ///
    /// # Errors
    /// * `Error::UnsupportedParameterType` if a `statement_exec` parameter
    ///   type has no fetch call
    pub fn brick_map(self, module: &Module, conventions: &Conventions) -> Result<BrickMap> {
        let name = &module.signature().function_name;
        let enum_type = conventions.enum_identifier(name);
        let token = conventions.token_identifier(name);

        let bricks = match self {
            HookKind::ScannerKeyword => BrickMap::with_body(instance([
                ("<statement_name>", name.clone()),
                ("<statement_token>", token),
            ])),
            HookKind::ParserToken => BrickMap::with_body(instance([("<statement_token>", token)])),
            HookKind::ParserIdentifier => BrickMap::with_body(instance([
                ("<statement_enum_type>", enum_type),
                ("<statement_token>", token),
            ])),
            HookKind::StatementEnum => {
                BrickMap::with_body(instance([("<statement_enum_type>", enum_type)]))
            }
            HookKind::StatementExec => statement_exec_bricks(module, conventions, enum_type)?,
            HookKind::ModuleInclude => {
                BrickMap::with_body(instance([("<module_file_name>", module.file_name())]))
            }
        };
        Ok(bricks)
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HookKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HookKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::ConfigError(format!("unknown hook '{s}'")))
    }
}

fn instance<const N: usize>(pairs: [(&str, String); N]) -> BrickInstance {
    pairs.into_iter().map(|(key, value)| (key.to_string(), value)).collect()
}

fn statement_exec_bricks(
    module: &Module,
    conventions: &Conventions,
    enum_type: String,
) -> Result<BrickMap> {
    let signature = module.signature();
    let num_param = signature.parameters.len().to_string();

    let mut bricks = BrickMap::with_body(instance([
        ("<statement_enum_type>", enum_type.clone()),
        ("<num_param>", num_param.clone()),
    ]));

    let mut fetches = Vec::with_capacity(signature.parameters.len());
    for (id, param) in signature.parameters.iter().enumerate() {
        let fetch_call = conventions.fetch_call(&param.param_type).ok_or_else(|| {
            Error::UnsupportedParameterType {
                param_type: param.param_type.clone(),
                module: module.file_name(),
            }
        })?;
        fetches.push(instance([
            ("<param_type>", param.param_type.clone()),
            ("<param_name>", param.name.clone()),
            ("<param_fetch_call>", fetch_call.to_string()),
            ("<param_id>", id.to_string()),
        ]));
    }
    bricks.insert("parameter_fetch", fetches);

    bricks.push("parameter_assert", instance([("<num_param>", num_param)]));

    let param_list =
        signature.parameters.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ");
    bricks.push(
        "module_call",
        instance([
            ("<io_func_call>", signature.function_name.clone()),
            ("<io_func_param_list>", param_list),
            ("<statement_enum_type>", enum_type),
        ]),
    );

    Ok(bricks)
}

/// Renders `template` for `module` and appends the code to `kind`'s hook.
///
/// # Errors
/// * `Error::UnknownHook` if `template` belongs to another hook
/// * `Error::SignatureNotFound` if the module has no valid signature
/// * `Error::InvalidPlaceholder` in strict mode for undelimited placeholders
/// * Any template rendering error
pub fn generate(
    kind: HookKind,
    template: &Template,
    module: &Module,
    conventions: &Conventions,
    strict_placeholders: bool,
    registry: &mut HookRegistry,
) -> Result<()> {
    if template.name() != kind.name() {
        return Err(Error::UnknownHook {
            hook: kind.name().to_string(),
            template: template.name().to_string(),
        });
    }
    if !module.signature().is_valid() {
        return Err(Error::SignatureNotFound { module: module.path().display().to_string() });
    }

    let bricks = kind.brick_map(module, conventions)?;
    if strict_placeholders {
        bricks.validate_placeholders()?;
    }
    let code = template.render(&bricks)?;
    registry.add(kind.name(), &code);
    Ok(())
}
