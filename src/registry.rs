//! Per-run accumulation of generated code, keyed by hook name.

use indexmap::IndexMap;
use log::debug;

/// Generated code accumulated per hook during one generation run.
///
/// Contributions are appended in the order they are added; hooks are kept in
/// order of their first contribution.
#[derive(Debug, Default, Clone)]
pub struct HookRegistry {
    hooks: IndexMap<String, String>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `code` to the accumulation of `hook`.
    pub fn add<S: Into<String>>(&mut self, hook: S, code: &str) {
        self.hooks.entry(hook.into()).or_default().push_str(code);
    }

    /// Accumulated code for `hook`, empty if nothing was contributed.
    pub fn get(&self, hook: &str) -> &str {
        self.hooks.get(hook).map(String::as_str).unwrap_or_default()
    }

    pub fn contains(&self, hook: &str) -> bool {
        self.hooks.contains_key(hook)
    }

    pub fn hooks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.hooks.iter().map(|(hook, code)| (hook.as_str(), code.as_str()))
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Logs the accumulated code of every hook at debug level.
    pub fn dump(&self) {
        for (hook, code) in self.hooks() {
            debug!("[{hook}]\n{code}");
        }
    }
}
