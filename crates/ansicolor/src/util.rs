use std::ffi::OsString;

/// Read-only access to environment variables.
///
/// Color tier detection only asks a few questions of the environment. This
/// trait answers them on top of [`Environment::var`], so that the process
/// environment and test doubles share the same logic.
pub(crate) trait Environment {
    /// Look up the raw value of the variable.
    fn var(&self, key: &str) -> Option<OsString>;

    /// Look up the value of the variable, if it is valid Unicode.
    fn text(&self, key: &str) -> Option<String> {
        self.var(key).and_then(|value| value.into_string().ok())
    }

    /// Determine whether the variable is set, even if empty.
    fn is_set(&self, key: &str) -> bool {
        self.var(key).is_some()
    }

    /// Determine whether the variable is set to a non-empty value.
    fn is_non_empty(&self, key: &str) -> bool {
        self.var(key).is_some_and(|value| !value.is_empty())
    }

    /// Determine whether the variable is set to exactly the value.
    fn has_value(&self, key: &str, value: &str) -> bool {
        self.var(key).is_some_and(|actual| actual == value)
    }
}

/// The environment of the current process.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}


#[cfg(test)]
pub(crate) use test::FakeEnv;
