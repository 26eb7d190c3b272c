//! Environment-driven configuration.
//!
//! The table that represents a user account is not hard-coded: it is
//! resolved once from `MURMUR_AUTH_USER_TABLE` and threaded through the
//! migration engine and storage, so deployments that already have an
//! accounts table can point the schema at it.

/// Env var naming the auth table. Default: `users`.
pub const AUTH_USER_TABLE_VAR: &str = "MURMUR_AUTH_USER_TABLE";

const DEFAULT_AUTH_USER_TABLE: &str = "users";

/// Resolved schema-level configuration.
#[derive(Debug, Clone)]
pub struct SchemaConfig {
    auth_user_table: String,
}

impl SchemaConfig {
    /// Resolve from the process environment. Invalid values are logged at
    /// warn level and fall back to the default, same as every other env
    /// knob in this workspace.
    pub fn from_env() -> Self {
        match std::env::var(AUTH_USER_TABLE_VAR) {
            Ok(v) if is_valid_table_name(&v) => Self { auth_user_table: v },
            Ok(v) => {
                tracing::warn!(
                    var = AUTH_USER_TABLE_VAR,
                    value = %v,
                    default = DEFAULT_AUTH_USER_TABLE,
                    "invalid auth table name, using default"
                );
                Self::default()
            },
            Err(_) => Self::default(),
        }
    }

    /// Build with an explicit table name. Returns `None` when the name is
    /// not a bare SQL identifier — it gets interpolated into DDL, so
    /// anything else is rejected up front.
    pub fn with_auth_user_table(name: &str) -> Option<Self> {
        is_valid_table_name(name).then(|| Self { auth_user_table: name.to_owned() })
    }

    /// Name of the table holding user accounts.
    pub fn auth_user_table(&self) -> &str {
        &self.auth_user_table
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self { auth_user_table: DEFAULT_AUTH_USER_TABLE.to_owned() }
    }
}

fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_auth_table() {
        let config = SchemaConfig::default();
        assert_eq!(config.auth_user_table(), "users");
    }

    #[test]
    fn test_explicit_auth_table() {
        let config = SchemaConfig::with_auth_user_table("accounts").unwrap();
        assert_eq!(config.auth_user_table(), "accounts");
    }

    #[test]
    fn test_rejects_non_identifier_table() {
        assert!(SchemaConfig::with_auth_user_table("").is_none());
        assert!(SchemaConfig::with_auth_user_table("users; DROP TABLE posts").is_none());
        assert!(SchemaConfig::with_auth_user_table("1users").is_none());
    }

    #[test]
    fn test_from_env_invalid_falls_back() {
        let var_name = AUTH_USER_TABLE_VAR;
        std::env::set_var(var_name, "not a table!");
        let config = SchemaConfig::from_env();
        assert_eq!(config.auth_user_table(), "users");
        std::env::remove_var(var_name);
    }

    #[test]
    fn test_env_parse_valid_value() {
        let var_name = "TEST_ENV_PARSE_VALID_55101";
        std::env::set_var(var_name, "42");
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 42);
        std::env::remove_var(var_name);
    }

    #[test]
    fn test_env_parse_invalid_value() {
        let var_name = "TEST_ENV_PARSE_INVALID_55102";
        std::env::set_var(var_name, "banana");
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
        std::env::remove_var(var_name);
    }

    #[test]
    fn test_env_parse_missing_var() {
        let var_name = "TEST_ENV_PARSE_MISSING_55103";
        std::env::remove_var(var_name);
        let result: u32 = env_parse_with_default(var_name, 10);
        assert_eq!(result, 10);
    }
}
