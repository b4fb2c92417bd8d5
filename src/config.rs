use crate::error::{Result, RouteError};
use serde::{Deserialize, Serialize};

/// Upper bound on `max_hops`; path search is exponential in it.
pub const MAX_HOPS_LIMIT: usize = 6;

/// Search limits for a [`RouteSelector`](crate::router::RouteSelector).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub max_hops: usize,
    /// Stop enumerating after this many paths.
    pub max_paths: Option<usize>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_hops: 3,
            max_paths: None,
        }
    }
}

impl RouterConfig {
    /// # Errors
    ///
    /// [`RouteError::InvalidConfig`] if `max_hops` is outside
    /// `1..=MAX_HOPS_LIMIT` or `max_paths` is `Some(0)`.
    pub fn validate(&self) -> Result<()> {
        if self.max_hops == 0 {
            return Err(RouteError::InvalidConfig("max_hops must be at least 1"));
        }
        if self.max_hops > MAX_HOPS_LIMIT {
            return Err(RouteError::InvalidConfig("max_hops exceeds the hop limit"));
        }
        if self.max_paths == Some(0) {
            return Err(RouteError::InvalidConfig("max_paths must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RouterConfig::default();
        assert_eq!(cfg.max_hops, 3);
        assert_eq!(cfg.max_paths, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let Ok(cfg) = serde_json::from_str::<RouterConfig>(r#"{"max_paths": 16}"#) else {
            panic!("valid config");
        };
        assert_eq!(cfg.max_hops, 3);
        assert_eq!(cfg.max_paths, Some(16));
    }

    #[test]
    fn validate_bounds() {
        let bad = [
            RouterConfig {
                max_hops: 0,
                max_paths: None,
            },
            RouterConfig {
                max_hops: MAX_HOPS_LIMIT + 1,
                max_paths: None,
            },
            RouterConfig {
                max_hops: 2,
                max_paths: Some(0),
            },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(RouteError::InvalidConfig(_))));
        }
    }
}
