use crate::error::ChefError;
use uuid::Uuid;

const SUFFIX_LEN: usize = 8;

/// How the per-session storage tables on the backend are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableNaming {
    /// A stable suffix, so history survives restarts.
    Fixed(String),
    /// A fresh suffix every session; earlier chats become unreachable.
    RandomPerSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub conversations: String,
    pub messages: String,
}

impl TableNaming {
    pub fn from_option(suffix: Option<String>) -> Self {
        match suffix {
            Some(s) if !s.trim().is_empty() => TableNaming::Fixed(s.trim().to_string()),
            _ => TableNaming::RandomPerSession,
        }
    }

    pub fn resolve(&self) -> Result<TableNames, ChefError> {
        let suffix = match self {
            TableNaming::Fixed(suffix) => {
                if !suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(
                        ChefError::Config(
                            format!("table suffix '{}' may only hold letters, digits and '_'", suffix)
                        )
                    );
                }
                suffix.clone()
            }
            TableNaming::RandomPerSession => random_suffix(),
        };

        Ok(TableNames {
            conversations: format!("conversations_{}", suffix),
            messages: format!("messages_{}", suffix),
        })
    }
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_string()
}
