use std::fmt;
use std::str::FromStr;

/// One line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Chat {
        content: String,
    },
    NewConversation {
        title: Option<String>,
    },
    ListConversations,
    OpenConversation {
        id: i64,
    },
    History,
    /// `/sub ingredient | restrictions | available`
    Substitute {
        fields: Vec<String>,
    },
    /// `/recipes ingredients | cuisine | time | servings | restrictions`
    Recipes {
        fields: Vec<String>,
    },
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseCommandError {
    message: String,
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseCommandError {}

fn split_fields(rest: &str) -> Vec<String> {
    rest.split('|').map(|s| s.trim().to_string()).collect()
}

impl FromStr for ConsoleCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if !line.starts_with('/') {
            return Ok(ConsoleCommand::Chat { content: line.to_string() });
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "/new" => Ok(ConsoleCommand::NewConversation {
                title: Some(rest.to_string()).filter(|t| !t.is_empty()),
            }),
            "/list" => Ok(ConsoleCommand::ListConversations),
            "/open" =>
                rest
                    .parse::<i64>()
                    .map(|id| ConsoleCommand::OpenConversation { id })
                    .map_err(|_| ParseCommandError {
                        message: format!("/open expects a conversation id, got '{}'", rest),
                    }),
            "/history" => Ok(ConsoleCommand::History),
            "/sub" => Ok(ConsoleCommand::Substitute { fields: split_fields(rest) }),
            "/recipes" => Ok(ConsoleCommand::Recipes { fields: split_fields(rest) }),
            "/help" => Ok(ConsoleCommand::Help),
            "/quit" | "/exit" => Ok(ConsoleCommand::Quit),
            _ =>
                Err(ParseCommandError {
                    message: format!("Unknown command: '{}' (try /help)", name),
                }),
        }
    }
}
