use clap::{ Parser, Subcommand };
use crate::config::{ DEFAULT_API_URL, DEFAULT_CONVERSATION_TITLE, DEFAULT_REQUEST_TIMEOUT_SECS };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Backend Args ---
    /// Base URL of the chef backend API.
    #[arg(long, env = "CHEF_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Fixed suffix for the conversation/message tables (e.g. "home" -> conversations_home).
    /// When unset a random suffix is chosen per session and history is not kept across runs.
    #[arg(long, env = "CHEF_TABLE_SUFFIX")]
    pub table_suffix: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "CHEF_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    // --- Session Args ---
    /// Title given to conversations started without an explicit one.
    #[arg(long, env = "CHEF_DEFAULT_TITLE", default_value = DEFAULT_CONVERSATION_TITLE)]
    pub default_title: String,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive chat with the AI chef (default).
    Chat,

    /// Ask a single question and print the answer.
    Ask {
        question: String,
    },

    /// Look up a substitute for an ingredient.
    Substitute {
        ingredient: String,

        /// Comma-separated dietary restrictions (e.g. "vegan, gluten-free").
        #[arg(long, default_value = "")]
        restrictions: String,

        /// Comma-separated ingredients you have on hand.
        #[arg(long, default_value = "")]
        available: String,
    },

    /// Suggest recipe ideas from what you have. Works offline.
    Recipes {
        /// Comma-separated ingredients you have on hand.
        ingredients: String,

        #[arg(long, default_value = "")]
        cuisine: String,

        /// Maximum cooking time, e.g. "45 minutes".
        #[arg(long, default_value = "")]
        time: String,

        #[arg(long, default_value = "")]
        servings: String,

        #[arg(long, default_value = "")]
        restrictions: String,
    },

    /// List stored conversations.
    Conversations,

    /// Print the messages of one conversation.
    Messages {
        conversation_id: i64,
    },
}
