pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod forms;
pub mod models;
pub mod session;

use api::new_client;
use cli::{ Args, Command };
use config::ApiConfig;
use forms::{ RecipeForm, SubstitutionForm };
use log::info;
use models::chat::LocalMessage;
use session::ChefSession;
use std::error::Error;
use tokio::io::BufReader;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = ApiConfig::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("API URL: {}", config.base_url);
    info!("Conversations Table: {}", config.tables.conversations);
    info!("Messages Table: {}", config.tables.messages);
    info!("Durable History: {}", args.table_suffix.is_some());
    info!("Request Timeout: {:?}", config.request_timeout);
    info!("Default Title: {}", args.default_title);
    info!("-------------------------");

    let api = new_client(&config)?;
    let session = ChefSession::new(api.clone(), args.default_title.clone());

    match args.command.clone().unwrap_or(Command::Chat) {
        Command::Chat => {
            let stdin = BufReader::new(tokio::io::stdin());
            console::run_chat(&session, stdin, tokio::io::stdout()).await?;
        }
        Command::Ask { question } => {
            let answer = api.ask_chef(&question).await?;
            println!("{}", answer);
        }
        Command::Substitute { ingredient, restrictions, available } => {
            let mut form = SubstitutionForm::new();
            form.ingredient = ingredient;
            form.dietary_restrictions = restrictions;
            form.available_ingredients = available;
            let found = form.submit(&session).await?;
            print!("{}", console::render_substitution(found));
        }
        Command::Recipes { ingredients, cuisine, time, servings, restrictions } => {
            let mut form = RecipeForm::new();
            form.ingredients = ingredients;
            form.cuisine = cuisine;
            form.cooking_time = time;
            form.servings = servings;
            form.dietary_restrictions = restrictions;
            let suggestions = form.submit()?;
            print!("{}", console::render_suggestions(suggestions));
        }
        Command::Conversations => {
            let conversations = session.load_conversations().await?;
            print!("{}", console::render_conversations(&conversations, None));
        }
        Command::Messages { conversation_id } => {
            let messages: Vec<LocalMessage> = api
                .list_messages(conversation_id).await?
                .into_iter()
                .map(LocalMessage::confirmed)
                .collect();
            print!("{}", console::render_messages(&messages));
        }
    }

    Ok(())
}
