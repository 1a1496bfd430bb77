//! card-bot: send website cards through the GeWe gateway. Config from env and the plugin config file.

use anyhow::Result;
use card_cli::{load_config, run_repl, CardBot, Cli, Commands};
use card_core::init_tracing;
use clap::Parser;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::HelpText => {
            print!("{}", card_plugin::help_text(config.sites()));
            Ok(())
        }
        Commands::Sites => {
            print_sites(&config);
            Ok(())
        }
        Commands::Send { to, keyword } => {
            init_tracing(&config.log_file)?;
            let bot = CardBot::new(config)?;
            let text = format!("card {}", keyword.join(" "));
            if let Some(reply) = bot.handle_text(to.as_deref(), &text).await? {
                println!("{}", reply);
            }
            Ok(())
        }
        Commands::Repl { to } => {
            init_tracing(&config.log_file)?;
            let bot = CardBot::new(config)?;
            let stdin = BufReader::new(tokio::io::stdin());
            run_repl(&bot, to.as_deref(), stdin, tokio::io::stdout()).await
        }
    }
}

fn print_sites(config: &card_plugin::AppConfig) {
    let resolver = card_plugin::SiteResolver::new(std::sync::Arc::new(config.sites().clone()));
    if resolver.registry().is_empty() {
        println!("No sites configured (config: {}).", config.config_path.display());
        return;
    }

    println!(
        "{} site(s) (config: {}):\n",
        resolver.registry().len(),
        config.config_path.display()
    );
    println!("{:<12} {:<36} {:<20} {}", "name", "url", "title", "thumb");
    println!("{}", "-".repeat(100));
    for name in resolver.registry().names() {
        match resolver.resolve(name) {
            Some(d) => println!(
                "{:<12} {:<36} {:<20} {}",
                name,
                d.url,
                d.title,
                if d.thumb.is_empty() { "-" } else { d.thumb.as_str() }
            ),
            None => println!("{:<12} (empty url, skipped)", name),
        }
    }
}
