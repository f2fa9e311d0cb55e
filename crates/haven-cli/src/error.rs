use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let msg = err.to_string().to_lowercase();

    if msg.contains("api key") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Set OPENAI_API_KEY in your environment, or add it to");
        eprintln!("  {} under [api_keys]", "~/.config/haven/config.toml".dimmed());
    }

    if msg.contains("thread not found") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  List available threads with:");
        eprintln!("  {} haven thread list", "$".dimmed());
    }

    std::process::exit(1);
}
