use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "linguad")]
#[command(about = "Multilingual language identification HTTP service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    pub config: String,

    /// Model directory or Hugging Face repo id (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Minimum score for a language to be reported (overrides config)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    pub listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8000")]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
