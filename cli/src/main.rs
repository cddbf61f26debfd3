//! `helpdesk` binary: run one support turn and print the conversation.

mod logging;

use clap::Parser;
use cli::{render, run, RunOptions, DEFAULT_MESSAGE, DEFAULT_ORDER_ID};
use helpdesk::{SupportBuildConfig, ToolCallPolicy};

#[derive(Parser, Debug)]
#[command(name = "helpdesk")]
#[command(about = "Helpdesk: one turn of the order-support agent")]
struct Args {
    /// Order the conversation is about
    #[arg(long, value_name = "ID", env = "HELPDESK_ORDER_ID", default_value = DEFAULT_ORDER_ID)]
    order_id: String,

    /// User message (or pass as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Positional args: user message when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Model name (default: OPENAI_MODEL, MODEL, or gpt-4)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Which requested tool calls to run: first_only or all
    #[arg(long, value_name = "POLICY")]
    tool_call_policy: Option<ToolCallPolicy>,

    /// Print the final state as JSON instead of one line per message
    #[arg(long)]
    json: bool,

    /// Log to stderr (unless LOG_FILE is set)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_options(self) -> RunOptions {
        let message = self
            .message
            .or_else(|| (!self.rest.is_empty()).then(|| self.rest.join(" ")))
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        RunOptions {
            order_id: self.order_id,
            message,
            model: self.model,
            tool_call_policy: self.tool_call_policy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = helpdesk_config::load_and_apply("helpdesk", None::<&std::path::Path>);
    let args = Args::parse();
    logging::init(args.verbose)?;

    match loaded {
        Ok(applied) => {
            for (key, source) in &applied {
                tracing::debug!(key = %key, ?source, "config applied");
            }
        }
        Err(e) => {
            eprintln!("helpdesk: {}", cli::RunError::from(e));
            std::process::exit(1);
        }
    }

    let json = args.json;
    let opts = args.into_options();
    let config = match SupportBuildConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("helpdesk: {}", cli::RunError::from(e));
            std::process::exit(1);
        }
    };

    let output = match run(&opts, config).await {
        Ok(state) => render(&state, json),
        Err(e) => Err(e),
    };
    match output {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            eprintln!("helpdesk: {}", e);
            std::process::exit(1);
        }
    }
}
