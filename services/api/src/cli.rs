use crate::demo::{run_demo, DemoArgs};
use crate::infra::{collect_arguments, parse_argument};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mortgage_prequal::config::AppConfig;
use mortgage_prequal::error::AppError;
use mortgage_prequal::qualification::ToolDispatcher;
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(
    name = "Mortgage Pre-Qualification Tools",
    about = "Run the CMHC and OSFI B-20 pre-qualification tools over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Invoke a single tool and print the response envelope
    Invoke(InvokeArgs),
    /// Print the schema of every registered tool
    Tools,
    /// Walk a sample applicant through the four mortgage tools
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct InvokeArgs {
    /// Tool name, optionally prefixed with a gateway target (`Target___tool`)
    pub(crate) tool: String,
    /// Tool argument as key=value; repeatable
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_argument)]
    pub(crate) args: Vec<(String, Value)>,
    /// Tool arguments as a JSON object; --arg values take precedence
    #[arg(long)]
    pub(crate) json: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Invoke(args) => run_invoke(args, &load_dispatcher()?),
        Command::Tools => run_tools(&load_dispatcher()?),
        Command::Demo(args) => run_demo(args, &load_dispatcher()?),
    }
}

/// Builds a dispatcher from the same rule overrides the HTTP service honours.
fn load_dispatcher() -> Result<ToolDispatcher, AppError> {
    let config = AppConfig::load()?;
    Ok(ToolDispatcher::new(config.qualification))
}

fn run_invoke(args: InvokeArgs, dispatcher: &ToolDispatcher) -> Result<(), AppError> {
    let arguments = collect_arguments(args.json.as_deref(), args.args)?;
    let response = dispatcher.handle(&args.tool, &arguments);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_tools(dispatcher: &ToolDispatcher) -> Result<(), AppError> {
    let tools = json!({ "tools": dispatcher.schemas() });
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}
