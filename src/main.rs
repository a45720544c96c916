use clap::Parser;
use serverdeck::cli::{
    handle_completions, handle_config_init, servers, watch, Cli, Commands, ConfigCommands,
    ServersCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Servers(cmd) => {
            let outcome = match cmd {
                ServersCommands::List(args) => servers::handle_servers_list(&args).await,
                ServersCommands::Ping(args) => servers::handle_servers_ping(&args).await,
                ServersCommands::Add(args) => servers::handle_servers_add(&args).await,
                ServersCommands::Remove(args) => servers::handle_servers_remove(&args).await,
            };
            match outcome {
                Ok(output) => {
                    println!("{}", output);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        Commands::Watch(args) => watch::run_watch(args).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
