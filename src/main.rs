use advisor::cli::{
    handle_completions, handle_config_init, handle_dataset_inspect, handle_recommend, Cli,
    Commands, ConfigCommands, DatasetCommands,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => advisor::cli::serve::run_serve(args).await,
        Commands::Recommend(args) => handle_recommend(&args).map(|output| println!("{}", output)),
        Commands::Dataset(dataset_cmd) => match dataset_cmd {
            DatasetCommands::Inspect(args) => {
                handle_dataset_inspect(&args).map(|output| println!("{}", output))
            }
        },
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
