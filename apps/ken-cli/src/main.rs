use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	ken_cli::run(ken_cli::Args::parse()).await
}
