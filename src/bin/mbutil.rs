//! mbutil binary entry point

fn main() -> anyhow::Result<()> {
    mbutil::cli::run_cli()
}
