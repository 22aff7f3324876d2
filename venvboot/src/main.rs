use anyhow::Result;

fn main() -> Result<()> {
    venvboot::run_cli()
}
