fn main() -> anyhow::Result<()> {
    gitscope::cli::run()
}
