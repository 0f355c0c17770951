fn main() -> anyhow::Result<()> {
    aienvs::run()
}
