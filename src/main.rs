fn main() -> anyhow::Result<()> {
    scan_filter::run()
}
