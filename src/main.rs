fn main() {
    #[cfg(feature = "cli")]
    oxirle::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("oxirle: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
