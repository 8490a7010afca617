fn main() {
    #[cfg(feature = "cli")]
    zlc::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("zlc: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
