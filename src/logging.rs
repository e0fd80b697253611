use env_logger::Env;

pub fn init_logging() {
    // RUST_LOG wins over the default level; a second init (tests) is ignored.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
