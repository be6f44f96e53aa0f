use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = braille_grid::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
