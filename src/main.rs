fn main() -> Result<(), eframe::Error> {
    // RUST_LOG=debug shows gesture and store activity
    env_logger::init();

    gridfinity_layout::run_app()
}
