fn main() -> Result<(), Box<dyn std::error::Error>> {
    namebridge_cli::run()
}
