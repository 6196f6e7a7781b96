fn main() {
    if let Err(err) = chronolane::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
