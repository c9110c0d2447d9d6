fn main() {
    if let Err(err) = ontograph::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
