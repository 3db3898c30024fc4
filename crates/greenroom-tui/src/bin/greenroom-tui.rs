fn main() {
    let code = greenroom_tui::cli::run_from_env();
    std::process::exit(code);
}
