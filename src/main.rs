fn main() {
    fpp::cli::run();
}
