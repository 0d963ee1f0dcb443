fn main() -> std::process::ExitCode {
    walrus_uploader_lib::run()
}
