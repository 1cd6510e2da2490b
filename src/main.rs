fn main() {
    if let Err(err) = pipeline_audit::cli::run() {
        pipeline_audit::ui::eprintln_error(&err);
        std::process::exit(pipeline_audit::exit::exit_code(&err));
    }
}
