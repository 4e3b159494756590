fn main() {
    if let Err(err) = stack_dump_sql::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
