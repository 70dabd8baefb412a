fn main() {
    if let Err(err) = stakeholder_venn::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
