fn main() {
    if let Err(err) = glint_drv::main() {
        eprintln!("{}", err.render());
        std::process::exit(1);
    }
}
