use clap::Parser;
use tablang::driver::{self, Config};

fn main() {
    let config = Config::parse();

    if let Err(err) = driver::execute(config) {
        driver::report(&err);
        std::process::exit(1);
    }
}
